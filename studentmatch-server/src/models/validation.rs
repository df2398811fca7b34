//! Validation error types

use std::fmt;

/// Validation error for incoming request bodies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is absent, e.g. `User netid is required`
    Required {
        resource: &'static str,
        field: &'static str,
    },

    /// An update named none of the fields it may change
    NoUpdatableField {
        resource: &'static str,
        fields: &'static str,
    },

    /// Body is not JSON, or a field has the wrong JSON type
    Malformed { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required { resource, field } => write!(f, "{} {} is required", resource, field),
            Self::NoUpdatableField { resource, fields } => {
                write!(f, "At least one of {} {} is required", resource, fields)
            }
            Self::Malformed { reason } => write!(f, "Invalid request body: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Unwrap a required field or report it as missing.
pub(crate) fn required<T>(
    value: Option<T>,
    resource: &'static str,
    field: &'static str,
) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::Required { resource, field })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::Required {
            resource: "User",
            field: "netid",
        };
        assert_eq!(err.to_string(), "User netid is required");

        let err = ValidationError::NoUpdatableField {
            resource: "task",
            fields: "name, description, or due date",
        };
        assert_eq!(
            err.to_string(),
            "At least one of task name, description, or due date is required"
        );
    }

    #[test]
    fn required_passes_value_through() {
        assert_eq!(required(Some(3), "Rate", "stars"), Ok(3));
        assert_eq!(
            required::<i64>(None, "Rate", "stars"),
            Err(ValidationError::Required {
                resource: "Rate",
                field: "stars"
            })
        );
    }
}
