//! Rating payloads
//!
//! A rating carries a star count and may be linked to any number of users
//! and groups at creation time.

use std::collections::HashSet;

use serde::Deserialize;

use super::validation::{required, ValidationError};

/// POST /rates/ body
#[derive(Debug, Default, Deserialize)]
pub struct CreateRateRequest {
    pub stars: Option<i64>,
    #[serde(default)]
    pub user_ids: Vec<i64>,
    #[serde(default)]
    pub group_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRate {
    pub stars: i64,
    pub user_ids: Vec<i64>,
    pub group_ids: Vec<i64>,
}

impl CreateRateRequest {
    /// Duplicate ids are collapsed; link order follows first appearance.
    pub fn validate(self) -> Result<NewRate, ValidationError> {
        Ok(NewRate {
            stars: required(self.stars, "Rate", "stars")?,
            user_ids: dedup(self.user_ids),
            group_ids: dedup(self.group_ids),
        })
    }
}

fn dedup(mut ids: Vec<i64>) -> Vec<i64> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.retain(|id| seen.insert(*id));
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_required() {
        let err = CreateRateRequest::default().validate().unwrap_err();
        assert_eq!(err.to_string(), "Rate stars is required");
    }

    #[test]
    fn link_ids_are_deduplicated() {
        let rate = CreateRateRequest {
            stars: Some(4),
            user_ids: vec![2, 1, 2],
            group_ids: vec![],
        }
        .validate()
        .unwrap();
        assert_eq!(rate.user_ids, vec![2, 1]);
    }

    #[test]
    fn large_id_lists_keep_first_appearance_order() {
        let ids: Vec<i64> = (0..10_000).rev().chain(0..10_000).collect();
        let rate = CreateRateRequest {
            stars: Some(1),
            user_ids: vec![],
            group_ids: ids,
        }
        .validate()
        .unwrap();
        assert_eq!(rate.group_ids, (0..10_000).rev().collect::<Vec<i64>>());
    }
}
