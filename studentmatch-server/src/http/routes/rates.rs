//! Rating endpoints
//!
//! Ratings have no PUT; links are fixed at creation.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use super::groups::GroupSimpleResponse;
use super::users::UserSimpleResponse;
use crate::db::repos::{RateDetail, RateRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ResourceId};
use crate::http::server::AppState;
use crate::models::CreateRateRequest;

#[derive(Debug, Serialize)]
pub struct RateResponse {
    pub id: i64,
    pub stars: i64,
    pub users: Vec<UserSimpleResponse>,
    pub groups: Vec<GroupSimpleResponse>,
}

impl From<RateDetail> for RateResponse {
    fn from(d: RateDetail) -> Self {
        Self {
            id: d.rate.id,
            stars: d.rate.stars,
            users: d.users.into_iter().map(UserSimpleResponse::from).collect(),
            groups: d.groups.into_iter().map(GroupSimpleResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct RateList {
    pub rates: Vec<RateResponse>,
}

/// POST /rates/
async fn create_rate(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateRateRequest>,
) -> Result<(StatusCode, Json<RateResponse>), ApiError> {
    let rate = RateRepo::new(&state.pool).create(req.validate()?).await?;
    Ok((StatusCode::CREATED, Json(RateResponse::from(rate))))
}

/// GET /rates/
async fn list_rates(State(state): State<Arc<AppState>>) -> Result<Json<RateList>, ApiError> {
    let rates = RateRepo::new(&state.pool).list().await?;
    Ok(Json(RateList {
        rates: rates.into_iter().map(RateResponse::from).collect(),
    }))
}

/// GET /rates/{id}/
async fn get_rate(
    State(state): State<Arc<AppState>>,
    ResourceId(id): ResourceId,
) -> Result<Json<RateResponse>, ApiError> {
    let rate = RateRepo::new(&state.pool).get(id).await?;
    Ok(Json(RateResponse::from(rate)))
}

/// DELETE /rates/{id}/
async fn delete_rate(
    State(state): State<Arc<AppState>>,
    ResourceId(id): ResourceId,
) -> Result<Json<RateResponse>, ApiError> {
    let rate = RateRepo::new(&state.pool).delete(id).await?;
    Ok(Json(RateResponse::from(rate)))
}

/// Rating routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/rates/", get(list_rates).post(create_rate))
        .route("/rates/{id}/", get(get_rate).delete(delete_rate))
}
