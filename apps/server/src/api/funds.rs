use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};

use pensia_core::funds::FundRecord;

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;
use crate::models::{LatestFundDataRequest, SearchProgramsQuery, SearchQuery};

/// Most recent record for one (classification, fund id) pair.
async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<FundRecord>> {
    let record = state
        .fund_service
        .get_latest_fund(&query.classification, &query.fund_id)
        .await?
        .ok_or_else(|| {
            ApiError::not_found(format!("no fund found for id {}", query.fund_id))
        })?;
    Ok(Json(record))
}

/// Free-text program search within one classification.
async fn search_programs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchProgramsQuery>,
) -> ApiResult<Json<Vec<FundRecord>>> {
    let records = state
        .fund_service
        .search_programs(&query.query, &query.fund_type)
        .await?;
    Ok(Json(records))
}

/// Most recent record per requested fund, across all category groups.
async fn get_latest_fund_data(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LatestFundDataRequest>,
) -> ApiResult<Json<Vec<FundRecord>>> {
    let records = state.fund_service.get_latest_fund_data(&body.fund_ids).await?;
    Ok(Json(records))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/search", get(search))
        .route("/search-programs", get(search_programs))
        .route("/get-latest-fund-data", post(get_latest_fund_data))
}
