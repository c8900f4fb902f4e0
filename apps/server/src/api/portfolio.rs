use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};

use pensia_core::funds::{aggregate, FundSnapshot, Period, PortfolioLine, PortfolioSummary};

use crate::error::ApiResult;
use crate::main_lib::AppState;
use crate::models::{CalculateTwrRequest, PortfolioSummaryRequest};

/// Time-weighted return per fund over an inclusive month window.
async fn calculate_twr(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CalculateTwrRequest>,
) -> ApiResult<Json<Vec<FundSnapshot>>> {
    let start = Period::from_date_str(&body.start_date)?;
    let end = Period::from_date_str(&body.end_date)?;
    let snapshots = state
        .twr_service
        .compute_twr(&body.fund_ids, start, end)
        .await?;
    Ok(Json(snapshots))
}

/// Asset-weighted aggregation of a client-submitted portfolio.
async fn portfolio_summary(
    Json(body): Json<PortfolioSummaryRequest>,
) -> ApiResult<Json<PortfolioSummary>> {
    let lines: Vec<PortfolioLine> = body.lines.into_iter().map(PortfolioLine::from).collect();
    Ok(Json(aggregate(&lines)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/calculate-twr", post(calculate_twr))
        .route("/portfolio/summary", post(portfolio_summary))
}
