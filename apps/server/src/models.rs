//! Request DTOs for the HTTP API.

use serde::Deserialize;

use pensia_core::funds::{FundSnapshot, PortfolioLine};
use pensia_core::utils::parse_optional_decimal;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateTwrRequest {
    pub fund_ids: Vec<String>,
    /// `YYYY-MM-DD`; truncated to its month.
    pub start_date: String,
    /// `YYYY-MM-DD`; truncated to its month.
    pub end_date: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestFundDataRequest {
    pub fund_ids: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(alias = "fundClassification")]
    pub classification: String,
    pub fund_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchProgramsQuery {
    pub query: String,
    pub fund_type: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummaryRequest {
    pub lines: Vec<PortfolioLineDto>,
}

/// A portfolio line as submitted by the client. The allocation arrives as
/// free text and may carry thousands separators; anything unparseable is
/// treated as no allocation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioLineDto {
    #[serde(flatten)]
    pub snapshot: FundSnapshot,
    pub allocation: Option<String>,
}

impl From<PortfolioLineDto> for PortfolioLine {
    fn from(dto: PortfolioLineDto) -> Self {
        PortfolioLine {
            allocation: parse_optional_decimal(dto.allocation),
            snapshot: dto.snapshot,
        }
    }
}
