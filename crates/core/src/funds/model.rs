//! Domain models for the funds module.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{CategoryGroup, Period};

/// One fund's published figures for one report period.
///
/// `(fund_id, report_period)` is unique within a category group. Numeric
/// fields are optional because the upstream feeds omit them freely; the
/// exposure fields hold raw (un-normalized) values that only become
/// percentages after division by `total_assets`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundRecord {
    pub fund_id: String,
    pub category: CategoryGroup,
    pub classification: String,
    pub name: String,
    /// Upstream search label, "`<fund_id> - <name>`".
    pub display_name: String,
    pub track_name: Option<String>,
    pub year_to_date_yield: Option<Decimal>,
    pub trailing_3yr_yield: Option<Decimal>,
    pub trailing_5yr_yield: Option<Decimal>,
    pub equity_exposure: Option<Decimal>,
    pub foreign_currency_exposure: Option<Decimal>,
    pub foreign_exposure: Option<Decimal>,
    pub total_assets: Option<Decimal>,
    pub report_period: Period,
    pub monthly_yield: Option<Decimal>,
}

/// A computed, transient view of one fund over a requested window.
///
/// Created fresh on each TWR computation and never persisted. The static
/// fields are copied only from the record whose period equals the
/// requested end period; when that record is absent they stay `None`
/// rather than falling back to an earlier period, since exposures are
/// point-in-time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundSnapshot {
    pub fund_id: String,
    pub display_name: Option<String>,
    pub classification: Option<String>,
    /// Compounded return over the window, in percent. `None` means no
    /// data, never zero.
    pub twr: Option<Decimal>,
    pub year_to_date_yield: Option<Decimal>,
    pub trailing_3yr_yield: Option<Decimal>,
    pub trailing_5yr_yield: Option<Decimal>,
    pub equity_exposure: Option<Decimal>,
    pub foreign_currency_exposure: Option<Decimal>,
    pub foreign_exposure: Option<Decimal>,
    pub total_assets: Option<Decimal>,
    /// Minimum period actually observed in the window, for diagnosing
    /// partial coverage against the request.
    pub earliest_period: Option<Period>,
    /// The requested end period.
    pub report_period: Period,
}

/// A fund snapshot paired with a user-entered allocation amount.
///
/// An unset allocation is treated as zero by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioLine {
    #[serde(flatten)]
    pub snapshot: FundSnapshot,
    pub allocation: Option<Decimal>,
}

/// Asset-weighted portfolio totals.
///
/// Every weighted field is `None` when the total allocation is zero or no
/// line defines the underlying metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_allocation: Decimal,
    pub twr: Option<Decimal>,
    pub year_to_date_yield: Option<Decimal>,
    pub trailing_3yr_yield: Option<Decimal>,
    pub trailing_5yr_yield: Option<Decimal>,
    pub equity_exposure: Option<Decimal>,
    pub foreign_currency_exposure: Option<Decimal>,
    pub foreign_exposure: Option<Decimal>,
}
