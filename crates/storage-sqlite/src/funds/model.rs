//! Database model for fund records.
//!
//! The three category tables share one row shape, so a single `FundRowDB`
//! serves all of them. Decimal columns are stored as TEXT to avoid float
//! drift; they are parsed back into `rust_decimal::Decimal` on read, and
//! unparseable values are treated as absent rather than failing the row.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use pensia_core::errors::Result;
use pensia_core::funds::{CategoryGroup, FundRecord, Period};
use pensia_core::utils::parse_optional_decimal;

/// One row of a category table.
#[derive(Queryable, Insertable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::gemel)]
#[diesel(table_name = crate::schema::policies)]
#[diesel(table_name = crate::schema::pension)]
pub struct FundRowDB {
    pub fund_id: String,
    pub report_period: String,
    pub classification: String,
    pub name: String,
    pub display_name: String,
    pub track_name: Option<String>,
    pub year_to_date_yield: Option<String>,
    pub trailing_3yr_yield: Option<String>,
    pub trailing_5yr_yield: Option<String>,
    pub equity_exposure: Option<String>,
    pub foreign_currency_exposure: Option<String>,
    pub foreign_exposure: Option<String>,
    pub total_assets: Option<String>,
    pub monthly_yield: Option<String>,
}

impl FundRowDB {
    /// Converts a row back into the domain record. The category group is
    /// not stored in the row; it is implied by the table the row came
    /// from, so the caller supplies it.
    pub fn into_record(self, group: CategoryGroup) -> Result<FundRecord> {
        let report_period = Period::parse(&self.report_period)?;
        Ok(FundRecord {
            fund_id: self.fund_id,
            category: group,
            classification: self.classification,
            name: self.name,
            display_name: self.display_name,
            track_name: self.track_name,
            year_to_date_yield: parse_optional_decimal(self.year_to_date_yield),
            trailing_3yr_yield: parse_optional_decimal(self.trailing_3yr_yield),
            trailing_5yr_yield: parse_optional_decimal(self.trailing_5yr_yield),
            equity_exposure: parse_optional_decimal(self.equity_exposure),
            foreign_currency_exposure: parse_optional_decimal(self.foreign_currency_exposure),
            foreign_exposure: parse_optional_decimal(self.foreign_exposure),
            total_assets: parse_optional_decimal(self.total_assets),
            report_period,
            monthly_yield: parse_optional_decimal(self.monthly_yield),
        })
    }
}

impl From<&FundRecord> for FundRowDB {
    fn from(record: &FundRecord) -> Self {
        Self {
            fund_id: record.fund_id.clone(),
            report_period: record.report_period.to_string(),
            classification: record.classification.clone(),
            name: record.name.clone(),
            display_name: record.display_name.clone(),
            track_name: record.track_name.clone(),
            year_to_date_yield: record.year_to_date_yield.map(|d| d.to_string()),
            trailing_3yr_yield: record.trailing_3yr_yield.map(|d| d.to_string()),
            trailing_5yr_yield: record.trailing_5yr_yield.map(|d| d.to_string()),
            equity_exposure: record.equity_exposure.map(|d| d.to_string()),
            foreign_currency_exposure: record.foreign_currency_exposure.map(|d| d.to_string()),
            foreign_exposure: record.foreign_exposure.map(|d| d.to_string()),
            total_assets: record.total_assets.map(|d| d.to_string()),
            monthly_yield: record.monthly_yield.map(|d| d.to_string()),
        }
    }
}
