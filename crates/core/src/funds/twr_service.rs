//! Time-weighted return engine.
//!
//! Given fund identifiers and a period window, fetches each fund's
//! monthly-yield history, compounds it into a single return, and builds
//! an enriched snapshot per fund.

use async_trait::async_trait;
use futures::future::try_join_all;
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::Arc;

use super::constants::PERCENT_DP;
use super::locator::FundLocator;
use super::model::{FundRecord, FundSnapshot};
use super::store::FundStore;
use super::types::{CategoryGroup, Period};
use crate::errors::{Error, Result, ValidationError};

#[async_trait]
pub trait TwrServiceTrait: Send + Sync {
    /// Computes the time-weighted return of each fund over
    /// `[start, end]` inclusive.
    ///
    /// Identifiers that resolve to no category group, or have no records
    /// in the window, are omitted from the result; callers detect count
    /// mismatches against the request. A failed group query fails the
    /// whole computation, since partial results across a mixed portfolio
    /// would be misleading.
    async fn compute_twr(
        &self,
        fund_ids: &[String],
        start: Period,
        end: Period,
    ) -> Result<Vec<FundSnapshot>>;
}

pub struct TwrService {
    store: Arc<dyn FundStore>,
    locator: FundLocator,
}

impl TwrService {
    pub fn new(store: Arc<dyn FundStore>) -> Self {
        let locator = FundLocator::new(store.clone());
        Self { store, locator }
    }
}

/// Compounds monthly yields (in percent) into a growth factor.
///
/// A missing yield contributes a factor of exactly 1: the fund reported a
/// period without a number, which is not the same as a data gap for the
/// whole window.
pub(crate) fn compound_monthly<'a, I>(yields: I) -> Decimal
where
    I: IntoIterator<Item = &'a Option<Decimal>>,
{
    let mut accumulator = Decimal::ONE;
    for monthly_yield in yields {
        let rate = monthly_yield.unwrap_or(Decimal::ZERO);
        accumulator *= Decimal::ONE + rate / dec!(100);
    }
    accumulator
}

fn build_snapshot(fund_id: String, mut records: Vec<FundRecord>, end: Period) -> FundSnapshot {
    records.sort_by_key(|r| r.report_period);

    let accumulator = compound_monthly(records.iter().map(|r| &r.monthly_yield));
    let twr = if records.is_empty() {
        None
    } else {
        Some(((accumulator - Decimal::ONE) * dec!(100)).round_dp(PERCENT_DP))
    };

    let earliest_period = records.first().map(|r| r.report_period);
    // Statics are point-in-time: only the record at exactly the end
    // period qualifies, with no fallback to an earlier one.
    let latest = records.iter().find(|r| r.report_period == end);

    FundSnapshot {
        fund_id,
        display_name: latest.map(|r| r.display_name.clone()),
        classification: latest.map(|r| r.classification.clone()),
        twr,
        year_to_date_yield: latest.and_then(|r| r.year_to_date_yield),
        trailing_3yr_yield: latest.and_then(|r| r.trailing_3yr_yield),
        trailing_5yr_yield: latest.and_then(|r| r.trailing_5yr_yield),
        equity_exposure: latest.and_then(|r| r.equity_exposure),
        foreign_currency_exposure: latest.and_then(|r| r.foreign_currency_exposure),
        foreign_exposure: latest.and_then(|r| r.foreign_exposure),
        total_assets: latest.and_then(|r| r.total_assets),
        earliest_period,
        report_period: end,
    }
}

#[async_trait]
impl TwrServiceTrait for TwrService {
    async fn compute_twr(
        &self,
        fund_ids: &[String],
        start: Period,
        end: Period,
    ) -> Result<Vec<FundSnapshot>> {
        if fund_ids.is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "fund id list must not be empty".to_string(),
            )));
        }
        if start > end {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "start period {} is after end period {}",
                start, end
            ))));
        }

        let located = self.locator.locate(fund_ids).await?;
        if located.len() < fund_ids.len() {
            debug!(
                "dropping {} unresolvable fund ids from TWR computation",
                fund_ids.len() - located.len()
            );
        }

        let mut ids_by_group: HashMap<CategoryGroup, Vec<String>> = HashMap::new();
        for (id, group) in located {
            ids_by_group.entry(group).or_default().push(id);
        }

        // One range query per involved group, joined all-or-abort: any
        // group failure aborts the whole computation.
        let results = try_join_all(
            ids_by_group
                .iter()
                .map(|(group, ids)| self.store.records_in_range(*group, ids, start, end)),
        )
        .await?;

        let mut records_by_fund: HashMap<String, Vec<FundRecord>> = HashMap::new();
        for record in results.into_iter().flatten() {
            records_by_fund
                .entry(record.fund_id.clone())
                .or_default()
                .push(record);
        }

        let mut snapshots: Vec<FundSnapshot> = records_by_fund
            .into_iter()
            .map(|(fund_id, records)| build_snapshot(fund_id, records, end))
            .collect();
        snapshots.sort_by(|a, b| a.fund_id.cmp(&b.fund_id));

        Ok(snapshots)
    }
}
