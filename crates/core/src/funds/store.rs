//! Fund storage trait.
//!
//! Abstracts the persistence layer so different storage backends can be
//! used interchangeably. Each category group is a separate physical
//! partition; every query targets exactly one group, and callers that
//! span groups issue one query per group and join them.

use async_trait::async_trait;
use std::collections::HashSet;

use super::model::FundRecord;
use super::types::{CategoryGroup, Period};
use crate::errors::Result;

/// Storage interface for fund records.
///
/// Reads are side-effect free. The two mutation methods exist for the
/// external ingestion process: `upsert_records` is its page-by-page
/// upsert, and `replace_group` its refresh path, which must be atomic so
/// readers never observe a partially applied refresh.
#[async_trait]
pub trait FundStore: Send + Sync {
    /// Returns which of `candidate_ids` have at least one record in
    /// `group`.
    async fn fund_ids_in_group(
        &self,
        group: CategoryGroup,
        candidate_ids: &[String],
    ) -> Result<HashSet<String>>;

    /// Returns all records for the given funds whose period lies in
    /// `[start, end]` inclusive, ordered by fund id then period ascending.
    async fn records_in_range(
        &self,
        group: CategoryGroup,
        fund_ids: &[String],
        start: Period,
        end: Period,
    ) -> Result<Vec<FundRecord>>;

    /// Returns the most recent record for a (classification, fund id)
    /// pair, if any.
    async fn latest_record(
        &self,
        group: CategoryGroup,
        classification: &str,
        fund_id: &str,
    ) -> Result<Option<FundRecord>>;

    /// Substring search on display name or fund id within one
    /// classification, most recent period first.
    async fn search_programs(
        &self,
        group: CategoryGroup,
        classification: &str,
        query: &str,
        limit: i64,
    ) -> Result<Vec<FundRecord>>;

    /// Returns the record at each fund's maximum period.
    async fn latest_records(
        &self,
        group: CategoryGroup,
        fund_ids: &[String],
    ) -> Result<Vec<FundRecord>>;

    /// Upserts records by `(fund_id, report_period)`.
    async fn upsert_records(&self, group: CategoryGroup, records: &[FundRecord]) -> Result<usize>;

    /// Replaces the group's entire contents in one atomic transaction.
    async fn replace_group(&self, group: CategoryGroup, records: &[FundRecord]) -> Result<usize>;
}
