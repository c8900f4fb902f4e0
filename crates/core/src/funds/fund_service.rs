//! Query service behind the fund search and latest-data endpoints.

use async_trait::async_trait;
use futures::future::try_join_all;
use std::collections::HashMap;
use std::sync::Arc;

use super::constants::SEARCH_RESULT_LIMIT;
use super::locator::FundLocator;
use super::model::FundRecord;
use super::store::FundStore;
use super::types::CategoryGroup;
use crate::errors::{Error, Result, ValidationError};

#[async_trait]
pub trait FundServiceTrait: Send + Sync {
    /// Latest record for a (classification, fund id) pair, or `None`.
    async fn get_latest_fund(
        &self,
        classification: &str,
        fund_id: &str,
    ) -> Result<Option<FundRecord>>;

    /// Up to 15 records matching the classification and a substring of
    /// the display name or fund id, most recent period first.
    async fn search_programs(&self, query: &str, fund_type: &str) -> Result<Vec<FundRecord>>;

    /// Most recent record per identifier, across all category groups.
    async fn get_latest_fund_data(&self, fund_ids: &[String]) -> Result<Vec<FundRecord>>;
}

pub struct FundService {
    store: Arc<dyn FundStore>,
    locator: FundLocator,
}

impl FundService {
    pub fn new(store: Arc<dyn FundStore>) -> Self {
        let locator = FundLocator::new(store.clone());
        Self { store, locator }
    }
}

#[async_trait]
impl FundServiceTrait for FundService {
    async fn get_latest_fund(
        &self,
        classification: &str,
        fund_id: &str,
    ) -> Result<Option<FundRecord>> {
        let group = CategoryGroup::from_classification(classification);
        self.store
            .latest_record(group, classification, fund_id)
            .await
    }

    async fn search_programs(&self, query: &str, fund_type: &str) -> Result<Vec<FundRecord>> {
        let group = CategoryGroup::from_classification(fund_type);
        self.store
            .search_programs(group, fund_type, query, SEARCH_RESULT_LIMIT)
            .await
    }

    async fn get_latest_fund_data(&self, fund_ids: &[String]) -> Result<Vec<FundRecord>> {
        if fund_ids.is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "fund id list must not be empty".to_string(),
            )));
        }

        let located = self.locator.locate(fund_ids).await?;
        let mut ids_by_group: HashMap<CategoryGroup, Vec<String>> = HashMap::new();
        for (id, group) in located {
            ids_by_group.entry(group).or_default().push(id);
        }

        let results = try_join_all(
            ids_by_group
                .iter()
                .map(|(group, ids)| self.store.latest_records(*group, ids)),
        )
        .await?;

        let mut records: Vec<FundRecord> = results.into_iter().flatten().collect();
        records.sort_by(|a, b| a.fund_id.cmp(&b.fund_id));
        Ok(records)
    }
}
