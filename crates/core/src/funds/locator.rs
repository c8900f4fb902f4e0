//! Resolves fund identifiers to their category group.

use futures::future::try_join_all;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

use super::store::FundStore;
use super::types::CategoryGroup;
use crate::errors::Result;

/// Read-only lookup of which category group each fund identifier belongs
/// to.
///
/// The three groups are separate physical partitions, so a mixed
/// portfolio needs its downstream range queries issued per group. A fund
/// id is assumed unique across groups; when the datasets disagree, the
/// first group in `CategoryGroup::ALL` order wins.
pub struct FundLocator {
    store: Arc<dyn FundStore>,
}

impl FundLocator {
    pub fn new(store: Arc<dyn FundStore>) -> Self {
        Self { store }
    }

    /// Maps each identifier to its category group.
    ///
    /// Identifiers found in no group are omitted from the result; callers
    /// treat that as "fund not found" rather than failing the batch.
    pub async fn locate(&self, fund_ids: &[String]) -> Result<HashMap<String, CategoryGroup>> {
        if fund_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let membership = try_join_all(
            CategoryGroup::ALL
                .iter()
                .map(|group| self.store.fund_ids_in_group(*group, fund_ids)),
        )
        .await?;

        let mut assigned: HashMap<String, CategoryGroup> = HashMap::new();
        for (group, ids) in CategoryGroup::ALL.into_iter().zip(membership) {
            for id in ids {
                assigned.entry(id).or_insert(group);
            }
        }

        if assigned.len() < fund_ids.len() {
            debug!(
                "{} of {} fund ids resolved to a category group",
                assigned.len(),
                fund_ids.len()
            );
        }

        Ok(assigned)
    }
}
