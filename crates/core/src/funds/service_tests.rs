//! Tests for the fund locator, TWR engine, and fund query service
//! against an in-memory store.

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::errors::{DatabaseError, Error, Result};
use crate::funds::locator::FundLocator;
use crate::funds::model::FundRecord;
use crate::funds::store::FundStore;
use crate::funds::twr_service::{TwrService, TwrServiceTrait};
use crate::funds::fund_service::{FundService, FundServiceTrait};
use crate::funds::types::{CategoryGroup, Period};

// =============================================================================
// Mock FundStore
// =============================================================================

#[derive(Clone, Default)]
struct MockFundStore {
    records: Arc<Mutex<Vec<FundRecord>>>,
    failing_groups: Arc<Mutex<HashSet<CategoryGroup>>>,
}

impl MockFundStore {
    fn new() -> Self {
        Self::default()
    }

    fn add(&self, record: FundRecord) {
        self.records.lock().unwrap().push(record);
    }

    fn fail_group(&self, group: CategoryGroup) {
        self.failing_groups.lock().unwrap().insert(group);
    }

    fn check_group(&self, group: CategoryGroup) -> Result<()> {
        if self.failing_groups.lock().unwrap().contains(&group) {
            return Err(Error::Database(DatabaseError::QueryFailed(format!(
                "intentional failure for {}",
                group
            ))));
        }
        Ok(())
    }
}

#[async_trait]
impl FundStore for MockFundStore {
    async fn fund_ids_in_group(
        &self,
        group: CategoryGroup,
        candidate_ids: &[String],
    ) -> Result<HashSet<String>> {
        self.check_group(group)?;
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| r.category == group && candidate_ids.contains(&r.fund_id))
            .map(|r| r.fund_id.clone())
            .collect())
    }

    async fn records_in_range(
        &self,
        group: CategoryGroup,
        fund_ids: &[String],
        start: Period,
        end: Period,
    ) -> Result<Vec<FundRecord>> {
        self.check_group(group)?;
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| {
                r.category == group
                    && fund_ids.contains(&r.fund_id)
                    && r.report_period >= start
                    && r.report_period <= end
            })
            .cloned()
            .collect())
    }

    async fn latest_record(
        &self,
        group: CategoryGroup,
        classification: &str,
        fund_id: &str,
    ) -> Result<Option<FundRecord>> {
        self.check_group(group)?;
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| {
                r.category == group && r.classification == classification && r.fund_id == fund_id
            })
            .max_by_key(|r| r.report_period)
            .cloned())
    }

    async fn search_programs(
        &self,
        group: CategoryGroup,
        classification: &str,
        query: &str,
        limit: i64,
    ) -> Result<Vec<FundRecord>> {
        self.check_group(group)?;
        let records = self.records.lock().unwrap();
        let mut matches: Vec<FundRecord> = records
            .iter()
            .filter(|r| {
                r.category == group
                    && r.classification == classification
                    && (r.display_name.contains(query) || r.fund_id.contains(query))
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.report_period.cmp(&a.report_period));
        matches.truncate(limit as usize);
        Ok(matches)
    }

    async fn latest_records(
        &self,
        group: CategoryGroup,
        fund_ids: &[String],
    ) -> Result<Vec<FundRecord>> {
        self.check_group(group)?;
        let records = self.records.lock().unwrap();
        let mut latest: HashMap<String, FundRecord> = HashMap::new();
        for record in records
            .iter()
            .filter(|r| r.category == group && fund_ids.contains(&r.fund_id))
        {
            match latest.get(&record.fund_id) {
                Some(existing) if existing.report_period >= record.report_period => {}
                _ => {
                    latest.insert(record.fund_id.clone(), record.clone());
                }
            }
        }
        Ok(latest.into_values().collect())
    }

    async fn upsert_records(&self, group: CategoryGroup, records: &[FundRecord]) -> Result<usize> {
        self.check_group(group)?;
        let mut stored = self.records.lock().unwrap();
        for record in records {
            stored.retain(|r| {
                !(r.category == group
                    && r.fund_id == record.fund_id
                    && r.report_period == record.report_period)
            });
            stored.push(record.clone());
        }
        Ok(records.len())
    }

    async fn replace_group(&self, group: CategoryGroup, records: &[FundRecord]) -> Result<usize> {
        self.check_group(group)?;
        let mut stored = self.records.lock().unwrap();
        stored.retain(|r| r.category != group);
        stored.extend(records.iter().cloned());
        Ok(records.len())
    }
}

// =============================================================================
// Fixtures
// =============================================================================

fn period(value: &str) -> Period {
    Period::parse(value).unwrap()
}

fn record(
    fund_id: &str,
    group: CategoryGroup,
    report_period: &str,
    monthly_yield: Option<Decimal>,
) -> FundRecord {
    FundRecord {
        fund_id: fund_id.to_string(),
        category: group,
        classification: "תגמולים ואישית לפיצויים".to_string(),
        name: format!("Fund {}", fund_id),
        display_name: format!("{} - Fund {}", fund_id, fund_id),
        track_name: None,
        year_to_date_yield: Some(dec!(3.1)),
        trailing_3yr_yield: Some(dec!(9.5)),
        trailing_5yr_yield: Some(dec!(21.0)),
        equity_exposure: Some(dec!(400)),
        foreign_currency_exposure: Some(dec!(150)),
        foreign_exposure: Some(dec!(250)),
        total_assets: Some(dec!(1000)),
        report_period: period(report_period),
        monthly_yield,
    }
}

fn seeded_store() -> Arc<MockFundStore> {
    let store = Arc::new(MockFundStore::new());
    store.add(record("123", CategoryGroup::Gemel, "202301", Some(dec!(1.0))));
    store.add(record("123", CategoryGroup::Gemel, "202302", Some(dec!(2.0))));
    store.add(record("123", CategoryGroup::Gemel, "202303", Some(dec!(-0.5))));
    store
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

// =============================================================================
// Locator
// =============================================================================

#[tokio::test]
async fn locator_partitions_mixed_groups() {
    let store = Arc::new(MockFundStore::new());
    store.add(record("100", CategoryGroup::Gemel, "202301", None));
    store.add(record("101", CategoryGroup::Gemel, "202301", None));
    store.add(record("200", CategoryGroup::Pension, "202301", None));
    store.add(record("201", CategoryGroup::Pension, "202301", None));

    let locator = FundLocator::new(store);
    let located = locator
        .locate(&ids(&["100", "101", "200", "201"]))
        .await
        .unwrap();

    assert_eq!(located.len(), 4);
    assert_eq!(located["100"], CategoryGroup::Gemel);
    assert_eq!(located["101"], CategoryGroup::Gemel);
    assert_eq!(located["200"], CategoryGroup::Pension);
    assert_eq!(located["201"], CategoryGroup::Pension);
}

#[tokio::test]
async fn locator_omits_unknown_ids() {
    let store = seeded_store();
    let locator = FundLocator::new(store);
    let located = locator.locate(&ids(&["123", "999"])).await.unwrap();

    assert_eq!(located.len(), 1);
    assert!(located.contains_key("123"));
}

// =============================================================================
// TWR engine
// =============================================================================

#[tokio::test]
async fn compounds_monthly_yields_over_the_window() {
    let service = TwrService::new(seeded_store());
    let snapshots = service
        .compute_twr(&ids(&["123"]), period("202301"), period("202303"))
        .await
        .unwrap();

    assert_eq!(snapshots.len(), 1);
    let snapshot = &snapshots[0];
    // (1.01 * 1.02 * 0.995 - 1) * 100 = 2.5049, rounded to 2.50
    assert_eq!(snapshot.twr, Some(dec!(2.50)));
    assert_eq!(snapshot.earliest_period, Some(period("202301")));
    assert_eq!(snapshot.report_period, period("202303"));
    assert_eq!(
        snapshot.display_name.as_deref(),
        Some("123 - Fund 123"),
        "statics come from the end-period record"
    );
    assert_eq!(snapshot.year_to_date_yield, Some(dec!(3.1)));
}

#[tokio::test]
async fn missing_monthly_yield_leaves_the_return_unchanged() {
    let store = Arc::new(MockFundStore::new());
    store.add(record("7", CategoryGroup::Gemel, "202301", Some(dec!(1.0))));
    store.add(record("7", CategoryGroup::Gemel, "202302", None));
    store.add(record("7", CategoryGroup::Gemel, "202303", Some(dec!(2.0))));

    let service = TwrService::new(store);
    let snapshots = service
        .compute_twr(&ids(&["7"]), period("202301"), period("202303"))
        .await
        .unwrap();

    // (1.01 * 1.00 * 1.02 - 1) * 100 = 3.02
    assert_eq!(snapshots[0].twr, Some(dec!(3.02)));
}

#[tokio::test]
async fn fund_without_records_in_window_is_omitted() {
    let service = TwrService::new(seeded_store());
    let snapshots = service
        .compute_twr(&ids(&["123"]), period("202401"), period("202403"))
        .await
        .unwrap();

    // A data gap must never surface as a 0.00% return.
    assert!(snapshots.is_empty());
}

#[tokio::test]
async fn statics_are_unavailable_without_an_end_period_record() {
    let service = TwrService::new(seeded_store());
    let snapshots = service
        .compute_twr(&ids(&["123"]), period("202301"), period("202306"))
        .await
        .unwrap();

    let snapshot = &snapshots[0];
    // Returns still compound over what was found...
    assert_eq!(snapshot.twr, Some(dec!(2.50)));
    // ...but point-in-time fields must not fall back to an earlier period.
    assert_eq!(snapshot.display_name, None);
    assert_eq!(snapshot.year_to_date_yield, None);
    assert_eq!(snapshot.equity_exposure, None);
    assert_eq!(snapshot.total_assets, None);
    assert_eq!(snapshot.earliest_period, Some(period("202301")));
    assert_eq!(snapshot.report_period, period("202306"));
}

#[tokio::test]
async fn unresolvable_ids_are_dropped_from_the_batch() {
    let service = TwrService::new(seeded_store());
    let snapshots = service
        .compute_twr(&ids(&["123", "999"]), period("202301"), period("202303"))
        .await
        .unwrap();

    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].fund_id, "123");
}

#[tokio::test]
async fn spans_category_groups_in_one_request() {
    let store = seeded_store();
    store.add(record("555", CategoryGroup::Pension, "202302", Some(dec!(0.5))));
    store.add(record("555", CategoryGroup::Pension, "202303", Some(dec!(0.5))));

    let service = TwrService::new(store);
    let snapshots = service
        .compute_twr(&ids(&["123", "555"]), period("202301"), period("202303"))
        .await
        .unwrap();

    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].fund_id, "123");
    assert_eq!(snapshots[1].fund_id, "555");
    assert_eq!(snapshots[1].earliest_period, Some(period("202302")));
}

#[tokio::test]
async fn empty_id_list_is_rejected() {
    let service = TwrService::new(seeded_store());
    let result = service
        .compute_twr(&[], period("202301"), period("202303"))
        .await;

    assert!(matches!(result, Err(Error::Validation(_))));
}

#[tokio::test]
async fn inverted_window_is_rejected() {
    let service = TwrService::new(seeded_store());
    let result = service
        .compute_twr(&ids(&["123"]), period("202303"), period("202301"))
        .await;

    assert!(matches!(result, Err(Error::Validation(_))));
}

#[tokio::test]
async fn group_query_failure_aborts_the_whole_computation() {
    let store = seeded_store();
    store.add(record("555", CategoryGroup::Pension, "202302", Some(dec!(0.5))));
    store.fail_group(CategoryGroup::Pension);

    let service = TwrService::new(store);
    let result = service
        .compute_twr(&ids(&["123", "555"]), period("202301"), period("202303"))
        .await;

    // No partial results for a mixed portfolio.
    assert!(matches!(result, Err(Error::Database(_))));
}

// =============================================================================
// Fund query service
// =============================================================================

#[tokio::test]
async fn latest_fund_lookup_honors_classification() {
    let service = FundService::new(seeded_store());

    let found = service
        .get_latest_fund("תגמולים ואישית לפיצויים", "123")
        .await
        .unwrap();
    assert_eq!(found.unwrap().report_period, period("202303"));

    let missing = service
        .get_latest_fund("תגמולים ואישית לפיצויים", "999")
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn program_search_matches_name_or_id() {
    let service = FundService::new(seeded_store());

    let by_id = service
        .search_programs("12", "תגמולים ואישית לפיצויים")
        .await
        .unwrap();
    assert!(!by_id.is_empty());
    assert!(by_id.iter().all(|r| r.fund_id == "123"));
    // Most recent period first.
    assert_eq!(by_id[0].report_period, period("202303"));

    let by_name = service
        .search_programs("Fund 123", "תגמולים ואישית לפיצויים")
        .await
        .unwrap();
    assert!(!by_name.is_empty());
}

#[tokio::test]
async fn latest_fund_data_returns_one_record_per_fund() {
    let store = seeded_store();
    store.add(record("555", CategoryGroup::Pension, "202212", Some(dec!(0.5))));

    let service = FundService::new(store);
    let records = service
        .get_latest_fund_data(&ids(&["123", "555", "999"]))
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].fund_id, "123");
    assert_eq!(records[0].report_period, period("202303"));
    assert_eq!(records[1].fund_id, "555");
}

#[tokio::test]
async fn latest_fund_data_rejects_an_empty_request() {
    let service = FundService::new(seeded_store());
    assert!(matches!(
        service.get_latest_fund_data(&[]).await,
        Err(Error::Validation(_))
    ));
}
