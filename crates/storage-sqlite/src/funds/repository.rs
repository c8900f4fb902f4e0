use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::collections::HashSet;

use pensia_core::errors::Result;
use pensia_core::funds::{CategoryGroup, FundRecord, FundStore, Period};

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::utils::chunk_for_sqlite;

use super::model::FundRowDB;

/// Rows per insert batch. FundRowDB binds 14 parameters per row; 64 rows
/// keep each statement under SQLite's default 999-parameter limit.
const INSERT_ROWS_CHUNK: usize = 64;

// The three category tables are identical in shape, so the query bodies
// are written once and instantiated per table. Dispatch on CategoryGroup
// happens in the repository methods below.
macro_rules! fund_table_ops {
    ($mod_name:ident, $table:ident) => {
        mod $mod_name {
            use diesel::prelude::*;
            use diesel::sqlite::SqliteConnection;

            use crate::schema::$table::dsl;

            use super::FundRowDB;

            pub fn ids_with_records(
                conn: &mut SqliteConnection,
                candidates: &[String],
            ) -> QueryResult<Vec<String>> {
                dsl::$table
                    .filter(dsl::fund_id.eq_any(candidates))
                    .select(dsl::fund_id)
                    .distinct()
                    .load(conn)
            }

            pub fn records_in_range(
                conn: &mut SqliteConnection,
                ids: &[String],
                start: &str,
                end: &str,
            ) -> QueryResult<Vec<FundRowDB>> {
                dsl::$table
                    .filter(dsl::fund_id.eq_any(ids))
                    .filter(dsl::report_period.ge(start))
                    .filter(dsl::report_period.le(end))
                    .order((dsl::fund_id.asc(), dsl::report_period.asc()))
                    .load(conn)
            }

            pub fn latest_record(
                conn: &mut SqliteConnection,
                classification_value: &str,
                id: &str,
            ) -> QueryResult<Option<FundRowDB>> {
                dsl::$table
                    .filter(dsl::classification.eq(classification_value))
                    .filter(dsl::fund_id.eq(id))
                    .order(dsl::report_period.desc())
                    .first(conn)
                    .optional()
            }

            pub fn search(
                conn: &mut SqliteConnection,
                classification_value: &str,
                pattern: &str,
                limit: i64,
            ) -> QueryResult<Vec<FundRowDB>> {
                dsl::$table
                    .filter(dsl::classification.eq(classification_value))
                    .filter(
                        dsl::display_name
                            .like(pattern)
                            .or(dsl::fund_id.like(pattern)),
                    )
                    .order(dsl::report_period.desc())
                    .limit(limit)
                    .load(conn)
            }

            pub fn latest_per_fund(
                conn: &mut SqliteConnection,
                ids: &[String],
            ) -> QueryResult<Vec<FundRowDB>> {
                dsl::$table
                    .filter(dsl::fund_id.eq_any(ids))
                    .order((dsl::fund_id.asc(), dsl::report_period.desc()))
                    .load(conn)
            }

            pub fn upsert(
                conn: &mut SqliteConnection,
                rows: &[FundRowDB],
            ) -> QueryResult<usize> {
                diesel::replace_into(dsl::$table).values(rows).execute(conn)
            }

            pub fn delete_all(conn: &mut SqliteConnection) -> QueryResult<usize> {
                diesel::delete(dsl::$table).execute(conn)
            }
        }
    };
}

fund_table_ops!(gemel_ops, gemel);
fund_table_ops!(policies_ops, policies);
fund_table_ops!(pension_ops, pension);

/// Repository for fund records across the three category tables.
pub struct FundRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl FundRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn upsert_chunked(
    conn: &mut SqliteConnection,
    group: CategoryGroup,
    rows: &[FundRowDB],
) -> QueryResult<usize> {
    let mut total = 0;
    for chunk in rows.chunks(INSERT_ROWS_CHUNK) {
        total += match group {
            CategoryGroup::Gemel => gemel_ops::upsert(conn, chunk)?,
            CategoryGroup::Policies => policies_ops::upsert(conn, chunk)?,
            CategoryGroup::Pension => pension_ops::upsert(conn, chunk)?,
        };
    }
    Ok(total)
}

fn rows_to_records(rows: Vec<FundRowDB>, group: CategoryGroup) -> Result<Vec<FundRecord>> {
    rows.into_iter().map(|row| row.into_record(group)).collect()
}

#[async_trait]
impl FundStore for FundRepository {
    async fn fund_ids_in_group(
        &self,
        group: CategoryGroup,
        candidate_ids: &[String],
    ) -> Result<HashSet<String>> {
        let mut conn = get_connection(&self.pool)?;

        let mut found = HashSet::new();
        for chunk in chunk_for_sqlite(candidate_ids) {
            let ids = match group {
                CategoryGroup::Gemel => gemel_ops::ids_with_records(&mut conn, chunk),
                CategoryGroup::Policies => policies_ops::ids_with_records(&mut conn, chunk),
                CategoryGroup::Pension => pension_ops::ids_with_records(&mut conn, chunk),
            }
            .into_core()?;
            found.extend(ids);
        }
        Ok(found)
    }

    async fn records_in_range(
        &self,
        group: CategoryGroup,
        fund_ids: &[String],
        start: Period,
        end: Period,
    ) -> Result<Vec<FundRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let start = start.to_string();
        let end = end.to_string();

        let mut rows = Vec::new();
        for chunk in chunk_for_sqlite(fund_ids) {
            let batch = match group {
                CategoryGroup::Gemel => {
                    gemel_ops::records_in_range(&mut conn, chunk, &start, &end)
                }
                CategoryGroup::Policies => {
                    policies_ops::records_in_range(&mut conn, chunk, &start, &end)
                }
                CategoryGroup::Pension => {
                    pension_ops::records_in_range(&mut conn, chunk, &start, &end)
                }
            }
            .into_core()?;
            rows.extend(batch);
        }

        let mut records = rows_to_records(rows, group)?;
        // Chunking breaks the global ordering the per-chunk queries gave us.
        records.sort_by(|a, b| {
            a.fund_id
                .cmp(&b.fund_id)
                .then(a.report_period.cmp(&b.report_period))
        });
        Ok(records)
    }

    async fn latest_record(
        &self,
        group: CategoryGroup,
        classification: &str,
        fund_id: &str,
    ) -> Result<Option<FundRecord>> {
        let mut conn = get_connection(&self.pool)?;

        let row = match group {
            CategoryGroup::Gemel => gemel_ops::latest_record(&mut conn, classification, fund_id),
            CategoryGroup::Policies => {
                policies_ops::latest_record(&mut conn, classification, fund_id)
            }
            CategoryGroup::Pension => {
                pension_ops::latest_record(&mut conn, classification, fund_id)
            }
        }
        .into_core()?;

        row.map(|r| r.into_record(group)).transpose()
    }

    async fn search_programs(
        &self,
        group: CategoryGroup,
        classification: &str,
        query: &str,
        limit: i64,
    ) -> Result<Vec<FundRecord>> {
        let mut conn = get_connection(&self.pool)?;

        // Substring match on either the display name or the identifier.
        let pattern = format!("%{}%", query);

        let rows = match group {
            CategoryGroup::Gemel => {
                gemel_ops::search(&mut conn, classification, &pattern, limit)
            }
            CategoryGroup::Policies => {
                policies_ops::search(&mut conn, classification, &pattern, limit)
            }
            CategoryGroup::Pension => {
                pension_ops::search(&mut conn, classification, &pattern, limit)
            }
        }
        .into_core()?;

        rows_to_records(rows, group)
    }

    async fn latest_records(
        &self,
        group: CategoryGroup,
        fund_ids: &[String],
    ) -> Result<Vec<FundRecord>> {
        let mut conn = get_connection(&self.pool)?;

        // Rows come back ordered (fund_id asc, report_period desc), so the
        // first row seen per fund is its most recent record. Chunks never
        // split a fund, so this holds across chunk boundaries too.
        let mut latest: Vec<FundRowDB> = Vec::new();
        for chunk in chunk_for_sqlite(fund_ids) {
            let rows = match group {
                CategoryGroup::Gemel => gemel_ops::latest_per_fund(&mut conn, chunk),
                CategoryGroup::Policies => policies_ops::latest_per_fund(&mut conn, chunk),
                CategoryGroup::Pension => pension_ops::latest_per_fund(&mut conn, chunk),
            }
            .into_core()?;
            for row in rows {
                if latest.last().map(|l| l.fund_id != row.fund_id).unwrap_or(true) {
                    latest.push(row);
                }
            }
        }

        rows_to_records(latest, group)
    }

    async fn upsert_records(&self, group: CategoryGroup, records: &[FundRecord]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }
        let rows: Vec<FundRowDB> = records.iter().map(FundRowDB::from).collect();

        self.writer
            .exec(move |conn| upsert_chunked(conn, group, &rows).into_core())
            .await
    }

    async fn replace_group(&self, group: CategoryGroup, records: &[FundRecord]) -> Result<usize> {
        let rows: Vec<FundRowDB> = records.iter().map(FundRowDB::from).collect();

        // One writer job is one immediate transaction, so the delete and
        // the inserts commit together and readers never see a partial
        // refresh.
        self.writer
            .exec(move |conn| {
                match group {
                    CategoryGroup::Gemel => gemel_ops::delete_all(conn),
                    CategoryGroup::Policies => policies_ops::delete_all(conn),
                    CategoryGroup::Pension => pension_ops::delete_all(conn),
                }
                .into_core()?;
                upsert_chunked(conn, group, &rows).into_core()
            })
            .await
    }
}
