use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use pensia_core::funds::{
    FundService, FundServiceTrait, FundStore, TwrService, TwrServiceTrait,
};
use pensia_storage_sqlite::db;
use pensia_storage_sqlite::FundRepository;

use crate::config::Config;

pub struct AppState {
    pub fund_service: Arc<dyn FundServiceTrait>,
    pub twr_service: Arc<dyn TwrServiceTrait>,
    /// Direct store access, used by the ingestion side and by tests to
    /// seed data.
    pub fund_store: Arc<dyn FundStore>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("PENSIA_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer(pool.clone());

    let fund_store: Arc<dyn FundStore> = Arc::new(FundRepository::new(pool, writer));
    let fund_service: Arc<dyn FundServiceTrait> = Arc::new(FundService::new(fund_store.clone()));
    let twr_service: Arc<dyn TwrServiceTrait> = Arc::new(TwrService::new(fund_store.clone()));

    Ok(Arc::new(AppState {
        fund_service,
        twr_service,
        fund_store,
        db_path,
    }))
}
