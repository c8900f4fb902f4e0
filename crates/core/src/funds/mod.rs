// Module declarations
pub mod aggregator;
pub mod constants;
pub mod fund_service;
pub mod locator;
pub mod model;
pub mod store;
pub mod twr_service;
pub mod types;

#[cfg(test)]
mod service_tests;

// Re-export the public interface
pub use aggregator::aggregate;
pub use constants::*;
pub use fund_service::{FundService, FundServiceTrait};
pub use locator::FundLocator;
pub use model::{FundRecord, FundSnapshot, PortfolioLine, PortfolioSummary};
pub use store::FundStore;
pub use twr_service::{TwrService, TwrServiceTrait};
pub use types::{CategoryGroup, Period};
