//! Fund repository backed by the three category tables.

pub mod model;
pub mod repository;

pub use model::FundRowDB;
pub use repository::FundRepository;
