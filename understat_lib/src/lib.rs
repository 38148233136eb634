//! Library layer for the Understat shot scraper: page extraction, payload
//! decoding, normalization into typed records, and multi-match aggregation.
//!
//! Wraps the `understat_api` transport crate. Everything here is stateless;
//! each call fetches, decodes and returns owned data.

pub mod aggregate;
pub mod config;
pub mod decode;
pub mod error;
pub mod extract;
pub mod filter;
pub mod normalize;
pub mod scrape;
pub mod summary;
pub mod table;
pub mod validation;

pub use understat_api;
pub use understat_api::types;

pub use aggregate::{
    AggregateOptions, AggregateReport, Aggregator, CancelToken, MatchFailure, OnError,
};
pub use config::FetchConfig;
pub use error::UnderstatError;
pub use filter::ShotFilter;
pub use scrape::ScrapeClient;
pub use summary::PlayerSummary;
pub use table::ShotTable;
