//! Ingestion layer for leak-stats.
//!
//! Loads exported profiler traces from a directory, parses them into
//! [`leak_core::models::Report`]s, aggregates leak counts across reports and
//! runs the batch pipeline that ties these together.

pub mod aggregator;
pub mod analysis;
pub mod parser;
pub mod reader;

pub use leak_core as core;
