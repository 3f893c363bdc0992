//! Core types for leak-stats.
//!
//! Holds the typed leak model, the decoder that turns raw property-list
//! dictionaries into [`models::LeakRecord`]s, command-line settings and the
//! shared error type.

pub mod data_processors;
pub mod error;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{LeakStatsError, Result};
