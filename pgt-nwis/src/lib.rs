//! Core types for groundwater percentile trends and the USGS NWIS site lookup.
//!
//! - `trend`: precomputed Mann-Kendall trend records loaded from CSV
//! - `station`: station metadata and the normalized station directory
//! - `rdb`: parser for the NWIS site service tab-delimited output
//! - `error`: the startup error taxonomy shared by every crate

pub mod error;
pub mod rdb;
pub mod station;
pub mod trend;

pub use error::{Result, TrendsError};
pub use station::{NwisConfig, StationDirectory, StationRecord};
pub use trend::{TrendClass, TrendRecord, TrendSchema, TrendStore};
