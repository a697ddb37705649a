//! Query result model structs.
//!
//! All structs derive `Serialize` so they can be handed to D3.js as JSON.

use pgt_nwis::TrendClass;
use serde::Serialize;

/// A trend record enriched with the name of its station.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct JoinedTrendRecord {
    pub site_no: u64,
    pub station_nm: String,
    pub percentile: String,
    pub slope: f64,
    pub trend: TrendClass,
    /// Trend text as loaded from the trend CSV
    pub trend_label: String,
}
