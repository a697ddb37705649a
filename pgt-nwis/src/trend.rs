use crate::error::{Result, TrendsError};
use csv::{ReaderBuilder, StringRecord};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

/// Trend classification reported by the Mann-Kendall test.
///
/// Labels are matched case-insensitively; anything unrecognized is kept
/// verbatim in `Other` so the chart legend still shows it.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize, Deserialize)]
pub enum TrendClass {
    Increasing,
    Decreasing,
    NoTrend,
    Other(String),
}

impl TrendClass {
    pub fn parse(label: &str) -> TrendClass {
        let lowered = label.trim().to_lowercase();
        match lowered.as_str() {
            "increasing" | "up" => TrendClass::Increasing,
            "decreasing" | "down" => TrendClass::Decreasing,
            "no trend" | "no-trend" | "no_trend" | "notrend" | "none" => TrendClass::NoTrend,
            _ => TrendClass::Other(label.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TrendClass::Increasing => "increasing",
            TrendClass::Decreasing => "decreasing",
            TrendClass::NoTrend => "no trend",
            TrendClass::Other(s) => s.as_str(),
        }
    }
}

impl fmt::Display for TrendClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One percentile's trend for one monitoring site.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct TrendRecord {
    /// USGS site number
    pub site_no: u64,
    /// Percentile label as it appears in the source (e.g. "p10", "median")
    pub percentile: String,
    /// Mann-Kendall slope, percent per year
    pub slope: f64,
    pub trend: TrendClass,
    /// Trend text exactly as it appears in the source, used as the legend label
    pub trend_label: String,
}

/// Column names of the trend CSV.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendSchema {
    pub site_id_col: String,
    pub percentile_col: String,
    pub slope_col: String,
    pub trend_col: String,
}

impl Default for TrendSchema {
    fn default() -> Self {
        Self {
            site_id_col: "site_no".to_string(),
            percentile_col: "level_0".to_string(),
            slope_col: "slope".to_string(),
            trend_col: "Trend".to_string(),
        }
    }
}

/// Positions of the schema columns inside a concrete header row.
struct ColumnIndex {
    site_no: usize,
    percentile: usize,
    slope: usize,
    trend: usize,
}

impl ColumnIndex {
    fn locate(headers: &StringRecord, schema: &TrendSchema) -> Result<ColumnIndex> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| TrendsError::DataUnavailable(format!("missing column '{}'", name)))
        };
        Ok(ColumnIndex {
            site_no: find(&schema.site_id_col)?,
            percentile: find(&schema.percentile_col)?,
            slope: find(&schema.slope_col)?,
            trend: find(&schema.trend_col)?,
        })
    }
}

/// Precomputed trend records, held for the lifetime of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendStore {
    records: Vec<TrendRecord>,
    site_ids: BTreeSet<u64>,
}

impl TrendStore {
    /// Read the trend CSV at `path`.
    pub fn load<P: AsRef<Path>>(path: P, schema: &TrendSchema) -> Result<TrendStore> {
        let path = path.as_ref();
        let csv_data = std::fs::read_to_string(path).map_err(|e| {
            TrendsError::DataUnavailable(format!("cannot read {}: {}", path.display(), e))
        })?;
        TrendStore::from_csv_str(&csv_data, schema)
    }

    /// Parse trend records from CSV text (with headers).
    ///
    /// ```rust
    /// use pgt_nwis::{TrendSchema, TrendStore};
    ///
    /// let csv = "site_no,level_0,slope,Trend\n1000,p10,-0.5,decreasing\n1000,p50,0.1,no trend\n";
    /// let store = TrendStore::from_csv_str(csv, &TrendSchema::default()).unwrap();
    /// assert_eq!(store.records().len(), 2);
    /// assert_eq!(store.site_ids().len(), 1);
    /// ```
    pub fn from_csv_str(csv_data: &str, schema: &TrendSchema) -> Result<TrendStore> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());
        let headers = rdr.headers()?.clone();
        let columns = ColumnIndex::locate(&headers, schema)?;

        let mut records = Vec::new();
        let mut site_ids = BTreeSet::new();
        for (line, row) in rdr.records().enumerate() {
            let r = row?;
            let record = parse_row(&r, &columns).ok_or_else(|| {
                TrendsError::DataUnavailable(format!("unparseable trend row {}", line + 2))
            })?;
            site_ids.insert(record.site_no);
            records.push(record);
        }

        if records.is_empty() {
            return Err(TrendsError::DataUnavailable(
                "trend file contains no rows".to_string(),
            ));
        }
        info!(
            "trend store: loaded {} trend rows for {} sites",
            records.len(),
            site_ids.len()
        );
        Ok(TrendStore { records, site_ids })
    }

    /// Records in file order.
    pub fn records(&self) -> &[TrendRecord] {
        &self.records
    }

    /// Distinct site numbers present in the file.
    pub fn site_ids(&self) -> &BTreeSet<u64> {
        &self.site_ids
    }
}

fn parse_row(r: &StringRecord, columns: &ColumnIndex) -> Option<TrendRecord> {
    let site_no = parse_site_no(r.get(columns.site_no)?)?;
    let percentile = r.get(columns.percentile)?.trim().to_string();
    let slope = r.get(columns.slope)?.trim().parse::<f64>().ok()?;
    let trend_label = r.get(columns.trend)?.trim().to_string();
    Some(TrendRecord {
        site_no,
        percentile,
        slope,
        trend: TrendClass::parse(&trend_label),
        trend_label,
    })
}

/// Site numbers sometimes come through spreadsheets as floats ("395510075343201.0").
pub fn parse_site_no(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_suffix(".0").unwrap_or(trimmed);
    digits.parse::<u64>().ok()
}
