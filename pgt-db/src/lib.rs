//! In-memory SQLite layer joining trend records to station metadata.
//!
//! The trend CSV and the NWIS station directory are loaded into two tables
//! and joined through the `trend_catalog` view (see [`schema::create_schema`]).
//! [`TrendCatalog`] is the session-facing handle over that join.
//!
//! # Usage
//!
//! ```rust
//! use pgt_db::TrendCatalog;
//! use pgt_nwis::{StationDirectory, StationRecord, TrendSchema, TrendStore};
//!
//! let trends = TrendStore::from_csv_str(
//!     "site_no,level_0,slope,Trend\n1000,p10,-0.4,decreasing\n2000,p10,0.2,increasing\n",
//!     &TrendSchema::default(),
//! ).unwrap();
//! let stations = StationDirectory::from_records(
//!     trends.site_ids(),
//!     vec![StationRecord { site_no: 1000, station_nm: "Well A".into(), dec_lat_va: 40.1111, dec_long_va: -75.2222 }],
//! ).unwrap();
//!
//! let catalog = TrendCatalog::build(&trends, &stations).unwrap();
//! assert_eq!(catalog.query("Well A").unwrap().len(), 1);
//! assert_eq!(catalog.dropped_sites().unwrap(), vec![2000]);
//! ```

pub mod schema;
mod loader;
mod queries;
pub mod models;

use log::{info, warn};
use pgt_nwis::{StationDirectory, TrendStore};
use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

pub use models::JoinedTrendRecord;

/// In-memory SQLite database holding trends and stations.
///
/// Cheaply cloneable (via `Rc`) for sharing across Dioxus components in a
/// single-threaded WASM environment.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}

impl PartialEq for Database {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.conn, &other.conn)
    }
}

/// Trend records joined to station names, queryable by station name.
#[derive(Clone, PartialEq)]
pub struct TrendCatalog {
    db: Database,
}

impl TrendCatalog {
    /// Load both sources and inner join them on site number.
    ///
    /// Trend sites without station metadata are dropped; the drop is logged
    /// and reported by [`TrendCatalog::dropped_sites`].
    pub fn build(trends: &TrendStore, stations: &StationDirectory) -> anyhow::Result<Self> {
        let db = Database::new()?;
        db.load_trends(trends)?;
        db.load_stations(stations)?;

        let dropped = db.query_dropped_sites()?;
        if !dropped.is_empty() {
            warn!(
                "trend catalog: {} sites have trends but no station metadata, dropped: {:?}",
                dropped.len(),
                dropped
            );
        }
        info!(
            "trend catalog: {} joined rows for {} stations",
            db.count_catalog_rows()?,
            stations.len()
        );
        Ok(Self { db })
    }

    /// Rows of one station in load order; empty for an unknown name.
    pub fn query(&self, station_nm: &str) -> anyhow::Result<Vec<JoinedTrendRecord>> {
        self.db.query_station_trends(station_nm)
    }

    /// Station names that have at least one joined row, alphabetically.
    pub fn station_names(&self) -> anyhow::Result<Vec<String>> {
        self.db.query_station_names()
    }

    /// Site numbers present in the trends but missing from the stations.
    pub fn dropped_sites(&self) -> anyhow::Result<Vec<u64>> {
        self.db.query_dropped_sites()
    }

    /// Number of joined rows.
    pub fn len(&self) -> anyhow::Result<usize> {
        self.db.count_catalog_rows()
    }

    pub fn is_empty(&self) -> anyhow::Result<bool> {
        Ok(self.len()? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgt_nwis::{StationRecord, TrendClass, TrendSchema};

    const TRENDS_CSV: &str = "\
site_no,level_0,slope,Trend
1000,p90,0.31,increasing
1000,p10,-0.42,decreasing
12345678,p10,1.2,increasing
1000,p50,0.05,no trend
12345678,p50,0.8,increasing
555,p10,0.0,no trend
";

    fn station(site_no: u64, name: &str, lat: f64, long: f64) -> StationRecord {
        StationRecord {
            site_no,
            station_nm: name.to_string(),
            dec_lat_va: lat,
            dec_long_va: long,
        }
    }

    fn catalog() -> TrendCatalog {
        let trends = TrendStore::from_csv_str(TRENDS_CSV, &TrendSchema::default()).unwrap();
        let stations = StationDirectory::from_records(
            trends.site_ids(),
            vec![
                station(1000, "Well A", 40.1111, -75.2222),
                station(12345678, "CE  118", 40.9, -77.8),
                station(999, "Unused", 41.0, -76.0),
            ],
        )
        .unwrap();
        TrendCatalog::build(&trends, &stations).unwrap()
    }

    #[test]
    fn database_creates_successfully() {
        assert!(Database::new().is_ok(), "Database should create without errors");
    }

    #[test]
    fn query_preserves_load_order() {
        let rows = catalog().query("Well A").unwrap();
        let percentiles: Vec<&str> = rows.iter().map(|r| r.percentile.as_str()).collect();
        assert_eq!(percentiles, vec!["p90", "p10", "p50"]);
        assert_eq!(rows[1].trend, TrendClass::Decreasing);
        assert!(rows.iter().all(|r| r.station_nm == "Well A" && r.site_no == 1000));
    }

    #[test]
    fn query_returns_trend_text_as_loaded() {
        let trends = TrendStore::from_csv_str(
            "site_no,level_0,slope,Trend\n1000,p10,-0.4,Decreasing\n1000,p50,0.3,up\n",
            &TrendSchema::default(),
        )
        .unwrap();
        let stations = StationDirectory::from_records(
            trends.site_ids(),
            vec![station(1000, "Well A", 40.1111, -75.2222)],
        )
        .unwrap();
        let rows = TrendCatalog::build(&trends, &stations)
            .unwrap()
            .query("Well A")
            .unwrap();
        assert_eq!(rows[0].trend_label, "Decreasing");
        assert_eq!(rows[0].trend, TrendClass::Decreasing);
        assert_eq!(rows[1].trend_label, "up");
        assert_eq!(rows[1].trend, TrendClass::Increasing);
    }

    #[test]
    fn query_unknown_station_is_empty() {
        assert!(catalog().query("No Such Well").unwrap().is_empty());
        assert!(catalog().query("").unwrap().is_empty());
    }

    #[test]
    fn join_keeps_one_row_per_trend_row() {
        let catalog = catalog();
        // names were normalized by the directory
        let rows = catalog.query("CE 118").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].site_no, 12345678);
        // 6 trend rows, site 555 has no station
        assert_eq!(catalog.len().unwrap(), 5);
    }

    #[test]
    fn join_reports_dropped_sites() {
        assert_eq!(catalog().dropped_sites().unwrap(), vec![555]);
    }

    #[test]
    fn station_names_only_lists_joined_stations() {
        assert_eq!(
            catalog().station_names().unwrap(),
            vec!["CE 118".to_string(), "Well A".to_string()]
        );
    }

    #[test]
    fn catalog_is_cloneable() {
        let catalog = catalog();
        let clone = catalog.clone();
        assert!(catalog == clone, "Clone should share the same connection");
        assert_eq!(clone.len().unwrap(), 5);
    }
}
