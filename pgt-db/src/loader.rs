//! Loading functions for populating the in-memory SQLite database.
//!
//! Both sources are already parsed (`TrendStore`, `StationDirectory`), so
//! loading is a straight insert inside one transaction per table.

use crate::Database;
use pgt_nwis::{StationDirectory, TrendStore};
use rusqlite::params;

impl Database {
    /// Insert every trend record, numbering rows in file order.
    pub fn load_trends(&self, trends: &TrendStore) -> anyhow::Result<()> {
        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO trends (row_order, site_no, percentile, slope, trend)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for (row_order, r) in trends.records().iter().enumerate() {
                stmt.execute(params![
                    row_order as i64,
                    r.site_no as i64,
                    r.percentile,
                    r.slope,
                    r.trend_label
                ])?;
            }
        }
        tx.commit()?;
        log::info!("loader: Loaded {} trend rows", trends.records().len());
        Ok(())
    }

    /// Insert every station of the directory.
    pub fn load_stations(&self, stations: &StationDirectory) -> anyhow::Result<()> {
        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO stations (site_no, station_nm, dec_lat_va, dec_long_va)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for s in stations.iter() {
                stmt.execute(params![
                    s.site_no as i64,
                    s.station_nm,
                    s.dec_lat_va,
                    s.dec_long_va
                ])?;
            }
        }
        tx.commit()?;
        log::info!("loader: Loaded {} stations", stations.len());
        Ok(())
    }
}
