//! Typed query methods over the `trend_catalog` view.

use crate::models::JoinedTrendRecord;
use crate::Database;
use pgt_nwis::TrendClass;
use rusqlite::params;

impl Database {
    /// Joined rows for one station, in the order they were loaded.
    pub fn query_station_trends(&self, station_nm: &str) -> anyhow::Result<Vec<JoinedTrendRecord>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT site_no, station_nm, percentile, slope, trend
             FROM trend_catalog
             WHERE station_nm = ?1
             ORDER BY row_order",
        )?;
        let rows = stmt
            .query_map(params![station_nm], |row| {
                let site_no: i64 = row.get(0)?;
                let trend_label: String = row.get(4)?;
                Ok(JoinedTrendRecord {
                    site_no: site_no as u64,
                    station_nm: row.get(1)?,
                    percentile: row.get(2)?,
                    slope: row.get(3)?,
                    trend: TrendClass::parse(&trend_label),
                    trend_label,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "query: query_station_trends({}) returned {} records",
            station_nm,
            rows.len()
        );
        Ok(rows)
    }

    /// Distinct station names present in the join.
    pub fn query_station_names(&self) -> anyhow::Result<Vec<String>> {
        let conn = self.conn.borrow();
        let mut stmt =
            conn.prepare("SELECT DISTINCT station_nm FROM trend_catalog ORDER BY station_nm")?;
        let rows = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(rows)
    }

    /// Trend site numbers with no matching station row.
    pub fn query_dropped_sites(&self) -> anyhow::Result<Vec<u64>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT DISTINCT t.site_no
             FROM trends t
             LEFT JOIN stations s ON t.site_no = s.site_no
             WHERE s.site_no IS NULL
             ORDER BY t.site_no",
        )?;
        let rows = stmt
            .query_map([], |row| row.get::<_, i64>(0))?
            .map(|r| r.map(|id| id as u64))
            .collect::<Result<Vec<u64>, _>>()?;
        Ok(rows)
    }

    pub fn count_catalog_rows(&self) -> anyhow::Result<usize> {
        let conn = self.conn.borrow();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM trend_catalog", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
