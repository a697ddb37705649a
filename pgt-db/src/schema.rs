//! SQL schema definitions for the in-memory SQLite database.
//!
//! The schema is applied as a single batch when the database is initialized.

/// Returns the full SQL schema as a single batch string.
///
/// - `trends` - one row per (site, percentile) in file order (`row_order`)
/// - `stations` - NWIS metadata, one row per site
///
/// The joined table is the `trend_catalog` view: an inner join on `site_no`,
/// so trend rows without a station never appear and `station_nm` is never null.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS trends (
        row_order INTEGER PRIMARY KEY,
        site_no INTEGER NOT NULL,
        percentile TEXT NOT NULL,
        slope REAL NOT NULL,
        trend TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_trends_site ON trends(site_no);

    CREATE TABLE IF NOT EXISTS stations (
        site_no INTEGER PRIMARY KEY,
        station_nm TEXT NOT NULL,
        dec_lat_va REAL NOT NULL,
        dec_long_va REAL NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_stations_name ON stations(station_nm);

    CREATE VIEW IF NOT EXISTS trend_catalog AS
        SELECT t.row_order, t.site_no, s.station_nm, t.percentile, t.slope, t.trend
        FROM trends t
        INNER JOIN stations s ON t.site_no = s.site_no;
    "#
}
