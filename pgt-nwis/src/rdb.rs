//! Parser for the NWIS site service RDB output.
//!
//! RDB is tab-delimited text. Lines starting with `#` are comments, the first
//! remaining line holds column names and the line after it holds column
//! widths/types (`5s	15s	50s ...`), which is skipped.
//!
//! See: <https://waterservices.usgs.gov/docs/site-service/>

use crate::error::{Result, TrendsError};
use crate::station::{normalize_station_name, StationRecord};
use crate::trend::parse_site_no;
use csv::{ReaderBuilder, StringRecord};
use log::warn;
use std::collections::BTreeSet;

/// Default NWIS site service endpoint.
pub const NWIS_SITE_URL: &str = "https://waterservices.usgs.gov/nwis/site/";

/// Build the batched site service query for every requested site number.
///
/// NWIS site numbers are zero padded to at least 8 digits.
pub fn site_url(base_url: &str, site_ids: &BTreeSet<u64>) -> String {
    let sites = site_ids
        .iter()
        .map(|id| format!("{:08}", id))
        .collect::<Vec<String>>()
        .join(",");
    format!(
        "{}?format=rdb&siteOutput=basic&siteStatus=all&sites={}",
        base_url, sites
    )
}

fn column(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| TrendsError::LookupUnavailable(format!("RDB response lacks column '{}'", name)))
}

/// Parse an RDB body into normalized station records, in response order.
///
/// Rows whose site number or coordinates cannot be parsed are skipped.
pub fn parse_site_rdb(body: &str) -> Result<Vec<StationRecord>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .comment(Some(b'#'))
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(body.as_bytes());
    let lookup_err = |e: csv::Error| TrendsError::LookupUnavailable(e.to_string());

    let headers = rdr.headers().map_err(lookup_err)?.clone();
    let site_col = column(&headers, "site_no")?;
    let name_col = column(&headers, "station_nm")?;
    let lat_col = column(&headers, "dec_lat_va")?;
    let long_col = column(&headers, "dec_long_va")?;

    let mut stations = Vec::new();
    let mut skipped = 0u32;
    // The first record after the header is the column format line.
    for row in rdr.records().skip(1) {
        let r = row.map_err(lookup_err)?;
        let site_no = r.get(site_col).and_then(parse_site_no);
        let lat = r.get(lat_col).and_then(|s| s.trim().parse::<f64>().ok());
        let long = r.get(long_col).and_then(|s| s.trim().parse::<f64>().ok());
        match (site_no, lat, long) {
            (Some(site_no), Some(dec_lat_va), Some(dec_long_va)) => {
                stations.push(StationRecord {
                    site_no,
                    station_nm: normalize_station_name(r.get(name_col).unwrap_or("")),
                    dec_lat_va,
                    dec_long_va,
                });
            }
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!("rdb: skipped {} site rows without usable id or coordinates", skipped);
    }
    Ok(stations)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trimmed from https://waterservices.usgs.gov/nwis/site/?format=rdb&siteOutput=basic&sites=...
    const RDB_BODY: &str = "#
# US Geological Survey
# retrieved: 2024-01-09 10:21:44 -05:00
#
agency_cd\tsite_no\tstation_nm\tsite_tp_cd\tdec_lat_va\tdec_long_va\tcoord_acy_cd\tdec_coord_datum_cd\talt_va\talt_acy_va\talt_datum_cd\thuc_cd
5s\t15s\t50s\t7s\t16s\t16s\t1s\t10s\t8s\t3s\t10s\t16s
USGS\t395510075343201\tPH  1234  PHILADELPHIA   CO\tGW\t39.9194444\t-75.5755556\tS\tNAD83\t 30.00\t 5\tNAVD88\t02040202
USGS\t00001000\tWELL    A\tGW\t40.1111\t-75.2222\tS\tNAD83\t 100.00\t 5\tNAVD88\t02040202
USGS\t412000077000001\tNO COORDS WELL\tGW\t\t\tS\tNAD83\t\t\t\t
";

    #[test]
    fn test_parse_site_rdb() {
        let stations = parse_site_rdb(RDB_BODY).unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].site_no, 395510075343201);
        assert_eq!(stations[0].station_nm, "PH 1234 PHILADELPHIA CO");
        assert_eq!(stations[1].site_no, 1000);
        assert_eq!(stations[1].station_nm, "WELL A");
        assert!((stations[1].dec_lat_va - 40.1111).abs() < f64::EPSILON);
        assert!((stations[1].dec_long_va - (-75.2222)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_site_rdb_without_rows() {
        let body = "# no sites\nagency_cd\tsite_no\tstation_nm\tdec_lat_va\tdec_long_va\n5s\t15s\t50s\t16s\t16s\n";
        assert!(parse_site_rdb(body).unwrap().is_empty());
    }

    #[test]
    fn test_parse_site_rdb_missing_column() {
        let body = "agency_cd\tsite_no\tstation_nm\n5s\t15s\t50s\n";
        let err = parse_site_rdb(body).unwrap_err();
        assert!(matches!(err, TrendsError::LookupUnavailable(_)));
    }

    #[test]
    fn test_site_url_pads_site_numbers() {
        let ids: BTreeSet<u64> = [1000u64, 395510075343201].into_iter().collect();
        let url = site_url(NWIS_SITE_URL, &ids);
        assert_eq!(
            url,
            "https://waterservices.usgs.gov/nwis/site/?format=rdb&siteOutput=basic&siteStatus=all&sites=00001000,395510075343201"
        );
    }
}
