//! Station coordinates rounded for click matching.
//!
//! Rounding is half-to-even on the scaled value, `(v * 10^4).round_ties_even() / 10^4`,
//! the same rule NumPy's `round` applies. A coordinate exactly on a .00005
//! boundary therefore rounds toward the even fourth decimal. Index points and
//! clicks go through the same [`round_coord`], so the comparison is exact.

use log::warn;
use pgt_nwis::StationDirectory;
use serde::{Deserialize, Serialize};

/// Decimal places kept for matching clicks to stations.
pub const COORD_PRECISION: i32 = 4;

/// Mean earth radius used for tolerance matching.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Round a coordinate to [`COORD_PRECISION`] decimal places.
pub fn round_coord(value: f64) -> f64 {
    let scale = 10f64.powi(COORD_PRECISION);
    (value * scale).round_ties_even() / scale
}

/// Great-circle distance in meters.
pub fn haversine_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().asin()
}

/// The last point the user clicked on the map, full precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClickCoordinate {
    pub lat: f64,
    pub lng: f64,
}

impl ClickCoordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// One station at rounded coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoPoint {
    pub station_nm: String,
    pub lat: f64,
    pub long: f64,
}

/// Station points in directory order. Coincident points are kept.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeoIndex {
    points: Vec<GeoPoint>,
}

impl GeoIndex {
    /// One rounded point per station, in the directory's order.
    pub fn build(stations: &StationDirectory) -> GeoIndex {
        let points = stations
            .iter()
            .map(|s| GeoPoint {
                station_nm: s.station_nm.clone(),
                lat: round_coord(s.dec_lat_va),
                long: round_coord(s.dec_long_va),
            })
            .collect();
        let index = GeoIndex { points };
        for (first, shadowed) in index.duplicates() {
            warn!(
                "geo index: '{}' shares rounded coordinates with '{}' and can never be selected",
                shadowed, first
            );
        }
        index
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Pairs of (winning station, shadowed station) sharing rounded coordinates.
    pub fn duplicates(&self) -> Vec<(&str, &str)> {
        let mut pairs = Vec::new();
        for (i, later) in self.points.iter().enumerate() {
            if let Some(first) = self.points[..i]
                .iter()
                .find(|p| p.lat == later.lat && p.long == later.long)
            {
                pairs.push((first.station_nm.as_str(), later.station_nm.as_str()));
            }
        }
        pairs
    }
}

/// How a click is matched to a station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum MatchMode {
    /// Rounded click must equal rounded station coordinates.
    #[default]
    Exact,
    /// Closest station within `tolerance_m` meters of the click.
    Nearest { tolerance_m: f64 },
}

/// Maps a map click to the station it selects.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SiteResolver {
    pub mode: MatchMode,
}

impl SiteResolver {
    pub fn new(mode: MatchMode) -> Self {
        Self { mode }
    }

    /// Station selected by `click`, or `None` when the click is not on a site.
    ///
    /// In exact mode the first matching point in index order wins.
    ///
    /// ```rust
    /// use pgt_data::geo::{ClickCoordinate, GeoIndex, SiteResolver};
    /// use pgt_nwis::{StationDirectory, StationRecord};
    ///
    /// let ids = [1000u64].into_iter().collect();
    /// let stations = StationDirectory::from_records(&ids, vec![StationRecord {
    ///     site_no: 1000, station_nm: "Well A".into(), dec_lat_va: 40.1111, dec_long_va: -75.2222,
    /// }]).unwrap();
    /// let index = GeoIndex::build(&stations);
    /// let resolver = SiteResolver::default();
    /// assert_eq!(resolver.resolve(ClickCoordinate::new(40.11111, -75.22219), &index), Some("Well A"));
    /// assert_eq!(resolver.resolve(ClickCoordinate::new(40.2, -75.2), &index), None);
    /// ```
    pub fn resolve<'a>(&self, click: ClickCoordinate, index: &'a GeoIndex) -> Option<&'a str> {
        match self.mode {
            MatchMode::Exact => {
                let lat = round_coord(click.lat);
                let long = round_coord(click.lng);
                index
                    .points
                    .iter()
                    .find(|p| p.lat == lat && p.long == long)
                    .map(|p| p.station_nm.as_str())
            }
            MatchMode::Nearest { tolerance_m } => {
                let mut best: Option<(&GeoPoint, f64)> = None;
                for p in &index.points {
                    let d = haversine_m(click.lat, click.lng, p.lat, p.long);
                    if d > tolerance_m {
                        continue;
                    }
                    match best {
                        Some((_, best_d)) if best_d <= d => {}
                        _ => best = Some((p, d)),
                    }
                }
                best.map(|(p, _)| p.station_nm.as_str())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgt_nwis::StationRecord;
    use std::collections::BTreeSet;

    fn directory(stations: &[(u64, &str, f64, f64)]) -> StationDirectory {
        let ids: BTreeSet<u64> = stations.iter().map(|s| s.0).collect();
        let records = stations
            .iter()
            .map(|&(site_no, name, lat, long)| StationRecord {
                site_no,
                station_nm: name.to_string(),
                dec_lat_va: lat,
                dec_long_va: long,
            })
            .collect();
        StationDirectory::from_records(&ids, records).unwrap()
    }

    fn two_station_index() -> GeoIndex {
        GeoIndex::build(&directory(&[
            (1, "First", 41.2033, -77.6600),
            (2, "Second", 40.0000, -75.0000),
        ]))
    }

    #[test]
    fn test_round_coord() {
        assert_eq!(round_coord(41.20334), 41.2033);
        assert_eq!(round_coord(-77.65998), -77.66);
        assert_eq!(round_coord(40.11111), 40.1111);
        assert_eq!(round_coord(-75.22219), -75.2222);
    }

    #[test]
    fn test_round_coord_ties_to_even() {
        // each of these scales to an exact .5
        assert_eq!(round_coord(0.00025), 0.0002);
        assert_eq!(round_coord(0.00035), 0.0004);
        assert_eq!(round_coord(40.00005), 40.0);
        assert_eq!(round_coord(40.00015), 40.0002);
        assert_eq!(round_coord(-0.00005), -0.0);
    }

    #[test]
    fn test_build_rounds_and_keeps_order() {
        let index = GeoIndex::build(&directory(&[
            (2, "B", 40.123456, -75.987654),
            (1, "A", 41.0, -77.0),
        ]));
        assert_eq!(index.len(), 2);
        assert_eq!(index.points()[0].station_nm, "B");
        assert_eq!(index.points()[0].lat, 40.1235);
        assert_eq!(index.points()[0].long, -75.9877);
    }

    #[test]
    fn test_build_is_idempotent() {
        let stations = directory(&[(1, "A", 41.20334, -77.65998), (2, "B", 40.0, -75.0)]);
        assert_eq!(GeoIndex::build(&stations), GeoIndex::build(&stations));
    }

    #[test]
    fn test_exact_match_within_rounding() {
        let index = two_station_index();
        let resolver = SiteResolver::default();
        assert_eq!(
            resolver.resolve(ClickCoordinate::new(41.20334, -77.65998), &index),
            Some("First")
        );
        assert_eq!(
            resolver.resolve(ClickCoordinate::new(40.0, -75.0), &index),
            Some("Second")
        );
    }

    #[test]
    fn test_exact_match_misses_neighbouring_click() {
        let index = two_station_index();
        let resolver = SiteResolver::default();
        assert_eq!(resolver.resolve(ClickCoordinate::new(41.2035, -77.6600), &index), None);
        assert_eq!(resolver.resolve(ClickCoordinate::new(0.0, 0.0), &index), None);
        assert_eq!(resolver.resolve(ClickCoordinate::new(f64::NAN, -77.66), &index), None);
    }

    #[test]
    fn test_exact_match_on_empty_index() {
        let resolver = SiteResolver::default();
        assert_eq!(
            resolver.resolve(ClickCoordinate::new(41.2033, -77.66), &GeoIndex::default()),
            None
        );
    }

    #[test]
    fn test_duplicate_coordinates_first_wins() {
        let index = GeoIndex::build(&directory(&[
            (1, "Nested Shallow", 40.5, -76.5),
            (2, "Nested Deep", 40.50001, -76.49999),
        ]));
        assert_eq!(index.duplicates(), vec![("Nested Shallow", "Nested Deep")]);
        assert_eq!(
            SiteResolver::default().resolve(ClickCoordinate::new(40.5, -76.5), &index),
            Some("Nested Shallow")
        );
    }

    #[test]
    fn test_nearest_within_tolerance() {
        let index = two_station_index();
        let resolver = SiteResolver::new(MatchMode::Nearest { tolerance_m: 50.0 });
        // ~22 m north of the first station
        assert_eq!(
            resolver.resolve(ClickCoordinate::new(41.2035, -77.6600), &index),
            Some("First")
        );
        // ~1.1 km away
        assert_eq!(resolver.resolve(ClickCoordinate::new(41.2133, -77.66), &index), None);
    }

    #[test]
    fn test_haversine_m() {
        let d = haversine_m(40.0, -75.0, 40.0, -75.0);
        assert!(d.abs() < 1e-9);
        // one degree of latitude is ~111.2 km
        let d = haversine_m(40.0, -75.0, 41.0, -75.0);
        assert!((d - 111_195.0).abs() < 100.0);
    }
}
