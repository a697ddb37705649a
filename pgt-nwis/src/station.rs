use crate::error::{Result, TrendsError};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

#[cfg(feature = "api")]
use crate::rdb::{parse_site_rdb, site_url};
#[cfg(feature = "api")]
use reqwest::{Client, StatusCode};

/// Represents a USGS groundwater monitoring well with its NWIS site metadata.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct StationRecord {
    pub site_no: u64,
    /// Station name with internal whitespace collapsed to single spaces
    pub station_nm: String,
    /// Latitude in decimal degrees
    pub dec_lat_va: f64,
    /// Longitude in decimal degrees
    pub dec_long_va: f64,
}

/// Where to find the NWIS site service.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NwisConfig {
    pub base_url: String,
}

impl Default for NwisConfig {
    fn default() -> Self {
        Self {
            base_url: crate::rdb::NWIS_SITE_URL.to_string(),
        }
    }
}

/// Collapse runs of whitespace to a single space and trim the ends.
///
/// NWIS pads station names with runs of spaces (`"PH  1234   PHILADELPHIA"`).
pub fn normalize_station_name(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Station metadata for every site of a session, in service response order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StationDirectory {
    stations: Vec<StationRecord>,
    by_site: HashMap<u64, usize>,
}

impl StationDirectory {
    /// Build a directory from records returned for `requested` site numbers.
    ///
    /// Duplicate site numbers keep their first record. An empty answer to a
    /// non-empty request is `IncompleteMetadata`.
    pub fn from_records(
        requested: &BTreeSet<u64>,
        records: Vec<StationRecord>,
    ) -> Result<StationDirectory> {
        let mut directory = StationDirectory::default();
        for record in records {
            if directory.by_site.contains_key(&record.site_no) {
                warn!(
                    "station directory: duplicate record for site {} ignored",
                    record.site_no
                );
                continue;
            }
            directory
                .by_site
                .insert(record.site_no, directory.stations.len());
            directory.stations.push(StationRecord {
                station_nm: normalize_station_name(&record.station_nm),
                ..record
            });
        }

        if !requested.is_empty() && directory.stations.is_empty() {
            return Err(TrendsError::IncompleteMetadata {
                requested: requested.len(),
            });
        }
        let missing = requested
            .iter()
            .filter(|id| !directory.by_site.contains_key(id))
            .count();
        if missing > 0 {
            warn!(
                "station directory: {} of {} requested sites have no metadata",
                missing,
                requested.len()
            );
        }
        info!(
            "station directory: resolved {} stations",
            directory.stations.len()
        );
        Ok(directory)
    }

    /// Look up all requested site numbers with one NWIS site service call.
    ///
    /// An empty request returns an empty directory without touching the network.
    #[cfg(feature = "api")]
    pub async fn resolve(
        client: &Client,
        config: &NwisConfig,
        site_ids: &BTreeSet<u64>,
    ) -> Result<StationDirectory> {
        if site_ids.is_empty() {
            return Ok(StationDirectory::default());
        }
        let url = site_url(&config.base_url, site_ids);
        info!("station directory: querying NWIS for {} sites", site_ids.len());

        let response = client.get(&url).send().await?;
        let status = response.status();
        // NWIS answers 404 when none of the requested sites exist.
        if status == StatusCode::NOT_FOUND {
            return Err(TrendsError::IncompleteMetadata {
                requested: site_ids.len(),
            });
        }
        if !status.is_success() {
            return Err(TrendsError::LookupUnavailable(format!(
                "NWIS site service answered {}",
                status
            )));
        }
        let body = response.text().await?;
        let records = parse_site_rdb(&body)?;
        StationDirectory::from_records(site_ids, records)
    }

    pub fn get(&self, site_no: u64) -> Option<&StationRecord> {
        self.by_site.get(&site_no).map(|&i| &self.stations[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &StationRecord> {
        self.stations.iter()
    }

    pub fn stations(&self) -> &[StationRecord] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}
