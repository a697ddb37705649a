//! The per-session context: everything loaded at startup, read-only afterwards.

use crate::chart::{ChartSpec, TrendRenderer};
use crate::geo::{ClickCoordinate, GeoIndex, MatchMode, SiteResolver};
use log::{info, warn};
use pgt_db::TrendCatalog;
use pgt_nwis::{StationDirectory, TrendStore, TrendsError};
use serde::Serialize;

/// Shown in place of the chart until a site is clicked.
pub const SELECT_PROMPT: &str = "Choose a USGS groundwater site to get started";

/// A station as drawn on the map, at its unrounded coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub station_nm: String,
    pub lat: f64,
    pub lng: f64,
}

/// Outcome of one map click.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// The click did not land on a station. Not an error.
    NoSiteSelected,
    Station { station_nm: String, chart: ChartSpec },
}

/// Why the session never started, in words for the page.
#[derive(Debug, Clone, PartialEq)]
pub struct StartupFailure {
    pub message: String,
    pub hint: &'static str,
}

impl StartupFailure {
    pub fn from_error(err: &anyhow::Error) -> Self {
        let hint = match err.chain().find_map(|e| e.downcast_ref::<TrendsError>()) {
            Some(TrendsError::DataUnavailable(_)) => {
                "The embedded trend table could not be read. Rebuild the dashboard with a valid trends_all_sites.csv."
            }
            Some(TrendsError::LookupUnavailable(_)) => {
                "The USGS site service could not be reached. Reload the page to try again."
            }
            Some(TrendsError::IncompleteMetadata { .. }) => {
                "The USGS site service returned no stations for the trend table's sites."
            }
            None => "The trend catalog could not be built. Reload the page to try again.",
        };
        Self {
            message: format!("{:#}", err),
            hint,
        }
    }
}

/// Catalog, index and renderer built once per session.
#[derive(Clone, PartialEq)]
pub struct DashboardSession {
    catalog: TrendCatalog,
    index: GeoIndex,
    markers: Vec<MapMarker>,
    charted_stations: Vec<String>,
    resolver: SiteResolver,
    renderer: TrendRenderer,
}

impl DashboardSession {
    pub fn build(
        trends: &TrendStore,
        stations: &StationDirectory,
        mode: MatchMode,
    ) -> anyhow::Result<Self> {
        let catalog = TrendCatalog::build(trends, stations)?;
        let index = GeoIndex::build(stations);
        let markers = stations
            .iter()
            .map(|s| MapMarker {
                station_nm: s.station_nm.clone(),
                lat: s.dec_lat_va,
                lng: s.dec_long_va,
            })
            .collect();
        let charted_stations = catalog.station_names()?;
        let uncharted = stations.len().saturating_sub(charted_stations.len());
        if uncharted > 0 {
            warn!(
                "session: {} of {} stations have no trend rows and will not chart",
                uncharted,
                stations.len()
            );
        }
        info!(
            "session: ready with {} map markers, {} stations with trends",
            index.len(),
            charted_stations.len()
        );
        Ok(Self {
            catalog,
            index,
            markers,
            charted_stations,
            resolver: SiteResolver::new(mode),
            renderer: TrendRenderer::default(),
        })
    }

    /// Resolve a click, look up the station's trends and shape its chart.
    pub fn select(&self, click: ClickCoordinate) -> anyhow::Result<Selection> {
        let Some(station_nm) = self.resolver.resolve(click, &self.index) else {
            return Ok(Selection::NoSiteSelected);
        };
        let rows = self.catalog.query(station_nm)?;
        match self.renderer.render(&rows, station_nm) {
            Some(chart) => Ok(Selection::Station {
                station_nm: station_nm.to_string(),
                chart,
            }),
            None => {
                warn!("session: station '{}' has no trend rows", station_nm);
                Ok(Selection::NoSiteSelected)
            }
        }
    }

    pub fn markers(&self) -> &[MapMarker] {
        &self.markers
    }

    /// Names of the stations a click can chart, alphabetically.
    pub fn charted_stations(&self) -> &[String] {
        &self.charted_stations
    }

    pub fn catalog(&self) -> &TrendCatalog {
        &self.catalog
    }

    pub fn index(&self) -> &GeoIndex {
        &self.index
    }
}
