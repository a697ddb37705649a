//! Water Level Trends for PA Groundwater
//!
//! Map of USGS groundwater monitoring wells on the left; clicking a well
//! draws its Mann-Kendall slope per water level percentile on the right.
//!
//! Data flow:
//! 1. `build.rs` copies `trends_all_sites.csv` into `OUT_DIR`.
//! 2. `include_str!` embeds the CSV into the WASM binary.
//! 3. On mount, the trends are parsed and their site numbers looked up in
//!    one NWIS site service call.
//! 4. Trends and stations are joined into a `DashboardSession`; the map is
//!    drawn with one marker per station.
//! 5. Each map click is resolved to a station and its trend chart rendered,
//!    or the prompt shown when the click is not on a station.

use dioxus::prelude::*;
use futures::StreamExt;
use pgt_chart_ui::components::{
    ChartContainer, LoadingSpinner, PageHeader, SitePrompt, StartupError,
};
use pgt_chart_ui::js_bridge::{self, MapConfig};
use pgt_chart_ui::state::AppState;
use pgt_data::chart::{CHART_HEIGHT, CHART_WIDTH};
use pgt_data::{ClickCoordinate, DashboardSession, MatchMode, Selection, StartupFailure};
use pgt_nwis::{NwisConfig, StationDirectory, TrendSchema, TrendStore};

/// Precomputed percentile trends for every site.
const TRENDS_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/trends_all_sites.csv"));

/// DOM element IDs Leaflet and D3.js render into.
const MAP_ID: &str = "station-map";
const CHART_ID: &str = "trend-chart";

const PAGE_TITLE: &str = "Water Level Trends for PA Groundwater";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("main"))
        .launch(App);
}

/// Parse the embedded trends, look up their stations and join them.
async fn load_session() -> anyhow::Result<DashboardSession> {
    let trends = TrendStore::from_csv_str(TRENDS_CSV, &TrendSchema::default())?;
    let client = reqwest::Client::new();
    let stations =
        StationDirectory::resolve(&client, &NwisConfig::default(), trends.site_ids()).await?;
    DashboardSession::build(&trends, &stations, MatchMode::Exact)
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);
    let map_config = MapConfig::default();

    // Map clicks arrive from JS; each one is resolved before the next is read.
    let clicks = use_coroutine(move |mut rx: UnboundedReceiver<ClickCoordinate>| async move {
        while let Some(click) = rx.next().await {
            let outcome = match &*state.session.peek() {
                Some(session) => session.select(click),
                None => continue,
            };
            match outcome {
                Ok(selection) => state.selection.set(selection),
                Err(e) => {
                    log::error!("Failed to look up trends for click {:?}: {:#}", click, e);
                    state.selection.set(Selection::NoSiteSelected);
                }
            }
        }
    });

    // Load trends and station metadata on mount
    use_future(move || async move {
        match load_session().await {
            Ok(session) => state.session.set(Some(session)),
            Err(e) => {
                log::error!("Session startup failed: {:#}", e);
                state.startup_failure.set(Some(StartupFailure::from_error(&e)));
            }
        }
        state.loading.set(false);
    });

    // Draw the map once the session is ready
    let marker_config = map_config.clone();
    use_effect(move || {
        if (state.loading)() {
            return;
        }
        let session = state.session.read();
        let Some(session) = session.as_ref() else {
            return;
        };

        js_bridge::init_scripts();
        js_bridge::on_map_click(move |lat, lng| clicks.send(ClickCoordinate::new(lat, lng)));

        let markers_json = serde_json::to_string(session.markers()).unwrap_or_default();
        js_bridge::render_station_map(MAP_ID, &markers_json, &marker_config);
    });

    // Redraw the chart after every click
    use_effect(move || match &*state.selection.read() {
        Selection::Station { chart, .. } => {
            let chart_json = serde_json::to_string(chart).unwrap_or_default();
            js_bridge::render_trend_chart(CHART_ID, &chart_json);
        }
        Selection::NoSiteSelected => js_bridge::destroy_chart(CHART_ID),
    });

    let site_selected = matches!(*state.selection.read(), Selection::Station { .. });

    rsx! {
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            PageHeader {
                title: PAGE_TITLE.to_string(),
                subtitle: "Mann-Kendall slope of annual water level percentiles at USGS monitoring wells".to_string(),
            }

            if let Some(failure) = (state.startup_failure)() {
                StartupError { failure }
            } else if (state.loading)() {
                LoadingSpinner {}
            } else {
                div {
                    style: "display: flex; gap: 24px; align-items: flex-start;",

                    // Map column
                    div {
                        style: "flex: 1;",
                        ChartContainer {
                            id: MAP_ID.to_string(),
                            width: map_config.width,
                            height: map_config.height,
                        }
                    }

                    // Trend chart column
                    div {
                        style: "flex: 1;",
                        if site_selected {
                            ChartContainer {
                                id: CHART_ID.to_string(),
                                width: CHART_WIDTH,
                                height: CHART_HEIGHT,
                            }
                        } else {
                            SitePrompt {}
                        }
                    }
                }
            }
        }
    }
}
