//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The Leaflet map and the D3.js trend chart live in `assets/js/*.js`. They are
//! evaluated as globals (no ES modules) once both libraries have loaded and
//! exposed via `window.*`. Map clicks come back into Rust through the
//! `window.__pgtOnMapClick` callback installed by [`on_map_click`].

use serde::Serialize;
use wasm_bindgen::prelude::*;

// Embed the chart JS files at compile time
static STATION_MAP_JS: &str = include_str!("../assets/js/station-map.js");
static TREND_CHART_JS: &str = include_str!("../assets/js/trend-chart.js");

/// Leaflet map settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    /// [lat, lng] of the initial view
    pub center: [f64; 2],
    pub zoom: f64,
    pub width: u32,
    pub height: u32,
    pub marker_radius: u32,
    pub marker_color: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: [41.2033, -77.66],
            zoom: 6.75,
            width: 530,
            height: 450,
            marker_radius: 8,
            marker_color: "red".to_string(),
        }
    }
}

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('PGT JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Initialize map and chart scripts with a wait-for-libraries polling loop.
///
/// The scripts are stored on `window` and evaluated at global scope by an
/// indirect `eval` once both `d3` and `L` (Leaflet) exist, then their
/// functions are promoted to `window.*`.
pub fn init_scripts() {
    let all_js = [STATION_MAP_JS, TREND_CHART_JS].join("\n");
    let store_js = format!(
        "window.__pgtScripts = {};",
        serde_json::to_string(&all_js).unwrap_or_default()
    );
    let _ = js_sys::eval(&store_js);

    let init_js = r#"
        (function() {
            var waitForLibs = setInterval(function() {
                if (typeof d3 !== 'undefined' && typeof L !== 'undefined') {
                    clearInterval(waitForLibs);
                    (0, eval)(window.__pgtScripts);
                    delete window.__pgtScripts;
                    if (typeof renderStationMap !== 'undefined') window.renderStationMap = renderStationMap;
                    if (typeof renderTrendChart !== 'undefined') window.renderTrendChart = renderTrendChart;
                    window.__pgtScriptsReady = true;
                    console.log('PGT map and chart scripts initialized');
                }
            }, 100);
        })();
    "#;
    let _ = js_sys::eval(init_js);
}

/// Escape a JSON payload for embedding in a single-quoted JS string.
fn escape_payload(json: &str) -> String {
    json.replace('\\', "\\\\").replace('\'', "\\'").replace('\n', "")
}

/// Call `window.<function>(container, data, config)` once scripts and container exist.
fn render_when_ready(function: &str, container_id: &str, data_json: &str, config_json: &str) {
    let escaped_data = escape_payload(data_json);
    let escaped_config = escape_payload(config_json);
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__pgtScriptsReady &&
                    typeof window.{function} !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.{function}('{container_id}', '{escaped_data}', '{escaped_config}');
                    }} catch(e) {{ console.error('[PGT] {function} error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Render the station map with one clickable circle marker per station.
pub fn render_station_map(container_id: &str, markers_json: &str, config: &MapConfig) {
    let config_json = serde_json::to_string(config).unwrap_or_default();
    render_when_ready("renderStationMap", container_id, markers_json, &config_json);
}

/// Render a trend chart from a serialized `ChartSpec`.
pub fn render_trend_chart(container_id: &str, chart_json: &str) {
    render_when_ready("renderTrendChart", container_id, chart_json, "{}");
}

/// Destroy/clean up a chart in the given container.
pub fn destroy_chart(container_id: &str) {
    call_js(&format!(
        "var el = document.getElementById('{}'); if (el) el.innerHTML = '';",
        container_id
    ));
}

/// Install `handler` as the receiver of map clicks `(lat, lng)`.
///
/// The closure is leaked and stays installed for the lifetime of the page.
pub fn on_map_click(handler: impl FnMut(f64, f64) + 'static) {
    let closure = Closure::<dyn FnMut(f64, f64)>::new(handler);
    match web_sys::window() {
        Some(window) => {
            if js_sys::Reflect::set(&window, &JsValue::from_str("__pgtOnMapClick"), closure.as_ref())
                .is_err()
            {
                log::warn!("js_bridge: could not install map click handler");
            }
        }
        None => log::warn!("js_bridge: no window, map clicks are ignored"),
    }
    closure.forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_payload_handles_quotes() {
        assert_eq!(escape_payload(r#"{"a":"O'Hara"}"#), r#"{"a":"O\'Hara"}"#);
        assert_eq!(escape_payload("{\n}"), "{}");
    }

    #[test]
    fn map_config_serializes_camel_case() {
        let json = serde_json::to_value(MapConfig::default()).unwrap();
        assert_eq!(json["markerRadius"], 8);
        assert_eq!(json["center"][0], 41.2033);
        assert_eq!(json["zoom"], 6.75);
    }
}
