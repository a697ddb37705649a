//! Data processing between the loaded sources and the dashboard widgets.
//!
//! - `geo`: rounded station coordinates and click-to-station resolution
//! - `chart`: slope-vs-percentile chart specifications for D3.js
//! - `session`: the per-session context tying catalog, index and renderer together

pub mod chart;
pub mod geo;
pub mod session;

pub use chart::{ChartSpec, TrendRenderer};
pub use geo::{ClickCoordinate, GeoIndex, GeoPoint, MatchMode, SiteResolver};
pub use session::{DashboardSession, MapMarker, Selection, StartupFailure, SELECT_PROMPT};
