//! Slope-vs-percentile chart specifications.
//!
//! A [`ChartSpec`] is plain data serialized to JSON and drawn by
//! `renderTrendChart` in the chart UI crate.

use log::warn;
use pgt_db::JoinedTrendRecord;
use serde::Serialize;

/// Fixed chart size in pixels.
pub const CHART_WIDTH: u32 = 610;
pub const CHART_HEIGHT: u32 = 480;

pub const X_AXIS_TITLE: &str = "Groundwater Level Percentile";
pub const Y_AXIS_TITLE: &str = "slope of trend (%)";

/// Series colors, assigned to trend classes in order of first appearance.
pub const SERIES_COLORS: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub percentile: String,
    pub slope: f64,
}

/// All points of one trend classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub color: String,
    pub points: Vec<ChartPoint>,
}

/// Horizontal line drawn across the whole plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceLine {
    pub y: f64,
    pub line_width: u32,
    pub line_dash: String,
    pub line_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub width: u32,
    pub height: u32,
    /// "markers": points only, no connecting lines
    pub mode: String,
    /// x-axis categories in load order
    pub categories: Vec<String>,
    pub series: Vec<ChartSeries>,
    pub reference_line: ReferenceLine,
}

impl ChartSpec {
    /// Total number of plotted points.
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

/// Builds the trend chart of one station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for TrendRenderer {
    fn default() -> Self {
        Self {
            width: CHART_WIDTH,
            height: CHART_HEIGHT,
        }
    }
}

impl TrendRenderer {
    /// Chart for `rows` of `station_nm`, or `None` when there is nothing to plot.
    pub fn render(&self, rows: &[JoinedTrendRecord], station_nm: &str) -> Option<ChartSpec> {
        if rows.is_empty() {
            warn!("trend chart: no rows for '{}', nothing to render", station_nm);
            return None;
        }

        let mut categories: Vec<String> = Vec::new();
        let mut series: Vec<ChartSeries> = Vec::new();
        for row in rows {
            if !categories.contains(&row.percentile) {
                categories.push(row.percentile.clone());
            }
            let label = row.trend_label.as_str();
            let point = ChartPoint {
                percentile: row.percentile.clone(),
                slope: row.slope,
            };
            match series.iter_mut().find(|s| s.name == label) {
                Some(s) => s.points.push(point),
                None => {
                    let color = SERIES_COLORS[series.len() % SERIES_COLORS.len()];
                    series.push(ChartSeries {
                        name: label.to_string(),
                        color: color.to_string(),
                        points: vec![point],
                    });
                }
            }
        }

        Some(ChartSpec {
            title: format!("Annual water level percentile trends for {}", station_nm),
            x_axis_title: X_AXIS_TITLE.to_string(),
            y_axis_title: Y_AXIS_TITLE.to_string(),
            width: self.width,
            height: self.height,
            mode: "markers".to_string(),
            categories,
            series,
            reference_line: ReferenceLine {
                y: 0.0,
                line_width: 3,
                line_dash: "solid".to_string(),
                line_color: "green".to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgt_nwis::TrendClass;

    fn row(percentile: &str, slope: f64, trend: TrendClass) -> JoinedTrendRecord {
        let trend_label = trend.label().to_string();
        labelled_row(percentile, slope, trend, &trend_label)
    }

    fn labelled_row(
        percentile: &str,
        slope: f64,
        trend: TrendClass,
        label: &str,
    ) -> JoinedTrendRecord {
        JoinedTrendRecord {
            site_no: 1000,
            station_nm: "Well A".to_string(),
            percentile: percentile.to_string(),
            slope,
            trend,
            trend_label: label.to_string(),
        }
    }

    #[test]
    fn test_render_groups_by_trend() {
        let rows = vec![
            row("p10", -0.4, TrendClass::Decreasing),
            row("p50", 0.05, TrendClass::NoTrend),
            row("p90", -0.2, TrendClass::Decreasing),
        ];
        let chart = TrendRenderer::default().render(&rows, "Well A").unwrap();
        assert_eq!(chart.title, "Annual water level percentile trends for Well A");
        assert_eq!(chart.point_count(), 3);
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].name, "decreasing");
        assert_eq!(chart.series[0].color, SERIES_COLORS[0]);
        assert_eq!(chart.series[0].points.len(), 2);
        assert_eq!(chart.series[1].name, "no trend");
        assert_eq!(chart.categories, vec!["p10", "p50", "p90"]);
    }

    #[test]
    fn test_render_fixed_layout() {
        let rows = vec![row("p10", 1.0, TrendClass::Increasing)];
        let chart = TrendRenderer::default().render(&rows, "Well A").unwrap();
        assert_eq!((chart.width, chart.height), (610, 480));
        assert_eq!(chart.mode, "markers");
        assert_eq!(chart.reference_line.y, 0.0);
        assert_eq!(chart.reference_line.line_width, 3);
        assert_eq!(chart.reference_line.line_color, "green");
        assert_eq!(chart.x_axis_title, X_AXIS_TITLE);
        assert_eq!(chart.y_axis_title, Y_AXIS_TITLE);
    }

    #[test]
    fn test_render_does_not_sort_percentiles() {
        let rows = vec![
            row("p90", 1.0, TrendClass::Increasing),
            row("p10", 1.0, TrendClass::Increasing),
        ];
        let chart = TrendRenderer::default().render(&rows, "Well A").unwrap();
        assert_eq!(chart.categories, vec!["p90", "p10"]);
        assert_eq!(chart.series[0].points[0].percentile, "p90");
    }

    #[test]
    fn test_render_keeps_source_labels() {
        let rows = vec![
            labelled_row("p10", -0.4, TrendClass::Decreasing, "Decreasing"),
            labelled_row("p50", 0.3, TrendClass::Increasing, "up"),
            labelled_row("p90", -0.2, TrendClass::Decreasing, "Decreasing"),
        ];
        let chart = TrendRenderer::default().render(&rows, "Well A").unwrap();
        let names: Vec<&str> = chart.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Decreasing", "up"]);
        assert_eq!(chart.series[0].points.len(), 2);
    }

    #[test]
    fn test_render_empty_rows() {
        assert!(TrendRenderer::default().render(&[], "Well A").is_none());
    }

    #[test]
    fn test_chart_spec_json_keys() {
        let rows = vec![row("p10", 1.0, TrendClass::Increasing)];
        let chart = TrendRenderer::default().render(&rows, "Well A").unwrap();
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["xAxisTitle"], X_AXIS_TITLE);
        assert_eq!(json["referenceLine"]["lineColor"], "green");
        assert_eq!(json["series"][0]["points"][0]["slope"], 1.0);
    }
}
