//! Container for a map or chart rendered by JS.

use dioxus::prelude::*;

/// Props for ChartContainer
#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// The DOM id Leaflet or D3 will render into
    pub id: String,
    pub width: u32,
    pub height: u32,
}

/// A fixed-size div for a Leaflet map or D3.js chart.
#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let style = format!(
        "width: {}px; min-height: {}px; position: relative;",
        props.width, props.height
    );

    rsx! {
        div {
            id: "{props.id}",
            style: "{style}",
        }
    }
}
