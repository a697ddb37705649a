//! Placeholder shown in the chart column while no site is selected.

use dioxus::prelude::*;
use pgt_data::SELECT_PROMPT;

#[component]
pub fn SitePrompt() -> Element {
    rsx! {
        div {
            style: "padding: 24px 16px; color: #424242; font-size: 15px;",
            "{SELECT_PROMPT}"
        }
    }
}
