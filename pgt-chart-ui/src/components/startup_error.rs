//! Panel shown in place of the map and chart when the session failed to start.

use dioxus::prelude::*;
use pgt_data::StartupFailure;

#[component]
pub fn StartupError(failure: StartupFailure) -> Element {
    rsx! {
        div {
            style: "padding: 16px 20px; margin: 8px 0; background: #FFF3E0; color: #BF360C; border-left: 4px solid #E65100; border-radius: 2px;",
            h3 { style: "margin: 0 0 8px 0; font-size: 16px;", "Session could not start" }
            p { style: "margin: 0 0 8px 0; color: #424242;", "{failure.hint}" }
            code { style: "font-size: 12px; color: #6D4C41;", "{failure.message}" }
        }
    }
}
