//! Shared Dioxus components and the Leaflet/D3.js bridge for the trends dashboard.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the map and chart JS functions via `js_sys::eval()`
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components (containers, prompt, errors)

pub mod js_bridge;
pub mod state;
pub mod components;
