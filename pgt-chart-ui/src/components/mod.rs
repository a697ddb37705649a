//! Reusable Dioxus RSX components for the trends dashboard.

mod chart_container;
mod loading_spinner;
mod page_header;
mod site_prompt;
mod startup_error;

pub use chart_container::ChartContainer;
pub use loading_spinner::LoadingSpinner;
pub use page_header::PageHeader;
pub use site_prompt::SitePrompt;
pub use startup_error::StartupError;
