//! Configuration module for the dashboard.

// Can all be private now because we have a public re-export.
mod api;
mod debug;

// Can't be private because we don't re-export it
pub mod plot;

// Re-export commonly used items
pub use api::{API, ApiClientConfig, ApiConfig};
pub use debug::DF;
pub use plot::PLOT_CONFIG;
