pub mod client;
pub mod config;
pub mod error;

pub use client::{parse_autocomplete, AutocompleteClient};
pub use config::{default_config_path, FileConfig, Overrides, Settings};
pub use error::ApiError;

/// User-Agent sent with every request
pub const USER_AGENT: &str = concat!("typeahead/", env!("CARGO_PKG_VERSION"));
