//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - The city query and the opaque weather report
//! - The `WeatherFetcher` abstraction and its wttr.in implementation
//! - Optional on-disk configuration
//!
//! It is used by `wttr-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod model;

pub use config::Config;
pub use error::FetchError;
pub use fetcher::{FetchOptions, WeatherFetcher, build_url, wttr::WttrFetcher};
pub use model::{Query, WeatherReport};
