//! Catalog access over HTTP.
//!
//! # Modules
//!
//! - `client`: [`CatalogClient`] seam and the `reqwest` implementation
//! - `requests`: Endpoint paths, query parameters and preview payloads
//! - `connectivity`: Reachability oracle checked before each request
//! - `environment`: Deployment environment and preview detection

pub mod client;
pub mod connectivity;
pub mod environment;
pub mod requests;

pub use client::{CatalogClient, HttpCatalogClient};
pub use connectivity::{Connectivity, NetworkMonitor};
pub use environment::{AppEnvironment, PREVIEW_ENV_VAR};
pub use requests::GiveawayRequest;
