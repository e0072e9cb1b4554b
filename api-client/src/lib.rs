// API client library for the Drowsiness Monitor
//
// This crate provides HTTP client functionality for communicating
// with the prediction/session API server from the browser-based frontend.

pub mod config;
pub mod errors;
pub mod http_client;

// Re-export commonly used items
pub use config::{ApiConfig, API_BASE_URL_ENV, DEFAULT_BASE_URL};
pub use errors::ApiError;
pub use http_client::{ApiClient, RequestBody, RequestOptions, DEFAULT_SESSION_LIMIT};
pub use reqwest::Method;
