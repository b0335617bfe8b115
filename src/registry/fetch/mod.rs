//! Raw file fetching for remote registries.

pub mod http;

pub use http::{FetchResponse, HttpFetcher};
