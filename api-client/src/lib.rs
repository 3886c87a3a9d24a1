//! Typed client for the migration backend REST API.
//!
//! [`transport::HttpTransport`] owns the single `reqwest::Client` and the
//! unified request timeout; [`client::MigrationClient`] layers typed
//! endpoint methods on top and is the only place response envelopes are
//! interpreted. Tests swap the transport for an in-memory one through
//! the [`transport::ApiTransport`] trait.

pub mod client;
pub mod transport;

pub use client::MigrationClient;
pub use transport::{ApiTransport, HttpTransport, ResponsePayload};
