//! Shared foundation for the migration planning dashboard.
//!
//! Contains the data models mirrored from backend storage, the unified
//! API response envelope, the application error type, configuration
//! loading and a few small utilities. Everything here is consumed by
//! both the client side (`api-client`, `dashboard`) and the development
//! backend (`dev-backend`).

pub mod config;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod response;
pub mod utils;
