//! HTTP API layer for virasat.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: catalog, media, audio, favorites, stories, admin
//! - **Extractors**: authenticated caller, optional caller, admin guard
//! - **Middleware**: per-request identity resolution
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
