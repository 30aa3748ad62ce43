//! HTTP API layer for buzzblog.
//!
//! This crate provides the versioned REST API:
//!
//! - **Endpoints**: JSON resources for posts, tags, comments, buzzes and search
//! - **Extractors**: Bearer-token authentication
//! - **Middleware**: Token resolution into the current-user identity
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
