//! Core business logic for buzzblog.

pub mod services;

pub use services::*;
