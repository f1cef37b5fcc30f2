//! HTTP client for the video generation API.
//!
//! This crate provides a thin request executor over the backend's
//! generation endpoints: a fixed base address, a bounded timeout, JSON
//! content negotiation, cache-busting on status reads, and an error
//! taxonomy that lets callers distinguish HTTP failures from transport
//! failures.

pub mod client;
pub mod error;

pub use client::{ApiClient, ApiConfig};
pub use error::{ClientError, ClientResult};
