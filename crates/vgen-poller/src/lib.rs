//! Job submission and status polling state machine.
//!
//! This crate owns the lifecycle of a generation job on the client side:
//! it validates and submits requests, polls the backend for status,
//! reconciles partial responses into the local job record, rides out the
//! window where the backend has not yet persisted the job (transient
//! 404s), and stops cleanly on terminal statuses, cancellation, or
//! unrecoverable errors. Consumers observe the job through a
//! `tokio::sync::watch` snapshot stream.

pub mod config;
pub mod controller;
pub mod tracker;

pub use config::PollerConfig;
pub use controller::{JobController, JobHandle};
pub use tracker::NotFoundTracker;
