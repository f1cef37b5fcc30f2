//! Shared data models for the VidGen client.
//!
//! This crate provides Serde-serializable types for:
//! - Jobs and their lifecycle status
//! - Status updates polled from the backend and their merge rules
//! - Generation requests, limits, and validation
//! - Resolution parsing
//! - Wire types for the generation API

pub mod job;
pub mod request;
pub mod resolution;

// Re-export common types
pub use job::{GenerationResult, Job, JobId, JobStatus, JobStatusUpdate};
pub use request::{
    CreateJobRequest, CreateJobResponse, GenerationLimits, GenerationRequest, RequestError,
};
pub use resolution::{Resolution, ResolutionError};
