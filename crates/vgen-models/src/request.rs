//! Generation requests, validation limits, and wire types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::resolution::Resolution;

/// Validation errors for a generation request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// Prompt is empty or whitespace-only
    #[error("prompt must not be empty")]
    EmptyPrompt,

    /// Duration outside the configured bounds
    #[error("duration {duration}s is outside the allowed range {min}-{max}s")]
    DurationOutOfRange { duration: u32, min: u32, max: u32 },

    /// Resolution not in the configured allow-list
    #[error("resolution {0} is not supported")]
    UnsupportedResolution(Resolution),
}

/// Bounds a request is validated against before anything is sent.
#[derive(Debug, Clone)]
pub struct GenerationLimits {
    /// Minimum clip duration in seconds (inclusive)
    pub min_duration_secs: u32,
    /// Maximum clip duration in seconds (inclusive)
    pub max_duration_secs: u32,
    /// Resolutions the backend accepts
    pub allowed_resolutions: Vec<Resolution>,
}

impl Default for GenerationLimits {
    fn default() -> Self {
        Self {
            min_duration_secs: 1,
            max_duration_secs: 10,
            allowed_resolutions: vec![
                Resolution::new(480, 480),
                Resolution::new(854, 480),
                Resolution::new(1280, 720),
                Resolution::new(1920, 1080),
            ],
        }
    }
}

/// Parameters for one video-generation request.
///
/// Captured on the job record at submission time and immutable
/// thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Text prompt describing the video
    pub prompt: String,
    /// Clip duration in seconds
    pub duration_secs: u32,
    /// Output resolution
    pub resolution: Resolution,
}

impl GenerationRequest {
    /// Create a new request.
    pub fn new(prompt: impl Into<String>, duration_secs: u32, resolution: Resolution) -> Self {
        Self {
            prompt: prompt.into(),
            duration_secs,
            resolution,
        }
    }

    /// Validate against the configured limits.
    ///
    /// Fails closed: any violation rejects the request before a network
    /// call is made.
    pub fn validate(&self, limits: &GenerationLimits) -> Result<(), RequestError> {
        if self.prompt.trim().is_empty() {
            return Err(RequestError::EmptyPrompt);
        }

        if self.duration_secs < limits.min_duration_secs
            || self.duration_secs > limits.max_duration_secs
        {
            return Err(RequestError::DurationOutOfRange {
                duration: self.duration_secs,
                min: limits.min_duration_secs,
                max: limits.max_duration_secs,
            });
        }

        if !limits.allowed_resolutions.contains(&self.resolution) {
            return Err(RequestError::UnsupportedResolution(self.resolution));
        }

        Ok(())
    }

    /// Build the wire body for the create endpoint.
    pub fn to_create_request(&self) -> CreateJobRequest {
        CreateJobRequest {
            prompt: self.prompt.clone(),
            width: self.resolution.width,
            height: self.resolution.height,
            n_seconds: self.duration_secs,
        }
    }
}

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateJobRequest {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
    pub n_seconds: u32,
}

/// Response of `POST /api/generate`.
///
/// Additional fields are ignored; a missing `id` means no job was
/// created as far as the client is concerned.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CreateJobResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}
