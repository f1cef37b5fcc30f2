//! Job records and the status-update merge rules.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::request::GenerationRequest;

/// Unique identifier for a job, assigned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-reported job status.
///
/// The backend is authoritative: the client relays statuses, it never
/// invents transitions. Strings the client does not recognize map to
/// `Unknown` and are ignored by the merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Job is queued waiting to start
    #[default]
    Pending,
    /// Job is being processed
    Processing,
    /// Job completed successfully
    Completed,
    /// Job failed
    Failed,
    /// Unrecognized status string
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Unknown => "unknown",
        }
    }

    /// Check if this is a terminal state (no more polling occurs).
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result payload reported once a job completes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GenerationResult {
    /// URL the finished video can be fetched from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,

    /// Backend identifier of the stored video
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,

    /// Filename the backend stored the video under
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// One status-poll response from the backend.
///
/// Every field is optional; unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct JobStatusUpdate {
    /// Current status, if reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,

    /// Progress percentage (0-100), if reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,

    /// Result payload, present once completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<GenerationResult>,

    /// Failure reason, if reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Upstream provider status, relayed verbatim for display
    #[serde(default, rename = "openai_status", skip_serializing_if = "Option::is_none")]
    pub provider_status: Option<String>,

    /// Opaque upstream provider response, relayed verbatim for display
    #[serde(default, rename = "openai_response", skip_serializing_if = "Option::is_none")]
    pub provider_response: Option<serde_json::Value>,
}

/// A video-generation job and its evolving server-reported outcome.
///
/// Created client-side as a provisional record at submission time,
/// finalized with the server id once the create request succeeds, then
/// mutated only through [`Job::apply_update`] until a terminal status is
/// reached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Backend-assigned id; `None` while the record is provisional
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<JobId>,

    /// Last server-reported status
    pub status: JobStatus,

    /// Progress percentage (0-100)
    #[serde(default)]
    pub progress: u8,

    /// Result payload once completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<GenerationResult>,

    /// Failure reason or communication error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Informational note (e.g. while the backend is still finalizing)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_note: Option<String>,

    /// Upstream provider status, relayed verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_status: Option<String>,

    /// Opaque upstream provider response, relayed verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_response: Option<serde_json::Value>,

    /// Parameters captured at submission time, immutable thereafter
    pub request: GenerationRequest,

    /// Submission timestamp (client-stamped)
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Create a provisional record for a request about to be submitted.
    pub fn provisional(request: GenerationRequest) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            status: JobStatus::Pending,
            progress: 0,
            result: None,
            error_message: None,
            status_note: None,
            provider_status: None,
            provider_response: None,
            request,
            created_at: now,
            updated_at: now,
        }
    }

    /// Finalize the record with the backend-assigned id.
    pub fn assign_id(&mut self, id: JobId) {
        self.id = Some(id);
        self.updated_at = Utc::now();
    }

    /// Merge a poll response into the record.
    ///
    /// The merge is field-wise and additive: a field absent from the
    /// update never erases a previously known value, and an `Unknown`
    /// status leaves the stored status untouched.
    pub fn apply_update(&mut self, update: &JobStatusUpdate) {
        match update.status {
            Some(JobStatus::Unknown) | None => {}
            Some(status) => self.status = status,
        }
        if let Some(progress) = update.progress {
            self.progress = progress.min(100);
        }
        if let Some(result) = &update.result {
            self.result = Some(result.clone());
        }
        if let Some(error) = &update.error {
            self.error_message = Some(error.clone());
        }
        if let Some(provider_status) = &update.provider_status {
            self.provider_status = Some(provider_status.clone());
        }
        if let Some(provider_response) = &update.provider_response {
            self.provider_response = Some(provider_response.clone());
        }
        self.updated_at = Utc::now();
    }

    /// Mark the job as failed with an error message.
    ///
    /// Used for submission failures only; during polling the status is
    /// whatever the server last reported.
    pub fn fail(&mut self, error: impl Into<String>) {
        self.status = JobStatus::Failed;
        self.error_message = Some(error.into());
        self.updated_at = Utc::now();
    }

    /// Record a communication error without touching the status.
    pub fn record_error(&mut self, error: impl Into<String>) {
        self.error_message = Some(error.into());
        self.updated_at = Utc::now();
    }

    /// Attach an informational note.
    pub fn set_note(&mut self, note: impl Into<String>) {
        self.status_note = Some(note.into());
        self.updated_at = Utc::now();
    }

    /// Check if the job has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// URL of the finished video, if completed and reported.
    pub fn video_url(&self) -> Option<&str> {
        self.result.as_ref().and_then(|r| r.video_url.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::GenerationRequest;
    use crate::resolution::Resolution;

    fn request() -> GenerationRequest {
        GenerationRequest::new("cat on a skateboard", 5, Resolution::new(854, 480))
    }

    #[test]
    fn test_provisional_record() {
        let job = Job::provisional(request());
        assert_eq!(job.id, None);
        assert_eq!(job.status, JobStatus::Pending);
        assert_eq!(job.progress, 0);
        assert!(!job.is_terminal());
    }

    #[test]
    fn test_merge_is_additive() {
        let mut job = Job::provisional(request());
        job.status = JobStatus::Processing;
        job.progress = 40;

        // Update carries progress only; status must be retained.
        job.apply_update(&JobStatusUpdate {
            progress: Some(55),
            ..Default::default()
        });

        assert_eq!(job.status, JobStatus::Processing);
        assert_eq!(job.progress, 55);
    }

    #[test]
    fn test_merge_retains_progress_on_completion() {
        let mut job = Job::provisional(request());
        job.apply_update(&JobStatusUpdate {
            status: Some(JobStatus::Processing),
            progress: Some(30),
            ..Default::default()
        });

        job.apply_update(&JobStatusUpdate {
            status: Some(JobStatus::Completed),
            result: Some(GenerationResult {
                video_url: Some("https://x/y.mp4".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        });

        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.progress, 30);
        assert_eq!(job.video_url(), Some("https://x/y.mp4"));
        assert!(job.is_terminal());
    }

    #[test]
    fn test_merge_ignores_unknown_status() {
        let mut job = Job::provisional(request());
        job.status = JobStatus::Processing;

        let update: JobStatusUpdate =
            serde_json::from_str(r#"{"status": "transcoding", "progress": 70}"#).unwrap();
        assert_eq!(update.status, Some(JobStatus::Unknown));

        job.apply_update(&update);
        assert_eq!(job.status, JobStatus::Processing);
        assert_eq!(job.progress, 70);
    }

    #[test]
    fn test_merge_clamps_progress() {
        let mut job = Job::provisional(request());
        job.apply_update(&JobStatusUpdate {
            progress: Some(150),
            ..Default::default()
        });
        assert_eq!(job.progress, 100);
    }

    #[test]
    fn test_fail_retains_request() {
        let mut job = Job::provisional(request());
        job.fail("backend unavailable");

        assert_eq!(job.status, JobStatus::Failed);
        assert_eq!(job.error_message.as_deref(), Some("backend unavailable"));
        assert_eq!(job.request.prompt, "cat on a skateboard");
        assert!(job.is_terminal());
    }

    #[test]
    fn test_update_deserializes_provider_fields() {
        let update: JobStatusUpdate = serde_json::from_str(
            r#"{"status": "processing", "openai_status": "running", "openai_response": {"eta": 12}}"#,
        )
        .unwrap();

        assert_eq!(update.provider_status.as_deref(), Some("running"));
        assert_eq!(update.provider_response.unwrap()["eta"], 12);
    }

    #[test]
    fn test_status_terminality() {
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::Processing.is_terminal());
        assert!(!JobStatus::Unknown.is_terminal());
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
    }
}
