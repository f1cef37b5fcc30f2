//! Job lifecycle controller.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info, warn};

use vgen_client::ApiClient;
use vgen_models::{GenerationLimits, GenerationRequest, Job, JobId, JobStatus, RequestError};

use crate::config::PollerConfig;
use crate::tracker::NotFoundTracker;

/// Fallback message when the server reports failure without a reason.
const GENERIC_FAILURE: &str = "video generation failed";

/// Note attached while the backend has not yet persisted the job record.
const FINALIZING_NOTE: &str = "The job is still being finalized, please wait";

/// Error message when the create response carried no job id.
const NO_JOB_ID: &str = "no job id received from the backend";

/// Submits generation jobs and owns their poll tasks.
///
/// A controller manages one job slot: submitting while a previous job is
/// still in flight cancels that job's poll task first, so the slot never
/// has more than one active timer.
pub struct JobController {
    client: Arc<ApiClient>,
    config: PollerConfig,
    limits: GenerationLimits,
    active: Option<AbortHandle>,
}

impl JobController {
    /// Create a controller.
    pub fn new(client: ApiClient, config: PollerConfig, limits: GenerationLimits) -> Self {
        Self {
            client: Arc::new(client),
            config,
            limits,
            active: None,
        }
    }

    /// Validate and submit a request, returning a handle on the new job.
    ///
    /// Validation fails closed: on error nothing is sent and no job
    /// record is created. Otherwise the create request and the poll loop
    /// run in a background task; the returned handle observes every
    /// state change, starting from the provisional record. Submission
    /// failures are reported on the job record itself, which keeps the
    /// captured request parameters available for resubmission.
    pub fn submit(&mut self, request: GenerationRequest) -> Result<JobHandle, RequestError> {
        request.validate(&self.limits)?;

        if let Some(previous) = self.active.take() {
            debug!("Cancelling previous poll task");
            previous.abort();
        }

        let job = Job::provisional(request);
        let (tx, rx) = watch::channel(job.clone());

        let task = tokio::spawn(run_job(
            Arc::clone(&self.client),
            self.config.clone(),
            job,
            tx,
        ));
        self.active = Some(task.abort_handle());

        Ok(JobHandle { updates: rx, task })
    }

    /// Cancel the active poll task, if any.
    pub fn cancel_active(&mut self) {
        if let Some(active) = self.active.take() {
            active.abort();
        }
    }
}

/// Observable side of a submitted job.
///
/// Dropping the handle aborts the poll task, so a torn-down consumer
/// cannot leak a timer; in-flight responses are discarded with the task
/// and never applied after cancellation.
pub struct JobHandle {
    updates: watch::Receiver<Job>,
    task: JoinHandle<()>,
}

impl JobHandle {
    /// Stream of job snapshots; the latest value is always available.
    pub fn updates(&self) -> watch::Receiver<Job> {
        self.updates.clone()
    }

    /// Current job snapshot.
    pub fn snapshot(&self) -> Job {
        self.updates.borrow().clone()
    }

    /// Cancel the poll task. Idempotent.
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Check whether the poll task has stopped (terminal status,
    /// unrecoverable error, or cancellation).
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for JobHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Create the job on the backend, then poll it to completion.
async fn run_job(
    client: Arc<ApiClient>,
    config: PollerConfig,
    mut job: Job,
    tx: watch::Sender<Job>,
) {
    let body = job.request.to_create_request();

    let job_id = match client.create_job(&body).await {
        Ok(response) => match response.id {
            Some(id) if !id.is_empty() => JobId::from_string(id),
            _ => {
                warn!("Create response carried no job id");
                job.fail(NO_JOB_ID);
                tx.send_replace(job);
                return;
            }
        },
        Err(e) => {
            warn!("Job submission failed: {e}");
            job.fail(e.server_message());
            tx.send_replace(job);
            return;
        }
    };

    info!(job_id = %job_id, "Job submitted, polling for completion");
    job.assign_id(job_id.clone());
    tx.send_replace(job.clone());

    poll_until_done(&client, &config, &job_id, job, &tx).await;
}

async fn poll_until_done(
    client: &ApiClient,
    config: &PollerConfig,
    job_id: &JobId,
    mut job: Job,
    tx: &watch::Sender<Job>,
) {
    let mut tracker = NotFoundTracker::new(config.not_found_threshold);
    let mut slow = false;
    let mut delay = config.poll_interval;

    loop {
        tokio::time::sleep(delay).await;

        match client.job_status(job_id).await {
            Ok(update) => {
                tracker.record_success();
                // A real status supersedes the finalizing note.
                job.status_note = None;
                job.apply_update(&update);

                if job.status == JobStatus::Failed && job.error_message.is_none() {
                    job.error_message = Some(GENERIC_FAILURE.to_string());
                }
                tx.send_replace(job.clone());

                if job.is_terminal() {
                    info!(job_id = %job_id, status = %job.status, "Job reached terminal status");
                    return;
                }

                delay = if slow {
                    config.slow_poll_interval
                } else {
                    config.poll_interval
                };
            }
            Err(e) if e.is_not_found() => {
                if tracker.record_not_found() {
                    // Tolerated window exhausted; keep polling slowly
                    // instead of failing the job.
                    warn!(
                        job_id = %job_id,
                        polls = tracker.count(),
                        "Job record still not available, downgrading poll cadence"
                    );
                    job.status = JobStatus::Processing;
                    job.set_note(FINALIZING_NOTE);
                    tx.send_replace(job.clone());
                    slow = true;
                    delay = config.slow_poll_interval;
                } else if tracker.threshold_reached() {
                    delay = config.slow_poll_interval;
                } else {
                    debug!(
                        job_id = %job_id,
                        attempt = tracker.count(),
                        "Job not yet visible, retrying"
                    );
                    delay = config.not_found_retry_delay;
                }
            }
            Err(e) => {
                // The server did not say the job failed, so the status
                // is left as last reported; only the error is recorded.
                warn!(job_id = %job_id, "Polling stopped on error: {e}");
                job.record_error(e.server_message());
                tx.send_replace(job.clone());
                return;
            }
        }
    }
}
