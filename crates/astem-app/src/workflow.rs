//! Submission and polling state machine.
//!
//! One session covers a single upload and the poll loop that follows
//! it. Exactly one session may be in flight; the guard here backs up
//! the disabled submission control in the presentation layer.

use tokio::time::sleep;
use tracing::{info, warn};

use astem_client::StemServiceClient;
use astem_models::{is_video_file, JobId, JobStage, ProcessingParams};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::selection::SelectedFile;
use crate::view::View;

/// How a session ended. Failures are already rendered on the error
/// panel by the time this is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Terminal `done` status; download link bound on the result panel.
    Completed { download_url: url::Url },
    /// Upload rejection, transport failure, backend-reported error or
    /// poll ceiling. No retry is attempted.
    Failed,
}

/// Drives one submission lifecycle at a time against the backend.
pub struct Workflow {
    client: StemServiceClient,
    config: AppConfig,
    in_flight: bool,
    session_seq: u64,
}

impl Workflow {
    pub fn new(client: StemServiceClient, config: AppConfig) -> Self {
        Self {
            client,
            config,
            in_flight: false,
            session_seq: 0,
        }
    }

    /// Run one submit-and-track session.
    ///
    /// Re-validates the file defensively, uploads it with the given
    /// parameters, then polls until a terminal status. All terminal
    /// paths restore the submission control before returning, so the
    /// user can resubmit from scratch.
    pub async fn run(
        &mut self,
        view: &mut impl View,
        file: SelectedFile,
        params: ProcessingParams,
    ) -> AppResult<SessionOutcome> {
        if self.in_flight {
            return Err(AppError::SessionActive);
        }
        if !is_video_file(&file.name) {
            return Err(AppError::InvalidSelection(file.name));
        }

        self.in_flight = true;
        self.session_seq += 1;
        info!(session = self.session_seq, file = %file.name, "Starting session");

        let outcome = self.run_session(view, file, params).await;
        self.in_flight = false;
        outcome
    }

    async fn run_session(
        &mut self,
        view: &mut impl View,
        file: SelectedFile,
        params: ProcessingParams,
    ) -> AppResult<SessionOutcome> {
        view.set_busy(true);
        view.show_progress();
        view.set_progress(0, "Uploading…");

        let job_id = match self.client.upload(&file.name, file.content, &params).await {
            Ok(id) => id,
            Err(err) => {
                warn!(session = self.session_seq, error = %err, "Upload failed");
                view.set_busy(false);
                view.show_error(&err.to_string());
                return Ok(SessionOutcome::Failed);
            }
        };

        view.set_progress(0, "Starting…");
        self.poll(view, &job_id).await
    }

    /// Poll loop over one job handle. Explicitly re-armed after each
    /// fully processed cycle; cycle n+1 is never scheduled before cycle
    /// n's response has been handled.
    async fn poll(&mut self, view: &mut impl View, job_id: &JobId) -> AppResult<SessionOutcome> {
        let mut cycles: u32 = 0;

        loop {
            let snapshot = match self.client.fetch_status(job_id).await {
                Ok(snap) => snap,
                Err(err) => {
                    // Transport blips and permanent failures are not
                    // distinguished; a failed poll ends the job.
                    warn!(session = self.session_seq, job = %job_id, error = %err, "Poll failed");
                    view.set_busy(false);
                    view.show_error(&err.to_string());
                    return Ok(SessionOutcome::Failed);
                }
            };

            // Progress and message update on every cycle, terminal ones
            // included.
            view.set_progress(snapshot.percent(), &snapshot.message);

            match snapshot.status {
                JobStage::Done => {
                    info!(session = self.session_seq, job = %job_id, "Job done");
                    view.set_busy(false);
                    let download_url = self.client.download_url(job_id)?;
                    view.show_result(&download_url);
                    return Ok(SessionOutcome::Completed { download_url });
                }
                JobStage::Error => {
                    let message = if snapshot.message.is_empty() {
                        "Unknown error"
                    } else {
                        snapshot.message.as_str()
                    };
                    warn!(session = self.session_seq, job = %job_id, reason = message, "Job failed");
                    view.set_busy(false);
                    view.show_error(message);
                    return Ok(SessionOutcome::Failed);
                }
                JobStage::InProgress => {
                    cycles += 1;
                    if let Some(max) = self.config.max_polls {
                        if cycles >= max {
                            warn!(session = self.session_seq, job = %job_id, cycles, "Poll ceiling reached");
                            view.set_busy(false);
                            view.show_error(&format!("Timed out waiting for job {job_id}"));
                            return Ok(SessionOutcome::Failed);
                        }
                    }
                    sleep(self.config.poll_interval).await;
                }
            }
        }
    }

    /// Probe backend health; `None` when the probe itself fails.
    pub async fn check_health(&self) -> Option<astem_client::HealthReport> {
        match self.client.health().await {
            Ok(report) => Some(report),
            Err(err) => {
                warn!(error = %err, "Health probe failed");
                None
            }
        }
    }
}
