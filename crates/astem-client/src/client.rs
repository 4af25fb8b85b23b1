//! Typed client for the AudioStem backend contract.

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use astem_models::{JobId, ProcessingParams, StatusSnapshot};

use crate::error::{ClientError, ClientResult};

/// Upload response body.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    job_id: Option<String>,
}

/// Error body attached to non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Backend health probe result.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthReport {
    pub ffmpeg_ok: bool,
    #[serde(default)]
    pub ffmpeg_message: String,
}

/// Client for the stem-extraction job service.
pub struct StemServiceClient {
    base_url: Url,
    http: Client,
}

impl StemServiceClient {
    /// Create a client for the given server base URL.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let base_url = Url::parse(base_url)?;
        Ok(Self {
            base_url,
            http: Client::new(),
        })
    }

    /// Upload one video for processing.
    ///
    /// Sends a multipart body with the file content under `file` plus the
    /// two processing parameters, and returns the job handle the backend
    /// issued. A 2xx response without a `job_id` is a submission failure.
    pub async fn upload(
        &self,
        file_name: &str,
        content: Vec<u8>,
        params: &ProcessingParams,
    ) -> ClientResult<JobId> {
        let form = Form::new()
            .part("file", Part::bytes(content).file_name(file_name.to_string()))
            .text("model_name", params.model_name.clone())
            .text("shifts", params.shifts.clone());

        info!(file = file_name, model = %params.model_name, shifts = %params.shifts, "Uploading video");

        let resp = self
            .http
            .post(self.endpoint("upload")?)
            .multipart(form)
            .send()
            .await?;

        if !resp.status().is_success() {
            let msg = resp
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| "Upload failed".to_string());
            return Err(ClientError::upload_rejected(msg));
        }

        let body: UploadResponse = resp.json().await?;
        body.job_id
            .map(JobId::from)
            .ok_or(ClientError::MissingJobId)
    }

    /// Fetch the current status snapshot for a job.
    pub async fn fetch_status(&self, job_id: &JobId) -> ClientResult<StatusSnapshot> {
        let resp = self
            .http
            .get(self.endpoint(&format!("progress/{job_id}"))?)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ClientError::ProgressRequest);
        }

        let snapshot: StatusSnapshot = resp.json().await?;
        debug!(job = %job_id, stage = %snapshot.status, progress = snapshot.percent(), "Status snapshot");
        Ok(snapshot)
    }

    /// Build the download link for a finished job. The artifact is only
    /// ever referenced as a link target, never fetched here.
    pub fn download_url(&self, job_id: &JobId) -> ClientResult<Url> {
        self.endpoint(&format!("download/{job_id}"))
    }

    /// Probe backend health (FFmpeg availability).
    pub async fn health(&self) -> ClientResult<HealthReport> {
        let resp = self.http.get(self.endpoint("health")?).send().await?;
        let report = resp.error_for_status()?.json::<HealthReport>().await?;
        Ok(report)
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        Ok(self.base_url.join(path)?)
    }
}
