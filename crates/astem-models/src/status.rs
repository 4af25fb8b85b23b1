//! Job status snapshots for progress polling.
//!
//! Each poll of `GET /progress/{job_id}` produces one transient
//! [`StatusSnapshot`]; nothing here is persisted.

use serde::{Deserialize, Serialize, Serializer};

/// Coarse job stage as seen by the client.
///
/// The backend reports finer-grained labels on the wire (`starting`,
/// `running`, ...); everything that is not explicitly terminal maps to
/// [`JobStage::InProgress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "String")]
pub enum JobStage {
    /// Job is queued or actively being processed
    #[default]
    InProgress,
    /// Job completed successfully
    Done,
    /// Job failed with an error
    Error,
}

impl JobStage {
    /// Get string representation of the stage.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStage::InProgress => "running",
            JobStage::Done => "done",
            JobStage::Error => "error",
        }
    }

    /// Check if this is a terminal stage (polling stops).
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStage::Done | JobStage::Error)
    }
}

impl From<String> for JobStage {
    fn from(label: String) -> Self {
        match label.as_str() {
            "done" => JobStage::Done,
            "error" => JobStage::Error,
            _ => JobStage::InProgress,
        }
    }
}

impl Serialize for JobStage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl std::fmt::Display for JobStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One poll's view of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Current job stage
    #[serde(default)]
    pub status: JobStage,
    /// Progress percentage (0-100, defaults to 0 when absent)
    #[serde(default)]
    pub progress: u8,
    /// Human-readable progress message (defaults to empty)
    #[serde(default)]
    pub message: String,
    /// Final artifact filename, present once the job is done
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_filename: Option<String>,
}

impl StatusSnapshot {
    /// Progress clamped to the displayable 0-100 range.
    pub fn percent(&self) -> u8 {
        self.progress.min(100)
    }

    /// Check if the snapshot is terminal.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
