//! Shared data models for the AudioStem client.
//!
//! This crate provides Serde-serializable types for:
//! - Job handles and status snapshots
//! - Processing parameters and their fixed option sets
//! - Video filename validation

pub mod job;
pub mod params;
pub mod status;
pub mod video;

// Re-export common types
pub use job::JobId;
pub use params::{ProcessingParams, DEMUCS_MODELS, QUALITY_PROFILES};
pub use status::{JobStage, StatusSnapshot};
pub use video::{is_video_file, ALLOWED_VIDEO_EXTENSIONS};
