//! HTTP client for the AudioStem processing service.
//!
//! Wraps the backend's job contract: multipart upload, progress
//! polling, download-link construction and the FFmpeg health probe.

pub mod client;
pub mod error;

pub use client::{HealthReport, StemServiceClient};
pub use error::{ClientError, ClientResult};
