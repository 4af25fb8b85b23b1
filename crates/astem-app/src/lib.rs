//! AudioStem client workflow.
//!
//! This crate provides:
//! - File selection with extension validation
//! - The one-job-in-flight submission and polling state machine
//! - A view-model driven presentation layer (idle/progress/result/error)
//! - Env + CLI configuration

pub mod config;
pub mod error;
pub mod selection;
pub mod view;
pub mod workflow;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use selection::{SelectedFile, SelectionController};
pub use view::{ConsoleView, Panel, View, ViewModel};
pub use workflow::{SessionOutcome, Workflow};
