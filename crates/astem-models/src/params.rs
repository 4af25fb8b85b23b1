//! Processing parameters sent with an upload.

use serde::{Deserialize, Serialize};

/// Available separation models, as `(id, label)` pairs.
pub const DEMUCS_MODELS: &[(&str, &str)] = &[
    ("htdemucs", "HTDemucs (default, 4 stems)"),
    ("mdx_extra_q", "MDX Extra Q (high quality, 4 stems)"),
    (
        "htdemucs_6s",
        "HTDemucs 6-stem (drums, bass, other, vocals, piano, guitar)",
    ),
];

/// Quality profiles, as `(shifts, label)` pairs. More shifts means
/// better separation quality and a slower job.
pub const QUALITY_PROFILES: &[(u32, &str)] = &[
    (1, "Fast (1 shift)"),
    (2, "Balanced (2 shifts)"),
    (5, "High (5 shifts)"),
    (10, "Best (10 shifts)"),
];

/// The two user-chosen parameters attached to one upload.
///
/// Both travel as opaque strings; they are read at submission time and
/// not retained afterward. The backend falls back to its own defaults
/// for values outside the fixed option sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingParams {
    /// Separation model id (see [`DEMUCS_MODELS`])
    pub model_name: String,
    /// Number of shifts (see [`QUALITY_PROFILES`])
    pub shifts: String,
}

impl Default for ProcessingParams {
    fn default() -> Self {
        Self {
            model_name: "htdemucs".to_string(),
            shifts: "1".to_string(),
        }
    }
}

impl ProcessingParams {
    pub fn new(model_name: impl Into<String>, shifts: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            shifts: shifts.into(),
        }
    }

    /// Check the model id against the fixed option set.
    pub fn is_known_model(&self) -> bool {
        DEMUCS_MODELS.iter().any(|(id, _)| *id == self.model_name)
    }

    /// Check the shifts value against the fixed option set.
    pub fn is_known_shifts(&self) -> bool {
        self.shifts
            .parse::<u32>()
            .map(|n| QUALITY_PROFILES.iter().any(|(s, _)| *s == n))
            .unwrap_or(false)
    }
}
