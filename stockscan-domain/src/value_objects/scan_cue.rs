// Feedback cue value object

use serde::{Deserialize, Serialize};

/// Which feedback the scanning station should play for a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanCue {
    Success,
    Duplicate,
    Error,
}

impl ScanCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanCue::Success => "success",
            ScanCue::Duplicate => "duplicate",
            ScanCue::Error => "error",
        }
    }
}
