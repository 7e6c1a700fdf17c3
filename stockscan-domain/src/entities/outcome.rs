// Ingestion outcome entities

use serde::{Deserialize, Serialize};

use crate::entities::{ScanEvent, ScanRejection};
use crate::utils::format_display_time;
use crate::value_objects::{InputChannel, LookupKey, ScanCue};

/// Result of resolving one parsed scan against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    Inserted(ScanEvent),
    Updated(ScanEvent),
    Failed { message: String },
}

impl IngestOutcome {
    pub fn status(&self) -> ScanStatusKind {
        match self {
            IngestOutcome::Inserted(_) => ScanStatusKind::Inserted,
            IngestOutcome::Updated(_) => ScanStatusKind::Updated,
            IngestOutcome::Failed { .. } => ScanStatusKind::Failed,
        }
    }

    pub fn cue(&self) -> ScanCue {
        match self {
            IngestOutcome::Inserted(_) => ScanCue::Success,
            IngestOutcome::Updated(_) => ScanCue::Duplicate,
            IngestOutcome::Failed { .. } => ScanCue::Error,
        }
    }

    pub fn record(&self) -> Option<&ScanEvent> {
        match self {
            IngestOutcome::Inserted(event) | IngestOutcome::Updated(event) => Some(event),
            IngestOutcome::Failed { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatusKind {
    #[default]
    Ready,
    Inserted,
    Updated,
    Failed,
    Rejected,
}

/// Display fields for the row a scan landed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReceipt {
    pub part_number: String,
    pub quantity: i64,
    pub tag_number: String,
    pub category: Option<String>,
    pub scanned_at: String,
}

impl From<&ScanEvent> for ScanReceipt {
    fn from(event: &ScanEvent) -> Self {
        Self {
            part_number: event.part_number.clone(),
            quantity: event.quantity,
            tag_number: event.tag_number.clone(),
            category: event.category.clone(),
            scanned_at: format_display_time(&event.scan_time),
        }
    }
}

/// What a scanning station gets back for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub channel: InputChannel,
    pub status: ScanStatusKind,
    pub cue: ScanCue,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookup_key: Option<LookupKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<ScanReceipt>,
}

impl ScanReport {
    pub fn rejected(channel: InputChannel, rejection: &ScanRejection) -> Self {
        Self {
            channel,
            status: ScanStatusKind::Rejected,
            cue: ScanCue::Error,
            message: rejection.to_string(),
            reason_code: Some(rejection.reason_code().to_string()),
            lookup_key: None,
            receipt: None,
        }
    }

    pub fn resolved(channel: InputChannel, key: LookupKey, outcome: &IngestOutcome) -> Self {
        let message = match outcome {
            IngestOutcome::Inserted(event) => format!("scanned {}", event.part_number),
            IngestOutcome::Updated(event) => {
                format!("already scanned {}, time refreshed", event.part_number)
            }
            IngestOutcome::Failed { message } => message.clone(),
        };
        Self {
            channel,
            status: outcome.status(),
            cue: outcome.cue(),
            message,
            reason_code: match outcome {
                IngestOutcome::Failed { .. } => Some("store_failure".to_string()),
                _ => None,
            },
            lookup_key: Some(key),
            receipt: outcome.record().map(ScanReceipt::from),
        }
    }
}

/// What the station display shows right now.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScanStatus {
    pub status: ScanStatusKind,
    pub message: String,
    pub cue: Option<ScanCue>,
    pub updated_at: i64,
}
