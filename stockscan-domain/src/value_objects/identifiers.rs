// Identifier value objects

use std::fmt;

use serde::{Deserialize, Serialize};

/// Column a duplicate lookup matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyField {
    RawData,
    TagNumber,
}

impl KeyField {
    pub fn column(&self) -> &'static str {
        match self {
            KeyField::RawData => "raw_data",
            KeyField::TagNumber => "tag_number",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "raw_data" => Some(KeyField::RawData),
            "tag_number" => Some(KeyField::TagNumber),
            _ => None,
        }
    }
}

/// Identifies the single open inbound row a scan may collide with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LookupKey {
    pub field: KeyField,
    pub value: String,
}

impl LookupKey {
    pub fn raw_data(value: impl Into<String>) -> Self {
        Self {
            field: KeyField::RawData,
            value: value.into(),
        }
    }

    pub fn tag_number(value: impl Into<String>) -> Self {
        Self {
            field: KeyField::TagNumber,
            value: value.into(),
        }
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.field.column(), self.value)
    }
}
