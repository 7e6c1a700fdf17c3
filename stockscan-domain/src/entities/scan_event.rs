// Scan event entity
// One row of the transactions store

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::utils::{format_scan_date, format_scan_time};
use crate::value_objects::{ActionType, KeyField, LookupKey};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub part_number: String,
    #[serde(default)]
    pub category: Option<String>,
    pub quantity: i64,
    pub tag_number: String,
    pub raw_data: String,
    pub action_type: String,
    pub scan_date: String,
    pub scan_time: String,
}

impl ScanEvent {
    pub fn key_value(&self, field: KeyField) -> &str {
        match field {
            KeyField::RawData => &self.raw_data,
            KeyField::TagNumber => &self.tag_number,
        }
    }

    pub fn is_open_inbound(&self) -> bool {
        ActionType::from(self.action_type.as_str()) == ActionType::In
    }

    pub fn matches_open_inbound(&self, key: &LookupKey) -> bool {
        self.is_open_inbound() && self.key_value(key.field) == key.value
    }

    pub fn apply_stamp(&mut self, stamp: &ScanStamp) {
        self.scan_date = stamp.scan_date.clone();
        self.scan_time = stamp.scan_time.clone();
    }
}

/// The pair of columns a rescan is allowed to touch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStamp {
    pub scan_date: String,
    pub scan_time: String,
}

impl ScanStamp {
    pub fn at<Tz: TimeZone>(at: &DateTime<Tz>) -> Self
    where
        Tz::Offset: Display,
    {
        Self {
            scan_date: format_scan_date(at),
            scan_time: format_scan_time(at),
        }
    }
}
