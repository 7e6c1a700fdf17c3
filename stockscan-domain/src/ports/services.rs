use chrono::{DateTime, Local};

use crate::value_objects::TagStrategy;

/// Source of synthetic tag numbers for part/category scans.
pub trait TagGenerator: Send + Sync {
    fn next_tag(&self, now: &DateTime<Local>) -> String;
    fn strategy(&self) -> TagStrategy;
}
