use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Local};
use uuid::Uuid;

use stockscan_domain::ports::TagGenerator;
use stockscan_domain::{current_millis, TagStrategy};

/// Local wall-clock stamp down to the millisecond, `YYYYMMDDHHMMSSmmm`.
/// Two scans in the same millisecond get the same tag.
#[derive(Debug, Default)]
pub struct TimestampTagGenerator;

impl TagGenerator for TimestampTagGenerator {
    fn next_tag(&self, now: &DateTime<Local>) -> String {
        now.format("%Y%m%d%H%M%S%3f").to_string()
    }

    fn strategy(&self) -> TagStrategy {
        TagStrategy::Timestamp
    }
}

/// Monotonic counter seeded from the clock at startup.
#[derive(Debug)]
pub struct SequenceTagGenerator {
    next: AtomicU64,
}

impl SequenceTagGenerator {
    pub fn starting_at(seed: u64) -> Self {
        Self {
            next: AtomicU64::new(seed),
        }
    }
}

impl Default for SequenceTagGenerator {
    fn default() -> Self {
        Self::starting_at(u64::try_from(current_millis()).unwrap_or_default())
    }
}

impl TagGenerator for SequenceTagGenerator {
    fn next_tag(&self, _now: &DateTime<Local>) -> String {
        self.next.fetch_add(1, Ordering::Relaxed).to_string()
    }

    fn strategy(&self) -> TagStrategy {
        TagStrategy::Sequence
    }
}

#[derive(Debug, Default)]
pub struct RandomTagGenerator;

impl TagGenerator for RandomTagGenerator {
    fn next_tag(&self, _now: &DateTime<Local>) -> String {
        Uuid::new_v4().simple().to_string().to_uppercase()
    }

    fn strategy(&self) -> TagStrategy {
        TagStrategy::Random
    }
}

pub fn tag_generator_for(strategy: TagStrategy) -> Arc<dyn TagGenerator> {
    match strategy {
        TagStrategy::Timestamp => Arc::new(TimestampTagGenerator),
        TagStrategy::Sequence => Arc::new(SequenceTagGenerator::default()),
        TagStrategy::Random => Arc::new(RandomTagGenerator),
    }
}
