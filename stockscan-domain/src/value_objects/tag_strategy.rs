// Tag generation strategy value object

use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagStrategy {
    #[default]
    Timestamp,
    Sequence,
    Random,
}

impl TagStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagStrategy::Timestamp => "timestamp",
            TagStrategy::Sequence => "sequence",
            TagStrategy::Random => "random",
        }
    }
}

impl FromStr for TagStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "timestamp" => Ok(TagStrategy::Timestamp),
            "sequence" => Ok(TagStrategy::Sequence),
            "random" => Ok(TagStrategy::Random),
            other => Err(anyhow::anyhow!(
                "unknown tag_strategy '{}', expected timestamp, sequence or random",
                other
            )),
        }
    }
}
