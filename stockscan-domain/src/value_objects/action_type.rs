// Action type value object

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "OUT")]
    Out,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::In => "IN",
            ActionType::Out => "OUT",
        }
    }
}

impl From<&str> for ActionType {
    fn from(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "OUT" => ActionType::Out,
            _ => ActionType::In,
        }
    }
}
