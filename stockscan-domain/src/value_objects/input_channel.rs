// Input channel value object

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputChannel {
    Keyboard,
    Camera,
}

impl InputChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputChannel::Keyboard => "keyboard",
            InputChannel::Camera => "camera",
        }
    }
}
