// Request payloads and query parameters

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct KeyboardScanRequest {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CameraScanRequest {
    pub decoded_text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentScansQuery {
    pub date: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenScanQuery {
    pub field: Option<String>,
    pub value: String,
}
