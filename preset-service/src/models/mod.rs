//! Request, response, and archive record types for the preset service.

use serde::{Deserialize, Serialize};

/// Body of a `POST /` generation request.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub password: String,
    pub song: String,
}

/// Successful generation response. `json` holds the preset document exactly
/// as the model produced it, with markdown fences stripped.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub json: String,
}

/// Record appended to the archive webhook after each generation. Write-only:
/// history reads pass the webhook's response through without deserializing.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryRecord {
    pub song: String,
    pub json: String,
}
