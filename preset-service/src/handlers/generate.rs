use axum::{Json, extract::State};
use service_core::error::AppError;

use crate::models::{GenerateRequest, GenerateResponse, HistoryRecord};
use crate::services::prompt::build_prompt;
use crate::startup::AppState;

/// Markdown fence markers stripped from model output, in match order.
const FENCE_MARKERS: &[&str] = &["```json", "```"];

#[tracing::instrument(skip(state, body))]
pub async fn generate_preset(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<GenerateResponse>, AppError> {
    // Parsed by hand so malformed bodies surface through the common error
    // boundary instead of an axum extractor rejection.
    let request: GenerateRequest =
        serde_json::from_str(&body).map_err(|e| AppError::InternalError(anyhow::anyhow!(e)))?;

    if request.password != state.config.auth.app_password {
        tracing::warn!(song = %request.song, "Rejected generation request with bad password");
        return Err(AppError::Unauthorized(anyhow::anyhow!(
            "⛔ INCORRECT PASSWORD"
        )));
    }

    let prompt = build_prompt(&request.song);
    let raw = state
        .text_provider
        .generate(&prompt)
        .await
        .map_err(|e| AppError::InternalError(anyhow::anyhow!(e)))?;
    let preset = strip_code_fences(&raw);

    state.archive.record_async(HistoryRecord {
        song: request.song.clone(),
        json: preset.clone(),
    });

    tracing::info!(song = %request.song, preset_len = preset.len(), "Preset generated");

    Ok(Json(GenerateResponse { json: preset }))
}

/// Remove every markdown fence marker and trim surrounding whitespace.
fn strip_code_fences(text: &str) -> String {
    let mut cleaned = text.to_string();
    for marker in FENCE_MARKERS {
        cleaned = cleaned.replace(marker, "");
    }
    cleaned.trim().to_string()
}
