use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};

use crate::{error::AppError, state::AppState};

const NOT_FOUND: &str = "Transcript not found.";

/// Serves a generated transcript file.
///
/// Only bare file names are accepted; anything that could leave the
/// transcripts directory is answered as missing.
///
/// # Returns
/// - `200 OK` - File contents with an HTML or plain-text content type
/// - `404 Not Found` - No such transcript, or the name is not a plain file name
pub async fn get_transcript(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !is_plain_file_name(&filename) {
        tracing::warn!("Rejected transcript path {:?}", filename);
        return Err(AppError::NotFound(NOT_FOUND.to_string()));
    }

    let path = state.transcripts_dir().join(&filename);
    let body = match tokio::fs::read(&path).await {
        Ok(body) => body,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(NOT_FOUND.to_string()))
        }
        Err(e) => return Err(e.into()),
    };

    Ok(([(header::CONTENT_TYPE, content_type(&filename))], body))
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\'])
        && !name.contains("..")
}

fn content_type(name: &str) -> &'static str {
    if name.ends_with(".html") {
        "text/html; charset=utf-8"
    } else if name.ends_with(".txt") {
        "text/plain; charset=utf-8"
    } else {
        "application/octet-stream"
    }
}
