//! File handlers — upload, download, and listing.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use bytes::Bytes;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

use docvault_core::error::AppError;
use docvault_entity::document::RevisionSummary;

use crate::dto::request::DownloadQuery;
use crate::dto::response::{ApiResponse, UploadResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/files/upload — multipart upload of one file.
///
/// Expects a `file` part carrying the content (and usually the filename)
/// and an optional `name` part overriding the stored filename. Every
/// upload appends a new revision; the response carries the assigned
/// version number.
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadResponse>>, ApiError> {
    let mut name_override: Option<String> = None;
    let mut file_name: Option<String> = None;
    let mut data: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "name" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                name_override = Some(text);
            }
            "file" => {
                file_name = field.file_name().map(String::from);
                data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            _ => {}
        }
    }

    let data = data.ok_or_else(|| AppError::validation("No file uploaded"))?;
    let name = name_override
        .or(file_name)
        .ok_or_else(|| AppError::validation("File name is required"))?;

    let revision = state.document_service.upload(&auth, &name, data).await?;

    Ok(Json(ApiResponse::ok(UploadResponse {
        name: revision.name,
        version: revision.version,
    })))
}

/// GET /api/files/{name}?revision=N — download the latest or an exact
/// revision of a file.
pub async fn download_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(name): Path<String>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, ApiError> {
    let revision = state
        .document_service
        .fetch(&auth, &name, query.revision)
        .await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::CONTENT_DISPOSITION, content_disposition(&revision.name))
        .header(header::CONTENT_LENGTH, revision.content.len())
        .body(Body::from(revision.content))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

/// Builds a `Content-Disposition` value that stays a valid header for any
/// stored filename: a sanitized ASCII `filename` for legacy clients plus
/// an RFC 5987 `filename*` carrying the exact name percent-encoded.
fn content_disposition(name: &str) -> String {
    let fallback: String = name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();
    let encoded = utf8_percent_encode(name, NON_ALPHANUMERIC);

    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}

/// GET /api/files — the latest revision of every file the caller owns.
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<RevisionSummary>>>, ApiError> {
    let files = state.document_service.list_latest(&auth).await?;

    Ok(Json(ApiResponse::ok(files)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_plain_name() {
        assert_eq!(
            content_disposition("report.txt"),
            "attachment; filename=\"report.txt\"; filename*=UTF-8''report%2Etxt"
        );
    }

    #[test]
    fn test_content_disposition_escapes_quotes() {
        let value = content_disposition("he said \"hi\".txt");
        assert!(value.starts_with("attachment; filename=\"he said _hi_.txt\""));
        assert!(!value.contains("\"hi\""));
    }

    #[test]
    fn test_content_disposition_non_ascii_stays_ascii() {
        let value = content_disposition("résumé.txt");
        assert!(value.is_ascii());
        assert!(value.contains("filename*=UTF-8''r%C3%A9sum%C3%A9%2Etxt"));
    }
}
