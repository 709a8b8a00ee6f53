//! Handlers for generic file uploads.
//!
//! Files go through the configured [`crate::storage::ObjectStore`]; a
//! `media_assets` row records each stored object so the admin area can
//! browse originals, sizes, and image dimensions without touching the
//! backend storage.

use std::io::Cursor;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use meridian_core::error::CoreError;
use meridian_db::models::media::{CreateMediaAsset, MediaAsset};
use meridian_db::repositories::MediaRepo;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::query::PaginationParams;
use crate::state::AppState;
use crate::storage::{sanitize_file_name, validate_object_name};

/// Upload size cap, applied as the request body limit on the upload route.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// POST /admin/api/uploads
///
/// Multipart upload: a required `file` field, unknown fields ignored.
/// The object is stored under a uuid-prefixed name so repeated uploads
/// of the same file never collide. Returns 201 with the recorded asset,
/// including width/height when the file is a decodable image.
pub async fn upload(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<MediaAsset>)> {
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let original = field.file_name().unwrap_or("file").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file = Some((original, content_type, data.to_vec()));
            }
            _ => {} // ignore unknown fields
        }
    }

    let (original, content_type, data) =
        file.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::BadRequest(format!(
            "File exceeds the {} MB upload limit",
            MAX_UPLOAD_BYTES / (1024 * 1024)
        )));
    }

    let stored_name = format!("{}-{}", Uuid::new_v4(), sanitize_file_name(&original));
    let (width, height) = image_dimensions(&content_type, &data);

    let url = state.store.put(&stored_name, &data, &content_type).await?;

    let asset = MediaRepo::create(
        &state.pool,
        &CreateMediaAsset {
            file_name: stored_name,
            original_name: original,
            content_type,
            byte_size: data.len() as i64,
            public_url: url,
            width,
            height,
            uploaded_by: Some(editor.user_id),
        },
    )
    .await?;

    tracing::info!(
        asset_id = asset.id,
        user_id = editor.user_id,
        byte_size = asset.byte_size,
        "file uploaded"
    );
    Ok((StatusCode::CREATED, Json(asset)))
}

/// GET /admin/api/uploads
pub async fn list(
    RequireEditor(_editor): RequireEditor,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<MediaAsset>>> {
    let assets = MediaRepo::list(&state.pool, params.limit, params.offset).await?;
    Ok(Json(assets))
}

/// DELETE /admin/api/uploads/{name}
///
/// Remove the stored object and its asset record. 404 only when neither
/// existed; a record left behind by a manually removed object is still
/// cleaned up.
pub async fn delete(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<StatusCode> {
    validate_object_name(&name)?;

    let object_deleted = state.store.delete(&name).await?;
    let record_deleted = MediaRepo::delete_by_file_name(&state.pool, &name).await?;

    if object_deleted || record_deleted {
        tracing::info!(file_name = %name, user_id = editor.user_id, "upload deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Upload",
            key: name,
        }))
    }
}

/// Read the pixel dimensions from an image upload's header. Non-images
/// and undecodable data yield no dimensions rather than an error.
fn image_dimensions(content_type: &str, data: &[u8]) -> (Option<i32>, Option<i32>) {
    if !content_type.starts_with("image/") {
        return (None, None);
    }
    let reader = match image::ImageReader::new(Cursor::new(data)).with_guessed_format() {
        Ok(reader) => reader,
        Err(e) => {
            tracing::debug!(error = %e, "image format sniffing failed");
            return (None, None);
        }
    };
    match reader.into_dimensions() {
        Ok((w, h)) => (Some(w as i32), Some(h as i32)),
        Err(e) => {
            tracing::debug!(error = %e, "image dimension read failed");
            (None, None)
        }
    }
}
