use crate::api_state::ApiContext;
use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use common_services::api::upload::error::UploadError;
use common_services::api::upload::interfaces::{UploadForm, UploadedFile};
use common_services::api::upload::service::store_upload;

/// Upload a single file, e.g. a document scan, a selfie or a deliverable.
///
/// The file goes in the `file` field of a multipart form.
#[utoipa::path(
    post,
    path = "/uploads",
    tag = "Upload",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "File stored.", body = UploadedFile),
        (status = 400, description = "No file or an empty file."),
        (status = 413, description = "The file is too large."),
        (status = 415, description = "The file type is not accepted."),
        (status = 507, description = "Storage is full."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_handler(
    State(context): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadedFile>), UploadError> {
    let uploads = &context.settings.uploads;
    let map_multipart = |e: axum::extract::multipart::MultipartError| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            UploadError::TooLarge {
                max_bytes: uploads.max_bytes,
            }
        } else {
            UploadError::Multipart(e.body_text())
        }
    };

    while let Some(field) = multipart.next_field().await.map_err(map_multipart)? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_owned();
        let bytes = field.bytes().await.map_err(map_multipart)?;
        let stored = store_upload(
            uploads,
            &context.settings.api.public_url,
            &file_name,
            &bytes,
        )
        .await?;
        return Ok((StatusCode::CREATED, Json(stored)));
    }
    Err(UploadError::MissingFile)
}
