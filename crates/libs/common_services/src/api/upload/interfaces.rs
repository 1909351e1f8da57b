use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    /// Public URL the file is served from.
    pub url: String,
    /// Name the file was stored under.
    pub file_name: String,
    pub original_name: String,
    pub content_type: String,
    pub size: usize,
}

/// Multipart form accepted by `POST /uploads`. Only used for the docs.
#[derive(ToSchema)]
pub struct UploadForm {
    #[schema(format = Binary)]
    pub file: String,
}
