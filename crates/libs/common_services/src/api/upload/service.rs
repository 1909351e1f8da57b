use crate::api::upload::error::UploadError;
use crate::api::upload::interfaces::UploadedFile;
use crate::utils::nice_id;
use app_state::UploadSettings;
use std::path::Path;
use tracing::{info, instrument};

const STORED_NAME_LENGTH: usize = 24;

/// Validates and stores one uploaded file under a random name.
#[instrument(skip(settings, bytes), fields(size = bytes.len()))]
pub async fn store_upload(
    settings: &UploadSettings,
    public_url: &str,
    original_name: &str,
    bytes: &[u8],
) -> Result<UploadedFile, UploadError> {
    if bytes.is_empty() {
        return Err(UploadError::EmptyFile);
    }
    if bytes.len() > settings.max_bytes {
        return Err(UploadError::TooLarge {
            max_bytes: settings.max_bytes,
        });
    }
    let original = Path::new(original_name);
    let extension = settings.allowed_extension(original).ok_or_else(|| {
        UploadError::UnsupportedType(
            original
                .extension()
                .map_or_else(|| "none".to_owned(), |e| e.to_string_lossy().into_owned()),
        )
    })?;

    let file_name = format!("{}.{extension}", nice_id(STORED_NAME_LENGTH));
    let destination = settings.folder.join(&file_name);
    tokio::fs::write(&destination, bytes)
        .await
        .map_err(|e| UploadError::from_storage(e, settings.max_bytes))?;

    let content_type = mime_guess::from_path(&destination)
        .first_or_octet_stream()
        .to_string();
    info!(file_name = %file_name, content_type = %content_type, "Stored upload");
    Ok(UploadedFile {
        url: format!("{}/files/{file_name}", public_url.trim_end_matches('/')),
        file_name,
        original_name: original_name.to_owned(),
        content_type,
        size: bytes.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn settings(dir: &TempDir) -> UploadSettings {
        UploadSettings {
            folder: dir.path().to_path_buf(),
            max_bytes: 16,
            allowed_extensions: vec!["pdf".into(), "jpg".into()],
        }
    }

    #[tokio::test]
    async fn stores_file_under_random_name() {
        let dir = TempDir::new().unwrap();
        let uploaded = store_upload(&settings(&dir), "http://localhost:9475/", "Scan.PDF", b"%PDF-1.7")
            .await
            .unwrap();

        assert!(uploaded.file_name.ends_with(".pdf"));
        assert_ne!(uploaded.file_name, "Scan.PDF");
        assert_eq!(
            uploaded.url,
            format!("http://localhost:9475/files/{}", uploaded.file_name)
        );
        assert_eq!(uploaded.content_type, "application/pdf");
        let stored = std::fs::read(dir.path().join(&uploaded.file_name)).unwrap();
        assert_eq!(stored, b"%PDF-1.7");
    }

    #[tokio::test]
    async fn rejects_disallowed_extension() {
        let dir = TempDir::new().unwrap();
        let result = store_upload(&settings(&dir), "http://x", "run.exe", b"MZ").await;
        assert!(matches!(result, Err(UploadError::UnsupportedType(ext)) if ext == "exe"));
    }

    #[tokio::test]
    async fn rejects_oversized_and_empty_files() {
        let dir = TempDir::new().unwrap();
        let too_big = [0_u8; 17];
        assert!(matches!(
            store_upload(&settings(&dir), "http://x", "a.jpg", &too_big).await,
            Err(UploadError::TooLarge { max_bytes: 16 })
        ));
        assert!(matches!(
            store_upload(&settings(&dir), "http://x", "a.jpg", &[]).await,
            Err(UploadError::EmptyFile)
        ));
    }

    #[tokio::test]
    async fn missing_folder_is_a_storage_error() {
        let dir = TempDir::new().unwrap();
        let mut settings = settings(&dir);
        settings.folder = dir.path().join("does-not-exist");
        let result = store_upload(&settings, "http://x", "a.jpg", b"jpeg").await;
        assert!(matches!(result, Err(UploadError::Storage(_))));
    }
}
