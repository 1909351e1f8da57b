use crate::{ApiSettings, LoggingSettings, MarketplaceSettings, RawSettings, SecretSettings};
use color_eyre::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf, absolute};

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub logging: LoggingSettings,
    pub api: ApiSettings,
    pub secrets: SecretSettings,
    pub uploads: UploadSettings,
    pub marketplace: MarketplaceSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadSettings {
    /// Absolute path of the upload folder.
    pub folder: PathBuf,
    pub max_bytes: usize,
    /// Lowercase, without leading dot.
    pub allowed_extensions: Vec<String>,
}

impl TryFrom<RawSettings> for AppSettings {
    type Error = color_eyre::Report;

    fn try_from(raw: RawSettings) -> Result<Self> {
        let uploads = UploadSettings {
            folder: absolute(&raw.uploads.folder)?,
            max_bytes: raw.uploads.max_bytes,
            allowed_extensions: raw
                .uploads
                .allowed_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
        };

        Ok(Self {
            logging: raw.logging,
            api: raw.api,
            secrets: raw.secrets,
            uploads,
            marketplace: raw.marketplace,
        })
    }
}

impl UploadSettings {
    /// Lowercased extension of `file` if it is on the allow-list.
    #[must_use]
    pub fn allowed_extension(&self, file: &Path) -> Option<String> {
        let extension = file.extension()?.to_string_lossy().to_lowercase();
        self.allowed_extensions
            .contains(&extension)
            .then_some(extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uploads() -> UploadSettings {
        UploadSettings {
            folder: PathBuf::from("/tmp/uploads"),
            max_bytes: 1024,
            allowed_extensions: vec!["pdf".into(), "jpg".into()],
        }
    }

    #[test]
    fn extension_check_ignores_case() {
        let uploads = uploads();
        assert_eq!(
            uploads.allowed_extension(Path::new("scan.PDF")),
            Some("pdf".to_owned())
        );
        assert_eq!(uploads.allowed_extension(Path::new("script.sh")), None);
        assert_eq!(uploads.allowed_extension(Path::new("no_extension")), None);
    }
}
