use crate::{AppConstants, AppSettings, RawSettings};
use color_eyre::eyre::Result;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

const SETTINGS_PATH: &str = "config/settings.yaml";

pub fn load_app_settings() -> Result<AppSettings> {
    // Loaded first so `.env` can override the database url.
    dotenv::from_path(".env").ok();
    load_settings_from_path(Path::new(SETTINGS_PATH), true)
}

/// Reads settings from a yaml file, optionally overridden by `APP__*` environment variables.
pub fn load_settings_from_path(path: &Path, use_env: bool) -> Result<AppSettings> {
    let config_path = path.canonicalize()?;
    debug!("Loading settings from {}", config_path.display());

    let mut builder = config::Config::builder().add_source(config::File::from(config_path));
    if use_env {
        builder = builder.add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );
    }

    let raw_settings = builder.build()?.try_deserialize::<RawSettings>()?;
    let settings = AppSettings::try_from(raw_settings)?;

    fs::create_dir_all(&settings.uploads.folder)?;

    Ok(settings)
}

fn load_app_constants() -> Result<AppConstants> {
    let config_path = Path::new(SETTINGS_PATH).canonicalize()?;
    let builder = config::Config::builder().add_source(config::File::from(config_path));
    let raw_constants = builder.build()?.try_deserialize::<RawSettings>()?;
    let app_constants: AppConstants = raw_constants.into();

    Ok(app_constants)
}

pub static CONSTANTS: LazyLock<AppConstants> =
    LazyLock::new(|| load_app_constants().expect("Cannot load app settings."));

#[must_use]
pub fn constants() -> &'static AppConstants {
    &CONSTANTS
}
