use crate::runner::utils::{create_test_database, create_test_settings};
use app_state::{AppSettings, load_settings_from_path};
use color_eyre::Result;
use color_eyre::eyre::bail;
use common_services::utils::nice_id;
use sqlx::{Executor, PgPool};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The main context for our integration tests.
pub struct TestContext {
    pub pool: PgPool,
    pub settings: AppSettings,
    pub http_client: reqwest::Client,
    // Private fields for cleanup on Drop
    _db_name: String,
    _management_pool: PgPool,
    _upload_dir: TempDir,
    _api_handle: JoinHandle<()>,
}

impl TestContext {
    pub async fn new() -> Result<Self> {
        info!("Setting up test environment...");

        // Settings and migrations are resolved from the workspace root.
        let workspace_root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..");
        std::env::set_current_dir(&workspace_root)?;

        let settings_path = Path::new("crates/test_integration/assets/settings.yaml");
        let base_settings = load_settings_from_path(settings_path, true)?;
        let database_name = format!("test_{}", nice_id(8).to_lowercase());

        let (main_pool, management_pool) =
            create_test_database(&base_settings.secrets.database_url, &database_name).await?;
        let (settings, upload_dir) = create_test_settings(&database_name, &base_settings)?;

        let api_pool = main_pool.clone();
        let api_settings = settings.clone();
        let api_handle = tokio::spawn(async move {
            if let Err(e) = api::serve(api_pool, api_settings).await {
                error!("API server failed: {}", e);
            }
        });

        let http_client = reqwest::Client::new();
        wait_until_healthy(&http_client, &settings.api.public_url).await?;
        info!("Test environment is ready.");

        Ok(Self {
            pool: main_pool,
            settings,
            http_client,
            _db_name: database_name,
            _management_pool: management_pool,
            _upload_dir: upload_dir,
            _api_handle: api_handle,
        })
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.settings.api.public_url)
    }
}

async fn wait_until_healthy(client: &reqwest::Client, public_url: &str) -> Result<()> {
    let url = format!("{public_url}/health");
    for _ in 0..50 {
        if let Ok(response) = client.get(&url).send().await {
            if response.status().is_success() {
                return Ok(());
            }
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    bail!("API did not become healthy at {url}")
}

impl Drop for TestContext {
    fn drop(&mut self) {
        info!("Tearing down test environment...");

        self._api_handle.abort();

        let db_name = self._db_name.clone();
        let pool = self._management_pool.clone();
        tokio::spawn(async move {
            info!("Dropping test database: {}", db_name);
            // DROP DATABASE cannot run as a prepared statement.
            let query = format!("DROP DATABASE \"{db_name}\" WITH (FORCE)");
            if let Err(e) = pool.execute(query.as_str()).await {
                error!("Failed to drop test database {}: {}", db_name, e);
            }
        });

        info!("Teardown complete.");
    }
}
