use app_state::AppSettings;
use color_eyre::eyre::Result;
use common_services::database::{get_db_pool, run_migrations};
use sqlx::{Executor, PgPool};
use std::net::TcpListener;
use tempfile::TempDir;
use tracing::info;
use url::Url;

/// Points a copy of the base settings at a fresh database, port and upload folder.
pub fn create_test_settings(
    database_name: &str,
    base_settings: &AppSettings,
) -> Result<(AppSettings, TempDir)> {
    let mut settings = base_settings.clone();

    let upload_dir = TempDir::new()?;
    let port = get_free_port()?;
    settings.api.port = u32::from(port);
    settings.api.public_url = format!("http://127.0.0.1:{port}");
    settings.uploads.folder = upload_dir.path().to_path_buf();

    let mut db_url = Url::parse(&settings.secrets.database_url)?;
    db_url.set_path(&format!("/{database_name}"));
    settings.secrets.database_url = db_url.to_string();

    println!("DB URL: {}", settings.secrets.database_url);

    Ok((settings, upload_dir))
}

pub async fn create_test_database(
    base_database_url: &str,
    database_name: &str,
) -> Result<(PgPool, PgPool)> {
    // The default 'postgres' database is used to manage the test databases.
    let mut management_db_url = Url::parse(base_database_url)?;
    management_db_url.set_path("/postgres");
    let management_pool = get_db_pool(management_db_url.as_str()).await?;
    force_drop_db(&management_pool, database_name).await?;

    management_pool
        .execute(format!("CREATE DATABASE \"{database_name}\"").as_str())
        .await?;

    let mut test_db_url = Url::parse(base_database_url)?;
    test_db_url.set_path(&format!("/{database_name}"));
    let main_pool = get_db_pool(test_db_url.as_str()).await?;

    run_migrations(&main_pool).await?;
    info!("Finished database migrations for {}", database_name);

    Ok((main_pool, management_pool))
}

pub async fn force_drop_db(management_pool: &PgPool, db_name: &str) -> Result<()> {
    let _ = management_pool
        .execute(format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)").as_str())
        .await;
    Ok(())
}

pub fn get_free_port() -> Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}
