use crate::api_state::ApiContext;
use crate::create_router;
use app_state::AppSettings;
use axum::Router;
use axum::routing::get_service;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use http::{HeaderValue, header};
use sqlx::PgPool;
use std::iter::once;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::cors;
use tower_http::cors::CorsLayer;
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Builds the full application: routes, static uploads and middleware.
pub fn build_app(pool: PgPool, settings: AppSettings) -> Result<Router> {
    // --- CORS Configuration ---
    let allowed_origins: Vec<HeaderValue> = settings
        .api
        .allowed_origins
        .iter()
        .filter_map(|s| match s.parse() {
            Ok(hv) => Some(hv),
            Err(e) => {
                error!("Invalid CORS origin configured: {} - Error: {}", s, e);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_methods(cors::Any)
        .allow_origin(allowed_origins)
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            header::USER_AGENT,
            header::CACHE_CONTROL,
        ]);

    // Stored uploads get random names, so they never change.
    let serve_dir = ServeDir::new(&settings.uploads.folder);
    let cache_layer = SetResponseHeaderLayer::if_not_present(
        header::CACHE_CONTROL,
        HeaderValue::from_static("private, max-age=31536000, immutable"),
    );

    let api_state = ApiContext { pool, settings };
    let app = create_router(api_state)?
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(SetSensitiveRequestHeadersLayer::new(once(
            header::AUTHORIZATION,
        )))
        .nest_service("/files", get_service(serve_dir).layer(cache_layer));
    Ok(app)
}

pub async fn serve(pool: PgPool, settings: AppSettings) -> Result<()> {
    info!("🚀 Initializing server...");
    let addr: SocketAddr = format!("{}:{}", settings.api.host, settings.api.port)
        .parse()
        .map_err(|e| eyre!("Invalid address: {}", e))?;

    let app = build_app(pool, settings)?;
    let listener = TcpListener::bind(addr).await?;
    info!("🐸 Server listening on http://{}", addr);

    // Peer addresses feed the rate limiter on the auth routes.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
