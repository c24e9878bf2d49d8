use crate::config::ServerConfig;
use crate::error::Result;
use axum::http::StatusCode;
use axum::{response::IntoResponse, routing::get, Router};
use bookvote_app::rest_api::api_router;
use bookvote_app::state::{AppConfig, AppState};
use futures::FutureExt;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{debug, info};

pub async fn run(args: ServerConfig) -> Result<()> {
    let state = build_state(&args).await?;
    run_with_state(args, state).await
}

pub async fn run_with_state(args: ServerConfig, state: AppState) -> Result<()> {
    let shutdown = tokio::signal::ctrl_c().map(|_| ());
    run_graceful_with_state(args, state, shutdown).await
}

pub async fn run_graceful_with_state<S>(
    args: ServerConfig,
    state: AppState,
    shutdown_signal: S,
) -> Result<()>
where
    S: std::future::Future<Output = ()> + Send + 'static,
{
    let mut app = main_router(state, &args);

    if !args.no_cors {
        app = app.layer(CorsLayer::permissive());
    }

    let ip: std::net::IpAddr = args.listen_address.parse()?;
    let addr = std::net::SocketAddr::from((ip, args.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        "Listening on {}, public URL {}",
        listener.local_addr()?,
        args.base_url
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    debug!("Server stopped");
    Ok(())
}

pub fn main_router(state: AppState, args: &ServerConfig) -> Router<()> {
    let mut router = Router::new()
        .nest("/api", api_router(&state))
        .with_state(state)
        .route("/health", get(health));

    if let Some(static_dir) = &args.static_dir {
        debug!("Serving static files from {:?}", static_dir);
        router = router.fallback_service(ServeDir::new(static_dir));
    }

    router.layer(TraceLayer::new_for_http())
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn build_state(config: &ServerConfig) -> Result<AppState> {
    let app_config: AppConfig = config.into();

    let data_dir = config.data_dir();
    if !data_dir.is_dir() {
        tokio::fs::create_dir_all(&data_dir).await?;
        info!("Created data directory {:?}", data_dir);
    }

    let database_url = config.database_url();
    let pool = bookvote_dal::new_pool(&database_url).await?;
    bookvote_dal::migrate(&pool).await?;
    info!("Database {database_url} ready");

    Ok(AppState::new(app_config, pool))
}
