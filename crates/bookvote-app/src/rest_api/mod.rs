pub mod book;
pub mod stats;

use crate::state::AppState;

/// All JSON API routes, to be nested under `/api`
pub fn api_router(state: &AppState) -> axum::Router<AppState> {
    axum::Router::new()
        .nest("/books", book::router(state.config().upload_limit_mb))
        .nest("/stats", stats::router())
}
