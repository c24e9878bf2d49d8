use axum::{response::IntoResponse, routing::get, Json};
use bookvote_dal::book::BookRepository;
use http::StatusCode;

use crate::{error::ApiResult, state::AppState};

pub async fn stats(repository: BookRepository) -> ApiResult<impl IntoResponse> {
    let leaderboard = repository.list_stats().await?;
    Ok((StatusCode::OK, Json(leaderboard)))
}

pub fn router() -> axum::Router<AppState> {
    axum::Router::new().route("/", get(stats))
}
