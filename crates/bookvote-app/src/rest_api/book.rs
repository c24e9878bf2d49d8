use bookvote_dal::{book::BookRepository, rating::RatingRepository};

use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
};

crate::repository_from_request!(BookRepository);
crate::repository_from_request!(RatingRepository);

pub mod crud_api {
    use super::*;
    use crate::{
        client_id::Voter,
        error::{ApiError, ApiResult},
    };
    use axum::{
        extract::{
            rejection::{JsonRejection, PathRejection},
            Multipart, Path,
        },
        response::IntoResponse,
        Json,
    };
    use bookvote_dal::{book::CreateBook, rating::CreateRating, book::DEFAULT_IMAGE_MIME};
    use bookvote_types::{
        utils::{file_ext, normalize_title},
        Score,
    };
    use http::{header, StatusCode};
    use serde::{Deserialize, Serialize};
    use tracing::debug;

    #[derive(Debug, Deserialize)]
    pub struct RateBook {
        /// kept loose, coerced by [`Score::from_json`]
        #[serde(default)]
        pub score: serde_json::Value,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RateResult {
        pub ok: bool,
    }

    pub async fn list(repository: BookRepository) -> ApiResult<impl IntoResponse> {
        let books = repository.list().await?;
        Ok((StatusCode::OK, Json(books)))
    }

    /// Form fields `title` and optional `image` file
    pub async fn publish(
        repository: BookRepository,
        mut multipart: Multipart,
    ) -> ApiResult<impl IntoResponse> {
        let mut title: Option<String> = None;
        let mut image: Option<(Vec<u8>, String)> = None;

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "title" => title = Some(field.text().await?),
                "image" => {
                    let file_name = field.file_name().map(str::to_string);
                    let content_type = field.content_type().map(str::to_string);
                    let data = field.bytes().await?;
                    if data.is_empty() {
                        // empty file input
                        continue;
                    }
                    let mime = image_mime(content_type, file_name.as_deref());
                    debug!(
                        "Received image {:?}, {} bytes, mime {}",
                        file_name,
                        data.len(),
                        mime
                    );
                    image = Some((data.to_vec(), mime));
                }
                other => debug!("Ignoring form field {other:?}"),
            }
        }

        let title = title
            .as_deref()
            .and_then(normalize_title)
            .ok_or_else(|| ApiError::InvalidRequest("Title is required".into()))?;
        let mut payload = CreateBook::new(title);
        if let Some((data, mime)) = image {
            payload = payload.with_image(data, mime);
        }

        let published = repository.publish(payload).await?;
        let status = if published.created {
            StatusCode::CREATED
        } else {
            StatusCode::OK
        };
        Ok((status, Json(published.book)))
    }

    fn image_mime(content_type: Option<String>, file_name: Option<&str>) -> String {
        content_type
            .filter(|m| !m.is_empty())
            .or_else(|| {
                file_name
                    .and_then(|name| file_ext(name))
                    .and_then(|ext| new_mime_guess::from_ext(&ext).first_raw())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string())
    }

    pub async fn image(
        id: Result<Path<i64>, PathRejection>,
        repository: BookRepository,
    ) -> ApiResult<impl IntoResponse> {
        let Path(id) = id?;
        let image = repository.get_image(id).await?;
        Ok(([(header::CONTENT_TYPE, image.mime)], image.data))
    }

    pub async fn rate(
        id: Result<Path<i64>, PathRejection>,
        Voter(client_id): Voter,
        repository: RatingRepository,
        payload: Result<Json<RateBook>, JsonRejection>,
    ) -> ApiResult<impl IntoResponse> {
        let Path(id) = id?;
        let Json(payload) = payload?;
        let score = Score::from_json(&payload.score)?;
        debug!("Vote {score} for book {id} from {client_id:?}");
        repository
            .create(CreateRating {
                book_id: id,
                score: score.into(),
                client_id,
            })
            .await?;
        Ok((StatusCode::CREATED, Json(RateResult { ok: true })))
    }

    #[cfg(test)]
    mod tests {
        use super::image_mime;

        #[test]
        fn test_image_mime() {
            assert_eq!(
                image_mime(Some("image/webp".into()), Some("cover.png")),
                "image/webp"
            );
            assert_eq!(image_mime(None, Some("cover.PNG")), "image/png");
            assert_eq!(image_mime(Some("".into()), Some("cover.jpg")), "image/jpeg");
            assert_eq!(image_mime(None, Some("cover")), "application/octet-stream");
            assert_eq!(image_mime(None, None), "application/octet-stream");
        }
    }
}

pub fn router(upload_limit_mb: usize) -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", get(crud_api::list).post(crud_api::publish))
        .route("/{id}/image", get(crud_api::image))
        .route("/{id}/rate", post(crud_api::rate))
        .layer(DefaultBodyLimit::max(1024 * 1024 * upload_limit_mb))
}
