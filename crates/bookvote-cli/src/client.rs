use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use bookvote_dal::book::{BookShort, BookSummary};
use bookvote_types::{ClientId, Score};
use reqwest::{multipart, StatusCode};
use serde::Deserialize;
use tracing::debug;
use url::Url;

pub const CLIENT_ID_HEADER: &str = "X-Client-Id";

#[derive(Debug, Clone, PartialEq)]
pub struct PublishOutcome {
    pub book: BookShort,
    /// false when book with same title already existed
    pub created: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    Recorded,
    AlreadyVoted,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for bookvote REST API, every request carries client id
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    client_id: ClientId,
}

impl ApiClient {
    pub fn new(base_url: Url, client_id: ClientId) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("bookvote-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(ApiClient {
            http,
            base_url,
            client_id,
        })
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("Invalid API path {path}"))
    }

    fn request(&self, method: reqwest::Method, path: &str) -> Result<reqwest::RequestBuilder> {
        Ok(self
            .http
            .request(method, self.url(path)?)
            .header(CLIENT_ID_HEADER, self.client_id.as_str()))
    }

    pub async fn fetch_books(&self) -> Result<Vec<BookSummary>> {
        let response = self.request(reqwest::Method::GET, "api/books")?.send().await?;
        let response = check_response(response).await?;
        Ok(response.json().await?)
    }

    pub async fn fetch_stats(&self) -> Result<Vec<BookSummary>> {
        let response = self.request(reqwest::Method::GET, "api/stats")?.send().await?;
        let response = check_response(response).await?;
        Ok(response.json().await?)
    }

    pub async fn publish(&self, title: &str, image: Option<&Path>) -> Result<PublishOutcome> {
        let mut form = multipart::Form::new().text("title", title.to_string());
        if let Some(path) = image {
            let data = tokio::fs::read(path)
                .await
                .with_context(|| format!("Cannot read image {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "cover".to_string());
            let mime = new_mime_guess::from_path(path).first_or_octet_stream();
            debug!("Attaching image {file_name} ({mime}), {} bytes", data.len());
            let part = multipart::Part::bytes(data)
                .file_name(file_name)
                .mime_str(mime.as_ref())?;
            form = form.part("image", part);
        }

        let response = self
            .request(reqwest::Method::POST, "api/books")?
            .multipart(form)
            .send()
            .await?;
        let created = response.status() == StatusCode::CREATED;
        let response = check_response(response).await?;
        let book: BookShort = response.json().await?;
        Ok(PublishOutcome { book, created })
    }

    pub async fn vote(&self, book_id: i64, score: Score) -> Result<VoteOutcome> {
        let response = self
            .request(reqwest::Method::POST, &format!("api/books/{book_id}/rate"))?
            .json(&serde_json::json!({ "score": score }))
            .send()
            .await?;
        if response.status() == StatusCode::CONFLICT {
            debug!("Book {book_id} already rated by this client");
            return Ok(VoteOutcome::AlreadyVoted);
        }
        check_response(response).await?;
        Ok(VoteOutcome::Recorded)
    }
}

async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(ErrorBody { error }) => Err(anyhow!("Server error ({status}): {error}")),
        Err(_) if body.is_empty() => bail!("Server error ({status})"),
        Err(_) => bail!("Server error ({status}): {body}"),
    }
}
