use anyhow::Result;
use bookvote_dal::book::{BookShort, BookSummary};
use reqwest::{StatusCode, Url, multipart};
use serde_json::{Value, json};
use tracing::info;

pub async fn publish_book(
    client: &reqwest::Client,
    base_url: &Url,
    title: &str,
) -> Result<(StatusCode, BookShort)> {
    let api_url = base_url.join("api/books")?;
    let form = multipart::Form::new().text("title", title.to_string());
    let response = client.post(api_url).multipart(form).send().await?;
    let status = response.status();
    assert!(status.is_success(), "publish failed with {status}");
    let book: BookShort = response.json().await?;
    Ok((status, book))
}

pub async fn publish_with_image(
    client: &reqwest::Client,
    base_url: &Url,
    title: &str,
    file_name: &str,
    mime: &str,
    data: Vec<u8>,
) -> Result<BookShort> {
    let api_url = base_url.join("api/books")?;
    let part = multipart::Part::bytes(data)
        .file_name(file_name.to_string())
        .mime_str(mime)?;
    let form = multipart::Form::new()
        .text("title", title.to_string())
        .part("image", part);
    let response = client.post(api_url).multipart(form).send().await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    Ok(response.json().await?)
}

pub async fn rate_book(
    client: &reqwest::Client,
    base_url: &Url,
    book_id: i64,
    score: Value,
    client_id: Option<&str>,
) -> Result<(StatusCode, Value)> {
    let api_url = base_url.join(&format!("api/books/{book_id}/rate"))?;
    let mut request = client.post(api_url).json(&json!({ "score": score }));
    if let Some(client_id) = client_id {
        request = request.header("X-Client-Id", client_id);
    }
    let response = request.send().await?;
    let status = response.status();
    let body: Value = response.json().await?;
    info!("Rate response {status}: {body}");
    Ok((status, body))
}

pub async fn list_books(client: &reqwest::Client, base_url: &Url) -> Result<Vec<BookSummary>> {
    let api_url = base_url.join("api/books")?;
    let response = client.get(api_url).send().await?;
    assert!(response.status().is_success());
    Ok(response.json().await?)
}

pub async fn stats(client: &reqwest::Client, base_url: &Url) -> Result<Vec<BookSummary>> {
    let api_url = base_url.join("api/stats")?;
    let response = client.get(api_url).send().await?;
    assert!(response.status().is_success());
    Ok(response.json().await?)
}
