use crate::{Error, error::Result};
use bookvote_types::utils::normalize_title;
use futures::TryStreamExt as _;
use garde::Validate;
use serde::{Deserialize, Serialize};
use sqlx::Pool;
use tracing::debug;

pub const DEFAULT_IMAGE_MIME: &str = "application/octet-stream";

fn non_blank(value: &str, _ctx: &()) -> garde::Result {
    if value.trim().is_empty() {
        Err(garde::Error::new("Title is required"))
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ImageData {
    pub data: Vec<u8>,
    pub mime: String,
}

#[derive(Debug, Clone, Validate)]
pub struct CreateBook {
    #[garde(custom(non_blank), length(max = 511))]
    pub title: String,
    #[garde(skip)]
    pub image: Option<ImageData>,
}

impl CreateBook {
    pub fn new(title: impl Into<String>) -> Self {
        CreateBook {
            title: title.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, data: Vec<u8>, mime: impl Into<String>) -> Self {
        self.image = Some(ImageData {
            data,
            mime: mime.into(),
        });
        self
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, sqlx::FromRow)]
pub struct BookShort {
    pub id: i64,
    pub title: String,
}

/// Book with ratings aggregated at query time
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, sqlx::FromRow)]
pub struct BookSummary {
    pub id: i64,
    pub title: String,
    /// Mean score rounded to 2 decimal places, `None` if not rated yet
    pub avg_rating: Option<f64>,
    pub votes: i64,
}

#[derive(Debug, Clone)]
pub struct BookImage {
    pub data: Vec<u8>,
    pub mime: String,
}

#[derive(Debug, Clone)]
pub struct Published {
    pub book: BookShort,
    /// false when book with same title already existed
    pub created: bool,
}

const SUMMARY_SQL: &str = r#"
SELECT b.id, b.title, ROUND(AVG(r.score), 2) AS avg_rating, COUNT(r.id) AS votes
FROM book b
LEFT JOIN rating r ON r.book_id = b.id
"#;

pub type BookRepository = BookRepositoryImpl<Pool<crate::ChosenDB>>;

pub struct BookRepositoryImpl<E> {
    executor: E,
}

impl<'c, E> BookRepositoryImpl<E>
where
    for<'a> &'a E: sqlx::Executor<'c, Database = crate::ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Creates new book, or returns existing one with the same title
    pub async fn publish(&self, mut payload: CreateBook) -> Result<Published> {
        payload.validate()?;
        payload.title = normalize_title(&payload.title)
            .ok_or_else(|| Error::InvalidInput("Title is required".into()))?;
        let (image, image_mime) = match payload.image {
            Some(ImageData { data, mime }) => (Some(data), Some(mime)),
            None => (None, None),
        };

        let result = sqlx::query(
            "INSERT INTO book (title, image, image_mime) VALUES (?, ?, ?) ON CONFLICT(title) DO NOTHING",
        )
        .bind(&payload.title)
        .bind(image)
        .bind(image_mime)
        .execute(&self.executor)
        .await?;

        if result.rows_affected() > 0 {
            let id = result.last_insert_rowid();
            debug!("Created book {id}");
            Ok(Published {
                book: BookShort {
                    id,
                    title: payload.title,
                },
                created: true,
            })
        } else {
            debug!("Book titled {:?} already exists", payload.title);
            let book = self.find_by_title(&payload.title).await?;
            Ok(Published {
                book,
                created: false,
            })
        }
    }

    pub async fn find_by_title(&self, title: &str) -> Result<BookShort> {
        sqlx::query_as::<_, BookShort>("SELECT id, title FROM book WHERE title = ?")
            .bind(title)
            .fetch_optional(&self.executor)
            .await?
            .ok_or_else(|| Error::RecordNotFound("Book".to_string()))
    }

    pub async fn get(&self, id: i64) -> Result<BookSummary> {
        let sql = format!("{SUMMARY_SQL} WHERE b.id = ? GROUP BY b.id");
        sqlx::query_as::<_, BookSummary>(&sql)
            .bind(id)
            .fetch_optional(&self.executor)
            .await?
            .ok_or_else(|| Error::RecordNotFound("Book".to_string()))
    }

    /// All books, newest first
    pub async fn list(&self) -> Result<Vec<BookSummary>> {
        let sql = format!("{SUMMARY_SQL} GROUP BY b.id ORDER BY b.created DESC, b.id DESC");
        self.fetch_summaries(&sql).await
    }

    /// Leaderboard - most votes first, then best average, unrated books after rated ones
    pub async fn list_stats(&self) -> Result<Vec<BookSummary>> {
        let sql = format!(
            "{SUMMARY_SQL} GROUP BY b.id
            ORDER BY COUNT(r.id) DESC, AVG(r.score) IS NULL, ROUND(AVG(r.score), 2) DESC, b.id DESC"
        );
        self.fetch_summaries(&sql).await
    }

    async fn fetch_summaries(&self, sql: &str) -> Result<Vec<BookSummary>> {
        let records = sqlx::query_as::<_, BookSummary>(sql)
            .fetch(&self.executor)
            .try_collect::<Vec<_>>()
            .await?;
        Ok(records)
    }

    pub async fn get_image(&self, id: i64) -> Result<BookImage> {
        let record: Option<(Option<Vec<u8>>, Option<String>)> =
            sqlx::query_as("SELECT image, image_mime FROM book WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.executor)
                .await?;
        match record {
            None => Err(Error::RecordNotFound("Book".to_string())),
            Some((None, _)) => Err(Error::RecordNotFound("Book image".to_string())),
            Some((Some(data), mime)) => Ok(BookImage {
                data,
                mime: mime.unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string()),
            }),
        }
    }
}
