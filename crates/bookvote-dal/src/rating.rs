use crate::{Error, error::Result};
use bookvote_types::ClientId;
use futures::TryStreamExt as _;
use garde::Validate;
use serde::{Deserialize, Serialize};
use sqlx::Pool;
use tracing::debug;

#[derive(Debug, Clone, Validate)]
pub struct CreateRating {
    #[garde(skip)]
    pub book_id: i64,
    #[garde(range(min = 1, max = 5))]
    pub score: i64,
    #[garde(skip)]
    pub client_id: Option<ClientId>,
}

#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct Rating {
    pub id: i64,
    pub book_id: i64,
    pub score: i64,
    pub client_id: Option<String>,
    pub created: time::PrimitiveDateTime,
}

pub type RatingRepository = RatingRepositoryImpl<Pool<crate::ChosenDB>>;

pub struct RatingRepositoryImpl<E> {
    executor: E,
}

impl<'c, E> RatingRepositoryImpl<E>
where
    for<'a> &'a E: sqlx::Executor<'c, Database = crate::ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Records a vote.
    ///
    /// Second vote of the same client for the same book is refused by unique index,
    /// so concurrent duplicates are resolved by the database.
    pub async fn create(&self, payload: CreateRating) -> Result<Rating> {
        payload.validate()?;
        let book_id = payload.book_id;

        let exists = sqlx::query_scalar::<_, i64>("SELECT id FROM book WHERE id = ?")
            .bind(book_id)
            .fetch_optional(&self.executor)
            .await?;
        if exists.is_none() {
            return Err(Error::RecordNotFound("Book".to_string()));
        }

        let result =
            sqlx::query("INSERT INTO rating (book_id, score, client_id) VALUES (?, ?, ?)")
                .bind(book_id)
                .bind(payload.score)
                .bind(payload.client_id.as_ref().map(ClientId::as_str))
                .execute(&self.executor)
                .await
                .map_err(|e| match e {
                    sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                        debug!("Duplicate vote for book {book_id}");
                        Error::DuplicateVote { book_id }
                    }
                    // book removed in between
                    sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                        Error::RecordNotFound("Book".to_string())
                    }
                    e => e.into(),
                })?;

        self.get(result.last_insert_rowid()).await
    }

    pub async fn get(&self, id: i64) -> Result<Rating> {
        sqlx::query_as::<_, Rating>(
            "SELECT id, book_id, score, client_id, created FROM rating WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.executor)
        .await?
        .ok_or_else(|| Error::RecordNotFound("Rating".to_string()))
    }

    /// Ratings of one book, oldest first
    pub async fn list_for_book(&self, book_id: i64) -> Result<Vec<Rating>> {
        let records = sqlx::query_as::<_, Rating>(
            "SELECT id, book_id, score, client_id, created FROM rating WHERE book_id = ? ORDER BY id",
        )
        .bind(book_id)
        .fetch(&self.executor)
        .try_collect::<Vec<_>>()
        .await?;
        Ok(records)
    }
}
