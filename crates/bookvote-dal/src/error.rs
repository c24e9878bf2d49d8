use bookvote_types::ValidationError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Already voted for book {book_id}")]
    DuplicateVote { book_id: i64 },
}

impl From<garde::Report> for Error {
    fn from(value: garde::Report) -> Self {
        Error::InvalidInput(value.to_string().trim().to_string())
    }
}

impl From<ValidationError> for Error {
    fn from(value: ValidationError) -> Self {
        Error::InvalidInput(value.to_string())
    }
}
