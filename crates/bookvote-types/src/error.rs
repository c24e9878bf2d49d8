#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Score must be 1-5, got {0}")]
    ScoreOutOfRange(i64),
    #[error("Score must be an integer")]
    ScoreNotInteger,
    #[error("Title is required")]
    EmptyTitle,
}
