use crate::config::RatingCategory;

/// All errors that can occur while loading matches or aggregating statistics.
#[derive(thiserror::Error, Debug)]
pub enum StatsError {
    /// The rating weight table has no entry for a category the engine needs.
    #[error("no rating weight configured for {category}")]
    MissingWeight { category: RatingCategory },

    /// A weight table could not be parsed as JSON.
    #[error("invalid rating weight table: {0}")]
    InvalidWeights(#[source] serde_json::Error),

    /// A weight table names a category that does not exist.
    #[error("unknown rating category: {0}")]
    UnknownCategory(String),

    /// A match export could not be parsed as a list of match records.
    #[error("invalid match records: {0}")]
    InvalidRecords(#[source] serde_json::Error),

    /// The match loader failed to list match summaries.
    #[error("match loader failed: {0}")]
    Loader(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StatsError {
    /// Wrap an arbitrary loader failure.
    pub fn loader<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        StatsError::Loader(err.into())
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
