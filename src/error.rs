use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    /// A board that is not a permutation of `0..L` with `L` a perfect square, or a pair of
    /// boards of different sizes.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// The collaborator picked something that was not in the last offered frontier. The
    /// driver does not advance, so the caller can simply ask again.
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    #[error("selector i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type SearchResult<T> = Result<T, SearchError>;
