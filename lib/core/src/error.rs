use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Embedder not ready: call fit before embed")]
    NotReady,

    #[error("Embedder already fitted")]
    AlreadyFitted,

    #[error("Index not built")]
    NotBuilt,

    #[error("Empty catalog")]
    EmptyCatalog,

    #[error("Empty corpus")]
    EmptyCorpus,

    #[error("Duplicate catalog item: {0}")]
    DuplicateItem(String),

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Serialization error: {0}")]
    Serialization(String),
}
