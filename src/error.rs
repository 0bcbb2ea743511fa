use thiserror::Error;

#[derive(Error, Debug)]
pub enum MutationError {
    #[error("Invalid occurrence index: {0}")]
    InvalidIndex(i64),

    #[error("Malformed tree: {0}")]
    Structural(String),
}

pub type Result<T> = std::result::Result<T, MutationError>;
