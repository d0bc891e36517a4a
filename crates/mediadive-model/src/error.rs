use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid entity id: {0:?}")]
    InvalidId(String),
    #[error("invalid number {value:?}")]
    InvalidNumber { value: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
