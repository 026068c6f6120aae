use thiserror::Error;

use crate::core::CoreError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid engine config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
