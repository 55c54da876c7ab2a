use std::result::Result as StdResult;

use thiserror::Error;
use uuid::Uuid;

use crate::store::StoreError;

/// Unified error type for the balance engine.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),
    #[error("User {0} is not authorized to access this account")]
    Unauthorized(Uuid),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Upstream read failed: {0}")]
    Upstream(String),
}

pub type EngineResult<T> = StdResult<T, EngineError>;

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        EngineError::Upstream(err.to_string())
    }
}
