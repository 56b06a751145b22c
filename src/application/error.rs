//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::GardenError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Garden(#[from] GardenError),

    #[error("plant not in catalog: {0}")]
    UnknownPlant(String),

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
