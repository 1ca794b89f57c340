//! Relay request errors and their HTTP mapping.
//!
//! Internal errors are logged in full; the caller only ever sees the fixed
//! `{"error": ...}` body.

use thiserror::Error;
use warp::http::StatusCode;

use crate::models::ErrorBody;
use crate::store::StoreError;

pub const MISSING_FIELDS: &str = "Missing fields";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Failures of the relay workflow
#[derive(Debug, Error)]
pub enum RelayError {
    /// Malformed or incomplete input; nothing was written
    #[error("validation error: {0}")]
    Validation(String),

    /// The message store failed
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::Validation(_) => StatusCode::BAD_REQUEST,
            RelayError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build the JSON error reply, logging the detail that is not sent
    pub fn into_reply(self) -> warp::reply::WithStatus<warp::reply::Json> {
        let message = match &self {
            RelayError::Validation(detail) => {
                tracing::info!(%detail, "rejected message submission");
                MISSING_FIELDS
            }
            RelayError::Storage(e) => {
                tracing::error!(error = %e, "message store failure");
                INTERNAL_SERVER_ERROR
            }
        };
        warp::reply::with_status(warp::reply::json(&ErrorBody::new(message)), self.status())
    }
}
