// Rejection recovery: every error reply is a JSON `{"error": ...}` body

use crate::error::{INTERNAL_SERVER_ERROR, MISSING_FIELDS};
use crate::models::ErrorBody;
use crate::upload::{FILE_TOO_LARGE, UPLOAD_FAILED};
use std::convert::Infallible;
use warp::http::StatusCode;
use warp::reject::{LengthRequired, MethodNotAllowed, PayloadTooLarge, Reject};
use warp::{Rejection, Reply};

/// A request body a route refused before its handler ran
#[derive(Debug)]
pub struct BodyRejected {
    pub status: StatusCode,
    pub message: &'static str,
}

impl Reject for BodyRejected {}

fn body_rejected(status: StatusCode, message: &'static str) -> Rejection {
    warp::reject::custom(BodyRejected { status, message })
}

fn is_size_rejection(rejection: &Rejection) -> bool {
    rejection.find::<PayloadTooLarge>().is_some() || rejection.find::<LengthRequired>().is_some()
}

/// Body limits on `POST /messages` are validation failures
pub async fn reject_message_body(rejection: Rejection) -> Result<(bytes::Bytes,), Rejection> {
    if is_size_rejection(&rejection) {
        Err(body_rejected(StatusCode::BAD_REQUEST, MISSING_FIELDS))
    } else {
        Err(rejection)
    }
}

/// An oversized upload reports the size rule; any other form failure is a
/// processing error.
pub async fn reject_upload_form(
    rejection: Rejection,
) -> Result<(warp::multipart::FormData,), Rejection> {
    if is_size_rejection(&rejection) {
        Err(body_rejected(StatusCode::BAD_REQUEST, FILE_TOO_LARGE))
    } else {
        tracing::error!(?rejection, "multipart form rejected");
        Err(body_rejected(StatusCode::INTERNAL_SERVER_ERROR, UPLOAD_FAILED))
    }
}

pub async fn handle_rejection(rejection: Rejection) -> Result<warp::reply::Response, Infallible> {
    let (status, message) = if let Some(body) = rejection.find::<BodyRejected>() {
        (body.status, body.message)
    } else if rejection.is_not_found() {
        (StatusCode::NOT_FOUND, "Not Found")
    } else if rejection.find::<MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
    } else {
        tracing::error!(?rejection, "unhandled rejection");
        (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
    };

    Ok(warp::reply::with_status(warp::reply::json(&ErrorBody::new(message)), status).into_response())
}
