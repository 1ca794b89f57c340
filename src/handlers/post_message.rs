// POST /messages handler

use crate::error::RelayError;
use crate::models::SendMessageRequest;
use crate::relay::RelayService;
use bytes::Bytes;
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::Reply;

/// The body is taken as raw bytes so that malformed JSON, non-object bodies
/// and wrongly-typed fields get the same 400 reply as missing ones.
pub async fn post_message_handler(
    service: Arc<RelayService>,
    body: Bytes,
) -> Result<warp::reply::Response, Infallible> {
    tracing::debug!(bytes = body.len(), "POST /messages");

    let request = match SendMessageRequest::from_json(&body) {
        Ok(request) => request,
        Err(detail) => return Ok(RelayError::Validation(detail).into_reply().into_response()),
    };

    match service.post_message(request).await {
        Ok(pair) => Ok(
            warp::reply::with_status(warp::reply::json(&pair), StatusCode::CREATED)
                .into_response(),
        ),
        Err(e) => Ok(e.into_reply().into_response()),
    }
}
