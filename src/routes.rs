// Route definitions

use crate::handlers::{self, rejection};
use crate::relay::RelayService;
use crate::upload::{UploadConfig, MAX_UPLOAD_BYTES};
use std::convert::Infallible;
use std::sync::Arc;
use warp::Filter;

/// Largest accepted `POST /messages` body
pub const MESSAGE_BODY_LIMIT: u64 = 64 * 1024;

/// Multipart overhead allowed on top of the file size limit, so that an
/// oversized file still reaches validation and gets its message.
pub const MULTIPART_SLACK: u64 = 1024 * 1024;

pub fn configure_routes(
    service: Arc<RelayService>,
    uploads: Arc<UploadConfig>,
) -> impl Filter<Extract = impl warp::Reply, Error = Infallible> + Clone {
    // GET /messages
    let get_messages = warp::path("messages")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_service(service.clone()))
        .and_then(handlers::get_messages_handler);

    // POST /messages
    let message_body = warp::body::content_length_limit(MESSAGE_BODY_LIMIT)
        .and(warp::body::bytes())
        .or_else(rejection::reject_message_body);
    let post_message = warp::path("messages")
        .and(warp::path::end())
        .and(warp::post())
        .and(with_service(service))
        .and(message_body)
        .and_then(handlers::post_message_handler);

    // POST /files/upload
    let upload_form = warp::multipart::form()
        .max_length(MAX_UPLOAD_BYTES as u64 + MULTIPART_SLACK)
        .or_else(rejection::reject_upload_form);
    let upload = warp::path!("files" / "upload")
        .and(warp::post())
        .and(warp::any().map(move || uploads.clone()))
        .and(upload_form)
        .and_then(handlers::upload_handler);

    // Combine routes; every rejection becomes a JSON error body
    get_messages
        .or(post_message)
        .or(upload)
        .recover(handlers::handle_rejection)
}

fn with_service(
    service: Arc<RelayService>,
) -> impl Filter<Extract = (Arc<RelayService>,), Error = Infallible> + Clone {
    warp::any().map(move || service.clone())
}
