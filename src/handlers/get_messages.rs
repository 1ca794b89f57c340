// GET /messages handler

use crate::relay::RelayService;
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::Reply;

pub async fn get_messages_handler(service: Arc<RelayService>) -> Result<warp::reply::Response, Infallible> {
    tracing::debug!("GET /messages");

    match service.list_messages().await {
        Ok(messages) => Ok(warp::reply::with_status(
            warp::reply::json(&messages),
            StatusCode::OK,
        )
        .into_response()),
        Err(e) => Ok(e.into_reply().into_response()),
    }
}
