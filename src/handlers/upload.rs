// POST /files/upload handler

use crate::models::ErrorBody;
use crate::upload::{store_upload, UploadConfig, UploadError, UploadedFile, UPLOAD_FAILED};
use bytes::Buf;
use futures_util::TryStreamExt;
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::multipart::FormData;
use warp::Reply;

pub async fn upload_handler(
    config: Arc<UploadConfig>,
    form: FormData,
) -> Result<warp::reply::Response, Infallible> {
    tracing::debug!("POST /files/upload");

    let reply = match receive_file(&config, form).await {
        Ok(stored) => warp::reply::with_status(warp::reply::json(&stored), StatusCode::OK),
        Err(e) => {
            let status = match &e {
                UploadError::NoFile | UploadError::Invalid(_) => StatusCode::BAD_REQUEST,
                UploadError::Multipart(_) | UploadError::Io(_) => {
                    tracing::error!(error = %e, "file upload error");
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            let message = if status == StatusCode::BAD_REQUEST {
                e.to_string()
            } else {
                UPLOAD_FAILED.to_string()
            };
            warp::reply::with_status(warp::reply::json(&ErrorBody::new(message)), status)
        }
    };

    Ok(reply.into_response())
}

/// Read the `file` part of the form and store it. Other parts are skipped.
async fn receive_file(config: &UploadConfig, mut form: FormData) -> Result<UploadedFile, UploadError> {
    while let Some(mut part) = form
        .try_next()
        .await
        .map_err(|e| UploadError::Multipart(e.to_string()))?
    {
        if part.name() != "file" {
            continue;
        }

        let original_name = part.filename().unwrap_or("upload").to_string();
        let content_type = part
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let mut data = Vec::new();
        while let Some(chunk) = part.data().await {
            let chunk = chunk.map_err(|e| UploadError::Multipart(e.to_string()))?;
            data.extend_from_slice(chunk.chunk());
        }

        return store_upload(config, &original_name, &content_type, &data).await;
    }

    Err(UploadError::NoFile)
}
