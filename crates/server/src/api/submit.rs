use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::Response;
use chrono::Utc;
use tracing::{debug, info};

use linkrelay_core::{Attachment, OutgoingPayload, RelayError, build_json, build_multipart};

use crate::error::{ServerError, relay_response};

use super::AppState;

/// `POST /api/submit` -- forward one submission to the webhook.
///
/// Accepts either `multipart/form-data` (scalar fields plus `pdfs` / `ctrs`
/// files) or `application/json` (`title`, `links`, `links_count`). Always
/// answers with the relay envelope: 200 on success, 500 for local failures,
/// 502 when the webhook rejected the submission.
pub async fn submit(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, ServerError> {
    // Checked before reading the body so an unconfigured relay never
    // buffers uploads.
    if !state.relay.is_configured() {
        return Err(RelayError::NotConfigured.into());
    }

    let payload = read_payload(request).await?;
    let result = state.relay.relay(payload).await;

    info!(
        ok = result.ok(),
        status = result.status(),
        "submission relayed"
    );

    Ok(relay_response(&result))
}

async fn read_payload(request: Request) -> Result<OutgoingPayload, RelayError> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| RelayError::InvalidRequest(e.body_text()))?;
        read_multipart(multipart).await
    } else if content_type.starts_with("application/json") {
        let body = Bytes::from_request(request, &())
            .await
            .map_err(|e| RelayError::InvalidRequest(e.body_text()))?;
        let value: serde_json::Value = serde_json::from_slice(&body)
            .map_err(|e| RelayError::InvalidRequest(format!("invalid JSON body: {e}")))?;
        Ok(build_json(&value, Utc::now()))
    } else {
        Err(RelayError::InvalidRequest(format!(
            "unsupported content type: {content_type:?}"
        )))
    }
}

/// Collect every form field; the payload builder decides what is forwarded.
async fn read_multipart(mut multipart: Multipart) -> Result<OutgoingPayload, RelayError> {
    let mut fields: Vec<(String, String)> = Vec::new();
    let mut files: Vec<(String, Vec<Attachment>)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| RelayError::InvalidRequest(e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if let Some(filename) = field.file_name().map(str::to_owned) {
            let content_type = field.content_type().map(str::to_owned);
            let data = field
                .bytes()
                .await
                .map_err(|e| RelayError::InvalidRequest(e.body_text()))?;
            debug!(field = %name, filename = %filename, size = data.len(), "received file");

            let mut attachment = Attachment::new(filename, data);
            if let Some(content_type) = content_type {
                attachment = attachment.with_content_type(content_type);
            }
            files.push((name, vec![attachment]));
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| RelayError::InvalidRequest(e.body_text()))?;
            fields.push((name, value));
        }
    }

    Ok(build_multipart(fields, files))
}
