//! HTTP plumbing shared by the transports: posting JSON and translating
//! failures into [`TransportError`].

use serde::Serialize;

use sensei_types::llm::TransportError;

/// POST `body` as JSON and return the response body of a 2xx reply.
///
/// Non-2xx statuses are translated with [`TransportError::from_status`].
pub async fn post_json<B: Serialize + Sync + ?Sized>(
    request: reqwest::RequestBuilder,
    body: &B,
) -> Result<String, TransportError> {
    let response = request
        .json(body)
        .send()
        .await
        .map_err(|e| classify_reqwest_error(&e))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| classify_reqwest_error(&e))?;

    if !status.is_success() {
        return Err(TransportError::from_status(
            status.as_u16(),
            error_message(&text),
        ));
    }

    Ok(text)
}

/// Translate a `reqwest` failure.
pub fn classify_reqwest_error(err: &reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(err.to_string())
    } else if err.is_connect() || err.is_request() || err.is_body() {
        TransportError::Connection(err.to_string())
    } else if err.is_decode() {
        TransportError::Decode(err.to_string())
    } else {
        TransportError::Other(err.to_string())
    }
}

/// Pull `error.message` out of an error body, or fall back to the raw body.
///
/// Both supported APIs use `{"error": {"message": ...}}`.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}
