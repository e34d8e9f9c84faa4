//! Response-status mapping back into the shared error taxonomy.
//!
//! - 404 becomes `DoesNotExist`, so callers treat both backends uniformly.
//! - 204 is success with no body.
//! - A 200 whose body does not parse is a `Protocol` error, logged and
//!   surfaced, never swallowed.
//! - Any other non-2xx becomes `Remote` carrying the response metadata.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::warn;

use satchel_core::{ResponseInfo, Result, StoreError};

pub(crate) fn transport(err: reqwest::Error) -> StoreError {
    StoreError::Transport(err.to_string())
}

fn info(response: &Response) -> ResponseInfo {
    ResponseInfo {
        status: response.status().as_u16(),
        status_text: response
            .status()
            .canonical_reason()
            .unwrap_or("")
            .to_string(),
        headers: response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect(),
    }
}

/// Elevate 404 to `DoesNotExist` for `subject` and any other non-2xx to
/// `Remote`; pass 2xx responses through.
pub(crate) fn classify(response: Response, subject: &str) -> Result<Response> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(StoreError::DoesNotExist(subject.to_string()));
    }
    if !status.is_success() {
        return Err(StoreError::Remote(info(&response)));
    }
    Ok(response)
}

/// Success with or without a body.
pub(crate) fn expect_ok(response: Response, subject: &str) -> Result<()> {
    classify(response, subject).map(|_| ())
}

/// A 2xx response that must carry a JSON body deserializing to `T`.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, subject: &str) -> Result<T> {
    let response = classify(response, subject)?;
    if response.status() == StatusCode::NO_CONTENT {
        return Err(StoreError::Protocol(format!(
            "204 with no body where a document was expected for {subject}"
        )));
    }

    let body = response.text().await.map_err(transport)?;
    serde_json::from_str(&body).map_err(|err| {
        warn!(subject, error = %err, "unparsable response body");
        StoreError::Protocol(format!(
            "response body for {subject} is not valid JSON: {err}"
        ))
    })
}
