//! Wire payloads and the HTTP round trip for the ask protocol.

use serde::{Deserialize, Serialize};

use crate::core::constants::{ASK_PATH, GENERIC_REQUEST_ERROR};
use crate::utils::url::construct_api_url;

#[derive(Serialize)]
pub struct AskRequest<'a> {
    pub question: &'a str,
}

#[derive(Deserialize)]
pub struct AskResponse {
    pub response: String,
}

/// POST one question and return the answer text.
///
/// On a non-2xx status the server reuses the `response` field for its error
/// message, so that is what the caller gets back. Transport failures and
/// undecodable bodies fall back to a generic message. The `Err` string is
/// shown verbatim in the error dialog.
pub async fn post_question(
    client: &reqwest::Client,
    base_url: &str,
    question: &str,
) -> Result<String, String> {
    let ask_url = construct_api_url(base_url, ASK_PATH);
    let response = match client
        .post(ask_url)
        .header("Content-Type", "application/json")
        .json(&AskRequest { question })
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("ask request failed: {e}");
            return Err(GENERIC_REQUEST_ERROR.to_string());
        }
    };

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::error!("ask request rejected with status {status}: {body}");
        return Err(error_message_from_body(&body));
    }

    match response.json::<AskResponse>().await {
        Ok(answer) => Ok(answer.response),
        Err(e) => {
            tracing::error!("undecodable ask response: {e}");
            Err(GENERIC_REQUEST_ERROR.to_string())
        }
    }
}

/// Pull the user-facing message out of an error body, if there is one.
pub fn error_message_from_body(body: &str) -> String {
    serde_json::from_str::<AskResponse>(body)
        .ok()
        .map(|r| r.response)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| GENERIC_REQUEST_ERROR.to_string())
}
