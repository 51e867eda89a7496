use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde::Serialize;
use serde_json::Value;
use wordlist_core::{ContextMap, DispatchError, OutboundContext, Params, Reply};

use crate::state::AppState;

/// Identifies this webhook to the dialog platform
pub const SOURCE: &str = "apiai-wordlist";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/apiai", post(apiai_webhook))
        .route("/healthz", get(|| async { "ok" }))
        .fallback(not_found)
        .with_state(state)
}

/// The parts of a platform request the dispatcher needs. Anything missing
/// or of the wrong type is read as empty.
#[derive(Debug, Default, PartialEq)]
pub struct WebhookRequest {
    pub action: String,
    pub parameters: Params,
    pub contexts: ContextMap,
}

impl WebhookRequest {
    pub fn from_value(body: &Value) -> Self {
        let Some(result) = body.get("result") else {
            return Self::default();
        };

        let action = result
            .get("action")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let parameters = result
            .get("parameters")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        let contexts: ContextMap = result
            .get("contexts")
            .and_then(Value::as_array)
            .map(|contexts| {
                contexts
                    .iter()
                    .filter_map(|context| {
                        let name = context.get("name")?.as_str()?;
                        let parameters = context
                            .get("parameters")
                            .and_then(Value::as_object)
                            .cloned()
                            .unwrap_or_default();
                        Some((name.to_string(), parameters))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            action,
            parameters,
            contexts,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub speech: String,
    pub display_text: String,
    pub data: PlatformData,
    pub context_out: Vec<OutboundContext>,
    pub source: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PlatformData {
    pub google: GoogleData,
}

#[derive(Debug, Serialize)]
pub struct GoogleData {
    pub expect_user_response: bool,
    pub is_ssml: bool,
}

impl From<Reply> for WebhookResponse {
    fn from(reply: Reply) -> Self {
        Self {
            speech: reply.speech,
            display_text: reply.text,
            data: PlatformData {
                google: GoogleData {
                    expect_user_response: true,
                    is_ssml: true,
                },
            },
            context_out: reply.context,
            source: SOURCE,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("Failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        tracing::error!("Webhook failed: {self}");
        (StatusCode::INTERNAL_SERVER_ERROR, "Sorry, unexpected error").into_response()
    }
}

async fn apiai_webhook(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, WebhookError> {
    let body = match serde_json::from_slice::<Value>(&body) {
        Ok(value) => {
            tracing::info!("Request:\n{}", serde_json::to_string_pretty(&value)?);
            value
        }
        Err(e) => {
            tracing::warn!(
                "Malformed webhook body ({e}):\n{}",
                String::from_utf8_lossy(&body)
            );
            Value::Null
        }
    };

    let request = WebhookRequest::from_value(&body);
    let reply = state
        .dispatcher
        .dispatch(&request.action, &request.parameters, &request.contexts)
        .await?;

    let response = serde_json::to_string_pretty(&WebhookResponse::from(reply))?;
    tracing::info!("Response:\n{response}");

    Ok(([(header::CONTENT_TYPE, "application/json")], response).into_response())
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Sorry, Nothing at this URL.")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_nested_result() {
        let request = WebhookRequest::from_value(&json!({
            "id": "abc",
            "result": {
                "action": "practice_known",
                "parameters": { "word": "run" },
                "contexts": [
                    { "name": "practice", "lifespan": 1, "parameters": { "word_id": "run" } },
                    { "name": "bare" },
                    { "parameters": { "ignored": true } }
                ]
            }
        }));

        assert_eq!(request.action, "practice_known");
        assert_eq!(request.parameters["word"], "run");
        assert_eq!(request.contexts.len(), 2);
        assert_eq!(request.contexts["practice"]["word_id"], "run");
        assert!(request.contexts["bare"].is_empty());
    }

    #[test]
    fn tolerates_malformed_fields() {
        for body in [
            Value::Null,
            json!([]),
            json!({ "result": "nope" }),
            json!({ "result": { "action": 3, "parameters": [], "contexts": {} } }),
        ] {
            assert_eq!(WebhookRequest::from_value(&body), WebhookRequest::default());
        }
    }

    #[test]
    fn envelope_field_names() {
        let reply = Reply {
            speech: "<speak>hi</speak>".to_string(),
            text: "hi".to_string(),
            context: vec![OutboundContext::clear("practice", Params::new())],
        };

        let value = serde_json::to_value(WebhookResponse::from(reply)).unwrap();
        assert_eq!(
            value,
            json!({
                "speech": "<speak>hi</speak>",
                "displayText": "hi",
                "data": { "google": { "expect_user_response": true, "is_ssml": true } },
                "contextOut": [{ "name": "practice", "lifespan": 0, "parameters": {} }],
                "source": "apiai-wordlist"
            })
        );
    }
}
