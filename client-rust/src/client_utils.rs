use crate::{ApiError, ApiRequest};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;

/// Build a reqwest request for the given API request against `base_url`.
pub fn build_request(client: &Client, base_url: &str, request: &ApiRequest) -> RequestBuilder {
    let url = format!("{}{}", base_url.trim_end_matches('/'), request.full_path());
    let mut builder = client.request(request.method.clone(), url);
    if !request.query.is_empty() {
        builder = builder.query(&request.query);
    }
    if let Some(token) = &request.bearer {
        builder = builder.bearer_auth(token);
    }
    if let Some(body) = &request.body {
        builder = builder.json(body);
    }
    builder
}

/// Read the response body as JSON.
/// Throws error on non 2xx status code, carrying the server message.
pub async fn read_json(response: Response) -> Result<(StatusCode, Value), ApiError> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(ApiError::StatusCode(status, error_message(status, &text)));
    }

    if text.trim().is_empty() {
        return Ok((status, Value::Null));
    }

    let body = serde_json::from_str(&text)
        .map_err(|e| ApiError::Decode(format!("Failed to parse response body: {e}")))?;
    Ok((status, body))
}

/// Extract the human readable message from an error body. The backend
/// answers with `{ "message": ..., "error": ... }`; anything else is
/// reported verbatim.
pub fn error_message(status: StatusCode, text: &str) -> String {
    if let Ok(Value::Object(body)) = serde_json::from_str::<Value>(text) {
        for key in ["message", "error"] {
            if let Some(message) = body.get(key).and_then(Value::as_str) {
                if !message.is_empty() {
                    return message.to_string();
                }
            }
        }
    }

    let text = text.trim();
    if text.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_message_field() {
        let text = r#"{"status":401,"error":"Unauthorized","message":"Invalid credentials"}"#;
        assert_eq!(
            error_message(StatusCode::UNAUTHORIZED, text),
            "Invalid credentials"
        );
    }

    #[test]
    fn error_message_falls_back_to_error_then_body_then_reason() {
        assert_eq!(
            error_message(StatusCode::FORBIDDEN, r#"{"error":"Forbidden"}"#),
            "Forbidden"
        );
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "upstream down"),
            "upstream down"
        );
        assert_eq!(error_message(StatusCode::NOT_FOUND, ""), "Not Found");
    }
}
