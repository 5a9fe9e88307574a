use crate::api::backoffice::models::ErrorResponse;

/// Extract the operator-facing message from a failure body.
///
/// Uses the `message` field of a JSON error body when present, otherwise
/// the raw body text. Returns `None` for an empty body:
/// `{"message":"Insufficient funds","status":400}` -> `Insufficient funds`
pub fn extract_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(err) = serde_json::from_str::<ErrorResponse>(trimmed) {
        if let Some(message) = err.message.or(err.error).filter(|m| !m.trim().is_empty()) {
            return Some(message.trim().to_string());
        }
    }

    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_message() {
        let body = r#"{"timestamp":"2024-05-02T09:30:00","status":400,"message":"Insufficient funds"}"#;
        assert_eq!(extract_error_message(body).as_deref(), Some("Insufficient funds"));
    }

    #[test]
    fn test_json_without_message_uses_error() {
        let body = r#"{"status":404,"error":"Not Found"}"#;
        assert_eq!(extract_error_message(body).as_deref(), Some("Not Found"));
    }

    #[test]
    fn test_plain_text_body() {
        assert_eq!(
            extract_error_message("Entry 12 already reversed\n").as_deref(),
            Some("Entry 12 already reversed")
        );
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(extract_error_message("   "), None);
    }
}
