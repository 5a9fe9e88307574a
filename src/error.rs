use thiserror::Error;

/// Errors surfaced by the back-office console.
///
/// Every asynchronous call site converts its failure into one of these and
/// hands [`ConsoleError::user_message`] to the view; nothing propagates past
/// the command that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    /// Network or connection failure reaching the backend
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-2xx response from the backend
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// A mutating action was requested for a record without an identifier
    #[error("Record has no identifier")]
    MissingIdentifier,

    /// Client-side input check failed; no call was issued
    #[error("Invalid input: {0}")]
    Validation(String),

    /// A success response whose body could not be decoded
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// Interactive prompt failed (closed terminal, interrupted input)
    #[error("Input error: {0}")]
    Input(String),

    /// Bad environment configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ConsoleError {
    /// Text shown to the operator when an action fails.
    pub fn user_message(&self) -> String {
        match self {
            ConsoleError::Http { status, message } if message.trim().is_empty() => {
                format!("Operation failed (HTTP {})", status)
            }
            ConsoleError::Http { message, .. } => message.clone(),
            ConsoleError::Transport(msg) => format!("Could not reach the server: {}", msg),
            ConsoleError::MissingIdentifier => {
                "Missing identifier, the record cannot be updated".to_string()
            }
            ConsoleError::Validation(msg) => msg.clone(),
            ConsoleError::Decode(msg) => format!("Unexpected server response: {}", msg),
            ConsoleError::Input(msg) => format!("Could not read input: {}", msg),
            ConsoleError::Config(msg) => msg.clone(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_display_contains_status() {
        let err = ConsoleError::Http {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_user_message_prefers_server_message() {
        let err = ConsoleError::Http {
            status: 409,
            message: "Transfer already executed".to_string(),
        };
        assert_eq!(err.user_message(), "Transfer already executed");
    }

    #[test]
    fn test_user_message_falls_back_to_status() {
        let err = ConsoleError::Http {
            status: 502,
            message: "  ".to_string(),
        };
        assert_eq!(err.user_message(), "Operation failed (HTTP 502)");
    }
}
