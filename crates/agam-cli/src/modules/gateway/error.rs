use reqwest::StatusCode;

/// The one error every gateway call fails with. `message` is meant to be
/// shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub(crate) struct ApiError {
    pub message: String,
    pub status: Option<u16>,
}

impl ApiError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    /// Non-2xx response. The body text becomes the message; an empty body
    /// falls back to a generic one naming the status.
    pub(crate) fn from_response(status: StatusCode, body: &str) -> Self {
        let body = body.trim_end();
        let message = if body.is_empty() {
            format!("HTTP error! status: {}", status.as_u16())
        } else {
            body.to_string()
        };
        Self {
            message,
            status: Some(status.as_u16()),
        }
    }

    pub(crate) fn transport(err: reqwest::Error) -> Self {
        Self {
            message: err.to_string(),
            status: err.status().map(|status| status.as_u16()),
        }
    }

    pub(crate) fn decode(status: StatusCode, err: &serde_json::Error, body: &str) -> Self {
        let snippet: String = body.chars().take(512).collect();
        Self {
            message: format!("error decoding response body: {err} body: {snippet}"),
            status: Some(status.as_u16()),
        }
    }

    pub(crate) fn is_unauthorized(&self) -> bool {
        self.status == Some(StatusCode::UNAUTHORIZED.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_text_becomes_message() {
        let err = ApiError::from_response(StatusCode::NOT_FOUND, "vault not found");
        assert_eq!(err.message, "vault not found");
        assert_eq!(err.to_string(), "vault not found");
        assert_eq!(err.status, Some(404));
    }

    #[test]
    fn trailing_newline_is_dropped() {
        let err = ApiError::from_response(StatusCode::UNAUTHORIZED, "missing authorization header\n");
        assert_eq!(err.message, "missing authorization header");
        assert!(err.is_unauthorized());
    }

    #[test]
    fn empty_body_uses_generic_message() {
        let err = ApiError::from_response(StatusCode::NOT_FOUND, "");
        assert_eq!(err.message, "HTTP error! status: 404");
        let err = ApiError::from_response(StatusCode::BAD_GATEWAY, " \n");
        assert_eq!(err.message, "HTTP error! status: 502");
    }
}
