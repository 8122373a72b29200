use thiserror::Error;

// Core internal errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IoError: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
    #[error("Url error: {0}")]
    Url(#[from] url::ParseError),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Unexpected response status: {0}")]
    Status(u16),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let error = AppError::Validation("empty query".to_string());
        assert_eq!(error.to_string(), "Validation error: empty query");

        let error = AppError::Status(429);
        assert_eq!(error.to_string(), "Unexpected response status: 429");
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{not json")
            .expect_err("invalid json should fail");
        let error = AppError::from(parse_error);
        assert!(matches!(error, AppError::Json(_)));
        assert!(error.to_string().starts_with("Json error: "));
    }
}
