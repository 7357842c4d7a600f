//! Error types for the orgmap CLI

use thiserror::Error;

/// Result type alias for orgmap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
#[allow(dead_code)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No valid response from API{}", .body.as_deref().map(|b| format!(" - last response: {b}")).unwrap_or_default())]
    RetriesExhausted {
        /// Body of the last response observed before giving up, if any
        body: Option<String>,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `orgmap init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("API key not configured. Run `orgmap init` to set up your API key.")]
    MissingApiKey,

    #[error(
        "API host not configured. Run `orgmap init` or set ORGMAP_API_HOST to point at the directory API."
    )]
    MissingApiHost,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_retries_exhausted_with_body() {
        let err = ApiError::RetriesExhausted {
            body: Some("rate limited".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("No valid response"));
        assert!(msg.contains("rate limited"));
    }

    #[test]
    fn test_api_error_retries_exhausted_without_body() {
        let err = ApiError::RetriesExhausted { body: None };
        let msg = err.to_string();
        assert!(msg.contains("No valid response"));
        assert!(!msg.contains("last response"));
    }

    #[test]
    fn test_api_error_network() {
        let err = ApiError::Network("Connection refused".to_string());
        assert!(err.to_string().contains("Connection refused"));
    }

    #[test]
    fn test_api_error_invalid_response() {
        let err = ApiError::InvalidResponse("missing field `pages`".to_string());
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn test_config_error_not_found() {
        let err = ConfigError::NotFound;
        assert!(err.to_string().contains("orgmap init"));
    }

    #[test]
    fn test_config_error_parse() {
        let err = ConfigError::ParseError("unexpected key".to_string());
        assert!(err.to_string().contains("unexpected key"));
    }

    #[test]
    fn test_config_error_missing_api_key() {
        let err = ConfigError::MissingApiKey;
        assert!(err.to_string().contains("orgmap init"));
    }

    #[test]
    fn test_config_error_missing_api_host() {
        let err = ConfigError::MissingApiHost;
        assert!(err.to_string().contains("ORGMAP_API_HOST"));
    }

    #[test]
    fn test_error_from_api_error() {
        let api_err = ApiError::RetriesExhausted { body: None };
        let err: Error = api_err.into();

        match err {
            Error::Api(ApiError::RetriesExhausted { body: None }) => (),
            _ => panic!("Expected Error::Api(ApiError::RetriesExhausted)"),
        }
    }

    #[test]
    fn test_error_from_config_error() {
        let cfg_err = ConfigError::NotFound;
        let err: Error = cfg_err.into();

        match err {
            Error::Config(ConfigError::NotFound) => (),
            _ => panic!("Expected Error::Config(ConfigError::NotFound)"),
        }
    }

    #[test]
    fn test_config_error_from_yaml_error() {
        let yaml_str = "invalid: [yaml: content";
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let config_err: ConfigError = yaml_err.into();

        match config_err {
            ConfigError::ParseError(_) => (),
            _ => panic!("Expected ConfigError::ParseError"),
        }
    }
}
