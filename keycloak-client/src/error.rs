use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid provider configuration: {0}")]
    Configuration(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Api call to `{endpoint}` failed with error: `{message}`")]
    Provider { endpoint: String, message: String },

    #[error("Request to `{0}` timed out")]
    Timeout(String),

    #[error("Network error calling `{endpoint}`: {source}")]
    Network {
        endpoint: String,
        source: reqwest::Error,
    },

    #[error("No token information provided")]
    MissingToken,

    #[error("Failed to deserialize response from `{endpoint}`: {source}")]
    Decode {
        endpoint: String,
        source: reqwest::Error,
    },
}
