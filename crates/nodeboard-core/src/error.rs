use thiserror::Error;

/// Failures of the headless driver. The graph core itself never errors.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("malformed request: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("request is not valid UTF-8: {0}")]
    Encoding(#[source] std::str::Utf8Error),

    #[error("unknown method: {0}")]
    UnknownMethod(String),

    #[error("params for {0} must be a JSON object")]
    ParamsNotObject(String),

    #[error("invalid params for {method}: {source}")]
    InvalidParams {
        method: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode response: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DriverError {
    /// JSON-RPC style error code reported back to the host.
    pub fn code(&self) -> i32 {
        match self {
            DriverError::Parse(_) | DriverError::Encoding(_) => -32700,
            DriverError::UnknownMethod(_) => -32601,
            DriverError::ParamsNotObject(_) | DriverError::InvalidParams { .. } => -32602,
            DriverError::Encode(_) | DriverError::Io(_) => -32603,
        }
    }
}
