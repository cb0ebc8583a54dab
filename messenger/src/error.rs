use thiserror::Error;

#[derive(Debug, Error)]
pub enum MessengerError {
    #[error("config error: {0}")]
    Config(String),

    #[error("webhook request failed: {0}")]
    RequestFailed(String),

    #[error("webhook endpoint unreachable: {0}")]
    Unreachable(String),
}
