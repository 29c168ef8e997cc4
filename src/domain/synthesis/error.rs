/// Shown when submit is attempted with empty or whitespace-only text.
pub const EMPTY_TEXT_MESSAGE: &str = "请输入要转换的文本";

/// Shown when the service rejected the request without a usable detail.
pub const GENERIC_FAILURE_MESSAGE: &str = "转换失败，请重试";

/// Shown when no response arrived at all.
pub const NETWORK_FAILURE_MESSAGE: &str = "网络错误，请检查服务器是否正常运行";

/// Failure of an outbound call to the synthesis service, as reported by the
/// transport layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The service answered with a failure status. `detail` carries the
    /// server-supplied message when the response body could be parsed.
    #[error("synthesis service rejected the request")]
    Server { detail: Option<String> },

    /// No usable response: connection refused, timeout, broken body.
    #[error("transport failure: {0}")]
    Transport(String),
}

impl ApiError {
    /// The message a user sees for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server {
                detail: Some(detail),
            } => detail.clone(),
            ApiError::Server { detail: None } => GENERIC_FAILURE_MESSAGE.to_string(),
            ApiError::Transport(_) => NETWORK_FAILURE_MESSAGE.to_string(),
        }
    }
}
