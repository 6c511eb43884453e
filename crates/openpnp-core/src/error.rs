//! Shared error type across openpnp crates.

use thiserror::Error;

/// Stable error codes (logs, tests, HTTP mapping).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// XML not well-formed, or envelope shape invalid.
    MalformedMessage,
    /// UDI does not match `PID:<p>,VID:<v>,SN:<s>`.
    MalformedUdi,
    /// Codec invoked with contradictory or out-of-range parameters.
    InvalidServiceArguments,
    /// Handler or service not provided.
    Unimplemented,
    /// Configuration rejected at load time.
    BadConfig,
    /// Internal server error.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and error bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MalformedMessage => "MALFORMED_MESSAGE",
            ErrorCode::MalformedUdi => "MALFORMED_UDI",
            ErrorCode::InvalidServiceArguments => "INVALID_SERVICE_ARGUMENTS",
            ErrorCode::Unimplemented => "UNIMPLEMENTED",
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::Internal => "INTERNAL",
        }
    }

    /// True when the failure was caused by what the agent sent.
    pub fn is_client_error(self) -> bool {
        matches!(self, ErrorCode::MalformedMessage | ErrorCode::MalformedUdi)
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PnpError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum PnpError {
    #[error("malformed message: {0}")]
    MalformedMessage(String),
    #[error("malformed udi: {0:?}")]
    MalformedUdi(String),
    #[error("invalid service arguments: {0}")]
    InvalidServiceArguments(String),
    #[error("unimplemented: {0}")]
    Unimplemented(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl PnpError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            PnpError::MalformedMessage(_) => ErrorCode::MalformedMessage,
            PnpError::MalformedUdi(_) => ErrorCode::MalformedUdi,
            PnpError::InvalidServiceArguments(_) => ErrorCode::InvalidServiceArguments,
            PnpError::Unimplemented(_) => ErrorCode::Unimplemented,
            PnpError::BadConfig(_) => ErrorCode::BadConfig,
            PnpError::Internal(_) => ErrorCode::Internal,
        }
    }

    pub(crate) fn invalid_args(msg: impl Into<String>) -> Self {
        PnpError::InvalidServiceArguments(msg.into())
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        PnpError::MalformedMessage(msg.into())
    }
}
