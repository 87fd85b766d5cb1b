use crate::{FormatError, UnknownVerdictError};

/// Everything that can go wrong inside one poll iteration. None of these stop the loop.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CycleError {
    #[error("review endpoint answered with status {status}")]
    HttpStatus { status: u16 },
    #[error("review endpoint unreachable: {message}")]
    Transport { message: String },
    #[error("response body is not valid JSON: {message}")]
    Decode { message: String },
    #[error("unexpected response format: {0}")]
    Format(#[from] FormatError),
    #[error(transparent)]
    UnknownVerdict(#[from] UnknownVerdictError),
    #[error("failed to deliver notification: {message}")]
    Notifier { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Decode,
    Format,
    UnknownVerdict,
    Notifier,
}

impl ErrorKind {
    /// Failures caused by the network or a remote outage rather than by the data itself.
    pub fn is_transient(self) -> bool {
        matches!(self, ErrorKind::Transport | ErrorKind::Notifier)
    }
}

impl CycleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CycleError::HttpStatus { .. } | CycleError::Transport { .. } => ErrorKind::Transport,
            CycleError::Decode { .. } => ErrorKind::Decode,
            CycleError::Format(_) => ErrorKind::Format,
            CycleError::UnknownVerdict(_) => ErrorKind::UnknownVerdict,
            CycleError::Notifier { .. } => ErrorKind::Notifier,
        }
    }
}
