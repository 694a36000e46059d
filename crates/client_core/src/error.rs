use shared::error::DraftError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("create rejected: {reason}")]
    CreateRejected { status: Option<u16>, reason: String },
}

impl StoreError {
    pub fn rejected_status(&self) -> Option<u16> {
        match self {
            Self::CreateRejected { status, .. } => *status,
            Self::Transport(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("draft is not ready: {0}")]
    Invalid(#[from] DraftError),
    #[error(transparent)]
    Rejected(StoreError),
}

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("invalid embed base url: {0}")]
    Parse(#[from] url::ParseError),
    #[error("embed base url '{0}' cannot carry a path")]
    NotABase(String),
}
