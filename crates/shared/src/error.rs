use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("title is required")]
    MissingTitle,
    #[error("streaming id is required")]
    MissingStreamingId,
    #[error("unknown draft field '{0}'")]
    UnknownField(String),
}
