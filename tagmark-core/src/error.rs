use thiserror::Error;

/// Broad class of a rejected operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    /// The input itself was invalid (bad name, unknown tag, bad bounds)
    ValidationRejected,
    /// The session was not in a state where the operation applies
    PreconditionNotMet,
}

/// Why an operation was refused.
///
/// Every rejection is recoverable: the component that returned it is left
/// exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("tag name is empty")]
    EmptyTagName,
    #[error("tag \"{0}\" already exists")]
    DuplicateTag(String),
    #[error("no tag named \"{0}\"")]
    UnknownTag(String),
    #[error("no tag selected")]
    NoTagSelected,
    #[error("span {start}..{end} is not a non-empty range within {len} chars")]
    InvalidSpan { start: usize, end: usize, len: usize },
    #[error("text is blank")]
    BlankText,
    #[error("no text has been submitted")]
    NoText,
}

impl Rejection {
    pub fn kind(&self) -> RejectionKind {
        match self {
            Rejection::BlankText | Rejection::NoText => RejectionKind::PreconditionNotMet,
            _ => RejectionKind::ValidationRejected,
        }
    }
}
