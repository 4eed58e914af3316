use thiserror::Error;

/// Errors surfaced by the fallible mutation variants of
/// [`TreeSource`](crate::TreeSource).
///
/// The plain mutation methods swallow these and no-op instead; see the
/// crate docs for the trade-off.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TreeSourceError {
    #[error("parent value not present in the lookup index")]
    ParentNotFound,

    #[error("anchor value not present in the lookup index")]
    AnchorNotFound,
}

pub type Result<T> = std::result::Result<T, TreeSourceError>;
