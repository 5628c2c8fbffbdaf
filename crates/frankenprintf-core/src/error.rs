//! Error types.

use thiserror::Error;

use crate::spec::MAX_FIELD;

/// Why a template failed to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("template is empty")]
    EmptyTemplate,
    #[error("directive ends before its conversion character")]
    TruncatedDirective,
    #[error("unknown conversion character {0:?}")]
    UnknownConversion(char),
    #[error("length modifier is neither single nor a doubled `hh`/`ll`")]
    MismatchedLengthModifier,
    #[error("width or precision exceeds {}", MAX_FIELD)]
    FieldOverflow,
}

/// Errors from compiling or rendering a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Compile time: no template is produced.
    #[error("malformed template at byte {position}: {reason}")]
    MalformedTemplate {
        /// Byte offset of the offending byte (`len` when the text ran out).
        position: usize,
        reason: MalformedReason,
    },
    /// Render time: detected before any allocation.
    #[error("argument count mismatch: template expects {expected} argument(s), got {actual}")]
    ArityMismatch { expected: usize, actual: usize },
    /// Render time: the size bound does not fit in `usize`.
    #[error("rendered output would exceed addressable memory")]
    OutputTooLarge,
}

impl FormatError {
    pub(crate) const fn malformed(position: usize, reason: MalformedReason) -> Self {
        Self::MalformedTemplate { position, reason }
    }
}

/// Errors from rendering into an [`std::io::Write`] sink.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("sink write failed: {0}")]
    Io(#[from] std::io::Error),
}
