//! Parse errors.

use thiserror::Error;

/// Error produced while parsing a formula.
///
/// Positions are byte offsets into the formula string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input cannot be derived from the grammar.
    #[error("syntax error at {position}: {message}")]
    Syntax { position: usize, message: String },
    /// Well-formed input outside what can be compiled: an identifier or
    /// function outside the recognized sets, a call with the wrong arity, a
    /// literal beyond `f32` range, or nesting past the depth limit.
    #[error("unsupported construct at {position}: {description}")]
    Unsupported { position: usize, description: String },
}

impl ParseError {
    pub(crate) fn syntax(position: usize, message: impl Into<String>) -> Self {
        ParseError::Syntax {
            position,
            message: message.into(),
        }
    }

    pub(crate) fn unsupported(position: usize, description: impl Into<String>) -> Self {
        ParseError::Unsupported {
            position,
            description: description.into(),
        }
    }

    /// Byte offset of the offending token.
    pub fn position(&self) -> usize {
        match self {
            ParseError::Syntax { position, .. } | ParseError::Unsupported { position, .. } => {
                *position
            }
        }
    }
}
