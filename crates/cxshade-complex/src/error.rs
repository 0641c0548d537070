//! Error types for translation and compilation.

use cxshade_core::ParseError;
use thiserror::Error;

/// Error during AST translation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TranslationError {
    /// NaN or infinite constants have no literal form in shader source.
    #[error("constant {0} has no finite shader literal")]
    NonFiniteLiteral(f64),
    /// Finite, but beyond what an `f32` shader constant can hold.
    #[error("constant {0} is out of range for a 32-bit float")]
    LiteralOutOfRange(f64),
    #[error("expression nested too deeply (limit {limit})")]
    TooDeep { limit: usize },
}

/// Error from [`compile`](crate::compile).
///
/// Both variants are recoverable: the caller reports them and keeps the
/// currently rendering shader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Malformed formula: unbalanced parentheses, invalid token, missing
    /// operand. `position` is a byte offset into the formula.
    #[error("syntax error at {position}: {message}")]
    Syntax { position: usize, message: String },
    /// Well-formed input outside the supported language, such as an unknown
    /// identifier or function, a call with the wrong arity, an out-of-range
    /// literal or a formula nested past the depth limit.
    #[error("unsupported construct: {description}")]
    UnsupportedConstruct {
        position: Option<usize>,
        description: String,
    },
}

impl CompileError {
    /// Byte offset of the offending input, when known.
    pub fn position(&self) -> Option<usize> {
        match self {
            CompileError::Syntax { position, .. } => Some(*position),
            CompileError::UnsupportedConstruct { position, .. } => *position,
        }
    }
}

impl From<ParseError> for CompileError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Syntax { position, message } => CompileError::Syntax { position, message },
            ParseError::Unsupported {
                position,
                description,
            } => CompileError::UnsupportedConstruct {
                position: Some(position),
                description,
            },
        }
    }
}

impl From<TranslationError> for CompileError {
    fn from(err: TranslationError) -> Self {
        CompileError::UnsupportedConstruct {
            position: None,
            description: err.to_string(),
        }
    }
}

/// Error from [`ShaderSlot::recompile`](crate::ShaderSlot::recompile).
///
/// In both cases the previously active program stays in place.
#[derive(Debug, Error)]
pub enum SwapError<E> {
    #[error(transparent)]
    Compile(#[from] CompileError),
    /// The host's shader compiler rejected the generated source.
    #[error("shader build failed: {0}")]
    Driver(E),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_mapping() {
        let err: CompileError = ParseError::Unsupported {
            position: 4,
            description: "unknown identifier 'w'".into(),
        }
        .into();
        assert_eq!(err.position(), Some(4));
        assert!(matches!(err, CompileError::UnsupportedConstruct { .. }));

        let err: CompileError = ParseError::Syntax {
            position: 3,
            message: "missing operand".into(),
        }
        .into();
        assert_eq!(err.to_string(), "syntax error at 3: missing operand");
    }

    #[test]
    fn test_translation_error_mapping() {
        let err: CompileError = TranslationError::NonFiniteLiteral(f64::INFINITY).into();
        assert_eq!(err.position(), None);
        assert!(err.to_string().contains("inf"));
    }
}
