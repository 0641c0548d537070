//! Formula parsing for complex-valued shader expressions.
//!
//! A formula is an ordinary expression over the free variable `z`, the
//! constants `i` and `pi`, real literals, `+ - * / ^`, unary minus and the
//! functions `sin`, `cos` and `tan`:
//!
//! ```
//! use cxshade_core::{Ast, BinOp, Expr};
//!
//! let expr = Expr::parse("sin(z) + 1/z").unwrap();
//! assert!(matches!(expr.ast(), Ast::BinOp(BinOp::Add, _, _)));
//! assert_eq!(expr.ast().to_string(), "sin(z) + 1 / z");
//! ```
//!
//! Anything outside that grammar, including unknown identifiers, is
//! rejected here rather than later during code generation.

mod ast;
mod error;
mod lexer;
mod parser;

pub use ast::{Ast, BinOp, Func, Symbol, UnaryOp};
pub use error::ParseError;
pub use parser::{ParseOptions, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};

/// Largest magnitude a number literal may have: shader targets hold reals
/// as `f32`.
pub const MAX_LITERAL: f64 = f32::MAX as f64;

/// A parsed formula and the text it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    source: String,
    ast: Ast,
}

impl Expr {
    /// Parses a formula with default options.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_with(input, &ParseOptions::default())
    }

    pub fn parse_with(input: &str, options: &ParseOptions) -> Result<Self, ParseError> {
        let ast = parser::Parser::new(input, options)?.parse()?;
        Ok(Self {
            source: input.to_string(),
            ast,
        })
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    pub fn into_ast(self) -> Ast {
        self.ast
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_roundtrip() {
        for src in [
            "z",
            "sin(z) + 1 / z",
            "(z + 1) * (z - 1)",
            "z ^ z ^ 2",
            "-z ^ 2",
            "--z",
            "z - -1",
            "tan(pi * i) / cos((z))",
            "0.5 * z ^ -3",
            "1 / (z ^ 2 + 1)",
        ] {
            let first = Expr::parse(src).unwrap();
            let printed = first.ast().to_string();
            let second = Expr::parse(&printed).unwrap();
            assert_eq!(first.ast(), second.ast(), "{src} -> {printed}");
        }
    }

    #[test]
    fn test_source_kept() {
        let expr = Expr::parse(" z*z ").unwrap();
        assert_eq!(expr.source(), " z*z ");
        assert_eq!(expr.into_ast().to_string(), "z * z");
    }

    #[test]
    fn test_error_position() {
        let err = Expr::parse("sin(z) + w").unwrap_err();
        assert_eq!(err.position(), 9);
    }

    #[test]
    fn test_parse_with_options() {
        let options = ParseOptions::default().with_max_depth(2);
        assert!(Expr::parse_with("z+1", &options).is_ok());
        assert!(Expr::parse_with("(z+1)", &options).is_err());
    }
}
