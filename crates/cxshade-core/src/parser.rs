//! Recursive descent parser.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := factor (('*' | '/') factor)*
//! factor  := unary ('^' unary)*        // right-associative
//! unary   := '-' unary | primary
//! primary := NUMBER | IDENT | IDENT '(' expr ')' | '(' expr ')'
//! ```

use crate::ast::{Ast, BinOp, Func, Symbol, UnaryOp};
use crate::error::ParseError;
use crate::lexer::{Lexer, Spanned, Token};

/// Default limit for [`ParseOptions::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Ceiling for [`ParseOptions::max_depth`]. Larger settings are clamped to
/// it so parser recursion stays within a small thread's stack.
pub const MAX_DEPTH_LIMIT: usize = 512;

/// Parser settings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParseOptions {
    /// Maximum nesting of the formula, bounding both parser recursion and
    /// the height of the resulting tree. Capped at [`MAX_DEPTH_LIMIT`].
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The depth limit actually enforced.
    pub fn effective_max_depth(&self) -> usize {
        self.max_depth.min(MAX_DEPTH_LIMIT)
    }
}

/// A subtree together with its height.
struct Node {
    ast: Ast,
    height: usize,
}

impl Node {
    fn leaf(ast: Ast) -> Self {
        Self { ast, height: 1 }
    }
}

pub(crate) struct Parser<'a> {
    lex: Lexer<'a>,
    look: Spanned,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(src: &'a str, options: &ParseOptions) -> Result<Self, ParseError> {
        let mut lex = Lexer::new(src);
        let look = lex.next_token()?;
        Ok(Self {
            lex,
            look,
            depth: 0,
            max_depth: options.effective_max_depth(),
        })
    }

    pub(crate) fn parse(mut self) -> Result<Ast, ParseError> {
        let node = self.expr()?;
        if self.look.token != Token::Eof {
            return Err(ParseError::syntax(
                self.look.pos,
                format!("unexpected {}", self.look.token),
            ));
        }
        Ok(node.ast)
    }

    fn bump(&mut self) -> Result<(), ParseError> {
        self.look = self.lex.next_token()?;
        Ok(())
    }

    // A resource limit rather than malformed input.
    fn too_deep(&self, pos: usize) -> ParseError {
        ParseError::unsupported(
            pos,
            format!("formula nested too deeply (limit {})", self.max_depth),
        )
    }

    fn enter(&mut self, pos: usize) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(self.too_deep(pos));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn wrap(&self, pos: usize, height: usize, ast: Ast) -> Result<Node, ParseError> {
        if height > self.max_depth {
            return Err(self.too_deep(pos));
        }
        Ok(Node { ast, height })
    }

    fn binary(&self, op: BinOp, pos: usize, left: Node, right: Node) -> Result<Node, ParseError> {
        let height = 1 + left.height.max(right.height);
        self.wrap(pos, height, Ast::binop(op, left.ast, right.ast))
    }

    fn expect_close(&mut self, open: usize) -> Result<(), ParseError> {
        if self.look.token != Token::RParen {
            return Err(ParseError::syntax(
                self.look.pos,
                format!(
                    "expected ')' to close '(' at {open}, found {}",
                    self.look.token
                ),
            ));
        }
        self.bump()
    }

    fn expr(&mut self) -> Result<Node, ParseError> {
        let mut node = self.term()?;
        loop {
            let op = match self.look.token {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Sub,
                _ => break,
            };
            let pos = self.look.pos;
            self.bump()?;
            let rhs = self.term()?;
            node = self.binary(op, pos, node, rhs)?;
        }
        Ok(node)
    }

    fn term(&mut self) -> Result<Node, ParseError> {
        let mut node = self.factor()?;
        loop {
            let op = match self.look.token {
                Token::Star => BinOp::Mul,
                Token::Slash => BinOp::Div,
                _ => break,
            };
            let pos = self.look.pos;
            self.bump()?;
            let rhs = self.factor()?;
            node = self.binary(op, pos, node, rhs)?;
        }
        Ok(node)
    }

    // `unary ('^' unary)*` folded from the right is `unary ('^' factor)?`.
    fn factor(&mut self) -> Result<Node, ParseError> {
        let base = self.unary()?;
        if self.look.token != Token::Caret {
            return Ok(base);
        }
        let pos = self.look.pos;
        self.bump()?;
        self.enter(pos)?;
        let exponent = self.factor()?;
        self.leave();
        self.binary(BinOp::Pow, pos, base, exponent)
    }

    fn unary(&mut self) -> Result<Node, ParseError> {
        if self.look.token != Token::Minus {
            return self.primary();
        }
        let pos = self.look.pos;
        self.bump()?;
        self.enter(pos)?;
        let inner = self.unary()?;
        self.leave();
        self.wrap(pos, inner.height + 1, Ast::UnaryOp(UnaryOp::Neg, Box::new(inner.ast)))
    }

    fn primary(&mut self) -> Result<Node, ParseError> {
        let pos = self.look.pos;
        match self.look.token.clone() {
            Token::Num(value) => {
                self.bump()?;
                Ok(Node::leaf(Ast::Num(value)))
            }
            Token::Ident(name) => {
                self.bump()?;
                if self.look.token == Token::LParen {
                    self.call(&name, pos)
                } else {
                    self.symbol(&name, pos)
                }
            }
            Token::LParen => {
                self.bump()?;
                self.enter(pos)?;
                let inner = self.expr()?;
                self.expect_close(pos)?;
                self.leave();
                self.wrap(pos, inner.height + 1, Ast::group(inner.ast))
            }
            other => Err(ParseError::syntax(
                pos,
                format!("expected a number, identifier or '(', found {other}"),
            )),
        }
    }

    fn symbol(&self, name: &str, pos: usize) -> Result<Node, ParseError> {
        if let Some(sym) = Symbol::from_name(name) {
            return Ok(Node::leaf(Ast::Sym(sym)));
        }
        if Func::from_name(name).is_some() {
            return Err(ParseError::unsupported(
                pos,
                format!("function '{name}' must be called with an argument"),
            ));
        }
        Err(ParseError::unsupported(
            pos,
            format!("unknown identifier '{name}' (expected z, i or pi)"),
        ))
    }

    /// Parses `'(' expr (',' expr)* ')'` after a function name.
    fn call(&mut self, name: &str, pos: usize) -> Result<Node, ParseError> {
        let func = Func::from_name(name).ok_or_else(|| {
            ParseError::unsupported(
                pos,
                format!("unknown function '{name}' (expected sin, cos or tan)"),
            )
        })?;
        let open = self.look.pos;
        self.bump()?;
        self.enter(open)?;
        let mut args = Vec::new();
        if self.look.token != Token::RParen {
            loop {
                args.push(self.expr()?);
                if self.look.token != Token::Comma {
                    break;
                }
                self.bump()?;
            }
        }
        self.expect_close(open)?;
        self.leave();

        if args.len() != func.arity() {
            return Err(ParseError::unsupported(
                pos,
                format!(
                    "function '{name}' takes {} argument, got {}",
                    func.arity(),
                    args.len()
                ),
            ));
        }
        let Some(arg) = args.pop() else {
            return Err(ParseError::unsupported(
                pos,
                format!("function '{name}' is missing its argument"),
            ));
        };
        self.wrap(pos, arg.height + 1, Ast::call(func, arg.ast))
    }
}
