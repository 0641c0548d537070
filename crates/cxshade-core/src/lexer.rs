//! Tokenizer for formula strings.

use crate::error::ParseError;
use crate::MAX_LITERAL;
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Token {
    Num(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    Comma,
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Num(n) => write!(f, "number {n}"),
            Token::Ident(name) => write!(f, "identifier '{name}'"),
            Token::Plus => f.write_str("'+'"),
            Token::Minus => f.write_str("'-'"),
            Token::Star => f.write_str("'*'"),
            Token::Slash => f.write_str("'/'"),
            Token::Caret => f.write_str("'^'"),
            Token::LParen => f.write_str("'('"),
            Token::RParen => f.write_str("')'"),
            Token::Comma => f.write_str("','"),
            Token::Eof => f.write_str("end of input"),
        }
    }
}

/// A token and the byte offset where it starts.
#[derive(Clone, Debug)]
pub(crate) struct Spanned {
    pub token: Token,
    pub pos: usize,
}

pub(crate) struct Lexer<'a> {
    src: &'a str,
    i: usize,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self { src, i: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.i).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.as_bytes().get(self.i + offset).copied()
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() {
                self.i += 1;
            } else {
                break;
            }
        }
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.i;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.i += 1;
        }
        self.i - start
    }

    pub(crate) fn next_token(&mut self) -> Result<Spanned, ParseError> {
        self.skip_ws();
        let pos = self.i;
        let Some(c) = self.peek() else {
            return Ok(Spanned {
                token: Token::Eof,
                pos,
            });
        };
        let single = match c {
            b'+' => Some(Token::Plus),
            b'-' => Some(Token::Minus),
            b'*' => Some(Token::Star),
            b'/' => Some(Token::Slash),
            b'^' => Some(Token::Caret),
            b'(' => Some(Token::LParen),
            b')' => Some(Token::RParen),
            b',' => Some(Token::Comma),
            _ => None,
        };
        let token = match single {
            Some(token) => {
                self.i += 1;
                token
            }
            None if c.is_ascii_digit() || c == b'.' => self.lex_number(pos)?,
            None if c.is_ascii_alphabetic() || c == b'_' => self.lex_ident(),
            None => {
                let ch = self.src[pos..].chars().next().unwrap_or('?');
                return Err(ParseError::syntax(
                    pos,
                    format!("unexpected character '{ch}'"),
                ));
            }
        };
        Ok(Spanned { token, pos })
    }

    fn lex_number(&mut self, start: usize) -> Result<Token, ParseError> {
        let int_digits = self.skip_digits();
        let mut frac_digits = 0;
        if self.peek() == Some(b'.') {
            self.i += 1;
            frac_digits = self.skip_digits();
        }
        if int_digits == 0 && frac_digits == 0 {
            return Err(ParseError::syntax(start, "expected digits around '.'"));
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let sign = usize::from(matches!(self.peek_at(1), Some(b'+' | b'-')));
            if !matches!(self.peek_at(1 + sign), Some(c) if c.is_ascii_digit()) {
                return Err(ParseError::syntax(
                    self.i,
                    "malformed exponent in number literal",
                ));
            }
            self.i += 1 + sign;
            self.skip_digits();
        }
        let text = &self.src[start..self.i];
        let value: f64 = text
            .parse()
            .map_err(|e| ParseError::syntax(start, format!("invalid number '{text}': {e}")))?;
        // Shaders store literals as f32.
        if !value.is_finite() || value > MAX_LITERAL {
            return Err(ParseError::unsupported(
                start,
                format!("number literal '{text}' is out of range for a 32-bit float"),
            ));
        }
        Ok(Token::Num(value))
    }

    fn lex_ident(&mut self) -> Token {
        let start = self.i;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == b'_') {
            self.i += 1;
        }
        Token::Ident(self.src[start..self.i].to_string())
    }
}
