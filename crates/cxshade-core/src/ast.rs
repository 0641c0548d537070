//! Abstract syntax tree for formulas.
//!
//! The tree is closed over the recognized grammar: identifiers and function
//! names are resolved into [`Symbol`] and [`Func`] while parsing, so a tree
//! can only name things the translator knows how to emit.

use std::fmt;

/// The identifiers a formula may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// The free variable, bound to the pixel's complex coordinate.
    Z,
    /// The imaginary unit.
    I,
    /// The constant π.
    Pi,
}

impl Symbol {
    pub const ALL: [Symbol; 3] = [Symbol::Z, Symbol::I, Symbol::Pi];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "z" => Some(Symbol::Z),
            "i" => Some(Symbol::I),
            "pi" => Some(Symbol::Pi),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Symbol::Z => "z",
            Symbol::I => "i",
            Symbol::Pi => "pi",
        }
    }
}

/// Single-argument functions a formula may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Func {
    Sin,
    Cos,
    Tan,
}

impl Func {
    pub const ALL: [Func; 3] = [Func::Sin, Func::Cos, Func::Tan];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(Func::Sin),
            "cos" => Some(Func::Cos),
            "tan" => Some(Func::Tan),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
        }
    }

    /// Number of arguments the function takes.
    pub fn arity(self) -> usize {
        1
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Pow => "^",
        }
    }

    fn precedence(self) -> u8 {
        match self {
            BinOp::Add | BinOp::Sub => prec::ADD,
            BinOp::Mul | BinOp::Div => prec::MUL,
            BinOp::Pow => prec::POW,
        }
    }

    fn is_right_assoc(self) -> bool {
        matches!(self, BinOp::Pow)
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
        }
    }
}

/// A parsed formula.
#[derive(Debug, Clone, PartialEq)]
pub enum Ast {
    /// Real literal.
    Num(f64),
    /// Recognized identifier.
    Sym(Symbol),
    UnaryOp(UnaryOp, Box<Ast>),
    BinOp(BinOp, Box<Ast>, Box<Ast>),
    Call(Func, Box<Ast>),
    /// Explicit parentheses in the source.
    Group(Box<Ast>),
}

mod prec {
    pub const ADD: u8 = 1;
    pub const MUL: u8 = 2;
    pub const POW: u8 = 3;
    pub const UNARY: u8 = 4;
    pub const ATOM: u8 = 5;
}

impl Ast {
    pub fn num(value: f64) -> Self {
        Ast::Num(value)
    }

    pub fn sym(symbol: Symbol) -> Self {
        Ast::Sym(symbol)
    }

    pub fn neg(inner: Ast) -> Self {
        Ast::UnaryOp(UnaryOp::Neg, Box::new(inner))
    }

    pub fn binop(op: BinOp, left: Ast, right: Ast) -> Self {
        Ast::BinOp(op, Box::new(left), Box::new(right))
    }

    pub fn call(func: Func, arg: Ast) -> Self {
        Ast::Call(func, Box::new(arg))
    }

    pub fn group(inner: Ast) -> Self {
        Ast::Group(Box::new(inner))
    }

    /// Short name of the node kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Ast::Num(_) => "Num",
            Ast::Sym(_) => "Sym",
            Ast::UnaryOp(..) => "UnaryOp",
            Ast::BinOp(..) => "BinOp",
            Ast::Call(..) => "Call",
            Ast::Group(_) => "Group",
        }
    }

    /// Direct children, left to right.
    pub fn children(&self) -> Vec<&Ast> {
        match self {
            Ast::Num(_) | Ast::Sym(_) => vec![],
            Ast::UnaryOp(_, inner) | Ast::Call(_, inner) | Ast::Group(inner) => vec![&**inner],
            Ast::BinOp(_, left, right) => vec![&**left, &**right],
        }
    }

    /// Total number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        1 + self.children().into_iter().map(Ast::node_count).sum::<usize>()
    }

    /// Length of the longest root-to-leaf path, counting nodes.
    pub fn height(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(Ast::height)
            .max()
            .unwrap_or(0)
    }

    fn precedence(&self) -> u8 {
        match self {
            Ast::Num(n) if n.is_sign_negative() => prec::UNARY,
            Ast::Num(_) | Ast::Sym(_) | Ast::Call(..) | Ast::Group(_) => prec::ATOM,
            Ast::UnaryOp(..) => prec::UNARY,
            Ast::BinOp(op, ..) => op.precedence(),
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, ast: &Ast, parens: bool) -> fmt::Result {
    if parens {
        write!(f, "({ast})")
    } else {
        write!(f, "{ast}")
    }
}

/// Renders formula text.
///
/// Parentheses come from [`Ast::Group`] nodes; extra ones are only added
/// where a hand-built tree would otherwise print with the wrong grouping.
/// Parser-produced trees print back to text that parses to the same tree.
impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ast::Num(n) => write!(f, "{n}"),
            Ast::Sym(s) => f.write_str(s.name()),
            Ast::UnaryOp(op, inner) => {
                f.write_str(op.symbol())?;
                write_operand(f, inner, inner.precedence() < prec::UNARY)
            }
            Ast::BinOp(op, left, right) => {
                let p = op.precedence();
                let (left_parens, right_parens) = if op.is_right_assoc() {
                    (left.precedence() <= p, right.precedence() < p)
                } else {
                    (left.precedence() < p, right.precedence() <= p)
                };
                write_operand(f, left, left_parens)?;
                write!(f, " {} ", op.symbol())?;
                write_operand(f, right, right_parens)
            }
            Ast::Call(func, arg) => write!(f, "{}({arg})", func.name()),
            Ast::Group(inner) => write!(f, "({inner})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_names() {
        for sym in Symbol::ALL {
            assert_eq!(Symbol::from_name(sym.name()), Some(sym));
        }
        assert_eq!(Symbol::from_name("w"), None);
        assert_eq!(Symbol::from_name("Z"), None);
    }

    #[test]
    fn test_func_names() {
        for func in Func::ALL {
            assert_eq!(Func::from_name(func.name()), Some(func));
            assert_eq!(func.arity(), 1);
        }
        assert_eq!(Func::from_name("exp"), None);
    }

    #[test]
    fn test_display_adds_parens_for_hand_built_trees() {
        let sum = Ast::binop(BinOp::Add, Ast::sym(Symbol::Z), Ast::num(1.0));
        let product = Ast::binop(BinOp::Mul, sum.clone(), Ast::num(2.0));
        assert_eq!(product.to_string(), "(z + 1) * 2");

        let diff = Ast::binop(BinOp::Sub, Ast::sym(Symbol::Z), sum);
        assert_eq!(diff.to_string(), "z - (z + 1)");
    }

    #[test]
    fn test_display_pow_assoc() {
        let z = || Ast::sym(Symbol::Z);
        let right = Ast::binop(BinOp::Pow, z(), Ast::binop(BinOp::Pow, z(), Ast::num(2.0)));
        assert_eq!(right.to_string(), "z ^ z ^ 2");

        let left = Ast::binop(BinOp::Pow, Ast::binop(BinOp::Pow, z(), z()), Ast::num(2.0));
        assert_eq!(left.to_string(), "(z ^ z) ^ 2");
    }

    #[test]
    fn test_display_group_and_call() {
        let ast = Ast::call(
            Func::Sin,
            Ast::group(Ast::neg(Ast::sym(Symbol::Pi))),
        );
        assert_eq!(ast.to_string(), "sin((-pi))");
    }

    #[test]
    fn test_counts() {
        let ast = Ast::binop(
            BinOp::Add,
            Ast::call(Func::Sin, Ast::sym(Symbol::Z)),
            Ast::binop(BinOp::Div, Ast::num(1.0), Ast::sym(Symbol::Z)),
        );
        assert_eq!(ast.node_count(), 6);
        assert_eq!(ast.height(), 3);
        assert_eq!(ast.kind(), "BinOp");
    }
}
