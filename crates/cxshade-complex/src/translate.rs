//! AST to shader expression translation.

use crate::error::TranslationError;
use crate::options::{CompileOptions, Target};
use crate::runtime::{binary_function, call_function, unary_function};
use crate::{glsl, wgsl};
use cxshade_core::{Ast, Symbol, MAX_LITERAL};
use std::fmt;

/// Identifier the free variable is emitted as. The host binds it to the
/// pixel's complex coordinate.
pub const FREE_VARIABLE: &str = "z";

/// Shader expression text of the target's complex type.
///
/// Only produced by successful translation, so it always names library
/// functions correctly and contains no partial output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShaderExpr {
    code: String,
    target: Target,
}

impl ShaderExpr {
    pub fn as_str(&self) -> &str {
        &self.code
    }

    pub fn into_string(self) -> String {
        self.code
    }

    pub fn target(&self) -> Target {
        self.target
    }
}

impl fmt::Display for ShaderExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl AsRef<str> for ShaderExpr {
    fn as_ref(&self) -> &str {
        &self.code
    }
}

/// Renders a real number in fixed notation, so output never depends on
/// locale or exponent formatting. Values must fit in an `f32`.
pub fn format_real(value: f64, precision: usize) -> Result<String, TranslationError> {
    if !value.is_finite() {
        return Err(TranslationError::NonFiniteLiteral(value));
    }
    if value.abs() > MAX_LITERAL {
        return Err(TranslationError::LiteralOutOfRange(value));
    }
    Ok(format!("{value:.precision$}"))
}

/// Whether any root-to-leaf path of `ast` has more than `limit` nodes.
/// Iterative, so it is safe on trees too deep to recurse over.
fn exceeds_height(ast: &Ast, limit: usize) -> bool {
    let mut stack = vec![(ast, 1)];
    while let Some((node, depth)) = stack.pop() {
        if depth > limit {
            return true;
        }
        stack.extend(node.children().into_iter().map(|child| (child, depth + 1)));
    }
    false
}

struct Emitter {
    target: Target,
    precision: usize,
}

impl Emitter {
    fn vec2(&self, re: &str, im: &str) -> String {
        match self.target {
            Target::Glsl => glsl::vec2_literal(re, im),
            Target::Wgsl => wgsl::vec2_literal(re, im),
        }
    }

    fn real(&self, value: f64) -> Result<String, TranslationError> {
        let re = format_real(value, self.precision)?;
        Ok(self.vec2(&re, "0.0"))
    }

    fn emit(&self, ast: &Ast) -> Result<String, TranslationError> {
        match ast {
            Ast::Num(value) => self.real(*value),
            Ast::Sym(Symbol::Z) => Ok(FREE_VARIABLE.to_string()),
            Ast::Sym(Symbol::I) => Ok(self.vec2("0.0", "1.0")),
            Ast::Sym(Symbol::Pi) => self.real(std::f64::consts::PI),
            Ast::UnaryOp(op, inner) => {
                let inner = self.emit(inner)?;
                Ok(format!("{}({inner})", unary_function(*op)))
            }
            Ast::BinOp(op, left, right) => {
                let left = self.emit(left)?;
                let right = self.emit(right)?;
                Ok(format!("{}({left},{right})", binary_function(*op)))
            }
            Ast::Call(func, arg) => {
                let arg = self.emit(arg)?;
                Ok(format!("{}({arg})", call_function(*func)))
            }
            Ast::Group(inner) => Ok(format!("({})", self.emit(inner)?)),
        }
    }
}

/// Translates an AST into an expression over the runtime library.
///
/// Each node's text is built from its children's text in one post-order
/// walk. Failure anywhere fails the whole translation. Trees taller than
/// the depth limit are rejected before the walk.
pub fn translate(ast: &Ast, options: &CompileOptions) -> Result<ShaderExpr, TranslationError> {
    let limit = options.effective_max_depth();
    if exceeds_height(ast, limit) {
        return Err(TranslationError::TooDeep { limit });
    }
    let emitter = Emitter {
        target: options.target,
        precision: options.effective_precision(),
    };
    Ok(ShaderExpr {
        code: emitter.emit(ast)?,
        target: options.target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cxshade_core::{BinOp, Func};

    fn glsl(ast: &Ast) -> String {
        translate(ast, &CompileOptions::default())
            .unwrap()
            .into_string()
    }

    fn z() -> Ast {
        Ast::sym(Symbol::Z)
    }

    #[test]
    fn test_leaves() {
        assert_eq!(glsl(&Ast::num(2.5)), "vec2(2.50000,0.0)");
        assert_eq!(glsl(&z()), "z");
        assert_eq!(glsl(&Ast::sym(Symbol::I)), "vec2(0.0,1.0)");
        assert_eq!(glsl(&Ast::sym(Symbol::Pi)), "vec2(3.14159,0.0)");
    }

    #[test]
    fn test_operators() {
        let cases = [
            (BinOp::Add, "cx_add(z,z)"),
            (BinOp::Sub, "cx_sub(z,z)"),
            (BinOp::Mul, "cx_mul(z,z)"),
            (BinOp::Div, "cx_div(z,z)"),
            (BinOp::Pow, "cx_pow(z,z)"),
        ];
        for (op, expected) in cases {
            assert_eq!(glsl(&Ast::binop(op, z(), z())), expected);
        }
        assert_eq!(glsl(&Ast::neg(z())), "cx_unary_minus(z)");
    }

    #[test]
    fn test_calls_and_groups() {
        assert_eq!(glsl(&Ast::call(Func::Sin, z())), "cx_sin(z)");
        assert_eq!(glsl(&Ast::call(Func::Cos, z())), "cx_cos(z)");
        assert_eq!(glsl(&Ast::call(Func::Tan, z())), "cx_tan(z)");
        assert_eq!(glsl(&Ast::group(z())), "(z)");
    }

    #[test]
    fn test_wgsl_literals() {
        let options = CompileOptions::new(Target::Wgsl);
        let ast = Ast::binop(BinOp::Mul, Ast::num(1.0), Ast::sym(Symbol::I));
        let expr = translate(&ast, &options).unwrap();
        assert_eq!(expr.as_str(), "cx_mul(vec2<f32>(1.00000,0.0),vec2<f32>(0.0,1.0))");
        assert_eq!(expr.target(), Target::Wgsl);
    }

    #[test]
    fn test_precision() {
        let options = CompileOptions::default().with_precision(11);
        let expr = translate(&Ast::sym(Symbol::Pi), &options).unwrap();
        assert_eq!(expr.as_str(), "vec2(3.14159265359,0.0)");
    }

    #[test]
    fn test_non_finite_rejected() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let ast = Ast::binop(BinOp::Add, z(), Ast::num(value));
            let err = translate(&ast, &CompileOptions::default()).unwrap_err();
            assert!(matches!(err, TranslationError::NonFiniteLiteral(_)));
        }
    }

    #[test]
    fn test_out_of_range_rejected() {
        for target in Target::ALL {
            let options = CompileOptions::new(target);
            for value in [1e39, -1e39, f64::MAX] {
                let ast = Ast::binop(BinOp::Add, z(), Ast::num(value));
                let err = translate(&ast, &options).unwrap_err();
                assert_eq!(err, TranslationError::LiteralOutOfRange(value));
            }
            let ast = Ast::num(3.4e38);
            assert!(translate(&ast, &options).is_ok());
        }
    }

    #[test]
    fn test_hand_built_tree_depth_checked() {
        let options = CompileOptions::default().with_max_depth(16);
        let mut ast = z();
        for _ in 0..15 {
            ast = Ast::neg(ast);
        }
        assert!(translate(&ast, &options).is_ok());
        let ast = Ast::neg(ast);
        let err = translate(&ast, &options).unwrap_err();
        assert_eq!(err, TranslationError::TooDeep { limit: 16 });
    }

    #[test]
    fn test_negative_literal_from_hand_built_tree() {
        assert_eq!(glsl(&Ast::num(-0.25)), "vec2(-0.25000,0.0)");
    }
}
