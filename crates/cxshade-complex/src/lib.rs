//! Compiles complex-valued formulas to shader code.
//!
//! A formula such as `sin(z) + 1/z` becomes a single expression over a fixed
//! runtime library of complex primitives, in GLSL or WGSL:
//!
//! ```
//! use cxshade_complex::{compile, compile_with, CompileOptions, Target};
//!
//! let expr = compile("sin(z)+1/z").unwrap();
//! assert_eq!(expr.as_str(), "cx_add(cx_sin(z),cx_div(vec2(1.00000,0.0),z))");
//!
//! let wgsl = compile_with("z^2", &CompileOptions::new(Target::Wgsl)).unwrap();
//! assert_eq!(wgsl.as_str(), "cx_pow(z,vec2<f32>(2.00000,0.0))");
//! ```
//!
//! The free variable `z` is left for the host to bind to the pixel's
//! coordinate. [`runtime_library`] returns the library source, which must be
//! emitted once ahead of the expression; [`fragment_shader`] does both and
//! produces a complete domain-coloring shader.
//!
//! Compilation is pure: the same formula and options always produce the same
//! text, and a failed compile produces no text at all. [`ShaderSlot`] builds
//! on that to replace a running shader only when the new one works.

mod error;
mod glsl;
mod options;
pub mod reference;
mod runtime;
mod slot;
mod template;
mod translate;
mod wgsl;

pub use cxshade_core::{Ast, BinOp, Expr, Func, ParseError, ParseOptions, Symbol, UnaryOp};
pub use error::{CompileError, SwapError, TranslationError};
pub use options::{CompileOptions, Target, MAX_PRECISION, MIN_PRECISION};
pub use runtime::{runtime_library, LibraryFn, FUNCTIONS, RUNTIME_VERSION};
pub use slot::{ShaderDriver, ShaderSlot};
pub use template::{fragment_shader, Coloring, TemplateOptions, DEFAULT_EXTENT};
pub use translate::{format_real, translate, ShaderExpr, FREE_VARIABLE};

/// Compiles a formula to a GLSL expression with default options.
pub fn compile(formula: &str) -> Result<ShaderExpr, CompileError> {
    compile_with(formula, &CompileOptions::default())
}

/// Parses and translates a formula.
pub fn compile_with(formula: &str, options: &CompileOptions) -> Result<ShaderExpr, CompileError> {
    let expr = Expr::parse_with(formula, &options.parse_options())?;
    let code = translate(expr.ast(), options)?;
    log::debug!(
        "compiled {:?} for {} ({} bytes)",
        formula,
        options.target,
        code.as_str().len()
    );
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_errors_are_classified() {
        let err = compile("z +").unwrap_err();
        assert!(matches!(err, CompileError::Syntax { position: 3, .. }));

        let err = compile("foo(z)").unwrap_err();
        assert!(matches!(err, CompileError::UnsupportedConstruct { position: Some(0), .. }));
    }

    #[test]
    fn test_depth_option_reaches_parser() {
        let formula = format!("{}z{}", "(".repeat(20), ")".repeat(20));
        assert!(compile(&formula).is_ok());
        let options = CompileOptions::default().with_max_depth(8);
        assert!(matches!(
            compile_with(&formula, &options),
            Err(CompileError::UnsupportedConstruct { position: Some(8), .. })
        ));
    }

    #[test]
    fn test_unbounded_depth_option_is_capped() {
        let formula = format!("{}z{}", "(".repeat(200_000), ")".repeat(200_000));
        let options = CompileOptions::default().with_max_depth(usize::MAX);
        let err = compile_with(&formula, &options).unwrap_err();
        assert!(matches!(err, CompileError::UnsupportedConstruct { .. }));
        assert!(err.to_string().contains("nested too deeply"));
    }
}
