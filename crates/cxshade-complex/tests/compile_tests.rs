//! End-to-end compilation tests: formula text in, shader expression out.

use cxshade_complex::{
    compile, compile_with, fragment_shader, runtime_library, translate, Ast, CompileError,
    CompileOptions, Expr, Target, TemplateOptions, FUNCTIONS,
};

fn glsl(formula: &str) -> String {
    compile(formula).unwrap().into_string()
}

#[test]
fn test_free_variable_only() {
    assert_eq!(glsl("z"), "z");
}

#[test]
fn test_sin_plus_reciprocal() {
    assert_eq!(
        glsl("sin(z)+1/z"),
        "cx_add(cx_sin(z),cx_div(vec2(1.00000,0.0),z))"
    );
}

#[test]
fn test_precedence_in_output() {
    assert_eq!(
        glsl("z+1*i"),
        "cx_add(z,cx_mul(vec2(1.00000,0.0),vec2(0.0,1.0)))"
    );
}

#[test]
fn test_pow_is_right_associative() {
    assert_eq!(glsl("z^z^2"), "cx_pow(z,cx_pow(z,vec2(2.00000,0.0)))");
}

#[test]
fn test_every_node_kind() {
    let cases = [
        ("2.5", "vec2(2.50000,0.0)"),
        ("i", "vec2(0.0,1.0)"),
        ("pi", "vec2(3.14159,0.0)"),
        ("-z", "cx_unary_minus(z)"),
        ("z-1", "cx_sub(z,vec2(1.00000,0.0))"),
        ("z/z", "cx_div(z,z)"),
        ("cos(z)", "cx_cos(z)"),
        ("tan(z)", "cx_tan(z)"),
        ("(z)", "(z)"),
    ];
    for (formula, expected) in cases {
        assert_eq!(glsl(formula), expected, "{formula}");
    }
}

#[test]
fn test_unary_minus_binds_before_pow() {
    assert_eq!(glsl("-z^2"), "cx_pow(cx_unary_minus(z),vec2(2.00000,0.0))");
}

#[test]
fn test_group_and_whitespace() {
    assert_eq!(
        glsl(" ( z + 1 ) * ( z - 1 ) "),
        "cx_mul((cx_add(z,vec2(1.00000,0.0))),(cx_sub(z,vec2(1.00000,0.0))))"
    );
}

#[test]
fn test_integer_and_real_literals_agree() {
    assert_eq!(glsl("1"), glsl("1.0"));
    assert_eq!(glsl("z*2"), glsl("z*2.000"));
}

#[test]
fn test_literal_formatting() {
    assert_eq!(glsl("0.1"), "vec2(0.10000,0.0)");
    assert_eq!(glsl("1e3"), "vec2(1000.00000,0.0)");
    assert_eq!(glsl(".5"), "vec2(0.50000,0.0)");
}

#[test]
fn test_deterministic() {
    let formula = "tan(z^3 - pi*i) / (z + 0.25)";
    let first = compile(formula).unwrap();
    for _ in 0..10 {
        assert_eq!(compile(formula).unwrap(), first);
    }
}

#[test]
fn test_no_constant_folding() {
    assert_eq!(
        glsl("1+1"),
        "cx_add(vec2(1.00000,0.0),vec2(1.00000,0.0))"
    );
}

#[test]
fn test_wgsl_target() {
    let options = CompileOptions::new(Target::Wgsl);
    let expr = compile_with("sin(z)+1/z", &options).unwrap();
    assert_eq!(
        expr.as_str(),
        "cx_add(cx_sin(z),cx_div(vec2<f32>(1.00000,0.0),z))"
    );
    assert_eq!(expr.target(), Target::Wgsl);
}

#[test]
fn test_targets_share_structure() {
    for formula in ["z^z^2", "sin(z)*cos(z)-i", "-(z+pi)/tan(z)"] {
        let glsl = glsl(formula);
        let wgsl = compile_with(formula, &CompileOptions::new(Target::Wgsl))
            .unwrap()
            .into_string();
        assert_eq!(wgsl.replace("vec2<f32>(", "vec2("), glsl);
    }
}

#[test]
fn test_emits_only_library_calls() {
    let code = glsl("sin(z)*cos(z)/tan(z)^2 - -i + pi");
    let names: Vec<&str> = FUNCTIONS.iter().map(|f| f.name).collect();
    for call in code.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_')) {
        if call.starts_with("cx_") {
            assert!(names.contains(&call), "{call}");
        }
    }
}

#[test]
fn test_translate_matches_compile() {
    let expr = Expr::parse("z*z+i").unwrap();
    let direct = translate(expr.ast(), &CompileOptions::default()).unwrap();
    assert_eq!(direct, compile("z*z+i").unwrap());
}

#[test]
fn test_missing_operand() {
    let err = compile("z +").unwrap_err();
    assert!(matches!(err, CompileError::Syntax { .. }));
    assert_eq!(err.position(), Some(3));
}

#[test]
fn test_unknown_function() {
    let err = compile("foo(z)").unwrap_err();
    assert!(matches!(err, CompileError::UnsupportedConstruct { .. }));
    assert_eq!(err.position(), Some(0));
}

#[test]
fn test_invalid_operator() {
    let err = compile("2 ** z").unwrap_err();
    assert!(matches!(err, CompileError::Syntax { .. }));
}

#[test]
fn test_unknown_variable() {
    let err = compile("w").unwrap_err();
    assert!(matches!(err, CompileError::UnsupportedConstruct { .. }));
    assert_eq!(err.position(), Some(0));
}

#[test]
fn test_unbalanced_parens() {
    for formula in ["(z", "z)", "sin(z", "((z)"] {
        assert!(
            matches!(compile(formula), Err(CompileError::Syntax { .. })),
            "{formula}"
        );
    }
}

#[test]
fn test_hand_built_non_finite_literal() {
    let ast = Ast::binop(cxshade_complex::BinOp::Mul, Ast::num(f64::NAN), Ast::num(1.0));
    let err = translate(&ast, &CompileOptions::default()).unwrap_err();
    let err: CompileError = err.into();
    assert_eq!(err.position(), None);
}

#[test]
fn test_full_shader_is_self_contained() {
    for target in Target::ALL {
        let expr = compile_with("sin(z)+1/z", &CompileOptions::new(target)).unwrap();
        let source = fragment_shader(&expr, &TemplateOptions::default());
        assert!(source.contains(runtime_library(target)));
        assert!(source.contains(expr.as_str()));
    }
}
