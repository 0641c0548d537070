//! WebAssembly bindings for the cxshade formula compiler.
//!
//! Every entry point returns a plain JavaScript object and never throws, so a
//! live editor can call `compile` on each keystroke and keep its current
//! shader whenever `ok` is false.

use cxshade_complex::{
    compile_with, fragment_shader as render_fragment, runtime_library as library_source,
    Coloring, CompileError, CompileOptions, Target, TemplateOptions,
};
use cxshade_core::{Ast, Expr};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// AST node representation for JavaScript.
#[derive(Debug, Serialize)]
pub struct JsAstNode {
    #[serde(rename = "type")]
    node_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<Vec<JsAstNode>>,
}

#[derive(Debug, Serialize)]
pub struct JsParseResult {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    ast: Option<JsAstNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<usize>,
}

/// `{ok, code?, error?, position?}`; `position` is a byte offset into the
/// formula when the error can be located.
#[derive(Debug, Serialize)]
pub struct JsCodeResult {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<usize>,
}

fn code_ok(code: String) -> JsCodeResult {
    JsCodeResult {
        ok: true,
        code: Some(code),
        error: None,
        position: None,
    }
}

fn code_err(error: String, position: Option<usize>) -> JsCodeResult {
    JsCodeResult {
        ok: false,
        code: None,
        error: Some(error),
        position,
    }
}

impl From<CompileError> for JsCodeResult {
    fn from(e: CompileError) -> Self {
        code_err(e.to_string(), e.position())
    }
}

/// Options accepted by [`fragment_shader`]: everything [`CompileOptions`]
/// and [`TemplateOptions`] carry, in one flat object.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ShaderOptions {
    target: Option<Target>,
    precision: Option<usize>,
    max_depth: Option<usize>,
    coloring: Option<Coloring>,
    extent: Option<f64>,
}

impl ShaderOptions {
    fn compile_options(&self) -> CompileOptions {
        let mut options = CompileOptions::default();
        if let Some(target) = self.target {
            options = options.with_target(target);
        }
        if let Some(precision) = self.precision {
            options = options.with_precision(precision);
        }
        if let Some(max_depth) = self.max_depth {
            options = options.with_max_depth(max_depth);
        }
        options
    }

    fn template_options(&self) -> TemplateOptions {
        let mut options = TemplateOptions::default();
        if let Some(coloring) = self.coloring {
            options = options.with_coloring(coloring);
        }
        if let Some(extent) = self.extent {
            options = options.with_extent(extent);
        }
        options
    }
}

/// Reads an optional options object; `undefined` and `null` mean defaults.
fn read_options<T: Default + for<'de> Deserialize<'de>>(value: JsValue) -> Result<T, String> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| format!("invalid options: {e}"))
}

fn to_js<T: Serialize>(result: &T) -> JsValue {
    serde_wasm_bindgen::to_value(result).unwrap_or(JsValue::NULL)
}

/// Parse a formula and return the AST as a JavaScript object.
#[wasm_bindgen]
pub fn parse(input: &str) -> JsValue {
    to_js(&parse_result(input))
}

/// Compile a formula to a shader expression.
/// options: `{ target: "glsl" | "wgsl", precision, max_depth }`, all optional.
#[wasm_bindgen]
pub fn compile(input: &str, options: JsValue) -> JsValue {
    let result = match read_options::<CompileOptions>(options) {
        Ok(options) => compile_result(input, &options),
        Err(e) => code_err(e, None),
    };
    to_js(&result)
}

/// Compile a formula into a complete domain-coloring fragment shader.
/// options: the `compile` options plus `coloring: "hue" | "hue_modulus"` and
/// `extent`.
#[wasm_bindgen]
pub fn fragment_shader(input: &str, options: JsValue) -> JsValue {
    let result = match read_options::<ShaderOptions>(options) {
        Ok(options) => fragment_result(input, &options),
        Err(e) => code_err(e, None),
    };
    to_js(&result)
}

/// Source of the complex runtime library for `"glsl"` or `"wgsl"`.
#[wasm_bindgen]
pub fn runtime_library(target: &str) -> JsValue {
    let result = match target_from_name(target) {
        Some(target) => code_ok(library_source(target).to_string()),
        None => code_err(format!("unknown target '{target}' (expected glsl or wgsl)"), None),
    };
    to_js(&result)
}

fn target_from_name(name: &str) -> Option<Target> {
    Target::ALL
        .into_iter()
        .find(|target| target.to_string().eq_ignore_ascii_case(name))
}

fn parse_result(input: &str) -> JsParseResult {
    match Expr::parse(input) {
        Ok(expr) => JsParseResult {
            ok: true,
            ast: Some(ast_to_js(expr.ast())),
            error: None,
            position: None,
        },
        Err(e) => JsParseResult {
            ok: false,
            ast: None,
            error: Some(e.to_string()),
            position: Some(e.position()),
        },
    }
}

fn compile_result(input: &str, options: &CompileOptions) -> JsCodeResult {
    match compile_with(input, options) {
        Ok(expr) => code_ok(expr.into_string()),
        Err(e) => e.into(),
    }
}

fn fragment_result(input: &str, options: &ShaderOptions) -> JsCodeResult {
    match compile_with(input, &options.compile_options()) {
        Ok(expr) => code_ok(render_fragment(&expr, &options.template_options())),
        Err(e) => e.into(),
    }
}

/// Convert AST to JavaScript-friendly representation.
fn ast_to_js(ast: &Ast) -> JsAstNode {
    let value = match ast {
        Ast::Num(n) => Some(n.to_string()),
        Ast::Sym(sym) => Some(sym.name().to_string()),
        Ast::UnaryOp(op, _) => Some(op.symbol().to_string()),
        Ast::BinOp(op, _, _) => Some(op.symbol().to_string()),
        Ast::Call(func, _) => Some(func.name().to_string()),
        Ast::Group(_) => None,
    };
    let children = ast.children();
    JsAstNode {
        node_type: ast.kind(),
        value,
        children: (!children.is_empty()).then(|| children.into_iter().map(ast_to_js).collect()),
    }
}
