//! Complete domain-coloring fragment shaders.

use crate::options::MIN_PRECISION;
use crate::runtime::runtime_library;
use crate::translate::ShaderExpr;
use crate::{glsl, wgsl, Target};
use cxshade_core::MAX_LITERAL;
use serde::{Deserialize, Serialize};

/// Side length of the square of the complex plane shown by default,
/// centered on the origin.
pub const DEFAULT_EXTENT: f64 = 4.0;

/// How `f(z)` is mapped to a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coloring {
    /// Hue from the argument, full brightness.
    #[default]
    Hue,
    /// Hue from the argument, brightness rising with the modulus.
    HueModulus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateOptions {
    pub coloring: Coloring,
    /// Width and height of the visible region of the plane.
    pub extent: f64,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            coloring: Coloring::default(),
            extent: DEFAULT_EXTENT,
        }
    }
}

impl TemplateOptions {
    pub fn with_coloring(mut self, coloring: Coloring) -> Self {
        self.coloring = coloring;
        self
    }

    pub fn with_extent(mut self, extent: f64) -> Self {
        self.extent = extent;
        self
    }

    fn extent_literal(&self) -> String {
        let extent = if self.extent > 0.0 && self.extent <= MAX_LITERAL {
            self.extent
        } else {
            log::warn!(
                "extent {} is not a positive f32, using {}",
                self.extent,
                DEFAULT_EXTENT
            );
            DEFAULT_EXTENT
        };
        format!("{:.*}", MIN_PRECISION, extent)
    }
}

/// Renders the full fragment shader for `expr`, in the expression's target
/// language, with the runtime library emitted ahead of its first use.
pub fn fragment_shader(expr: &ShaderExpr, options: &TemplateOptions) -> String {
    let (template, modulus_value) = match expr.target() {
        Target::Glsl => (glsl::FRAGMENT_TEMPLATE, glsl::MODULUS_VALUE),
        Target::Wgsl => (wgsl::FRAGMENT_TEMPLATE, wgsl::MODULUS_VALUE),
    };
    let value = match options.coloring {
        Coloring::Hue => "1.0",
        Coloring::HueModulus => modulus_value,
    };
    // The expression goes in last so nothing inside it is ever treated as a
    // placeholder.
    template
        .replace("$RUNTIME", runtime_library(expr.target()))
        .replace("$VALUE", value)
        .replace("$EXTENT", &options.extent_literal())
        .replace("$EXPR", expr.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compile_with, CompileOptions};

    fn shader(formula: &str, target: Target, options: &TemplateOptions) -> String {
        let expr = compile_with(formula, &CompileOptions::new(target)).unwrap();
        fragment_shader(&expr, options)
    }

    #[test]
    fn test_glsl_shader() {
        let source = shader("sin(z)", Target::Glsl, &TemplateOptions::default());
        assert!(source.starts_with("precision highp float;"));
        assert!(source.contains("vec2 fz = cx_sin(z);"));
        assert!(source.contains("* 4.00000;"));
        assert!(source.contains("vec3(cx_arg(w) / (2.0 * PI), 1.0, 1.0)"));
        assert!(!source.contains('$'));
    }

    #[test]
    fn test_wgsl_shader() {
        let source = shader("z*z", Target::Wgsl, &TemplateOptions::default());
        assert!(source.contains("@fragment"));
        assert!(source.contains("let fz = cx_mul(z,z);"));
        assert!(source.contains("fn cx_mul("));
        assert!(!source.contains('$'));
    }

    #[test]
    fn test_library_precedes_expression() {
        for target in Target::ALL {
            let source = shader("tan(z)", target, &TemplateOptions::default());
            let defined = source.find("cx_tan(").unwrap();
            let used = source.find("cx_tan(z)").unwrap();
            assert!(defined < used, "{target}");
            assert_eq!(source.matches("cx_tan(z)").count(), 1);
        }
    }

    #[test]
    fn test_modulus_coloring() {
        let options = TemplateOptions::default().with_coloring(Coloring::HueModulus);
        let source = shader("z", Target::Glsl, &options);
        assert!(source.contains("1.0, 2.0 / PI * atan(cx_modulus(w)))"));
    }

    #[test]
    fn test_extent() {
        let options = TemplateOptions::default().with_extent(2.5);
        assert!(shader("z", Target::Glsl, &options).contains("* 2.50000;"));

        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY, 1e39] {
            let options = TemplateOptions::default().with_extent(bad);
            assert!(shader("z", Target::Glsl, &options).contains("* 4.00000;"));
        }
    }

    #[test]
    fn test_options_from_json() {
        let options: TemplateOptions =
            serde_json::from_str(r#"{"coloring": "hue_modulus"}"#).unwrap();
        assert_eq!(options.coloring, Coloring::HueModulus);
        assert_eq!(options.extent, DEFAULT_EXTENT);
    }
}
