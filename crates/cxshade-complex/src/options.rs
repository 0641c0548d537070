//! Compilation settings.

use cxshade_core::{ParseOptions, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fewest fractional digits a real literal is rendered with.
pub const MIN_PRECISION: usize = 5;
/// Most fractional digits a real literal is rendered with; beyond this an
/// `f64` carries no further information.
pub const MAX_PRECISION: usize = 17;

/// Shading language to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// GLSL (ES 1.00 and later), complex values are `vec2`.
    #[default]
    Glsl,
    /// WGSL, complex values are `vec2<f32>`.
    Wgsl,
}

impl Target {
    pub const ALL: [Target; 2] = [Target::Glsl, Target::Wgsl];

    /// Name of the two-float vector type complex values are stored in.
    pub fn complex_type(self) -> &'static str {
        match self {
            Target::Glsl => "vec2",
            Target::Wgsl => "vec2<f32>",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Glsl => write!(f, "glsl"),
            Target::Wgsl => write!(f, "wgsl"),
        }
    }
}

/// Options for [`compile_with`](crate::compile_with).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    pub target: Target,
    /// Fractional digits for real literals, clamped to
    /// `MIN_PRECISION..=MAX_PRECISION`.
    pub precision: usize,
    /// See [`ParseOptions::max_depth`].
    pub max_depth: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            target: Target::default(),
            precision: MIN_PRECISION,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CompileOptions {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The precision actually used for literals.
    pub fn effective_precision(&self) -> usize {
        let clamped = self.precision.clamp(MIN_PRECISION, MAX_PRECISION);
        if clamped != self.precision {
            log::warn!(
                "literal precision {} out of range, using {}",
                self.precision,
                clamped
            );
        }
        clamped
    }

    /// The nesting limit actually enforced, capped at [`MAX_DEPTH_LIMIT`].
    pub fn effective_max_depth(&self) -> usize {
        if self.max_depth > MAX_DEPTH_LIMIT {
            log::warn!(
                "max depth {} above ceiling, using {}",
                self.max_depth,
                MAX_DEPTH_LIMIT
            );
            return MAX_DEPTH_LIMIT;
        }
        self.max_depth
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::default().with_max_depth(self.effective_max_depth())
    }
}
