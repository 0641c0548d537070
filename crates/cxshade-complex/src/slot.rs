//! Live shader replacement.
//!
//! A host that recompiles on every edit should never be left without a
//! working program. [`ShaderSlot`] only swaps after the new formula has
//! compiled and the host has built the resulting shader; any failure leaves
//! the running program and its formula exactly as they were.

use crate::error::SwapError;
use crate::options::CompileOptions;
use crate::template::{fragment_shader, TemplateOptions};
use crate::{compile_with, translate::FREE_VARIABLE};
use std::fmt;

/// The host's shader compiler.
pub trait ShaderDriver {
    /// Handle to a linked program, such as a `WebGlProgram` or a
    /// `wgpu::RenderPipeline`.
    type Program;
    type Error;

    /// Builds a complete fragment shader from source.
    fn build(&mut self, source: &str) -> Result<Self::Program, Self::Error>;
}

/// The active program together with the formula it was built from.
#[derive(Debug)]
pub struct ShaderSlot<P> {
    active: P,
    formula: String,
    options: CompileOptions,
    template: TemplateOptions,
}

impl<P> ShaderSlot<P> {
    /// Starts with the identity map `f(z) = z`.
    pub fn initialize<D>(
        driver: &mut D,
        options: CompileOptions,
        template: TemplateOptions,
    ) -> Result<Self, SwapError<D::Error>>
    where
        D: ShaderDriver<Program = P>,
    {
        let active = build(FREE_VARIABLE, &options, &template, driver)?;
        Ok(Self {
            active,
            formula: FREE_VARIABLE.to_string(),
            options,
            template,
        })
    }

    /// Wraps a program the host already built for `formula`.
    pub fn new(active: P, formula: impl Into<String>, options: CompileOptions) -> Self {
        Self {
            active,
            formula: formula.into(),
            options,
            template: TemplateOptions::default(),
        }
    }

    pub fn with_template(mut self, template: TemplateOptions) -> Self {
        self.template = template;
        self
    }

    pub fn active(&self) -> &P {
        &self.active
    }

    pub fn formula(&self) -> &str {
        &self.formula
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    pub fn template(&self) -> &TemplateOptions {
        &self.template
    }

    /// Compiles `formula` and, if the host accepts the shader, makes it the
    /// active program. Returns the program it replaced so the host can
    /// release it.
    pub fn recompile<D>(&mut self, formula: &str, driver: &mut D) -> Result<P, SwapError<D::Error>>
    where
        D: ShaderDriver<Program = P>,
        D::Error: fmt::Display,
    {
        match build(formula, &self.options, &self.template, driver) {
            Ok(program) => {
                log::debug!("swapped shader: {:?} -> {:?}", self.formula, formula);
                self.formula = formula.to_string();
                Ok(std::mem::replace(&mut self.active, program))
            }
            Err(err) => {
                log::warn!(
                    "keeping shader for {:?}, {:?} failed: {}",
                    self.formula,
                    formula,
                    err
                );
                Err(err)
            }
        }
    }
}

fn build<D: ShaderDriver>(
    formula: &str,
    options: &CompileOptions,
    template: &TemplateOptions,
    driver: &mut D,
) -> Result<D::Program, SwapError<D::Error>> {
    let expr = compile_with(formula, options)?;
    let source = fragment_shader(&expr, template);
    driver.build(&source).map_err(SwapError::Driver)
}
