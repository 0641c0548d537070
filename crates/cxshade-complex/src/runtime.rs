//! The complex runtime library emitted into every shader.
//!
//! Translated expressions only call functions defined here. The library is
//! emitted once per shader program, ahead of any code that uses it, and is
//! never inlined into expressions. [`reference`](crate::reference) mirrors
//! every function on the host so the numeric behavior can be tested.

use crate::options::Target;
use crate::{glsl, wgsl};
use cxshade_core::{BinOp, Func, UnaryOp};

/// Bumped whenever the numeric behavior of any library function changes.
pub const RUNTIME_VERSION: u32 = 1;

/// Signature of a library function, in complex (`c`) and real (`r`) values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryFn {
    pub name: &'static str,
    pub params: usize,
    /// Returns a real rather than a complex value.
    pub real_result: bool,
}

const fn complex(name: &'static str, params: usize) -> LibraryFn {
    LibraryFn {
        name,
        params,
        real_result: false,
    }
}

const fn real(name: &'static str) -> LibraryFn {
    LibraryFn {
        name,
        params: 1,
        real_result: true,
    }
}

/// Every complex-valued entry point the library defines.
pub const FUNCTIONS: &[LibraryFn] = &[
    complex("cx_add", 2),
    complex("cx_sub", 2),
    complex("cx_unary_minus", 1),
    complex("cx_mul", 2),
    complex("cx_div", 2),
    real("cx_modulus"),
    complex("cx_conj", 1),
    real("cx_arg"),
    complex("cx_pow", 2),
    complex("cx_sin", 1),
    complex("cx_cos", 1),
    complex("cx_tan", 1),
    complex("cx_sqrt", 1),
    complex("cx_log", 1),
    complex("cx_to_polar", 1),
    complex("cx_mobius", 1),
    complex("cx_z_plus_one_over_z", 1),
    complex("cx_z_squared_plus_c", 2),
    complex("cx_sin_of_one_over_z", 1),
];

pub fn unary_function(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Neg => "cx_unary_minus",
    }
}

pub fn binary_function(op: BinOp) -> &'static str {
    match op {
        BinOp::Add => "cx_add",
        BinOp::Sub => "cx_sub",
        BinOp::Mul => "cx_mul",
        BinOp::Div => "cx_div",
        BinOp::Pow => "cx_pow",
    }
}

pub fn call_function(func: Func) -> &'static str {
    match func {
        Func::Sin => "cx_sin",
        Func::Cos => "cx_cos",
        Func::Tan => "cx_tan",
    }
}

/// Library source for a target.
pub fn runtime_library(target: Target) -> &'static str {
    match target {
        Target::Glsl => glsl::RUNTIME,
        Target::Wgsl => wgsl::RUNTIME,
    }
}
