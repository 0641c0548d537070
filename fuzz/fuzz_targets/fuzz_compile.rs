#![no_main]

use arbitrary::Arbitrary;
use cxshade_complex::{compile_with, CompileError, CompileOptions, Target, FUNCTIONS};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct CompileInput {
    formula: String,
    wgsl: bool,
    precision: u8,
}

fuzz_target!(|input: CompileInput| {
    let target = if input.wgsl { Target::Wgsl } else { Target::Glsl };
    let options = CompileOptions::new(target).with_precision(usize::from(input.precision));

    let first = compile_with(&input.formula, &options);
    let second = compile_with(&input.formula, &options);
    assert_eq!(first, second, "compile is not deterministic");

    match first {
        Ok(expr) => {
            // Every called function is part of the runtime library.
            for word in expr
                .as_str()
                .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .filter(|word| word.starts_with("cx_"))
            {
                assert!(
                    FUNCTIONS.iter().any(|f| f.name == word),
                    "unknown library call {word} in {}",
                    expr
                );
            }
        }
        Err(CompileError::Syntax { position, .. }) => {
            assert!(position <= input.formula.len());
        }
        Err(CompileError::UnsupportedConstruct { position, .. }) => {
            // Parsed trees hold only in-range literals within the depth limit,
            // so every failure comes from the parser and is located.
            assert!(position.is_some_and(|p| p <= input.formula.len()));
        }
    }
});
