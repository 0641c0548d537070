//! Formula compilation example.
//!
//! Run with: cargo run --example compile

use cxshade_complex::{compile_with, CompileOptions, Target};

fn main() {
    let formulas = [
        "z",
        "sin(z) + 1/z",
        "z^z^2",
        "(z - 1) / (z + 1)",
        "tan(pi * z) - i",
        "-z^2",
        // Rejected:
        "z +",
        "foo(z)",
        "2 ** z",
        "w",
    ];

    for target in Target::ALL {
        println!("{} Code Generation\n{:-<60}", target.to_string().to_uppercase(), "");

        let options = CompileOptions::new(target);
        for formula in formulas {
            match compile_with(formula, &options) {
                Ok(expr) => {
                    println!("Formula: {}", formula);
                    println!("{}:    {}", target, expr);
                }
                Err(e) => {
                    let at = e.position().map(|p| format!(" (at {p})")).unwrap_or_default();
                    println!("Formula: {} -> Error{}: {}", formula, at, e);
                }
            }
            println!();
        }
    }
}
