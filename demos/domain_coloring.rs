//! Domain coloring example: full fragment shaders and live replacement.
//!
//! Run with: cargo run --example domain_coloring

use cxshade_complex::{
    compile, fragment_shader, Coloring, CompileOptions, ShaderDriver, ShaderSlot, SwapError,
    TemplateOptions,
};

/// Stands in for a WebGL context whose driver fails to link `cx_tan`.
struct FlakyDriver {
    next_id: u32,
}

impl ShaderDriver for FlakyDriver {
    type Program = u32;
    type Error = String;

    fn build(&mut self, source: &str) -> Result<u32, String> {
        if !source.contains("void main()") {
            return Err("no entry point".to_string());
        }
        if source.contains("fz = cx_tan(") {
            return Err("link failed".to_string());
        }
        self.next_id += 1;
        Ok(self.next_id)
    }
}

fn main() {
    let options = TemplateOptions::default()
        .with_coloring(Coloring::HueModulus)
        .with_extent(6.0);
    let expr = compile("(z^2 - 1) / (z^2 + 1)").unwrap();
    println!("Fragment Shader\n{:-<60}", "");
    println!("{}", fragment_shader(&expr, &options));

    println!("Live Editing\n{:-<60}", "");
    let mut driver = FlakyDriver { next_id: 0 };
    let mut slot =
        ShaderSlot::initialize(&mut driver, CompileOptions::default(), options).unwrap();
    println!("program {} running f(z) = {}", slot.active(), slot.formula());

    let edits = [
        "sin(z",
        "sin(z)",
        "sin(z) + w",
        "sin(z) + 1/z",
        "tan(z)",
        "cos(1/z)",
    ];
    for edit in edits {
        match slot.recompile(edit, &mut driver) {
            Ok(old) => println!("{:<20} -> swapped in program {}, released {}", edit, slot.active(), old),
            Err(SwapError::Compile(e)) => println!("{:<20} -> kept {}: {}", edit, slot.formula(), e),
            Err(SwapError::Driver(e)) => println!("{:<20} -> kept {}: driver said {}", edit, slot.formula(), e),
        }
    }
}
