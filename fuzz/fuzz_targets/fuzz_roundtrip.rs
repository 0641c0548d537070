#![no_main]

use cxshade_core::Expr;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let Ok(expr1) = Expr::parse(data) else {
        return;
    };

    let printed = expr1.ast().to_string();

    let Ok(expr2) = Expr::parse(&printed) else {
        panic!(
            "Failed to parse printed AST!\nOriginal: {}\nPrinted: {}\nAST: {:?}",
            data,
            printed,
            expr1.ast()
        );
    };

    // Literals are always finite, so trees compare exactly.
    if expr1.ast() != expr2.ast() {
        panic!(
            "Roundtrip mismatch!\nOriginal: {}\nPrinted: {}\nFirst: {:?}\nSecond: {:?}",
            data,
            printed,
            expr1.ast(),
            expr2.ast()
        );
    }
});
