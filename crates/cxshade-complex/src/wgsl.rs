//! WGSL target.
//!
//! Complex numbers are `vec2<f32>` (`.x` = real, `.y` = imaginary). Function
//! bodies match the GLSL library expression for expression.

/// Vector literal for a complex constant.
pub(crate) fn vec2_literal(re: &str, im: &str) -> String {
    format!("vec2<f32>({re},{im})")
}

pub const RUNTIME: &str = r#"// cxshade complex runtime v1 (wgsl)
const CX_HALF_PI: f32 = 1.57079632;

fn cx_cosh(v: f32) -> f32 {
    let e = exp(v);
    return (e + 1.0 / e) / 2.0;
}

fn cx_sinh(v: f32) -> f32 {
    let e = exp(v);
    return (e - 1.0 / e) / 2.0;
}

fn cx_add(a: vec2<f32>, b: vec2<f32>) -> vec2<f32> {
    return vec2<f32>(a.x + b.x, a.y + b.y);
}

fn cx_sub(a: vec2<f32>, b: vec2<f32>) -> vec2<f32> {
    return vec2<f32>(a.x - b.x, a.y - b.y);
}

fn cx_unary_minus(a: vec2<f32>) -> vec2<f32> {
    return -a;
}

fn cx_mul(a: vec2<f32>, b: vec2<f32>) -> vec2<f32> {
    return vec2<f32>(a.x * b.x - a.y * b.y, a.x * b.y + a.y * b.x);
}

fn cx_div(a: vec2<f32>, b: vec2<f32>) -> vec2<f32> {
    let d = b.x * b.x + b.y * b.y;
    return vec2<f32>((a.x * b.x + a.y * b.y) / d, (a.y * b.x - a.x * b.y) / d);
}

fn cx_modulus(a: vec2<f32>) -> f32 {
    return length(a);
}

fn cx_conj(a: vec2<f32>) -> vec2<f32> {
    return vec2<f32>(a.x, -a.y);
}

fn cx_arg(a: vec2<f32>) -> f32 {
    if (a.x == 0.0) {
        return select(-CX_HALF_PI, CX_HALF_PI, a.y >= 0.0);
    }
    return atan2(a.y, a.x);
}

fn cx_pow(a: vec2<f32>, b: vec2<f32>) -> vec2<f32> {
    let r = length(a);
    let theta = atan2(a.y, a.x);
    let scale = pow(r, b.x) * exp(-b.y * theta);
    let phase = b.x * theta + b.y * log(r);
    return vec2<f32>(scale * cos(phase), scale * sin(phase));
}

fn cx_sin(a: vec2<f32>) -> vec2<f32> {
    return vec2<f32>(sin(a.x) * cx_cosh(a.y), cos(a.x) * cx_sinh(a.y));
}

fn cx_cos(a: vec2<f32>) -> vec2<f32> {
    return vec2<f32>(cos(a.x) * cx_cosh(a.y), -sin(a.x) * cx_sinh(a.y));
}

fn cx_tan(a: vec2<f32>) -> vec2<f32> {
    return cx_div(cx_sin(a), cx_cos(a));
}

fn cx_sqrt(a: vec2<f32>) -> vec2<f32> {
    let r = length(a);
    let re = sqrt(0.5 * (r + a.x));
    var im = sqrt(0.5 * (r - a.x));
    if (a.y < 0.0) {
        im = -im;
    }
    return vec2<f32>(re, im);
}

fn cx_log(a: vec2<f32>) -> vec2<f32> {
    return vec2<f32>(log(sqrt(a.x * a.x + a.y * a.y)), atan2(a.y, a.x));
}

fn cx_to_polar(a: vec2<f32>) -> vec2<f32> {
    return vec2<f32>(length(a), atan(a.y / a.x));
}

fn cx_mobius(a: vec2<f32>) -> vec2<f32> {
    return cx_div(a - vec2<f32>(1.0, 0.0), a + vec2<f32>(1.0, 0.0));
}

fn cx_z_plus_one_over_z(a: vec2<f32>) -> vec2<f32> {
    return a + cx_div(vec2<f32>(1.0, 0.0), a);
}

fn cx_z_squared_plus_c(z: vec2<f32>, c: vec2<f32>) -> vec2<f32> {
    return cx_mul(z, z) + c;
}

fn cx_sin_of_one_over_z(z: vec2<f32>) -> vec2<f32> {
    return cx_sin(cx_div(vec2<f32>(1.0, 0.0), z));
}
"#;

/// Domain-coloring fragment stage for wgpu. The resolution uniform lives at
/// group 0, binding 0.
pub(crate) const FRAGMENT_TEMPLATE: &str = r#"struct Uniforms {
    resolution: vec2<f32>,
};

@group(0) @binding(0) var<uniform> uniforms: Uniforms;

const PI: f32 = 3.14159265359;

$RUNTIME
fn hsv2rgb(c: vec3<f32>) -> vec3<f32> {
    let k = vec4<f32>(1.0, 2.0 / 3.0, 1.0 / 3.0, 3.0);
    let p = abs(fract(c.xxx + k.xyz) * 6.0 - k.www);
    return c.z * mix(k.xxx, clamp(p - k.xxx, vec3<f32>(0.0), vec3<f32>(1.0)), c.y);
}

fn complex_to_hsv(w: vec2<f32>) -> vec3<f32> {
    return vec3<f32>(cx_arg(w) / (2.0 * PI), 1.0, $VALUE);
}

@fragment
fn fs_main(@builtin(position) frag_coord: vec4<f32>) -> @location(0) vec4<f32> {
    let st = frag_coord.xy / uniforms.resolution;
    let z = (st - vec2<f32>(0.5, 0.5)) * $EXTENT;
    let fz = $EXPR;
    return vec4<f32>(hsv2rgb(complex_to_hsv(fz)), 1.0);
}
"#;

pub(crate) const MODULUS_VALUE: &str = "2.0 / PI * atan(cx_modulus(w))";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_literal() {
        assert_eq!(vec2_literal("0.0", "1.0"), "vec2<f32>(0.0,1.0)");
    }

    #[test]
    fn test_no_glsl_spellings() {
        // WGSL spells the two-argument arctangent atan2.
        assert!(!RUNTIME.contains("atan(a.y, a.x)"));
        assert!(!RUNTIME.contains("vec2("));
        assert!(!FRAGMENT_TEMPLATE.contains("vec2("));
    }

    #[test]
    fn test_template_placeholders() {
        for placeholder in ["$RUNTIME", "$VALUE", "$EXTENT", "$EXPR"] {
            assert_eq!(FRAGMENT_TEMPLATE.matches(placeholder).count(), 1);
        }
    }
}
