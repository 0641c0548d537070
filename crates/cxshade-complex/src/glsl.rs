//! GLSL target.
//!
//! Complex numbers are `vec2` (`.x` = real, `.y` = imaginary). The library
//! sticks to GLSL ES 1.00 so the output runs under WebGL 1; real `sinh` and
//! `cosh` are therefore defined here instead of relying on builtins.

/// Vector literal for a complex constant.
pub(crate) fn vec2_literal(re: &str, im: &str) -> String {
    format!("vec2({re},{im})")
}

pub const RUNTIME: &str = r#"// cxshade complex runtime v1 (glsl)
const float CX_HALF_PI = 1.57079632;

float cx_cosh(float v) {
    float e = exp(v);
    return (e + 1.0 / e) / 2.0;
}

float cx_sinh(float v) {
    float e = exp(v);
    return (e - 1.0 / e) / 2.0;
}

vec2 cx_add(vec2 a, vec2 b) {
    return vec2(a.x + b.x, a.y + b.y);
}

vec2 cx_sub(vec2 a, vec2 b) {
    return vec2(a.x - b.x, a.y - b.y);
}

vec2 cx_unary_minus(vec2 a) {
    return -a;
}

vec2 cx_mul(vec2 a, vec2 b) {
    return vec2(a.x * b.x - a.y * b.y, a.x * b.y + a.y * b.x);
}

vec2 cx_div(vec2 a, vec2 b) {
    float d = b.x * b.x + b.y * b.y;
    return vec2((a.x * b.x + a.y * b.y) / d, (a.y * b.x - a.x * b.y) / d);
}

float cx_modulus(vec2 a) {
    return length(a);
}

vec2 cx_conj(vec2 a) {
    return vec2(a.x, -a.y);
}

float cx_arg(vec2 a) {
    if (a.x == 0.0) {
        return a.y >= 0.0 ? CX_HALF_PI : -CX_HALF_PI;
    }
    return atan(a.y, a.x);
}

vec2 cx_pow(vec2 a, vec2 b) {
    float r = length(a);
    float theta = atan(a.y, a.x);
    float scale = pow(r, b.x) * exp(-b.y * theta);
    float phase = b.x * theta + b.y * log(r);
    return vec2(scale * cos(phase), scale * sin(phase));
}

vec2 cx_sin(vec2 a) {
    return vec2(sin(a.x) * cx_cosh(a.y), cos(a.x) * cx_sinh(a.y));
}

vec2 cx_cos(vec2 a) {
    return vec2(cos(a.x) * cx_cosh(a.y), -sin(a.x) * cx_sinh(a.y));
}

vec2 cx_tan(vec2 a) {
    return cx_div(cx_sin(a), cx_cos(a));
}

vec2 cx_sqrt(vec2 a) {
    float r = length(a);
    float re = sqrt(0.5 * (r + a.x));
    float im = sqrt(0.5 * (r - a.x));
    if (a.y < 0.0) {
        im = -im;
    }
    return vec2(re, im);
}

vec2 cx_log(vec2 a) {
    return vec2(log(sqrt(a.x * a.x + a.y * a.y)), atan(a.y, a.x));
}

vec2 cx_to_polar(vec2 a) {
    return vec2(length(a), atan(a.y / a.x));
}

vec2 cx_mobius(vec2 a) {
    return cx_div(a - vec2(1.0, 0.0), a + vec2(1.0, 0.0));
}

vec2 cx_z_plus_one_over_z(vec2 a) {
    return a + cx_div(vec2(1.0, 0.0), a);
}

vec2 cx_z_squared_plus_c(vec2 z, vec2 c) {
    return cx_mul(z, z) + c;
}

vec2 cx_sin_of_one_over_z(vec2 z) {
    return cx_sin(cx_div(vec2(1.0, 0.0), z));
}
"#;

/// Domain-coloring fragment shader for WebGL. `$RUNTIME`, `$EXTENT`,
/// `$VALUE` and `$EXPR` are substituted by [`crate::template`].
pub(crate) const FRAGMENT_TEMPLATE: &str = r#"precision highp float;

uniform vec2 uResolution;

#define PI 3.14159265359

$RUNTIME
vec3 hsv2rgb(vec3 c) {
    vec4 k = vec4(1.0, 2.0 / 3.0, 1.0 / 3.0, 3.0);
    vec3 p = abs(fract(c.xxx + k.xyz) * 6.0 - k.www);
    return c.z * mix(k.xxx, clamp(p - k.xxx, 0.0, 1.0), c.y);
}

vec3 complexToHsv(vec2 w) {
    return vec3(cx_arg(w) / (2.0 * PI), 1.0, $VALUE);
}

void main() {
    vec2 st = gl_FragCoord.xy / uResolution;
    vec2 z = (st - vec2(0.5, 0.5)) * $EXTENT;
    vec2 fz = $EXPR;
    gl_FragColor = vec4(hsv2rgb(complexToHsv(fz)), 1.0);
}
"#;

/// Brightness term for [`Coloring::HueModulus`](crate::Coloring::HueModulus).
pub(crate) const MODULUS_VALUE: &str = "2.0 / PI * atan(cx_modulus(w))";
