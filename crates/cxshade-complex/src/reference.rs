//! Host-side mirror of the runtime library.
//!
//! Every method performs the same `f32` operations in the same order as the
//! shader function of the same name, so tests can pin down what the shader
//! computes, including what it does at poles and at zero. It is not used to
//! evaluate formulas.

use std::ops::{Add, Div, Mul, Neg, Sub};

const HALF_PI: f32 = 1.570_796_3;

fn cosh(v: f32) -> f32 {
    let e = v.exp();
    (e + 1.0 / e) / 2.0
}

fn sinh(v: f32) -> f32 {
    let e = v.exp();
    (e - 1.0 / e) / 2.0
}

/// A complex number as stored in a shader `vec2`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex {
    pub re: f32,
    pub im: f32,
}

impl Complex {
    pub const ZERO: Complex = Complex::new(0.0, 0.0);
    pub const ONE: Complex = Complex::new(1.0, 0.0);
    pub const I: Complex = Complex::new(0.0, 1.0);

    pub const fn new(re: f32, im: f32) -> Self {
        Self { re, im }
    }

    /// `cx_modulus`
    pub fn modulus(self) -> f32 {
        (self.re * self.re + self.im * self.im).sqrt()
    }

    /// `cx_conj`
    pub fn conj(self) -> Self {
        Self::new(self.re, -self.im)
    }

    /// `cx_arg`: ±π/2 on the imaginary axis, `atan2` elsewhere.
    pub fn arg(self) -> f32 {
        if self.re == 0.0 {
            return if self.im >= 0.0 { HALF_PI } else { -HALF_PI };
        }
        self.im.atan2(self.re)
    }

    /// `cx_pow`, via polar form with no special case at zero.
    pub fn pow(self, b: Self) -> Self {
        let r = self.modulus();
        let theta = self.im.atan2(self.re);
        let scale = r.powf(b.re) * (-b.im * theta).exp();
        let phase = b.re * theta + b.im * r.ln();
        Self::new(scale * phase.cos(), scale * phase.sin())
    }

    /// `cx_sin`
    pub fn sin(self) -> Self {
        Self::new(
            self.re.sin() * cosh(self.im),
            self.re.cos() * sinh(self.im),
        )
    }

    /// `cx_cos`
    pub fn cos(self) -> Self {
        Self::new(
            self.re.cos() * cosh(self.im),
            -self.re.sin() * sinh(self.im),
        )
    }

    /// `cx_tan`
    pub fn tan(self) -> Self {
        self.sin() / self.cos()
    }

    /// `cx_sqrt`, principal root with the imaginary sign taken from `im`.
    pub fn sqrt(self) -> Self {
        let r = self.modulus();
        let re = (0.5 * (r + self.re)).sqrt();
        let im = (0.5 * (r - self.re)).sqrt();
        Self::new(re, if self.im < 0.0 { -im } else { im })
    }

    /// `cx_log`
    pub fn log(self) -> Self {
        Self::new(
            (self.re * self.re + self.im * self.im).sqrt().ln(),
            self.im.atan2(self.re),
        )
    }

    /// `cx_to_polar`: `(|a|, atan(im/re))`, a half-plane angle.
    pub fn to_polar(self) -> Self {
        Self::new(self.modulus(), (self.im / self.re).atan())
    }

    /// `cx_mobius`: `(a - 1) / (a + 1)`.
    pub fn mobius(self) -> Self {
        (self - Self::ONE) / (self + Self::ONE)
    }

    /// `cx_z_plus_one_over_z`
    pub fn z_plus_one_over_z(self) -> Self {
        self + Self::ONE / self
    }

    /// `cx_z_squared_plus_c`
    pub fn z_squared_plus_c(self, c: Self) -> Self {
        self * self + c
    }

    /// `cx_sin_of_one_over_z`
    pub fn sin_of_one_over_z(self) -> Self {
        (Self::ONE / self).sin()
    }
}

/// `cx_add`
impl Add for Complex {
    type Output = Self;

    fn add(self, b: Self) -> Self {
        Self::new(self.re + b.re, self.im + b.im)
    }
}

/// `cx_sub`
impl Sub for Complex {
    type Output = Self;

    fn sub(self, b: Self) -> Self {
        Self::new(self.re - b.re, self.im - b.im)
    }
}

/// `cx_unary_minus`
impl Neg for Complex {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.re, -self.im)
    }
}

/// `cx_mul`
impl Mul for Complex {
    type Output = Self;

    fn mul(self, b: Self) -> Self {
        Self::new(
            self.re * b.re - self.im * b.im,
            self.re * b.im + self.im * b.re,
        )
    }
}

/// `cx_div`. Division by zero yields IEEE infinities or NaN.
impl Div for Complex {
    type Output = Self;

    fn div(self, b: Self) -> Self {
        let d = b.re * b.re + b.im * b.im;
        Self::new(
            (self.re * b.re + self.im * b.im) / d,
            (self.im * b.re - self.re * b.im) / d,
        )
    }
}
