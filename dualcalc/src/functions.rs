//! Elementary functions on dual numbers.
//!
//! Every function takes an [`Operand`] (a dual or a plain scalar) and
//! returns a dual whose value is the ordinary function value and whose
//! derivative is the function's true derivative at that point times the
//! incoming derivative:
//!
//! ```text
//! g(a + a′·ε) = g(a) + g′(a)·a′·ε
//! ```
//!
//! Inputs are not range-checked up front. The primitive is evaluated,
//! and a result that is undefined there (NaN from a non-NaN input, or a
//! log of a non-positive number) is reported as [`Error::Domain`]. A
//! derivative formula whose denominator vanishes at the point, such as
//! `sqrt` at zero, is reported as [`Error::DivisionByZero`].
//!
//! Functions that are defined everywhere (`exp`, `sinh`, `cosh`, `tanh`,
//! `atan`, `asinh`, `erf`, `erfc`, `radians`, `degrees`, `ceil`, `floor`,
//! `trunc`) never return `Err`. They still return a `Result` so every
//! function composes with `?` the same way.
//!
//! ```
//! use dualcalc::{functions::sin, Dual};
//!
//! # fn main() -> dualcalc::Result<()> {
//! // f(x) = 3x³·sin²(4x) at x = 1.2
//! let f = |x: Dual<f64>| -> dualcalc::Result<Dual<f64>> {
//!     Ok(3.0 * x.pow(3.0)? * sin(4.0 * x)?.pow(2.0)?)
//! };
//! let y = f(Dual::seed(1.2))?;
//!
//! assert!((y.value - 5.144310922218376).abs() < 1e-12);
//! assert!((y.deriv - 9.245937170106238).abs() < 1e-12);
//! # Ok(())
//! # }
//! ```

use crate::arith;
use crate::dual::{parts, Dual, Operand};
use crate::error::{Error, Result};
use crate::scalar::{compensated_sum, two, Scalar};
use tracing::debug;

/// Reject a primitive result that is NaN although the input was not.
fn defined<T: Scalar>(function: &'static str, x: T, value: T) -> Result<T> {
    if value.is_nan() && !x.is_nan() {
        debug!(function, "primitive evaluated outside its domain");
        return Err(Error::domain(function, x));
    }
    Ok(value)
}

/// Logarithms are undefined at and below zero (Rust returns `-inf` at
/// zero rather than NaN, so test the argument directly).
fn positive<T: Scalar>(function: &'static str, x: T) -> Result<T> {
    if x <= T::zero() {
        debug!(function, "logarithm of a non-positive value");
        return Err(Error::domain(function, x));
    }
    Ok(x)
}

/// `numerator / denominator`, failing when the denominator is zero.
fn ratio<T: Scalar>(function: &'static str, numerator: T, denominator: T) -> Result<T> {
    if denominator.is_zero() {
        return Err(Error::DivisionByZero {
            operation: function,
        });
    }
    Ok(numerator / denominator)
}

/// Square root: `(√x)′ = 1 / (2√x)`.
pub fn sqrt<T: Scalar>(a: impl Operand<T>) -> Result<Dual<T>> {
    let (x, dx) = parts(a);
    let root = defined("sqrt", x, x.sqrt())?;
    Ok(Dual::new(root, ratio("sqrt", dx, two::<T>() * root)?))
}

/// Natural logarithm: `(ln x)′ = 1 / x`.
pub fn log<T: Scalar>(a: impl Operand<T>) -> Result<Dual<T>> {
    let (x, dx) = parts(a);
    let x = positive("log", x)?;
    Ok(Dual::new(x.ln(), dx / x))
}

/// Base-2 logarithm: `(log₂ x)′ = 1 / (x·ln 2)`.
pub fn log2<T: Scalar>(a: impl Operand<T>) -> Result<Dual<T>> {
    let (x, dx) = parts(a);
    let x = positive("log2", x)?;
    Ok(Dual::new(x.log2(), dx / (x * T::LN_2())))
}

/// Base-10 logarithm: `(log₁₀ x)′ = 1 / (x·ln 10)`.
pub fn log10<T: Scalar>(a: impl Operand<T>) -> Result<Dual<T>> {
    let (x, dx) = parts(a);
    let x = positive("log10", x)?;
    Ok(Dual::new(x.log10(), dx / (x * T::LN_10())))
}

/// `ln(1 + x)`: derivative `1 / (x + 1)`.
pub fn log1p<T: Scalar>(a: impl Operand<T>) -> Result<Dual<T>> {
    let (x, dx) = parts(a);
    if x <= -T::one() {
        debug!(function = "log1p", "logarithm of a non-positive value");
        return Err(Error::domain("log1p", x));
    }
    Ok(Dual::new(x.ln_1p(), dx / (x + T::one())))
}

/// Exponential: `(eˣ)′ = eˣ`.
pub fn exp<T: Scalar>(a: impl Operand<T>) -> Result<Dual<T>> {
    let (x, dx) = parts(a);
    let e = x.exp();
    Ok(Dual::new(e, e * dx))
}

/// `eˣ − 1`: derivative `eˣ`.
pub fn expm1<T: Scalar>(a: impl Operand<T>) -> Result<Dual<T>> {
    let (x, dx) = parts(a);
    Ok(Dual::new(x.exp_m1(), x.exp() * dx))
}

/// Sine: `(sin x)′ = cos x`.
pub fn sin<T: Scalar>(a: impl Operand<T>) -> Result<Dual<T>> {
    let (x, dx) = parts(a);
    let value = defined("sin", x, x.sin())?;
    Ok(Dual::new(value, x.cos() * dx))
}

/// Cosine: `(cos x)′ = −sin x`.
pub fn cos<T: Scalar>(a: impl Operand<T>) -> Result<Dual<T>> {
    let (x, dx) = parts(a);
    let value = defined("cos", x, x.cos())?;
    Ok(Dual::new(value, -x.sin() * dx))
}

/// Tangent: `(tan x)′ = 1 / cos²x`.
pub fn tan<T: Scalar>(a: impl Operand<T>) -> Result<Dual<T>> {
    let (x, dx) = parts(a);
    let value = defined("tan", x, x.tan())?;
    let c = x.cos();
    Ok(Dual::new(value, ratio("tan", dx, c * c)?))
}

/// Hyperbolic sine: `(sinh x)′ = cosh x`.
pub fn sinh<T: Scalar>(a: impl Operand<T>) -> Result<Dual<T>> {
    let (x, dx) = parts(a);
    Ok(Dual::new(x.sinh(), x.cosh() * dx))
}

/// Hyperbolic cosine: `(cosh x)′ = sinh x`.
pub fn cosh<T: Scalar>(a: impl Operand<T>) -> Result<Dual<T>> {
    let (x, dx) = parts(a);
    Ok(Dual::new(x.cosh(), x.sinh() * dx))
}

/// Hyperbolic tangent: `(tanh x)′ = 1 / cosh²x`.
pub fn tanh<T: Scalar>(a: impl Operand<T>) -> Result<Dual<T>> {
    let (x, dx) = parts(a);
    let c = x.cosh();
    Ok(Dual::new(x.tanh(), dx / (c * c)))
}

/// Inverse sine: `(asin x)′ = 1 / √(1 − x²)`.
pub fn asin<T: Scalar>(a: impl Operand<T>) -> Result<Dual<T>> {
    let (x, dx) = parts(a);
    let value = defined("asin", x, x.asin())?;
    Ok(Dual::new(value, ratio("asin", dx, (T::one() - x * x).sqrt())?))
}

/// Inverse cosine: `(acos x)′ = −1 / √(1 − x²)`.
pub fn acos<T: Scalar>(a: impl Operand<T>) -> Result<Dual<T>> {
    let (x, dx) = parts(a);
    let value = defined("acos", x, x.acos())?;
    Ok(Dual::new(value, ratio("acos", -dx, (T::one() - x * x).sqrt())?))
}

/// Inverse tangent: `(atan x)′ = 1 / (1 + x²)`.
pub fn atan<T: Scalar>(a: impl Operand<T>) -> Result<Dual<T>> {
    let (x, dx) = parts(a);
    Ok(Dual::new(x.atan(), dx / (T::one() + x * x)))
}

/// Inverse hyperbolic sine: `(asinh x)′ = 1 / √(x² + 1)`.
pub fn asinh<T: Scalar>(a: impl Operand<T>) -> Result<Dual<T>> {
    let (x, dx) = parts(a);
    Ok(Dual::new(x.asinh(), dx / x.hypot(T::one())))
}

/// Inverse hyperbolic cosine: `(acosh x)′ = 1 / √(x² − 1)`.
pub fn acosh<T: Scalar>(a: impl Operand<T>) -> Result<Dual<T>> {
    let (x, dx) = parts(a);
    let value = defined("acosh", x, x.acosh())?;
    Ok(Dual::new(value, ratio("acosh", dx, (x * x - T::one()).sqrt())?))
}

/// Inverse hyperbolic tangent: `(atanh x)′ = 1 / (1 − x²)`.
///
/// Undefined for `|x| ≥ 1` (Rust returns infinities at ±1, which are
/// reported as domain errors here).
pub fn atanh<T: Scalar>(a: impl Operand<T>) -> Result<Dual<T>> {
    let (x, dx) = parts(a);
    if x.abs() >= T::one() {
        debug!(function = "atanh", "argument outside the open unit interval");
        return Err(Error::domain("atanh", x));
    }
    Ok(Dual::new(x.atanh(), dx / (T::one() - x * x)))
}

/// Error function: `(erf x)′ = 2/√π · e^(−x²)`.
pub fn erf<T: Scalar>(a: impl Operand<T>) -> Result<Dual<T>> {
    let (x, dx) = parts(a);
    Ok(Dual::new(x.erf(), T::FRAC_2_SQRT_PI() * (-(x * x)).exp() * dx))
}

/// Complementary error function: `(erfc x)′ = −2/√π · e^(−x²)`.
pub fn erfc<T: Scalar>(a: impl Operand<T>) -> Result<Dual<T>> {
    let (x, dx) = parts(a);
    Ok(Dual::new(x.erfc(), -T::FRAC_2_SQRT_PI() * (-(x * x)).exp() * dx))
}

/// Euclidean norm `√(a² + b²)` with derivative `(a·a′ + b·b′) / √(a² + b²)`.
///
/// Fails with [`Error::DivisionByZero`] at the origin, where the norm
/// has no derivative.
pub fn hypot<T: Scalar>(a: impl Operand<T>, b: impl Operand<T>) -> Result<Dual<T>> {
    let (x, dx) = parts(a);
    let (y, dy) = parts(b);
    let h = x.hypot(y);
    Ok(Dual::new(h, ratio("hypot", x * dx + y * dy, h)?))
}

/// Degrees to radians; the derivative is converted the same way.
pub fn radians<T: Scalar>(a: impl Operand<T>) -> Result<Dual<T>> {
    let (x, dx) = parts(a);
    Ok(Dual::new(x.to_radians(), dx.to_radians()))
}

/// Radians to degrees; the derivative is converted the same way.
pub fn degrees<T: Scalar>(a: impl Operand<T>) -> Result<Dual<T>> {
    let (x, dx) = parts(a);
    Ok(Dual::new(x.to_degrees(), dx.to_degrees()))
}

/// Sum of a sequence of operands with compensated summation applied to
/// both channels.
///
/// ```
/// use dualcalc::{functions::fsum, Dual};
///
/// let total = fsum([Dual::seed(0.1_f64), Dual::constant(0.2), Dual::new(0.3, 2.0)]);
/// assert!((total.value - 0.6).abs() < 1e-15);
/// assert_eq!(total.deriv, 3.0);
/// ```
pub fn fsum<T, A, I>(items: I) -> Dual<T>
where
    T: Scalar,
    A: Operand<T>,
    I: IntoIterator<Item = A>,
{
    let (values, derivs): (Vec<T>, Vec<T>) = items.into_iter().map(parts).unzip();
    Dual::new(compensated_sum(values), compensated_sum(derivs))
}

/// Absolute value as a plain scalar; the derivative is discarded, as
/// with [`arith::abs`].
pub fn fabs<T: Scalar>(a: impl Operand<T>) -> T {
    arith::abs(a)
}

/// Floored modulo; same as [`arith::rem`].
pub fn fmod<T: Scalar>(a: impl Operand<T>, b: impl Operand<T>) -> Result<Dual<T>> {
    arith::rem(a, b)
}

/// Magnitude of `a` with the sign of `b`.
///
/// The derivative follows `a` when the sign is kept and is negated when
/// the sign flips. `b` contributes no derivative.
pub fn copysign<T: Scalar>(a: impl Operand<T>, b: impl Operand<T>) -> Result<Dual<T>> {
    let (x, dx) = parts(a);
    let y = b.value_of();
    let deriv = if T::one().copysign(x * y) > T::zero() {
        dx
    } else {
        -dx
    };
    Ok(Dual::new(x.copysign(y), deriv))
}

/// Smallest integer not below the value; derivative zero.
pub fn ceil<T: Scalar>(a: impl Operand<T>) -> Result<Dual<T>> {
    Ok(Dual::constant(a.value_of().ceil()))
}

/// Largest integer not above the value; derivative zero.
pub fn floor<T: Scalar>(a: impl Operand<T>) -> Result<Dual<T>> {
    Ok(Dual::constant(a.value_of().floor()))
}

/// Integer part of the value; derivative zero.
pub fn trunc<T: Scalar>(a: impl Operand<T>) -> Result<Dual<T>> {
    Ok(Dual::constant(a.value_of().trunc()))
}

/// π as a constant.
pub fn pi<T: Scalar>() -> Dual<T> {
    Dual::constant(T::PI())
}

/// Euler's number as a constant.
pub fn e<T: Scalar>() -> Dual<T> {
    Dual::constant(T::E())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Evaluate `g` on a seeded variable and compare both channels.
    fn check<G>(g: G, x: f64, value: f64, deriv: f64)
    where
        G: Fn(Dual<f64>) -> Result<Dual<f64>>,
    {
        let y = g(Dual::seed(x)).unwrap();
        assert_relative_eq!(y.value, value, max_relative = 1e-12);
        assert_relative_eq!(y.deriv, deriv, max_relative = 1e-12);
    }

    #[test]
    fn roots_and_logarithms() {
        check(sqrt, 4.0, 2.0, 0.25);
        check(log, 2.0, 2.0_f64.ln(), 0.5);
        check(log2, 8.0, 3.0, 1.0 / (8.0 * 2.0_f64.ln()));
        check(log10, 100.0, 2.0, 1.0 / (100.0 * 10.0_f64.ln()));
        check(log1p, 1.0, 2.0_f64.ln(), 0.5);
    }

    #[test]
    fn exponentials() {
        let e1 = 1.0_f64.exp();
        check(exp, 1.0, e1, e1);
        check(expm1, 1.0, e1 - 1.0, e1);
    }

    #[test]
    fn trigonometric() {
        let x = 0.7_f64;
        check(sin, x, x.sin(), x.cos());
        check(cos, x, x.cos(), -x.sin());
        check(tan, x, x.tan(), 1.0 / (x.cos() * x.cos()));
        check(asin, 0.5, 0.5_f64.asin(), 1.0 / 0.75_f64.sqrt());
        check(acos, 0.5, 0.5_f64.acos(), -1.0 / 0.75_f64.sqrt());
        check(atan, 2.0, 2.0_f64.atan(), 0.2);
    }

    #[test]
    fn hyperbolic() {
        let x = 0.7_f64;
        check(sinh, x, x.sinh(), x.cosh());
        check(cosh, x, x.cosh(), x.sinh());
        check(tanh, x, x.tanh(), 1.0 / (x.cosh() * x.cosh()));
        check(asinh, 2.0, 2.0_f64.asinh(), 1.0 / 5.0_f64.sqrt());
        check(acosh, 2.0, 2.0_f64.acosh(), 1.0 / 3.0_f64.sqrt());
        check(atanh, 0.5, 0.5_f64.atanh(), 1.0 / 0.75);
    }

    #[test]
    fn error_functions() {
        let slope = 2.0 / std::f64::consts::PI.sqrt() * (-1.0_f64).exp();
        check(erf, 1.0, 0.8427007929497149, slope);
        check(erfc, 1.0, 0.15729920705028513, -slope);
    }

    #[test]
    fn angle_conversions_scale_derivative() {
        check(radians, 180.0, std::f64::consts::PI, std::f64::consts::PI / 180.0);
        check(degrees, std::f64::consts::PI, 180.0, 180.0 / std::f64::consts::PI);
    }

    #[test]
    fn hypot_combines_both_derivatives() {
        let h = hypot(Dual::seed(3.0_f64), 4.0).unwrap();
        assert_eq!(h.value, 5.0);
        assert_relative_eq!(h.deriv, 0.6, epsilon = 1e-15);

        let h = hypot(Dual::new(3.0_f64, 1.0), Dual::new(4.0, 1.0)).unwrap();
        assert_relative_eq!(h.deriv, 1.4, epsilon = 1e-15);

        assert_eq!(
            hypot(0.0_f64, 0.0),
            Err(Error::DivisionByZero { operation: "hypot" })
        );
    }

    #[test]
    fn plain_scalars_give_constant_results() {
        assert_eq!(sin(0.0_f64).unwrap(), Dual::constant(0.0));
        assert_eq!(exp(0.0_f64).unwrap(), Dual::constant(1.0));
    }

    #[test]
    fn domain_errors_propagate() {
        assert_eq!(
            sqrt(Dual::seed(-1.0_f64)),
            Err(Error::Domain {
                function: "sqrt",
                value: -1.0
            })
        );
        assert!(matches!(log(0.0_f64), Err(Error::Domain { function: "log", .. })));
        assert!(matches!(log2(-1.0_f64), Err(Error::Domain { .. })));
        assert!(matches!(log10(-1.0_f64), Err(Error::Domain { .. })));
        assert!(matches!(log1p(-1.0_f64), Err(Error::Domain { .. })));
        assert!(matches!(asin(1.5_f64), Err(Error::Domain { function: "asin", .. })));
        assert!(matches!(acos(-1.5_f64), Err(Error::Domain { .. })));
        assert!(matches!(acosh(0.5_f64), Err(Error::Domain { .. })));
        assert!(matches!(atanh(1.0_f64), Err(Error::Domain { function: "atanh", .. })));
    }

    #[test]
    fn vanishing_derivative_denominators_fail() {
        assert_eq!(
            sqrt(Dual::seed(0.0_f64)),
            Err(Error::DivisionByZero { operation: "sqrt" })
        );
        assert!(matches!(asin(1.0_f64), Err(Error::DivisionByZero { .. })));
        assert!(matches!(acosh(1.0_f64), Err(Error::DivisionByZero { .. })));
    }

    #[test]
    fn fsum_sums_both_channels() {
        let total = fsum([1.0_f64, 1e100, 1.0, -1e100]);
        assert_eq!(total, Dual::constant(2.0));

        let total = fsum(vec![Dual::seed(2.0_f64), Dual::new(3.0, -4.0)]);
        assert_eq!(total, Dual::new(5.0, -3.0));
    }

    #[test]
    fn fsum_keeps_infinities() {
        let total = fsum([f64::INFINITY]);
        assert_eq!(total, Dual::constant(f64::INFINITY));

        let total = fsum([Dual::seed(1.0_f64), Dual::new(2.0, f64::INFINITY)]);
        assert_eq!(total, Dual::new(3.0, f64::INFINITY));
    }

    #[test]
    fn copysign_flips_derivative_with_sign() {
        let y = copysign(Dual::seed(2.0_f64), -1.0).unwrap();
        assert_eq!(y, Dual::new(-2.0, -1.0));

        let y = copysign(Dual::seed(-2.0_f64), -1.0).unwrap();
        assert_eq!(y, Dual::new(-2.0, 1.0));

        let y = copysign(Dual::seed(2.0_f64), 5.0).unwrap();
        assert_eq!(y, Dual::new(2.0, 1.0));
    }

    #[test]
    fn rounding_functions_are_flat() {
        assert_eq!(ceil(Dual::seed(1.2_f64)).unwrap(), Dual::constant(2.0));
        assert_eq!(floor(Dual::seed(-1.2_f64)).unwrap(), Dual::constant(-2.0));
        assert_eq!(trunc(Dual::seed(-1.7_f64)).unwrap(), Dual::constant(-1.0));
    }

    #[test]
    fn fabs_and_fmod() {
        assert_eq!(fabs(Dual::new(-2.5_f64, 1.0)), 2.5);
        assert_eq!(fmod(Dual::seed(-7.5_f64), 2.0).unwrap(), Dual::new(0.5, 1.0));
    }

    #[test]
    fn constants() {
        assert_eq!(pi::<f64>(), Dual::constant(std::f64::consts::PI));
        assert_eq!(e::<f64>(), Dual::constant(std::f64::consts::E));
    }

    #[test]
    fn works_for_f32() {
        let y = sin(Dual::seed(0.0_f32)).unwrap();
        assert_eq!(y, Dual::new(0.0, 1.0));
        let y = erf(Dual::seed(0.0_f32)).unwrap();
        assert_relative_eq!(y.deriv, 2.0 / std::f32::consts::PI.sqrt(), epsilon = 1e-6);
    }
}
