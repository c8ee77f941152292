//! Arithmetic on dual numbers.
//!
//! Each rule is a free function over two [`Operand`]s, so a dual and a
//! plain scalar can appear on either side:
//!
//! | Operation   | Value     | Derivative                                   |
//! |-------------|-----------|----------------------------------------------|
//! | [`add`]       | a + b     | a′ + b′                                      |
//! | [`sub`]       | a − b     | a′ − b′                                      |
//! | [`mul`]       | a·b       | a·b′ + b·a′                                  |
//! | [`div`]       | a / b     | (b·a′ − a·b′) / b²                           |
//! | [`pow`]       | aᵇ        | b·aᵇ⁻¹·a′ + ln(a)·aᵇ·b′                      |
//! | [`floor_div`] | ⌊a / b⌋   | 0                                            |
//! | [`rem`]       | a mod b   | a′ − ⌊a / b⌋·b′                              |
//! | [`neg`]       | −a        | −a′                                          |
//! | [`pos`]       | a         | a′                                           |
//!
//! The `std::ops` impls at the bottom of this module forward to these
//! functions. `/` and `%` produce a [`Result`] because a zero divisor is
//! an error rather than an infinity.
//!
//! ```
//! use dualcalc::Dual;
//!
//! # fn main() -> dualcalc::Result<()> {
//! // f(x) = (x + 1) / (x + 2) at x = 3
//! let x = Dual::seed(3.0_f64);
//! let f = ((x + 1.0) / (x + 2.0))?;
//!
//! assert_eq!(f.value, 0.8);
//! assert!((f.deriv - 0.04).abs() < 1e-12);  // 1/(x+2)²
//! # Ok(())
//! # }
//! ```

use crate::dual::{parts, Dual, Operand};
use crate::error::{Error, Result};
use crate::scalar::{two, Scalar};
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

/// Sum rule.
pub fn add<T: Scalar>(a: impl Operand<T>, b: impl Operand<T>) -> Dual<T> {
    let (na, da) = parts(a);
    let (nb, db) = parts(b);
    Dual::new(na + nb, da + db)
}

/// Difference rule.
pub fn sub<T: Scalar>(a: impl Operand<T>, b: impl Operand<T>) -> Dual<T> {
    let (na, da) = parts(a);
    let (nb, db) = parts(b);
    Dual::new(na - nb, da - db)
}

/// Product rule: `(a·b)′ = a·b′ + b·a′`.
pub fn mul<T: Scalar>(a: impl Operand<T>, b: impl Operand<T>) -> Dual<T> {
    let (na, da) = parts(a);
    let (nb, db) = parts(b);
    Dual::new(na * nb, na * db + nb * da)
}

/// Quotient rule: `(a/b)′ = (b·a′ − a·b′) / b²`.
///
/// Fails with [`Error::DivisionByZero`] when the divisor's value is zero,
/// whatever its derivative.
pub fn div<T: Scalar>(a: impl Operand<T>, b: impl Operand<T>) -> Result<Dual<T>> {
    let (na, da) = parts(a);
    let (nb, db) = parts(b);
    if nb.is_zero() {
        return Err(Error::DivisionByZero { operation: "div" });
    }
    Ok(Dual::new(na / nb, (nb * da - na * db) / (nb * nb)))
}

/// Power rule generalised to a dual exponent.
///
/// The derivative is the sum of two terms, `b·aᵇ⁻¹·a′` and
/// `ln(a)·aᵇ·b′`. A term whose incoming derivative (`a′` or `b′`) is
/// exactly zero is skipped rather than evaluated, so raising a negative
/// base to a constant exponent never takes the logarithm of that base.
///
/// Fails with [`Error::DivisionByZero`] for zero raised to a negative
/// power, and with [`Error::Domain`] when the power is not real (negative
/// base, fractional exponent) or the log term needs `ln` of a
/// non-positive base.
///
/// ```
/// use dualcalc::{arith::pow, Dual};
///
/// # fn main() -> dualcalc::Result<()> {
/// // d/dx x² at x = -1: the exponent is constant, so no ln(-1) is taken
/// let square = pow(Dual::seed(-1.0_f64), 2.0)?;
/// assert_eq!(square.value, 1.0);
/// assert_eq!(square.deriv, -2.0);
///
/// // d/dx 2ˣ at x = 3 is 2³·ln 2
/// let exp2 = pow(2.0_f64, Dual::seed(3.0))?;
/// assert_eq!(exp2.value, 8.0);
/// assert!((exp2.deriv - 8.0 * 2.0_f64.ln()).abs() < 1e-12);
/// # Ok(())
/// # }
/// ```
pub fn pow<T: Scalar>(a: impl Operand<T>, b: impl Operand<T>) -> Result<Dual<T>> {
    let (na, da) = parts(a);
    let (nb, db) = parts(b);
    let value = checked_powf(na, nb)?;
    let mut deriv = T::zero();
    if !da.is_zero() {
        deriv = deriv + nb * checked_powf(na, nb - T::one())? * da;
    }
    if !db.is_zero() {
        if na <= T::zero() {
            return Err(Error::domain("log", na));
        }
        deriv = deriv + na.ln() * value * db;
    }
    Ok(Dual::new(value, deriv))
}

/// Floored division. The result is piecewise constant, so its
/// derivative is zero.
pub fn floor_div<T: Scalar>(a: impl Operand<T>, b: impl Operand<T>) -> Result<Dual<T>> {
    let (quotient, _) = floored_divmod(a.value_of(), b.value_of(), "floor_div")?;
    Ok(Dual::constant(quotient))
}

/// Floored modulo: the remainder takes the sign of the divisor, and
/// `a == b·floor_div(a, b) + rem(a, b)`.
pub fn rem<T: Scalar>(a: impl Operand<T>, b: impl Operand<T>) -> Result<Dual<T>> {
    let (na, da) = parts(a);
    let (nb, db) = parts(b);
    let (quotient, remainder) = floored_divmod(na, nb, "rem")?;
    Ok(Dual::new(remainder, da - quotient * db))
}

/// Negation.
pub fn neg<T: Scalar>(a: impl Operand<T>) -> Dual<T> {
    let (na, da) = parts(a);
    Dual::new(-na, -da)
}

/// Unary plus: returns the operand unchanged as a dual.
pub fn pos<T: Scalar>(a: impl Operand<T>) -> Dual<T> {
    a.to_dual()
}

/// Magnitude of the value channel.
///
/// **The derivative is discarded**: the result is a plain scalar, so
/// anything computed from it downstream is a constant. Differentiating
/// through `abs` is not supported.
///
/// ```
/// use dualcalc::{arith::abs, Dual};
///
/// assert_eq!(abs(Dual::new(-3.0_f64, 1.0)), 3.0);
/// ```
pub fn abs<T: Scalar>(a: impl Operand<T>) -> T {
    a.value_of().abs()
}

fn checked_powf<T: Scalar>(base: T, exponent: T) -> Result<T> {
    if base.is_zero() && exponent < T::zero() {
        return Err(Error::DivisionByZero { operation: "pow" });
    }
    let value = base.powf(exponent);
    if value.is_nan() && !base.is_nan() && !exponent.is_nan() {
        return Err(Error::domain("pow", base));
    }
    Ok(value)
}

/// Quotient and remainder with floor semantics, exact in the same cases
/// as `fmod`.
fn floored_divmod<T: Scalar>(a: T, b: T, operation: &'static str) -> Result<(T, T)> {
    if b.is_zero() {
        return Err(Error::DivisionByZero { operation });
    }
    let mut remainder = a % b;
    let mut quotient = (a - remainder) / b;
    if !remainder.is_zero() {
        if (b < T::zero()) != (remainder < T::zero()) {
            remainder = remainder + b;
            quotient = quotient - T::one();
        }
    } else {
        remainder = T::zero().copysign(b);
    }
    let quotient = if !quotient.is_zero() {
        let floored = quotient.floor();
        if quotient - floored > T::one() / two() {
            floored + T::one()
        } else {
            floored
        }
    } else {
        T::zero().copysign(a / b)
    };
    Ok((quotient, remainder))
}

// Operator overloads.

impl<T: Scalar> Add for Dual<T> {
    type Output = Dual<T>;

    fn add(self, rhs: Self) -> Dual<T> {
        add(self, rhs)
    }
}

impl<T: Scalar> Add<T> for Dual<T> {
    type Output = Dual<T>;

    fn add(self, rhs: T) -> Dual<T> {
        add(self, rhs)
    }
}

impl<T: Scalar> Sub for Dual<T> {
    type Output = Dual<T>;

    fn sub(self, rhs: Self) -> Dual<T> {
        sub(self, rhs)
    }
}

impl<T: Scalar> Sub<T> for Dual<T> {
    type Output = Dual<T>;

    fn sub(self, rhs: T) -> Dual<T> {
        sub(self, rhs)
    }
}

impl<T: Scalar> Mul for Dual<T> {
    type Output = Dual<T>;

    fn mul(self, rhs: Self) -> Dual<T> {
        mul(self, rhs)
    }
}

impl<T: Scalar> Mul<T> for Dual<T> {
    type Output = Dual<T>;

    fn mul(self, rhs: T) -> Dual<T> {
        mul(self, rhs)
    }
}

/// Division yields a `Result`; use `?` on the quotient.
impl<T: Scalar> Div for Dual<T> {
    type Output = Result<Dual<T>>;

    fn div(self, rhs: Self) -> Result<Dual<T>> {
        div(self, rhs)
    }
}

impl<T: Scalar> Div<T> for Dual<T> {
    type Output = Result<Dual<T>>;

    fn div(self, rhs: T) -> Result<Dual<T>> {
        div(self, rhs)
    }
}

/// Floored modulo, see [`rem`].
impl<T: Scalar> Rem for Dual<T> {
    type Output = Result<Dual<T>>;

    fn rem(self, rhs: Self) -> Result<Dual<T>> {
        rem(self, rhs)
    }
}

impl<T: Scalar> Rem<T> for Dual<T> {
    type Output = Result<Dual<T>>;

    fn rem(self, rhs: T) -> Result<Dual<T>> {
        rem(self, rhs)
    }
}

impl<T: Scalar> Neg for Dual<T> {
    type Output = Dual<T>;

    fn neg(self) -> Dual<T> {
        neg(self)
    }
}

// A scalar on the left is promoted to a constant and goes through the
// same rule as the dual-on-the-left case.
macro_rules! scalar_lhs_ops {
    ($($t:ty),*) => {$(
        impl Add<Dual<$t>> for $t {
            type Output = Dual<$t>;

            fn add(self, rhs: Dual<$t>) -> Dual<$t> {
                add(self, rhs)
            }
        }

        impl Sub<Dual<$t>> for $t {
            type Output = Dual<$t>;

            fn sub(self, rhs: Dual<$t>) -> Dual<$t> {
                sub(self, rhs)
            }
        }

        impl Mul<Dual<$t>> for $t {
            type Output = Dual<$t>;

            fn mul(self, rhs: Dual<$t>) -> Dual<$t> {
                mul(self, rhs)
            }
        }

        impl Div<Dual<$t>> for $t {
            type Output = Result<Dual<$t>>;

            fn div(self, rhs: Dual<$t>) -> Result<Dual<$t>> {
                div(self, rhs)
            }
        }

        impl Rem<Dual<$t>> for $t {
            type Output = Result<Dual<$t>>;

            fn rem(self, rhs: Dual<$t>) -> Result<Dual<$t>> {
                rem(self, rhs)
            }
        }
    )*};
}

scalar_lhs_ops!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn addition_and_subtraction() {
        let x = Dual::seed(5.0_f64);
        let c = Dual::constant(2.0);

        assert_eq!(x + c, Dual::new(7.0, 1.0));
        assert_eq!(x - c, Dual::new(3.0, 1.0));
        assert_eq!(2.0 - x, Dual::new(-3.0, -1.0));
    }

    #[test]
    fn multiplication_implements_product_rule() {
        let x = Dual::seed(3.0_f64);
        let y = x * x;

        assert_eq!(y.value, 9.0);
        assert_eq!(y.deriv, 6.0); // d/dx(x²) at x=3 is 2*3 = 6
    }

    #[test]
    fn division_quotient_rule() {
        // f(x) = 1/x at x=2
        let x = Dual::seed(2.0_f64);
        let y = (1.0 / x).unwrap();

        assert_eq!(y.value, 0.5);
        assert_eq!(y.deriv, -0.25);
    }

    #[test]
    fn division_by_zero_value_fails() {
        let zero = Dual::new(0.0_f64, 1.0);
        assert_eq!(
            Dual::seed(1.0) / zero,
            Err(Error::DivisionByZero { operation: "div" })
        );
        assert_eq!(
            div(3.0_f64, 0.0),
            Err(Error::DivisionByZero { operation: "div" })
        );
        assert!((Dual::seed(1.0_f64) % 0.0).is_err());
        assert!(floor_div(Dual::seed(1.0_f64), 0.0).is_err());
    }

    #[test]
    fn pow_with_constant_exponent() {
        let y = pow(Dual::seed(1.2_f64), 3.0).unwrap();
        assert_relative_eq!(y.value, 1.728, epsilon = 1e-12);
        assert_relative_eq!(y.deriv, 3.0 * 1.44, epsilon = 1e-12);
    }

    #[test]
    fn pow_with_variable_exponent() {
        // d/dx xˣ = xˣ(ln x + 1)
        let x = Dual::seed(2.0_f64);
        let y = pow(x, x).unwrap();
        assert_relative_eq!(y.value, 4.0, epsilon = 1e-12);
        assert_relative_eq!(y.deriv, 4.0 * (2.0_f64.ln() + 1.0), epsilon = 1e-12);
    }

    #[test]
    fn pow_skips_log_term_for_constant_exponent() {
        // Negative base is fine while the exponent carries no derivative.
        let y = pow(Dual::seed(-2.0_f64), 3.0).unwrap();
        assert_eq!(y.value, -8.0);
        assert_eq!(y.deriv, 12.0);
    }

    #[test]
    fn pow_log_term_needs_positive_base() {
        let result = pow(-2.0_f64, Dual::seed(2.0));
        assert_eq!(
            result,
            Err(Error::Domain {
                function: "log",
                value: -2.0
            })
        );
    }

    #[test]
    fn pow_of_zero_to_negative_power_fails() {
        assert_eq!(
            pow(0.0_f64, -1.0),
            Err(Error::DivisionByZero { operation: "pow" })
        );
        // 0^0.5 is fine but its derivative needs 0^-0.5.
        assert_eq!(
            pow(Dual::seed(0.0_f64), 0.5),
            Err(Error::DivisionByZero { operation: "pow" })
        );
    }

    #[test]
    fn pow_of_negative_base_fractional_exponent_is_domain_error() {
        assert!(matches!(
            pow(-8.0_f64, 1.0 / 3.0),
            Err(Error::Domain { function: "pow", .. })
        ));
    }

    #[test]
    fn floor_division_has_zero_derivative() {
        let q = floor_div(Dual::seed(7.5_f64), 2.0).unwrap();
        assert_eq!(q, Dual::constant(3.0));

        let q = floor_div(Dual::seed(-7.5_f64), 2.0).unwrap();
        assert_eq!(q, Dual::constant(-4.0));
    }

    #[test]
    fn remainder_takes_sign_of_divisor() {
        let r = rem(Dual::seed(-7.5_f64), 2.0).unwrap();
        assert_eq!(r.value, 0.5);
        assert_eq!(r.deriv, 1.0);

        let r = rem(7.5_f64, Dual::new(-2.0, 1.0)).unwrap();
        assert_eq!(r.value, -0.5);
        // d(a mod b) = a′ - ⌊a/b⌋·b′ = 0 - (-4)·1
        assert_eq!(r.deriv, 4.0);
    }

    #[test]
    fn divmod_identity_holds() {
        for &(a, b) in &[(7.5_f64, 2.0), (-7.5, 2.0), (7.5, -2.0), (-7.5, -2.0), (6.0, 3.0)] {
            let q = floor_div(a, b).unwrap().value;
            let r = rem(a, b).unwrap().value;
            assert_relative_eq!(b * q + r, a, epsilon = 1e-12);
        }
    }

    #[test]
    fn negation_and_unary_plus() {
        let x = Dual::new(3.0_f64, 2.0);
        assert_eq!(-x, Dual::new(-3.0, -2.0));
        assert_eq!(neg(x), -x);
        assert_eq!(pos(x), x);
        assert_eq!(pos(4.0_f64), Dual::constant(4.0));
    }

    #[test]
    fn abs_drops_derivative() {
        assert_eq!(abs(Dual::new(-3.0_f64, 1.0)), 3.0);
        assert_eq!(abs(2.0_f64), 2.0);
    }

    #[test]
    fn scalar_on_either_side_matches_constant() {
        let x = Dual::new(1.5_f64, 0.5);
        let c = 4.0;
        let k = Dual::constant(c);

        assert_eq!(c + x, k + x);
        assert_eq!(x + c, x + k);
        assert_eq!(c - x, k - x);
        assert_eq!(c * x, k * x);
        assert_eq!(c / x, k / x);
        assert_eq!(x / c, x / k);
        assert_eq!(c % x, k % x);
    }

    #[test]
    fn works_for_f32() {
        let x = Dual::seed(3.0_f32);
        let y = 2.0_f32 * x * x;
        assert_eq!(y, Dual::new(18.0, 12.0));
    }
}
