//! The [`Scalar`] trait: primitive float types a [`Dual`](crate::Dual)
//! may carry in its value and derivative channels.

use crate::dual::Operand;
use num_traits::{Float, FloatConst};
use std::fmt::{Debug, Display};

/// A primitive real number usable inside a dual number.
///
/// Implemented for `f32` and `f64`. On top of [`Float`] and
/// [`FloatConst`] it supplies the error function pair, which the
/// standard library does not provide. Every scalar is also an
/// [`Operand`] of itself, read as a constant.
pub trait Scalar:
    Float + FloatConst + Operand<Self> + Default + Debug + Display + Send + Sync + 'static
{
    /// Gauss error function.
    fn erf(self) -> Self;

    /// Complementary error function, `1 - erf(x)`.
    fn erfc(self) -> Self;
}

impl Scalar for f32 {
    #[inline]
    fn erf(self) -> Self {
        libm::erff(self)
    }

    #[inline]
    fn erfc(self) -> Self {
        libm::erfcf(self)
    }
}

impl Scalar for f64 {
    #[inline]
    fn erf(self) -> Self {
        libm::erf(self)
    }

    #[inline]
    fn erfc(self) -> Self {
        libm::erfc(self)
    }
}

/// `2` without a fallible numeric cast.
#[inline]
pub(crate) fn two<T: Scalar>() -> T {
    T::one() + T::one()
}

/// Sum with Neumaier compensation, so cancellation between large
/// terms does not swallow the small ones.
///
/// Once the running sum overflows or turns NaN the compensation is no
/// longer tracked, so infinite terms sum to an infinity rather than NaN.
pub(crate) fn compensated_sum<T, I>(values: I) -> T
where
    T: Scalar,
    I: IntoIterator<Item = T>,
{
    let mut sum = T::zero();
    let mut compensation = T::zero();
    for x in values {
        let t = sum + x;
        if !t.is_finite() {
            sum = t;
            continue;
        }
        if sum.abs() >= x.abs() {
            compensation = compensation + ((sum - t) + x);
        } else {
            compensation = compensation + ((x - t) + sum);
        }
        sum = t;
    }
    sum + compensation
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn erf_matches_reference_values() {
        assert_eq!(Scalar::erf(0.0_f64), 0.0);
        assert_relative_eq!(Scalar::erf(1.0_f64), 0.8427007929497149, epsilon = 1e-15);
        assert_relative_eq!(Scalar::erfc(1.0_f64), 0.15729920705028513, epsilon = 1e-15);
        assert_relative_eq!(Scalar::erf(0.5_f32), 0.5204999_f32, epsilon = 1e-6);
    }

    #[test]
    fn compensated_sum_keeps_small_terms() {
        let values = [1.0_f64, 1e100, 1.0, -1e100];
        assert_eq!(compensated_sum(values), 2.0);
        // Naive left fold loses both ones.
        assert_eq!(values.iter().sum::<f64>(), 0.0);
    }

    #[test]
    fn compensated_sum_of_nothing_is_zero() {
        assert_eq!(compensated_sum(Vec::<f64>::new()), 0.0);
    }

    #[test]
    fn compensated_sum_with_infinite_terms() {
        assert_eq!(compensated_sum([f64::INFINITY]), f64::INFINITY);
        assert_eq!(compensated_sum([1.0, f64::INFINITY, 2.0]), f64::INFINITY);
        assert_eq!(compensated_sum([-1.0, f64::NEG_INFINITY]), f64::NEG_INFINITY);
        assert_eq!(compensated_sum([f64::MAX, f64::MAX]), f64::INFINITY);
        assert!(compensated_sum([f64::INFINITY, f64::NEG_INFINITY]).is_nan());
    }

    #[test]
    fn two_is_two() {
        assert_eq!(two::<f64>(), 2.0);
        assert_eq!(two::<f32>(), 2.0);
    }
}
