//! Dual numbers for forward-mode automatic differentiation.
//!
//! A dual number carries a value and its derivative together, so
//! evaluating a function on dual arguments computes the derivative as a
//! side effect of computing the value.
//!
//! # Mathematical Background
//!
//! A dual number has the form `a + a′·ε` where `ε² = 0`. Arithmetic on
//! dual numbers follows the rules
//!
//! - `(a + a′·ε) + (b + b′·ε) = (a+b) + (a′+b′)·ε`
//! - `(a + a′·ε) * (b + b′·ε) = ab + (a′b + ab′)·ε`
//! - `g(a + a′·ε) = g(a) + g′(a)·a′·ε` for a differentiable `g`
//!
//! so the chain rule is applied one operation at a time and never has to
//! be written down for the composite function.
//!
//! # Constants and variables
//!
//! A dual with derivative `0` is a **constant**; a dual with derivative
//! `1` is a **seeded variable**, the input being differentiated with
//! respect to. Plain scalars are accepted wherever a dual is, through the
//! [`Operand`] trait, and behave like constants.
//!
//! ```
//! use dualcalc::{derivative_of, value_of, Dual};
//!
//! let x = Dual::seed(3.0_f64);      // dx/dx = 1
//! let y = x * x + 2.0 * x;          // y = x² + 2x
//!
//! assert_eq!(value_of(y), 15.0);
//! assert_eq!(derivative_of(y), 8.0);
//!
//! // Plain scalars read as constants.
//! assert_eq!(value_of(4.0_f64), 4.0);
//! assert_eq!(derivative_of(4.0_f64), 0.0);
//! ```

use crate::scalar::Scalar;
use num_traits::{One, Zero};
use std::fmt;

/// A dual number representing a value and its derivative.
///
/// `Dual { value, deriv }` stands for `value + deriv·ε` with `ε² = 0`.
/// The type is `Copy`; every operation returns a fresh dual and leaves
/// its inputs untouched.
///
/// # Examples
///
/// ```
/// use dualcalc::Dual;
///
/// // f(x) = x³ - 2x + 1 at x = 2
/// let x = Dual::seed(2.0_f64);
/// let f = x * x * x - 2.0 * x + 1.0;
///
/// assert_eq!(f.value, 5.0);   // 8 - 4 + 1
/// assert_eq!(f.deriv, 10.0);  // 3x² - 2 at x = 2
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dual<T> {
    /// The primal value
    pub value: T,
    /// The derivative (tangent)
    pub deriv: T,
}

impl<T> Dual<T> {
    /// Create a dual number with explicit value and derivative.
    ///
    /// ```
    /// use dualcalc::Dual;
    ///
    /// let d = Dual::new(3.0, 1.5);
    /// assert_eq!(d.value, 3.0);
    /// assert_eq!(d.deriv, 1.5);
    /// ```
    pub fn new(value: T, deriv: T) -> Self {
        Dual { value, deriv }
    }

    /// Create a constant (derivative = 0).
    ///
    /// ```
    /// use dualcalc::Dual;
    ///
    /// let c = Dual::constant(5.0);
    /// assert_eq!(c.deriv, 0.0);
    /// ```
    pub fn constant(value: T) -> Self
    where
        T: Zero,
    {
        Dual {
            value,
            deriv: T::zero(),
        }
    }

    /// Create a seeded variable (derivative = 1).
    ///
    /// Use this for the input being differentiated with respect to.
    ///
    /// ```
    /// use dualcalc::Dual;
    ///
    /// let x = Dual::seed(3.0);
    /// assert_eq!(x.deriv, 1.0);  // dx/dx = 1
    /// ```
    pub fn seed(value: T) -> Self
    where
        T: One,
    {
        Dual {
            value,
            deriv: T::one(),
        }
    }

    /// Alias of [`Dual::seed`].
    pub fn variable(value: T) -> Self
    where
        T: One,
    {
        Self::seed(value)
    }
}

impl<T: Scalar> Dual<T> {
    /// Whether the derivative channel is exactly zero.
    pub fn is_constant(&self) -> bool {
        self.deriv.is_zero()
    }

    /// Raise `self` to the power `exponent`; see [`arith::pow`](crate::arith::pow).
    ///
    /// ```
    /// use dualcalc::Dual;
    ///
    /// # fn main() -> dualcalc::Result<()> {
    /// let x = Dual::seed(2.0_f64);
    /// let cube = x.pow(3.0)?;
    /// assert_eq!(cube.value, 8.0);
    /// assert_eq!(cube.deriv, 12.0);
    /// # Ok(())
    /// # }
    /// ```
    pub fn pow(self, exponent: impl Operand<T>) -> crate::Result<Self> {
        crate::arith::pow(self, exponent)
    }

    /// Raise `self` to a plain scalar power.
    ///
    /// Same as [`Dual::pow`] with a constant exponent, so the log term of
    /// the power rule is never taken and negative bases are fine.
    pub fn powf(self, exponent: T) -> crate::Result<Self> {
        crate::arith::pow(self, exponent)
    }
}

impl<T: Zero> From<T> for Dual<T> {
    fn from(value: T) -> Self {
        Dual::constant(value)
    }
}

impl<T: fmt::Display> fmt::Display for Dual<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dual({}, {})", self.value, self.deriv)
    }
}

/// Anything readable as a `(value, derivative)` pair: a [`Dual`] or a
/// plain scalar, which reads as a constant.
///
/// Every arithmetic rule and elementary function takes its arguments
/// through this trait, so mixed scalar/dual expressions are handled by
/// one code path.
pub trait Operand<T>: Copy {
    /// The real part.
    fn value_of(&self) -> T;

    /// The derivative part; zero for plain scalars.
    fn derivative_of(&self) -> T;

    /// Promote to a dual number.
    fn to_dual(&self) -> Dual<T> {
        Dual::new(self.value_of(), self.derivative_of())
    }
}

impl<T: Scalar> Operand<T> for Dual<T> {
    #[inline]
    fn value_of(&self) -> T {
        self.value
    }

    #[inline]
    fn derivative_of(&self) -> T {
        self.deriv
    }
}

macro_rules! scalar_operand {
    ($($t:ty),*) => {$(
        impl Operand<$t> for $t {
            #[inline]
            fn value_of(&self) -> $t {
                *self
            }

            #[inline]
            fn derivative_of(&self) -> $t {
                0.0
            }
        }
    )*};
}

scalar_operand!(f32, f64);

/// Real part of a dual, or the scalar itself.
pub fn value_of<T: Scalar>(x: impl Operand<T>) -> T {
    x.value_of()
}

/// Derivative part of a dual, or `0` for a plain scalar.
pub fn derivative_of<T: Scalar>(x: impl Operand<T>) -> T {
    x.derivative_of()
}

/// Shorthand for [`Dual::seed`].
pub fn seed<T: Scalar>(value: T) -> Dual<T> {
    Dual::seed(value)
}

/// Split an operand into `(value, derivative)`.
#[inline]
pub(crate) fn parts<T: Scalar>(x: impl Operand<T>) -> (T, T) {
    (x.value_of(), x.derivative_of())
}
