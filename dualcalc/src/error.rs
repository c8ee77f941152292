//! Error types for dual-number arithmetic and the calculus drivers.
//!
//! Every fallible operation in the crate returns [`Result`]. Errors are
//! never transient: they mean the caller passed malformed input or
//! evaluated a function outside its domain.

use num_traits::ToPrimitive;
use thiserror::Error;

/// Failures raised while evaluating or differentiating a function.
///
/// # Examples
///
/// ```
/// use dualcalc::Error;
///
/// let err = Error::DivisionByZero { operation: "div" };
/// assert_eq!(format!("{}", err), "division by zero in div");
///
/// let err = Error::IndexOutOfRange { index: 3, len: 2 };
/// assert_eq!(
///     format!("{}", err),
///     "index 3 out of range for a point of dimension 2"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A denominator's value channel was exactly zero.
    #[error("division by zero in {operation}")]
    DivisionByZero {
        /// Operation or function whose denominator vanished
        operation: &'static str,
    },

    /// A primitive was evaluated outside its mathematical domain.
    #[error("math domain error: {function}({value})")]
    Domain {
        /// Name of the primitive
        function: &'static str,
        /// Offending input value
        value: f64,
    },

    /// `point` and `direction` have different lengths.
    #[error("point has {point} coordinates but direction has {direction}")]
    LengthMismatch {
        /// Length of the evaluation point
        point: usize,
        /// Length of the direction vector
        direction: usize,
    },

    /// A vector field's input or output has the wrong number of components.
    #[error("expected {expected} components, found {found}")]
    Dimension {
        /// Required number of components
        expected: usize,
        /// Number of components supplied
        found: usize,
    },

    /// A partial derivative was requested for a coordinate that does not exist.
    #[error("index {index} out of range for a point of dimension {len}")]
    IndexOutOfRange {
        /// Requested coordinate
        index: usize,
        /// Dimension of the point
        len: usize,
    },
}

impl Error {
    /// Domain error for `function` evaluated at `value`.
    pub(crate) fn domain<T: ToPrimitive>(function: &'static str, value: T) -> Self {
        Error::Domain {
            function,
            value: value.to_f64().unwrap_or(f64::NAN),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
