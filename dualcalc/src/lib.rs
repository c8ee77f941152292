#![deny(missing_docs)]
//! Forward-mode automatic differentiation with dual numbers.
//!
//! This crate provides:
//!
//! - [`Dual`]: a value and its derivative carried together, with
//!   arithmetic that applies the calculus rules as it goes
//!   ([`arith`])
//! - [`functions`]: derivative-aware elementary functions (`sin`,
//!   `exp`, `log`, `erf`, `hypot`, …)
//! - [`calculus`]: drivers that seed inputs and read derivatives back,
//!   giving [`partial_d`], [`gradient`], [`directional_derivative`],
//!   [`divergence`] and [`curl`]
//!
//! # Single-variable differentiation
//!
//! Evaluate the function on a seeded variable; the result's `deriv` is
//! the derivative at that point:
//!
//! ```
//! use dualcalc::{functions::cos, Dual};
//!
//! # fn main() -> dualcalc::Result<()> {
//! // f(x) = x²·cos(x/2) at x = 2
//! let x = Dual::seed(2.0_f64);
//! let y = x.pow(2.0)? * cos((x / 2.0)?)?;
//!
//! assert!((y.value - 2.161209).abs() < 1e-6);
//! assert!((y.deriv - 0.478267).abs() < 1e-6);
//! # Ok(())
//! # }
//! ```
//!
//! # Vector calculus
//!
//! Fields are closures over a slice of duals:
//!
//! ```
//! use dualcalc::{curl, divergence, functions::{cos, sin}, Dual, Result};
//!
//! # fn main() -> Result<()> {
//! // F(x, y, z) = (x·y + sin x + 3x, x − y − 5x, cos 2x − sin²y)
//! let field = |v: &[Dual<f64>]| -> Result<Vec<Dual<f64>>> {
//!     let (x, y) = (v[0], v[1]);
//!     Ok(vec![
//!         x * y + sin(x)? + 3.0 * x,
//!         x - y - 5.0 * x,
//!         cos(2.0 * x)? - sin(y)?.pow(2.0)?,
//!     ])
//! };
//! let point = [3.5, 2.1, -3.3];
//!
//! let div = divergence(field, &point)?;
//! assert!((div - 3.163543312709203).abs() < 1e-12);
//!
//! let [cx, cy, cz] = curl(field, &point)?;
//! assert!((cx - 0.8715757724135882).abs() < 1e-12);
//! assert!((cy - 1.3139731974375781).abs() < 1e-12);
//! assert!((cz + 7.5).abs() < 1e-12);
//! # Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! Division by a zero value, functions evaluated outside their domain
//! and malformed driver input all surface as [`Error`]. `/` and `%`
//! return a [`Result`], as does every elementary function, so
//! expressions use `?` where they can fail.
//!
//! # Limitations
//!
//! [`arith::abs`] and [`functions::fabs`] return a plain scalar and
//! drop the derivative. Only first derivatives are computed.
//!
//! # Feature flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Dual`]

pub mod arith;
pub mod calculus;
pub mod dual;
pub mod error;
pub mod functions;
pub mod scalar;

pub use calculus::{curl, derivative, directional_derivative, divergence, gradient, partial_d};
pub use dual::{derivative_of, seed, value_of, Dual, Operand};
pub use error::{Error, Result};
pub use scalar::Scalar;
