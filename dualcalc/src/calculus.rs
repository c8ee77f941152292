//! Differentiation drivers: partial derivatives, gradients, directional
//! derivatives, divergence and curl.
//!
//! Each driver evaluates the target function on dual arguments, choosing
//! which coordinates are **seeded** (given a non-zero derivative), and
//! reads the derivative channel of the result. Unseeded coordinates are
//! passed as constants.
//!
//! Scalar fields `f: ℝⁿ → ℝ` are closures `Fn(&[Dual<T>]) -> Result<Dual<T>>`;
//! vector fields `F: ℝⁿ → ℝⁿ` are closures
//! `Fn(&[Dual<T>]) -> Result<Vec<Dual<T>>>`.
//!
//! # Cost
//!
//! | Driver                      | Evaluations of the target |
//! |-----------------------------|---------------------------|
//! | [`partial_d`]               | 1                         |
//! | [`gradient`]                | n                         |
//! | [`directional_derivative`]  | 1                         |
//! | [`divergence`]              | n                         |
//! | [`curl`]                    | 3                         |
//!
//! # Example
//!
//! ```
//! use dualcalc::{directional_derivative, gradient, functions::sin, Dual, Result};
//!
//! # fn main() -> Result<()> {
//! // f(x, y) = x·y + sin(x)
//! let f = |v: &[Dual<f64>]| -> Result<Dual<f64>> { Ok(v[0] * v[1] + sin(v[0])?) };
//!
//! let grad = gradient(f, &[2.5, 3.5])?;
//! assert!((grad[0] - 2.6988563844530664).abs() < 1e-12);  // y + cos(x)
//! assert_eq!(grad[1], 2.5);                               // x
//!
//! // One pass instead of two, same as grad · direction.
//! let slope = directional_derivative(f, &[2.5, 3.5], &[1.5, -2.2])?;
//! assert!((slope - (grad[0] * 1.5 - grad[1] * 2.2)).abs() < 1e-12);
//! # Ok(())
//! # }
//! ```

use crate::dual::Dual;
use crate::error::{Error, Result};
use crate::scalar::{compensated_sum, Scalar};
use tracing::{debug, trace};

/// Arguments for one evaluation: coordinate `index` seeded, the rest
/// constant.
fn seeded<T: Scalar>(point: &[T], index: usize) -> Vec<Dual<T>> {
    point
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            if i == index {
                Dual::seed(x)
            } else {
                Dual::constant(x)
            }
        })
        .collect()
}

fn expect_components(expected: usize, found: usize) -> Result<()> {
    if expected != found {
        debug!(expected, found, "vector field has the wrong number of components");
        return Err(Error::Dimension { expected, found });
    }
    Ok(())
}

/// Derivative and value of a single-variable function at `x`.
///
/// ```
/// use dualcalc::{derivative, Dual};
///
/// # fn main() -> dualcalc::Result<()> {
/// let (value, slope) = derivative(|x: Dual<f64>| Ok(x * x), 3.0)?;
/// assert_eq!((value, slope), (9.0, 6.0));
/// # Ok(())
/// # }
/// ```
pub fn derivative<T, F>(f: F, x: T) -> Result<(T, T)>
where
    T: Scalar,
    F: Fn(Dual<T>) -> Result<Dual<T>>,
{
    let y = f(Dual::seed(x))?;
    Ok((y.value, y.deriv))
}

/// Partial derivative `∂f/∂xᵢ` at `point`, with `i = index`.
///
/// Fails with [`Error::IndexOutOfRange`] when `index >= point.len()`.
pub fn partial_d<T, F>(f: F, point: &[T], index: usize) -> Result<T>
where
    T: Scalar,
    F: Fn(&[Dual<T>]) -> Result<Dual<T>>,
{
    if index >= point.len() {
        debug!(index, dimension = point.len(), "partial derivative index out of range");
        return Err(Error::IndexOutOfRange {
            index,
            len: point.len(),
        });
    }
    trace!(index, dimension = point.len(), "seeding coordinate");
    Ok(f(&seeded(point, index))?.deriv)
}

/// Gradient `∇f = [∂f/∂x₀, …, ∂f/∂xₙ₋₁]` at `point`.
///
/// Evaluates `f` once per coordinate; nothing is shared between the
/// evaluations. An empty point yields an empty gradient.
pub fn gradient<T, F>(f: F, point: &[T]) -> Result<Vec<T>>
where
    T: Scalar,
    F: Fn(&[Dual<T>]) -> Result<Dual<T>>,
{
    (0..point.len())
        .map(|index| partial_d(&f, point, index))
        .collect()
}

/// Directional derivative `∇f · direction` at `point`, computed in a
/// single evaluation by seeding coordinate `i` with `direction[i]`.
///
/// `direction` is used as given (not normalised). Fails with
/// [`Error::LengthMismatch`] when the lengths differ.
pub fn directional_derivative<T, F>(f: F, point: &[T], direction: &[T]) -> Result<T>
where
    T: Scalar,
    F: Fn(&[Dual<T>]) -> Result<Dual<T>>,
{
    if point.len() != direction.len() {
        debug!(
            point = point.len(),
            direction = direction.len(),
            "direction does not match point"
        );
        return Err(Error::LengthMismatch {
            point: point.len(),
            direction: direction.len(),
        });
    }
    trace!(dimension = point.len(), "seeding all coordinates along direction");
    let args: Vec<Dual<T>> = point
        .iter()
        .zip(direction)
        .map(|(&x, &dx)| Dual::new(x, dx))
        .collect();
    Ok(f(&args)?.deriv)
}

/// Divergence `∇·F`, the trace of the Jacobian of `field` at `point`.
///
/// Coordinate `i` is seeded on its own and only the derivative of output
/// component `i` is kept; the diagonal terms are summed with compensated
/// summation. Fails with [`Error::Dimension`] when `field` returns a
/// vector whose length differs from the point's.
///
/// ```
/// use dualcalc::{divergence, functions::{cosh, exp}, Dual, Result};
///
/// # fn main() -> Result<()> {
/// // F(x, y, z) = (8e^(-x), cosh z, -y²)
/// let field = |v: &[Dual<f64>]| -> Result<Vec<Dual<f64>>> {
///     Ok(vec![8.0 * exp(-v[0])?, cosh(v[2])?, -v[1].pow(2.0)?])
/// };
/// let div = divergence(field, &[2.0, -1.0, 4.0])?;
/// assert!((div - (-8.0 * (-2.0_f64).exp())).abs() < 1e-12);
/// # Ok(())
/// # }
/// ```
pub fn divergence<T, F>(field: F, point: &[T]) -> Result<T>
where
    T: Scalar,
    F: Fn(&[Dual<T>]) -> Result<Vec<Dual<T>>>,
{
    let mut diagonal = Vec::with_capacity(point.len());
    for index in 0..point.len() {
        trace!(index, dimension = point.len(), "seeding coordinate");
        let output = field(&seeded(point, index))?;
        expect_components(point.len(), output.len())?;
        diagonal.push(output[index].deriv);
    }
    Ok(compensated_sum(diagonal))
}

/// Curl `∇×F` of a three-dimensional `field` at `point`:
///
/// ```text
/// (∂Fz/∂y − ∂Fy/∂z,  ∂Fx/∂z − ∂Fz/∂x,  ∂Fy/∂x − ∂Fx/∂y)
/// ```
///
/// Each coordinate is seeded once (three evaluations in total) and the
/// off-diagonal derivatives of the other two components are read.
/// Fails with [`Error::Dimension`] unless both `point` and the field's
/// output have exactly three components.
pub fn curl<T, F>(field: F, point: &[T]) -> Result<[T; 3]>
where
    T: Scalar,
    F: Fn(&[Dual<T>]) -> Result<Vec<Dual<T>>>,
{
    expect_components(3, point.len())?;
    let column = |index: usize| -> Result<[T; 3]> {
        trace!(index, "seeding coordinate");
        let output = field(&seeded(point, index))?;
        expect_components(3, output.len())?;
        Ok([output[0].deriv, output[1].deriv, output[2].deriv])
    };

    let [_, fy_x, fz_x] = column(0)?;
    let [fx_y, _, fz_y] = column(1)?;
    let [fx_z, fy_z, _] = column(2)?;
    Ok([fz_y - fy_z, fx_z - fz_x, fy_x - fx_y])
}
