//! Single-variable derivatives and the gradient of a scalar field.
//!
//! Run with: `cargo run --example basic`
//! (set `RUST_LOG=trace` to see the seeding done by the drivers)

use dualcalc::functions::{cos, sin, sqrt};
use dualcalc::{derivative, directional_derivative, gradient, Dual, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn square(x: Dual<f64>) -> Result<Dual<f64>> {
    x.pow(2.0)
}

fn damped(x: Dual<f64>) -> Result<Dual<f64>> {
    Ok(x.pow(2.0)? * cos((x / 2.0)?)?)
}

fn ratio(x: Dual<f64>) -> Result<Dual<f64>> {
    (5.0 * x.pow(3.0)? - sin(2.0 * x)?.pow(2.0)?) / sqrt(x - 1.0)?
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Single-variable derivatives ===\n");

    // Expected: (9, 6), (2.161209, 0.478267), (23.836690, 24.683324)
    let cases: [(&str, fn(Dual<f64>) -> Result<Dual<f64>>, f64); 3] = [
        ("x²", square, 3.0),
        ("x²·cos(x/2)", damped, 2.0),
        ("(5x³ − sin²2x)/√(x−1)", ratio, 1.5),
    ];
    for (name, f, x) in cases {
        let (value, slope) = derivative(f, x)?;
        println!("Value of {} at {} is {}", name, x, value);
        println!("Derivative of {} at {} is {}", name, x, slope);
        println!();
    }

    println!("=== Gradient of f(x, y) = x·y + sin(x) ===\n");

    let f = |v: &[Dual<f64>]| -> Result<Dual<f64>> { Ok(v[0] * v[1] + sin(v[0])?) };
    let point = [2.5, 3.5];
    let direction = [1.5, -2.2];

    let grad = gradient(f, &point)?;
    info!(?point, ?grad, "gradient computed");
    println!("  ∇f(2.5, 3.5) = {:?}", grad);

    let slope = directional_derivative(f, &point, &direction)?;
    println!("  ∇f · (1.5, −2.2) = {} (one pass)", slope);
    println!(
        "  ∇f · (1.5, −2.2) = {} (from the gradient)",
        grad[0] * direction[0] + grad[1] * direction[1]
    );

    Ok(())
}
