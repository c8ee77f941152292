//! Curl of the velocity field of a river.
//!
//! Water flows along y with speed `C·x·(W − x)` across a river of width
//! `W`: still at both banks, fastest in the middle. The z component of
//! the curl, `C·(W − 2x)`, shows which way a paddle wheel dropped at `x`
//! would spin.
//!
//! Run with: `cargo run --example river_flow`

use dualcalc::functions::{cosh, exp};
use dualcalc::{curl, divergence, Dual, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Width of the river in metres.
const W: f64 = 20.0;
/// Peak flow divided by `(W/2)²`.
const C: f64 = 0.1;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== River flow: curl of (0, C·x·(W − x), 0) ===\n");

    let flow = |v: &[Dual<f64>]| -> Result<Vec<Dual<f64>>> {
        let x = v[0];
        Ok(vec![Dual::constant(0.0), C * x * (W - x), Dual::constant(0.0)])
    };

    for metre in 0..=20 {
        let x = f64::from(metre);
        let rotation = curl(flow, &[x, 0.0, 0.0])?;
        println!("{:>2} : {:?}", metre, rotation);
    }

    println!("\n=== F(x, y, z) = (8e^(−x), cosh z, −y²) at (2, −1, 4) ===\n");

    let field = |v: &[Dual<f64>]| -> Result<Vec<Dual<f64>>> {
        let (x, y, z) = (v[0], v[1], v[2]);
        Ok(vec![8.0 * exp(-x)?, cosh(z)?, -y.pow(2.0)?])
    };
    let point = [2.0, -1.0, 4.0];

    let div = divergence(field, &point)?;
    let rotation = curl(field, &point)?;
    info!(?point, div, ?rotation, "field evaluated");
    println!("  div F = {} (expected −8e^(−2) = {})", div, -8.0 * (-2.0_f64).exp());
    println!(
        "  curl F = {:?} (expected (−2y − sinh z, 0, 0) = ({}, 0, 0))",
        rotation,
        -2.0 * -1.0 - 4.0_f64.sinh()
    );

    Ok(())
}
