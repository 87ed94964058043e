//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `navigator_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use navigator_core::{layout, Domain, Score, ValuePoint};

fn main() {
    println!("navigator_core ping={}", navigator_core::ping());
    println!("navigator_core version={}", navigator_core::core_version());

    // One point per domain on the middle ring exercises the quadrant table.
    let points: Vec<ValuePoint> = Domain::ALL
        .into_iter()
        .filter_map(|domain| {
            let label = domain.metadata().predefined_values.first()?;
            ValuePoint::new(label, domain, Score::clamped(3)).ok()
        })
        .collect();

    match layout(&points) {
        Ok(placed) => {
            for point in placed.iter() {
                println!(
                    "layout domain=\"{}\" angle_deg={:.1} x={:.3} y={:.3}",
                    point.domain, point.angle_deg, point.position.x, point.position.y
                );
            }
        }
        Err(err) => {
            eprintln!("layout failed: {err}");
            std::process::exit(1);
        }
    }
}
