use std::time::Instant;

use crate::configuration::config::PairPolicy;
use crate::simulation::airfoil::Airfoil;
use crate::simulation::engine::Engine;
use crate::simulation::geometry::Vec2;
use crate::simulation::params::Parameters;
use crate::simulation::world::World;
use crate::error::SimResult;

/// Helper to build a world of `width x height` with the foil in the usual spot
fn make_world(width: f64, height: f64, policy: PairPolicy) -> SimResult<World> {
    let airfoil = Airfoil::naca2412(width / 8.0, height / 2.0, width / 4.0, 10f64.to_radians())?;
    let parameters = Parameters {
        width,
        height,
        max_particle_speed: 0.0005,
        wind: Vec2::new(0.11, 0.0),
    };
    let engine = Engine { pair_policy: policy, ..Engine::default() };
    World::new(airfoil, parameters, engine)
}

/// Time `World::step` for growing domains (16:9, density 10)
/// Paste output directly into a spreadsheet to graph
pub fn bench_step() -> SimResult<()> {
    let heights = [9.0, 18.0, 36.0, 72.0, 144.0];
    let steps = 10; // steps averaged per size

    println!("N,unique_ms,legacy_ms");

    for h in heights {
        let w = h * 16.0 / 9.0;
        let mut per_policy = Vec::with_capacity(2); // (particles, ms per step)

        for policy in [PairPolicy::Unique, PairPolicy::Legacy] {
            let mut world = make_world(w, h, policy)?;

            // Warm-up
            world.step();

            let t0 = Instant::now();
            for _ in 0..steps {
                world.step();
            }
            let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;
            per_policy.push((world.particles().len(), ms));
        }

        println!("{},{:.3},{:.3}", per_policy[0].0, per_policy[0].1, per_policy[1].1);
    }
    Ok(())
}
