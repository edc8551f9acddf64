use wingworks::{bench_step, FrameWriter, Scenario, ScenarioConfig, SlidingWindowVector, Vec2};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file, looked up under `scenarios/` unless absolute
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Time `World::step` over a range of domain sizes instead of running a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path).with_context(|| format!("opening {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig =
        serde_yaml::from_reader(reader).with_context(|| format!("parsing {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    if args.bench {
        bench_step()?;
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;

    if let Some(threads) = scenario_cfg.engine.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("configuring the worker pool")?;
    }

    let Scenario { mut world, run, .. } = Scenario::build_scenario(scenario_cfg)?;

    let writer = FrameWriter::create(&run.output_dir)
        .with_context(|| format!("creating output directory {}", run.output_dir))?;
    writer.write_airfoil(&world).context("writing airfoil.csv")?;

    let mut total_force = Vec2::zeros();
    let mut recent_force = SlidingWindowVector::new(run.force_window);
    let mut mv_prev = 0.0;
    let mut t0 = Instant::now();

    for frame in 1..=run.frames {
        for _ in 0..run.steps_per_frame {
            world.step();
        }

        writer
            .write_frame(frame, &world, run.write_positions)
            .with_context(|| format!("writing frame {frame}"))?;

        let force = world.force_on_foil();
        total_force += force;
        recent_force.add(force);
        world.reset_force_on_foil();

        let dt = t0.elapsed().as_secs_f64();
        t0 = Instant::now();

        let mv = world.momentum();
        let dmv = mv - mv_prev;
        mv_prev = mv;

        let avg = recent_force.value();
        info!(frame, frames = run.frames, mv, dmv, dt, avg_fx = avg.x, avg_fy = avg.y, "frame");
    }

    // the accumulator holds the force on the particles; the foil feels the opposite
    let on_foil = -total_force;
    info!(fx = on_foil.x, fy = on_foil.y, "summed force on foil");
    println!("Summed force on foil: ({}, {})", on_foil.x, on_foil.y);

    Ok(())
}
