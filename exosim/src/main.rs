use exosim::{ScenarioConfig, Scenario, RenderSink, TextSink, NVec3};
use exosim::{bench_sampling, bench_update};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Exosphere particle model")]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Override the number of update steps
    #[arg(long)]
    steps: Option<usize>,

    /// Override the time step
    #[arg(long)]
    dt: Option<f64>,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Write the final point cloud and planet sphere to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Run the timing benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    if args.bench {
        bench_sampling();
        bench_update();
        return Ok(());
    }

    let mut scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    if let Some(steps) = args.steps {
        scenario_cfg.parameters.steps = steps;
    }
    if let Some(dt) = args.dt {
        scenario_cfg.parameters.dt = dt;
    }
    if let Some(seed) = args.seed {
        scenario_cfg.swarm.seed = Some(seed);
    }

    let mut scenario = Scenario::build_scenario(scenario_cfg).context("failed to build scenario")?;

    // LOS and intensity models are external, only the geometry is reported here
    if let Some(imager) = &scenario.imager {
        let boresight = imager.boresight();
        info!(
            position = ?imager.position.as_slice(),
            target = ?imager.target.as_slice(),
            boresight = ?boresight.as_slice(),
            fov = imager.fov,
            pixangres = imager.pixangres,
            model = %imager.model,
            min_rad = imager.min_rad,
            max_rad = imager.max_rad,
            "imager geometry"
        );
    }

    scenario.run();

    let stats = scenario.swarm.stats();
    info!(
        n = stats.n,
        t = scenario.swarm.state().t,
        min_radius = stats.min_radius,
        max_radius = stats.max_radius,
        mean_radius = stats.mean_radius,
        mean_speed = stats.mean_speed,
        "final swarm"
    );

    if let Some(path) = args.output {
        let file = File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        let mut sink = TextSink::new(BufWriter::new(file));
        sink.point_cloud(scenario.swarm.positions())?;
        sink.reference_sphere(NVec3::zeros(), scenario.profile.planet_radius)?;
        sink.into_inner()?;
        info!(path = %path.display(), "wrote point cloud");
    }

    Ok(())
}
