// navigator_sim/src/main.rs

use anyhow::Context;
use clap::Parser;
use navigator_sim::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let mut scenario = load_scenario(&cli.scenario)
        .with_context(|| format!("could not load scenario {}", cli.scenario.display()))?;
    cli.apply_overrides(&mut scenario);

    if cli.print_config {
        println!("{}", toml::to_string_pretty(&scenario)?);
        return Ok(());
    }

    let max_ticks = scenario.simulation.max_ticks;
    let rng = SimulationRng::new(scenario.simulation.seed);
    let mut simulation = Simulation::new(scenario, rng).context("could not set up simulation")?;
    let summary = simulation.run(max_ticks)?;
    summary.log();

    if !summary.all_reached() {
        tracing::warn!("Tick budget spent before every Move intent was reached");
    }
    Ok(())
}

/// `--log-level` wins over `RUST_LOG`, which wins over `info`.
fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
