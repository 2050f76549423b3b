// navigator_sim/src/cli.rs

use crate::config::ScenarioConfig;
use clap::Parser;
use std::path::PathBuf;

/// Navigator Sim: a headless closed-loop test bench for the navigator.
///
/// This struct defines the command-line arguments accepted by the
/// `navigator_sim` binary.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the scenario TOML file to run.
    #[arg(short, long, default_value = "assets/scenarios/00_open_field.toml")]
    pub scenario: PathBuf,

    /// Override the scenario's tick budget.
    #[arg(short, long)]
    pub ticks: Option<u64>,

    /// Override the scenario's PRNG seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log filter, e.g. `debug` or `navigator_core=debug,info`. Falls back to
    /// `RUST_LOG`, then `info`.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the resolved scenario as TOML and exit.
    #[arg(long, default_value_t = false)]
    pub print_config: bool,
}

impl Cli {
    /// Applies command-line overrides on top of a loaded scenario.
    pub fn apply_overrides(&self, scenario: &mut ScenarioConfig) {
        if let Some(ticks) = self.ticks {
            scenario.simulation.max_ticks = ticks;
        }
        if let Some(seed) = self.seed {
            scenario.simulation.seed = Some(seed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_scenario() {
        let cli = Cli::try_parse_from(["navigator_sim", "--ticks", "42", "--seed", "9"]).unwrap();
        assert_eq!(cli.scenario, PathBuf::from("assets/scenarios/00_open_field.toml"));

        let mut scenario = ScenarioConfig::default();
        cli.apply_overrides(&mut scenario);
        assert_eq!(scenario.simulation.max_ticks, 42);
        assert_eq!(scenario.simulation.seed, Some(9));
    }

    #[test]
    fn absent_flags_keep_scenario_values() {
        let cli = Cli::try_parse_from(["navigator_sim", "-s", "other.toml"]).unwrap();
        let mut scenario = ScenarioConfig::default();
        scenario.simulation.seed = Some(1);
        cli.apply_overrides(&mut scenario);
        assert_eq!(scenario.simulation.seed, Some(1));
        assert_eq!(scenario.simulation.max_ticks, 600);
        assert!(!cli.print_config);
    }
}
