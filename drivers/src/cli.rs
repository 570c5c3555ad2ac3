//! Shared command line and entry point for the driver binaries.

use std::process::ExitCode;

use clap::{ArgAction, Parser};
use quantum_harness::{Console, ExecutionHarness, Operation};
use tracing::warn;

use crate::logging;
use crate::operations::morgana::DEFAULT_MAX_ROUNDS;
use crate::simulator::{DEFAULT_QUBITS, QuantumSimulator, SimulatorConfig, SimulatorFactory};

/// Options common to every driver.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct DriverArgs {
    /// Number of qubits in the simulator register.
    #[arg(long, env = "QSIM_QUBITS", default_value_t = DEFAULT_QUBITS)]
    pub qubits: usize,

    /// Seed for reproducible measurement outcomes.
    #[arg(long, env = "QSIM_SEED")]
    pub seed: Option<u64>,

    /// Give up on repeat-until loops after this many rounds.
    #[arg(long, env = "QSIM_MAX_ROUNDS", default_value_t = DEFAULT_MAX_ROUNDS)]
    pub max_rounds: u64,

    /// Print the run record as JSON to stderr when the run ends.
    #[arg(long)]
    pub report: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl DriverArgs {
    /// Simulator settings from the parsed arguments.
    pub fn simulator_config(&self) -> SimulatorConfig {
        SimulatorConfig {
            qubits: self.qubits,
            seed: self.seed,
        }
    }
}

/// Run `operation` once on a fresh simulator, prompting on the console.
///
/// Maps the outcome to the process exit code: `0` on success, otherwise
/// [`HarnessError::exit_code`](quantum_harness::HarnessError::exit_code).
pub async fn run<O>(args: &DriverArgs, operation: &O) -> ExitCode
where
    O: Operation<QuantumSimulator>,
{
    logging::init(args.verbose);

    let factory = SimulatorFactory::new(args.simulator_config());
    let mut harness = ExecutionHarness::new(factory, Console::stdio());
    let result = harness.execute(operation).await;

    if args.report {
        match harness.last_run().map(|record| record.to_json()) {
            Some(Ok(json)) => eprintln!("{json}"),
            Some(Err(err)) => warn!(error = %err, "could not render run record"),
            None => {}
        }
    }

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = DriverArgs::try_parse_from(["driver"]).unwrap();
        assert_eq!(args.qubits, DEFAULT_QUBITS);
        assert_eq!(args.max_rounds, DEFAULT_MAX_ROUNDS);
        assert!(!args.report);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_flags() {
        let args =
            DriverArgs::try_parse_from(["driver", "--qubits", "5", "--seed", "9", "--report", "-vv"])
                .unwrap();
        assert_eq!(
            args.simulator_config(),
            SimulatorConfig {
                qubits: 5,
                seed: Some(9)
            }
        );
        assert!(args.report);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_bad_flag_value() {
        assert!(DriverArgs::try_parse_from(["driver", "--qubits", "many"]).is_err());
    }
}
