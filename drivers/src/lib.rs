//! Driver programs for the execution harness.
//!
//! Each binary under `src/bin` picks one operation and hands it to
//! [`cli::run`], which builds a [`SimulatorFactory`] from the command line,
//! prompts on the console if the operation needs a parameter, and maps the
//! outcome to an exit code.

pub mod cli;
pub mod logging;
pub mod operations;
pub mod simulator;

pub use cli::DriverArgs;
pub use simulator::{QuantumSimulator, Qubit, SimulatorConfig, SimulatorFactory};
