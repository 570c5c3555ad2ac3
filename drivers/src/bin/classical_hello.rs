use std::process::ExitCode;

use clap::Parser;
use quantum_harness_drivers::cli::{self, DriverArgs};
use quantum_harness_drivers::operations::HelloWorld;

#[tokio::main]
async fn main() -> ExitCode {
    let args = DriverArgs::parse();
    cli::run(&args, &HelloWorld).await
}
