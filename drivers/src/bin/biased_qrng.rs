use std::process::ExitCode;

use clap::Parser;
use quantum_harness_drivers::cli::{self, DriverArgs};
use quantum_harness_drivers::operations::PlayMorganasGame;

#[tokio::main]
async fn main() -> ExitCode {
    let args = DriverArgs::parse();
    let game = PlayMorganasGame::biased().with_max_rounds(args.max_rounds);
    cli::run(&args, &game).await
}
