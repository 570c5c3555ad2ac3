//! Operations the driver programs can run.
//!
//! Each operation implements [`quantum_harness::Operation`] for
//! [`QuantumSimulator`](crate::simulator::QuantumSimulator) and is picked by
//! the driver binary before the harness starts.

pub mod deutsch_jozsa;
pub mod hello_world;
pub mod morgana;

pub use deutsch_jozsa::{DeutschJozsaReport, Oracle, RunDeutschJozsaAlgorithm};
pub use hello_world::HelloWorld;
pub use morgana::{Coin, GameOutcome, PlayMorganasGame};
