//! Quantum Harness — run one operation against a scoped simulation resource
//!
//! This crate provides the **execution harness**: the lifecycle contract for
//! acquiring a simulation resource, running a single externally defined
//! operation against it asynchronously, and releasing the resource on every
//! exit path.
//!
//! # Overview
//!
//! The crate defines:
//! - An [`ExecutionHarness`] that owns one run end to end
//! - A [`SimulationResource`] / [`ResourceFactory`] pair for the backend handle
//! - An [`Operation`] capability implemented once per unit of work
//! - [`LineSource`] input with locale-invariant [`parse_real`]
//! - [`RunRecord`] / [`RunPhase`] for tracing a run through its states
//! - [`HarnessError`] with pre-acquisition and run-time variants
//!
//! # The Operation Trait
//!
//! The trait is generic over the resource type `R`, so operations can target
//! a concrete backend without the harness knowing about it:
//!
//! ```ignore
//! use quantum_harness::{HarnessResult, Operation, Parameters};
//! use async_trait::async_trait;
//!
//! struct HelloWorld;
//!
//! #[async_trait]
//! impl Operation<MySimulator> for HelloWorld {
//!     type Output = ();
//!     fn name(&self) -> &str { "HelloWorld" }
//!     async fn run(&self, sim: &mut MySimulator, _: &Parameters) -> HarnessResult<()> {
//!         println!("Hello, classical world!");
//!         Ok(())
//!     }
//! }
//! ```
//!
//! # Lifecycle
//!
//! ```text
//!   parameters() ──→ acquire() ──→ run() ──→ .await ──→ release()
//!   (prompt, parse)   (sync)       (async)               (sync, always)
//! ```

pub mod error;
pub mod harness;
pub mod input;
pub mod operation;
pub mod resource;
pub mod run;

pub use error::{HarnessError, HarnessResult};
pub use harness::ExecutionHarness;
pub use input::{Console, LineSource, ScriptedInput, parse_real, read_real};
pub use operation::{Operation, OperationInvocation, ParameterSpec, Parameters};
pub use resource::{ResourceFactory, ResourceGuard, SimulationResource};
pub use run::{PhaseTransition, RunOutcome, RunPhase, RunRecord};
