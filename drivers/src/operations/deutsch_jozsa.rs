//! Single-query Deutsch–Jozsa check over the four one-bit oracles.

use async_trait::async_trait;
use quantum_harness::{HarnessError, HarnessResult, Operation, Parameters};
use serde::Serialize;
use tracing::debug;

use crate::simulator::{QuantumSimulator, Qubit};

/// A one-bit function `f`, applied as `|x⟩|y⟩ → |x⟩|y ⊕ f(x)⟩`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Oracle {
    /// `f(x) = 0`
    Zero,
    /// `f(x) = 1`
    One,
    /// `f(x) = x`
    Id,
    /// `f(x) = ¬x`
    Not,
}

impl Oracle {
    /// Every oracle, constant ones first.
    pub const ALL: [Oracle; 4] = [Oracle::Zero, Oracle::One, Oracle::Id, Oracle::Not];

    /// Whether `f` is balanced (as opposed to constant).
    pub fn is_balanced(self) -> bool {
        matches!(self, Oracle::Id | Oracle::Not)
    }

    /// Apply the oracle to `control` (input) and `target` (output).
    pub fn apply(self, sim: &mut QuantumSimulator, control: Qubit, target: Qubit) -> HarnessResult<()> {
        match self {
            Oracle::Zero => Ok(()),
            Oracle::One => sim.x(target),
            Oracle::Id => sim.cnot(control, target),
            Oracle::Not => {
                sim.x(control)?;
                sim.cnot(control, target)?;
                sim.x(control)
            }
        }
    }
}

impl std::fmt::Display for Oracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Oracle::Zero => "zero",
            Oracle::One => "one",
            Oracle::Id => "id",
            Oracle::Not => "not",
        };
        f.write_str(name)
    }
}

/// Decide with one oracle call whether `oracle` is balanced.
///
/// The target starts in |−⟩ so the oracle's output flips the control's
/// phase; the control is then read out in the X basis. Both qubits are
/// returned to the pool in |0⟩.
pub fn check_if_oracle_is_balanced(sim: &mut QuantumSimulator, oracle: Oracle) -> HarnessResult<bool> {
    let control = sim.allocate()?;
    let target = sim.allocate()?;

    sim.h(control)?;
    sim.x(target)?;
    sim.h(target)?;

    oracle.apply(sim, control, target)?;

    sim.h(target)?;
    sim.x(target)?;

    let balanced = sim.measure_x_and_reset(control)?;
    sim.deallocate(target)?;
    sim.deallocate(control)?;
    Ok(balanced)
}

/// Per-oracle verdicts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeutschJozsaReport {
    /// `(oracle, measured as balanced)` in [`Oracle::ALL`] order.
    pub checks: Vec<(Oracle, bool)>,
}

/// The `RunDeutschJozsaAlgorithm` operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunDeutschJozsaAlgorithm;

#[async_trait]
impl Operation<QuantumSimulator> for RunDeutschJozsaAlgorithm {
    type Output = DeutschJozsaReport;

    fn name(&self) -> &str {
        "RunDeutschJozsaAlgorithm"
    }

    async fn run(&self, sim: &mut QuantumSimulator, _: &Parameters) -> HarnessResult<DeutschJozsaReport> {
        let mut checks = Vec::with_capacity(Oracle::ALL.len());
        for oracle in Oracle::ALL {
            let balanced = check_if_oracle_is_balanced(sim, oracle)?;
            debug!(%oracle, balanced, "oracle checked");
            if balanced != oracle.is_balanced() {
                return Err(HarnessError::operation_failed(
                    self.name(),
                    format!("Test failed for {oracle} oracle."),
                ));
            }
            checks.push((oracle, balanced));
        }

        println!("All tests passed!");
        Ok(DeutschJozsaReport { checks })
    }
}

#[cfg(test)]
mod tests {
    use quantum_harness::{ExecutionHarness, ScriptedInput};

    use super::*;
    use crate::simulator::{SimulatorConfig, SimulatorFactory};

    #[test]
    fn test_every_oracle_is_classified() {
        for seed in 0..10 {
            let mut sim = QuantumSimulator::new(&SimulatorConfig {
                qubits: 2,
                seed: Some(seed),
            })
            .unwrap();
            for oracle in Oracle::ALL {
                assert_eq!(
                    check_if_oracle_is_balanced(&mut sim, oracle).unwrap(),
                    oracle.is_balanced(),
                    "{oracle} oracle, seed {seed}"
                );
                assert_eq!(sim.allocated(), 0);
            }
        }
    }

    #[tokio::test]
    async fn test_operation_reports_all_checks() {
        let mut harness = ExecutionHarness::new(SimulatorFactory::default(), ScriptedInput::default());

        let report = harness.execute(&RunDeutschJozsaAlgorithm).await.unwrap();

        assert_eq!(
            report.checks,
            vec![
                (Oracle::Zero, false),
                (Oracle::One, false),
                (Oracle::Id, true),
                (Oracle::Not, true),
            ]
        );
    }

    #[tokio::test]
    async fn test_single_qubit_register_is_too_small() {
        let factory = SimulatorFactory::new(SimulatorConfig {
            qubits: 1,
            seed: None,
        });
        let mut harness = ExecutionHarness::new(factory, ScriptedInput::default());

        let err = harness.execute(&RunDeutschJozsaAlgorithm).await.unwrap_err();

        assert!(matches!(err, HarnessError::Backend(_)));
        assert_eq!(err.exit_code(), quantum_harness::error::EXIT_OPERATION_FAILED);
    }
}
