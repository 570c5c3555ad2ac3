use async_trait::async_trait;
use quantum_harness::{HarnessResult, Operation, Parameters, SimulationResource};

use crate::simulator::QuantumSimulator;

/// Line printed by [`HelloWorld`].
pub const GREETING: &str = "Hello, classical world!";

/// Prints a greeting. Touches no qubits.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelloWorld;

#[async_trait]
impl Operation<QuantumSimulator> for HelloWorld {
    type Output = String;

    fn name(&self) -> &str {
        "HelloWorld"
    }

    async fn run(&self, sim: &mut QuantumSimulator, _: &Parameters) -> HarnessResult<String> {
        sim.ensure_open()?;
        println!("{GREETING}");
        Ok(GREETING.to_string())
    }
}

#[cfg(test)]
mod tests {
    use quantum_harness::{ExecutionHarness, HarnessError, RunPhase, ScriptedInput};

    use super::*;
    use crate::simulator::{SimulatorConfig, SimulatorFactory};

    #[tokio::test]
    async fn test_hello_world_runs_without_prompt() {
        let mut harness = ExecutionHarness::new(SimulatorFactory::default(), ScriptedInput::default());

        let greeting = harness.execute(&HelloWorld).await.unwrap();

        assert_eq!(greeting, GREETING);
        assert!(harness.input().prompts().is_empty());
        assert!(!harness.last_run().unwrap().reached(RunPhase::InputPending));
    }

    #[tokio::test]
    async fn test_hello_world_on_closed_simulator() {
        let mut sim = QuantumSimulator::new(&SimulatorConfig::default()).unwrap();
        sim.release().unwrap();
        let err = HelloWorld.run(&mut sim, &Parameters::new()).await.unwrap_err();
        assert!(matches!(err, HarnessError::ResourceClosed(_)));
    }
}
