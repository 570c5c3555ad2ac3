//! Morgana's game: flip a quantum coin until it lands on `Zero`.
//!
//! Each round allocates a qubit, prepares the coin, measures it and returns
//! the qubit. Morgana wins a round on `One`; the game ends on the first
//! `Zero`.

use async_trait::async_trait;
use quantum_harness::{HarnessError, HarnessResult, Operation, ParameterSpec, Parameters};
use serde::Serialize;
use tracing::debug;

use crate::simulator::{QuantumSimulator, Qubit};

/// Name of the win-probability parameter.
pub const WIN_PROBABILITY: &str = "win_probability";
/// Prompt shown before reading the win probability.
pub const WIN_PROBABILITY_PROMPT: &str = "Pick a win probability for Morgana: ";
/// Default cap on the number of rounds.
pub const DEFAULT_MAX_ROUNDS: u64 = 10_000;

/// How the coin is prepared each round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coin {
    /// `H` on |0⟩: even odds, no parameter needed.
    Fair,
    /// `Ry(2·acos(√(1−p)))` on |0⟩, with `p` read at runtime.
    Biased,
}

/// Result of one game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameOutcome {
    /// Rounds played, including the final losing one.
    pub rounds: u64,
    /// Probability of Morgana winning a single round.
    pub win_probability: f64,
}

/// The `PlayMorganasGame` operation.
#[derive(Debug, Clone)]
pub struct PlayMorganasGame {
    coin: Coin,
    max_rounds: u64,
}

impl PlayMorganasGame {
    /// Game with a fair coin.
    pub fn fair() -> Self {
        Self {
            coin: Coin::Fair,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    /// Game with a coin biased by a prompted win probability.
    pub fn biased() -> Self {
        Self {
            coin: Coin::Biased,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    /// Fail the game after `max_rounds` rounds without a `Zero`.
    pub fn with_max_rounds(mut self, max_rounds: u64) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    fn win_probability(&self, parameters: &Parameters) -> HarnessResult<f64> {
        let p = match self.coin {
            Coin::Fair => return Ok(0.5),
            Coin::Biased => parameters.real(WIN_PROBABILITY).ok_or_else(|| {
                HarnessError::operation_failed(self.name(), "missing win probability")
            })?,
        };
        if !(0.0..=1.0).contains(&p) {
            return Err(HarnessError::operation_failed(
                self.name(),
                format!("win probability {p} is outside [0, 1]"),
            ));
        }
        Ok(p)
    }

    fn prepare(&self, sim: &mut QuantumSimulator, qubit: Qubit, p: f64) -> HarnessResult<()> {
        match self.coin {
            Coin::Fair => sim.h(qubit),
            Coin::Biased => sim.ry(2.0 * (1.0 - p).sqrt().acos(), qubit),
        }
    }
}

#[async_trait]
impl Operation<QuantumSimulator> for PlayMorganasGame {
    type Output = GameOutcome;

    fn name(&self) -> &str {
        "PlayMorganasGame"
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        match self.coin {
            Coin::Fair => Vec::new(),
            Coin::Biased => vec![ParameterSpec::real(WIN_PROBABILITY, WIN_PROBABILITY_PROMPT)],
        }
    }

    async fn run(&self, sim: &mut QuantumSimulator, parameters: &Parameters) -> HarnessResult<GameOutcome> {
        let win_probability = self.win_probability(parameters)?;

        let mut rounds = 0;
        loop {
            if rounds == self.max_rounds {
                return Err(HarnessError::operation_failed(
                    self.name(),
                    format!("Morgana was still winning after {rounds} rounds"),
                ));
            }
            rounds += 1;

            let qubit = sim.allocate()?;
            self.prepare(sim, qubit, win_probability)?;
            let won = sim.measure(qubit)?;
            sim.deallocate(qubit)?;
            debug!(round = rounds, won, "coin flipped");
            if !won {
                break;
            }
        }

        println!("It took Morgana {rounds} rounds to get out of that jail.");
        Ok(GameOutcome {
            rounds,
            win_probability,
        })
    }
}
