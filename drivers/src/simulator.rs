//! In-memory state-vector simulator used by the driver programs.
//!
//! Amplitudes are stored as real numbers: every gate offered here (`H`, `X`,
//! `Ry`, `CNOT`) has a real matrix, so a register that starts in |0…0⟩ never
//! picks up an imaginary component.
//!
//! Basis index bit `k` holds qubit `k`.

use quantum_harness::{HarnessError, HarnessResult, ResourceFactory, SimulationResource};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Default register size.
pub const DEFAULT_QUBITS: usize = 3;
/// Largest register the factory will allocate (2^20 amplitudes).
pub const MAX_QUBITS: usize = 20;

const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;
const PROBABILITY_EPSILON: f64 = 1e-12;

/// Handle to one qubit of a [`QuantumSimulator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Qubit(usize);

impl Qubit {
    /// Register index of this qubit.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Simulator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Register size.
    pub qubits: usize,
    /// RNG seed for reproducible measurements. Entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            qubits: DEFAULT_QUBITS,
            seed: None,
        }
    }
}

/// A fixed-capacity state-vector simulator.
pub struct QuantumSimulator {
    name: String,
    capacity: usize,
    state: Vec<f64>,
    free: Vec<Qubit>,
    rng: StdRng,
    open: bool,
}

impl QuantumSimulator {
    /// Create a simulator with every qubit in |0⟩.
    ///
    /// # Errors
    ///
    /// [`HarnessError::ResourceUnavailable`] if `config.qubits` is `0` or
    /// above [`MAX_QUBITS`].
    pub fn new(config: &SimulatorConfig) -> HarnessResult<Self> {
        let qubits = config.qubits;
        if qubits == 0 || qubits > MAX_QUBITS {
            return Err(HarnessError::ResourceUnavailable(format!(
                "cannot allocate a {qubits}-qubit simulator (supported: 1..={MAX_QUBITS})"
            )));
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut state = vec![0.0; 1 << qubits];
        state[0] = 1.0;
        Ok(Self {
            name: "QuantumSimulator".into(),
            capacity: qubits,
            state,
            free: (0..qubits).rev().map(Qubit).collect(),
            rng,
            open: true,
        })
    }

    /// Register size.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of qubits currently allocated.
    pub fn allocated(&self) -> usize {
        self.capacity - self.free.len()
    }

    /// Borrow a qubit in |0⟩.
    pub fn allocate(&mut self) -> HarnessResult<Qubit> {
        self.ensure_open()?;
        self.free.pop().ok_or_else(|| {
            HarnessError::Backend(format!(
                "all {} qubits of {} are allocated",
                self.capacity, self.name
            ))
        })
    }

    /// Reset `qubit` to |0⟩ and return it to the pool.
    pub fn deallocate(&mut self, qubit: Qubit) -> HarnessResult<()> {
        self.check(qubit)?;
        if self.free.contains(&qubit) {
            return Err(HarnessError::Backend(format!(
                "qubit {} is not allocated",
                qubit.index()
            )));
        }
        self.reset(qubit)?;
        self.free.push(qubit);
        Ok(())
    }

    /// Hadamard.
    pub fn h(&mut self, qubit: Qubit) -> HarnessResult<()> {
        self.apply(
            qubit,
            [[FRAC_1_SQRT_2, FRAC_1_SQRT_2], [FRAC_1_SQRT_2, -FRAC_1_SQRT_2]],
        )
    }

    /// Pauli X.
    pub fn x(&mut self, qubit: Qubit) -> HarnessResult<()> {
        self.apply(qubit, [[0.0, 1.0], [1.0, 0.0]])
    }

    /// Rotation about the Y axis by `angle` radians.
    pub fn ry(&mut self, angle: f64, qubit: Qubit) -> HarnessResult<()> {
        let (sin, cos) = (angle / 2.0).sin_cos();
        self.apply(qubit, [[cos, -sin], [sin, cos]])
    }

    /// Controlled NOT.
    pub fn cnot(&mut self, control: Qubit, target: Qubit) -> HarnessResult<()> {
        self.check(control)?;
        self.check(target)?;
        if control == target {
            return Err(HarnessError::Backend(
                "CNOT control and target must differ".into(),
            ));
        }
        let (c, t) = (1 << control.index(), 1 << target.index());
        for i in 0..self.state.len() {
            if i & c != 0 && i & t == 0 {
                self.state.swap(i, i | t);
            }
        }
        Ok(())
    }

    /// Probability of measuring `One`, without disturbing the state.
    pub fn probability_one(&self, qubit: Qubit) -> HarnessResult<f64> {
        self.check(qubit)?;
        let mask = 1 << qubit.index();
        Ok(self
            .state
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, amplitude)| amplitude * amplitude)
            .sum())
    }

    /// Measure in the computational basis. `true` is `One`.
    pub fn measure(&mut self, qubit: Qubit) -> HarnessResult<bool> {
        let p1 = self.probability_one(qubit)?.clamp(0.0, 1.0);
        let outcome = if p1 < PROBABILITY_EPSILON {
            false
        } else if p1 > 1.0 - PROBABILITY_EPSILON {
            true
        } else {
            self.rng.gen_range(0.0..1.0) < p1
        };

        let mask = 1 << qubit.index();
        let norm = if outcome { p1 } else { 1.0 - p1 }.sqrt();
        for (i, amplitude) in self.state.iter_mut().enumerate() {
            if (i & mask != 0) == outcome {
                *amplitude /= norm;
            } else {
                *amplitude = 0.0;
            }
        }
        debug!(qubit = qubit.index(), outcome, p1, "measured");
        Ok(outcome)
    }

    /// Measure, then flip back to |0⟩ if the result was `One`.
    pub fn reset(&mut self, qubit: Qubit) -> HarnessResult<()> {
        if self.measure(qubit)? {
            self.x(qubit)?;
        }
        Ok(())
    }

    /// Measure in the X basis (`true` for |−⟩) and reset to |0⟩.
    pub fn measure_x_and_reset(&mut self, qubit: Qubit) -> HarnessResult<bool> {
        self.h(qubit)?;
        let outcome = self.measure(qubit)?;
        if outcome {
            self.x(qubit)?;
        }
        Ok(outcome)
    }

    fn check(&self, qubit: Qubit) -> HarnessResult<()> {
        self.ensure_open()?;
        if qubit.index() >= self.capacity {
            return Err(HarnessError::Backend(format!(
                "qubit {} is out of range for a {}-qubit register",
                qubit.index(),
                self.capacity
            )));
        }
        Ok(())
    }

    fn apply(&mut self, qubit: Qubit, matrix: [[f64; 2]; 2]) -> HarnessResult<()> {
        self.check(qubit)?;
        let mask = 1 << qubit.index();
        for i in 0..self.state.len() {
            if i & mask == 0 {
                let j = i | mask;
                let (a0, a1) = (self.state[i], self.state[j]);
                self.state[i] = matrix[0][0] * a0 + matrix[0][1] * a1;
                self.state[j] = matrix[1][0] * a0 + matrix[1][1] * a1;
            }
        }
        Ok(())
    }
}

impl SimulationResource for QuantumSimulator {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn release(&mut self) -> HarnessResult<()> {
        self.ensure_open()?;
        if self.allocated() > 0 {
            warn!(
                resource = %self.name,
                allocated = self.allocated(),
                "releasing simulator with qubits still allocated"
            );
        }
        self.open = false;
        self.state = Vec::new();
        self.free.clear();
        Ok(())
    }
}

impl std::fmt::Debug for QuantumSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuantumSimulator")
            .field("capacity", &self.capacity)
            .field("allocated", &self.allocated())
            .field("open", &self.open)
            .finish()
    }
}

/// Creates one [`QuantumSimulator`] per run.
#[derive(Debug, Clone, Default)]
pub struct SimulatorFactory {
    config: SimulatorConfig,
}

impl SimulatorFactory {
    /// Create a factory for `config`.
    pub fn new(config: SimulatorConfig) -> Self {
        Self { config }
    }
}

impl ResourceFactory for SimulatorFactory {
    type Resource = QuantumSimulator;

    fn acquire(&self) -> HarnessResult<QuantumSimulator> {
        QuantumSimulator::new(&self.config)
    }
}
