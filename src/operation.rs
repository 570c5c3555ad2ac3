//! Operation capability and invocation types.
//!
//! An [`Operation`] is one externally defined unit of work. The caller picks
//! the concrete operation before invoking the harness, so resolution by name
//! is plain dependency injection:
//!
//! ```ignore
//! let mut harness = ExecutionHarness::new(factory, Console::stdio());
//! harness.execute(&PlayMorganasGame::biased()).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::HarnessResult;

/// A runtime-supplied parameter an operation requires before it can run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Parameter name, used to look the parsed value up.
    pub name: String,
    /// Prompt line shown before reading the value.
    pub prompt: String,
}

impl ParameterSpec {
    /// Create a real-valued parameter spec.
    pub fn real(name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
        }
    }
}

/// Parsed parameters, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    values: Vec<(String, f64)>,
}

impl Parameters {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a real-valued parameter.
    pub fn with_real(mut self, name: impl Into<String>, value: f64) -> Self {
        self.values.push((name.into(), value));
        self
    }

    /// Look up a real-valued parameter by name.
    pub fn real(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|&(_, value)| value)
    }

    /// Iterate over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One unit of work bound to exactly one resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationInvocation {
    /// Identifier of the operation.
    pub operation: String,
    /// Parsed parameters passed to the operation.
    pub parameters: Parameters,
    /// Name of the resource the invocation runs against.
    pub resource: String,
}

impl OperationInvocation {
    /// Create a new invocation.
    pub fn new(
        operation: impl Into<String>,
        parameters: Parameters,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            operation: operation.into(),
            parameters,
            resource: resource.into(),
        }
    }
}

/// Capability implemented once per externally defined operation.
///
/// The trait is generic over `R`, the resource type, so an operation can be
/// written against a concrete backend while the harness stays independent
/// of it.
///
/// # Contract
///
/// - `name()` MUST be non-empty.
/// - `parameters()` lists the values the harness must read before
///   acquisition; an empty list means no prompt is shown.
/// - `run()` reports its own failures, typically as
///   [`HarnessError::OperationFailed`](crate::HarnessError::OperationFailed).
///   The harness passes them through unchanged.
#[async_trait]
pub trait Operation<R>: Send + Sync {
    /// Value produced by a successful run.
    type Output: Send;

    /// Identifier of this operation.
    fn name(&self) -> &str;

    /// Runtime-supplied parameters, in prompt order.
    fn parameters(&self) -> Vec<ParameterSpec> {
        Vec::new()
    }

    /// Run against the acquired resource.
    async fn run(&self, resource: &mut R, parameters: &Parameters) -> HarnessResult<Self::Output>;
}
