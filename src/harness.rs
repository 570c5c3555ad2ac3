//! The execution harness.
//!
//! One call to [`ExecutionHarness::execute`] is one run:
//!
//! ```text
//!   read parameters ──→ acquire ──→ dispatch ──→ await ──→ release ──→ return
//!      (optional)                                           (always, once acquired)
//! ```
//!
//! Parameters are read and parsed before anything touches the backend, so
//! malformed input never causes an acquisition. Acquisition and release are
//! synchronous; awaiting the operation is the only suspension point. Once a
//! resource exists it is held by a [`ResourceGuard`], which releases it on
//! the normal path, on error, on panic, and when the `execute` future is
//! dropped mid-run.

use tracing::{info, warn};

use crate::error::{HarnessError, HarnessResult};
use crate::input::{LineSource, read_real};
use crate::operation::{Operation, OperationInvocation, Parameters};
use crate::resource::{ResourceFactory, ResourceGuard};
use crate::run::{RunPhase, RunRecord};

/// Runs one operation against one freshly acquired resource.
pub struct ExecutionHarness<F, I> {
    factory: F,
    input: I,
    last_run: Option<RunRecord>,
}

impl<F, I> ExecutionHarness<F, I>
where
    F: ResourceFactory,
    I: LineSource,
{
    /// Create a harness acquiring from `factory` and prompting on `input`.
    pub fn new(factory: F, input: I) -> Self {
        Self {
            factory,
            input,
            last_run: None,
        }
    }

    /// Record of the most recent run that reached `Done`.
    pub fn last_run(&self) -> Option<&RunRecord> {
        self.last_run.as_ref()
    }

    /// The input source.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// Run `operation` and return its outcome unchanged.
    ///
    /// # Errors
    ///
    /// - [`HarnessError::InvalidInput`] if a required parameter is malformed;
    ///   no resource is acquired.
    /// - [`HarnessError::ResourceUnavailable`] if acquisition fails; nothing
    ///   is dispatched or released.
    /// - Whatever the operation returns, after the resource is released.
    pub async fn execute<O>(&mut self, operation: &O) -> HarnessResult<O::Output>
    where
        O: Operation<F::Resource>,
    {
        let mut record = RunRecord::new(operation.name());
        let result = self.run(operation, &mut record).await;
        if let Err(err) = &result {
            warn!(operation = %record.operation, phase = %record.phase(), error = %err, "run failed");
        }
        record.finish(&result);
        self.last_run = Some(record);
        result
    }

    async fn run<O>(&mut self, operation: &O, record: &mut RunRecord) -> HarnessResult<O::Output>
    where
        O: Operation<F::Resource>,
    {
        let specs = operation.parameters();
        let mut parameters = Parameters::new();
        if !specs.is_empty() {
            record.enter(RunPhase::InputPending);
            for spec in specs {
                let value = read_real(&mut self.input, &spec.prompt)?;
                parameters = parameters.with_real(spec.name, value);
            }
        }

        record.enter(RunPhase::ResourceAcquiring);
        let resource = self.factory.acquire().map_err(|err| match err {
            HarnessError::ResourceUnavailable(_) => err,
            other => HarnessError::ResourceUnavailable(other.to_string()),
        })?;
        let mut guard = ResourceGuard::new(resource);

        let invocation = OperationInvocation::new(operation.name(), parameters, guard.name());
        info!(operation = %invocation.operation, resource = %invocation.resource, "dispatching operation");
        record.invocation = Some(invocation.clone());

        record.enter(RunPhase::Running);
        let outcome = match guard.resource_mut() {
            Ok(resource) => operation.run(resource, &invocation.parameters).await,
            Err(err) => Err(err),
        };

        record.enter(RunPhase::ReleasingResource);
        let released = guard.release();

        match (outcome, released) {
            (Ok(output), Ok(())) => Ok(output),
            (Ok(_), Err(err)) => Err(HarnessError::Backend(format!(
                "release of {} failed: {err}",
                invocation.resource
            ))),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(release_err)) => {
                warn!(resource = %invocation.resource, error = %release_err, "release failed after operation failure");
                Err(err)
            }
        }
    }
}
