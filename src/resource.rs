//! Simulation resource traits and the scoped release guard.
//!
//! A resource is acquired from a [`ResourceFactory`], owned by exactly one
//! run, and released exactly once:
//!
//! ```text
//!   acquire() ──→ ResourceGuard::new() ──→ resource_mut() ... ──→ release()
//!    (sync)                                                     (or Drop)
//! ```
//!
//! ## Design principles
//!
//! - **Exclusive**: the guard owns the resource; nothing else can reach it.
//! - **Release once**: the guard hands the resource back exactly once,
//!   explicitly on the normal path and from `Drop` on panic or when the
//!   owning future is dropped.
//! - **Synchronous release**: `release()` is not async so it can run from
//!   `Drop`.
//! - **Synchronous acquisition**: `acquire()` is not async either, so the
//!   only point where a run suspends is the awaited operation.

use tracing::{info, warn};

use crate::error::{HarnessError, HarnessResult};

/// An opaque, stateful handle with exclusive access to a simulation backend.
///
/// # Contract
///
/// - `is_open()` MUST be `true` from acquisition until `release()` returns.
/// - After `release()`, every operation issued against the handle MUST fail
///   with [`HarnessError::ResourceClosed`].
/// - `release()` on an already-closed handle MUST fail with
///   [`HarnessError::ResourceClosed`] rather than release twice.
pub trait SimulationResource: Send {
    /// Name of this resource, used in logs and run records.
    fn name(&self) -> &str;

    /// Liveness flag.
    fn is_open(&self) -> bool;

    /// Release the backend. Called exactly once by the harness.
    fn release(&mut self) -> HarnessResult<()>;

    /// Fail with [`HarnessError::ResourceClosed`] if the handle is closed.
    fn ensure_open(&self) -> HarnessResult<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(HarnessError::ResourceClosed(self.name().to_string()))
        }
    }
}

/// Produces a fresh [`SimulationResource`] per run.
pub trait ResourceFactory: Send + Sync {
    /// The resource type this factory produces.
    type Resource: SimulationResource;

    /// Acquire a new, open resource.
    ///
    /// Implementations SHOULD report a backend that cannot be reached as
    /// [`HarnessError::ResourceUnavailable`]; the harness maps any other
    /// error to that variant.
    fn acquire(&self) -> HarnessResult<Self::Resource>;
}

/// Scoped ownership of an acquired resource.
///
/// Dropping the guard without calling [`ResourceGuard::release`] still
/// releases the resource; a failure from that release is logged.
pub struct ResourceGuard<R: SimulationResource> {
    name: String,
    resource: Option<R>,
}

impl<R: SimulationResource> ResourceGuard<R> {
    /// Take ownership of a freshly acquired resource.
    pub fn new(resource: R) -> Self {
        let name = resource.name().to_string();
        info!(resource = %name, "resource acquired");
        Self {
            name,
            resource: Some(resource),
        }
    }

    /// Name of the guarded resource.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the guard still holds an unreleased resource.
    pub fn is_held(&self) -> bool {
        self.resource.is_some()
    }

    /// Mutable access to the resource while it is held.
    pub fn resource_mut(&mut self) -> HarnessResult<&mut R> {
        self.resource
            .as_mut()
            .ok_or_else(|| HarnessError::ResourceClosed(self.name.clone()))
    }

    /// Release the resource now. A second call fails with `ResourceClosed`.
    pub fn release(&mut self) -> HarnessResult<()> {
        let mut resource = self
            .resource
            .take()
            .ok_or_else(|| HarnessError::ResourceClosed(self.name.clone()))?;
        let released = resource.release();
        info!(resource = %self.name, ok = released.is_ok(), "resource released");
        released
    }
}

impl<R: SimulationResource> Drop for ResourceGuard<R> {
    fn drop(&mut self) {
        if let Some(mut resource) = self.resource.take() {
            warn!(resource = %self.name, "releasing resource on unwind or cancellation");
            if let Err(err) = resource.release() {
                warn!(resource = %self.name, error = %err, "release failed");
            }
        }
    }
}

impl<R: SimulationResource> std::fmt::Debug for ResourceGuard<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceGuard")
            .field("name", &self.name)
            .field("held", &self.is_held())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Debug)]
    struct CountingResource {
        open: bool,
        releases: Arc<AtomicUsize>,
    }

    impl CountingResource {
        fn new(releases: Arc<AtomicUsize>) -> Self {
            Self {
                open: true,
                releases,
            }
        }
    }

    impl SimulationResource for CountingResource {
        fn name(&self) -> &str {
            "counting"
        }

        fn is_open(&self) -> bool {
            self.open
        }

        fn release(&mut self) -> HarnessResult<()> {
            self.ensure_open()?;
            self.open = false;
            self.releases.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_explicit_release_happens_once() {
        let releases = Arc::new(AtomicUsize::new(0));
        let mut guard = ResourceGuard::new(CountingResource::new(releases.clone()));

        assert!(guard.is_held());
        guard.release().unwrap();
        assert!(!guard.is_held());
        assert!(matches!(guard.release(), Err(HarnessError::ResourceClosed(_))));
        drop(guard);

        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_releases_held_resource() {
        let releases = Arc::new(AtomicUsize::new(0));
        {
            let _guard = ResourceGuard::new(CountingResource::new(releases.clone()));
        }
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_resource_mut_after_release_is_closed() {
        let releases = Arc::new(AtomicUsize::new(0));
        let mut guard = ResourceGuard::new(CountingResource::new(releases));
        assert!(guard.resource_mut().is_ok());
        guard.release().unwrap();

        let err = guard.resource_mut().unwrap_err();
        assert_eq!(err.to_string(), "Resource closed: counting");
    }

    #[test]
    fn test_ensure_open_on_closed_handle() {
        let mut resource = CountingResource::new(Arc::new(AtomicUsize::new(0)));
        assert!(resource.ensure_open().is_ok());
        resource.release().unwrap();
        assert!(matches!(
            resource.ensure_open(),
            Err(HarnessError::ResourceClosed(_))
        ));
        assert!(resource.release().is_err());
    }
}
