//! Native action storage.
//!
//! A [`NativeAction`] wraps a host closure so that callbacks of different
//! concrete types can be stored uniformly in the registry and invoked by the
//! execution engine against its own context type `C`.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use blueprint_core::ActionName;

/// Errors raised while dispatching a host action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// No callback is registered under the name.
    #[error("no action registered for '{0}'")]
    NotRegistered(ActionName),

    /// The host callback reported a failure.
    #[error("action failed: {0}")]
    Failed(String),
}

type ActionFn<C> = dyn Fn(&mut C) -> Result<(), ActionError> + Send + Sync;

/// Type-erased host callback run against an execution context `C`.
///
/// The callable is held behind an `Arc`, so clones share the same closure.
pub struct NativeAction<C> {
    inner: Arc<ActionFn<C>>,
}

impl<C> NativeAction<C> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut C) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Run the callback.
    pub fn call(&self, ctx: &mut C) -> Result<(), ActionError> {
        (self.inner)(ctx)
    }

    /// Whether two handles share the same underlying closure.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<C> Clone for NativeAction<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C> fmt::Debug for NativeAction<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeAction").finish_non_exhaustive()
    }
}
