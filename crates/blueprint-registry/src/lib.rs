//! Blueprint Registry
//!
//! Host code exposes getters, setters and constructors to the bytecode layer
//! through an [`ActionRegistry`]. Each entry is keyed by its canonical
//! [`ActionName`](blueprint_core::ActionName) and, for getters and setters,
//! records how many stack values the action pushes or pops.

mod action;
mod registry;

pub use action::{ActionError, NativeAction};
pub use registry::ActionRegistry;
