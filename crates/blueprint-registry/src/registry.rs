//! ActionRegistry - host actions exposed to the bytecode layer.
//!
//! This module provides [`ActionRegistry`], the table the compiler consults
//! when it emits `SET`/`CALL`/`NEW` instructions and the execution engine
//! consults when it dispatches them.
//!
//! # Storage Model
//!
//! - **Actions**: callbacks keyed by [`ActionName`], for getters, setters and
//!   constructors alike.
//! - **Arities**: stack value counts keyed by [`ActionName`], for getters
//!   (values pushed) and setters (values popped) only. Constructors never have
//!   an arity entry.
//!
//! # Conflicts
//!
//! Registration never fails. Registering an existing key replaces the callback
//! and logs a warning. For getters and setters the recorded arity becomes the
//! maximum of the old and new values, so the engine always reserves enough
//! stack slots. A registration with an empty type or member name is skipped
//! with a warning.
//!
//! # Thread Safety
//!
//! `ActionRegistry` carries no internal locking. Registration happens once at
//! startup; callers that need to share a populated registry across threads
//! must wrap it themselves (e.g. `Arc<RwLock<_>>`).
//!
//! # Example
//!
//! ```
//! use blueprint_core::ActionName;
//! use blueprint_registry::ActionRegistry;
//!
//! let mut registry: ActionRegistry<Vec<i64>> = ActionRegistry::new();
//! registry.register_getter("Vector", "X", 1, |stack| {
//!     stack.push(3);
//!     Ok(())
//! });
//!
//! let name = ActionName::getter("Vector", "X");
//! assert_eq!(registry.arity(&name), Some(1));
//!
//! let mut stack = Vec::new();
//! registry.call(&name, &mut stack).unwrap();
//! assert_eq!(stack, [3]);
//! ```

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use blueprint_core::ActionName;

use crate::{ActionError, NativeAction};

/// Registry of host actions and their stack arities.
pub struct ActionRegistry<C> {
    /// Callbacks for every registered key.
    actions: FxHashMap<ActionName, NativeAction<C>>,
    /// Arity per getter/setter key.
    arities: FxHashMap<ActionName, usize>,
}

impl<C> Default for ActionRegistry<C> {
    fn default() -> Self {
        Self {
            actions: FxHashMap::default(),
            arities: FxHashMap::default(),
        }
    }
}

impl<C> std::fmt::Debug for ActionRegistry<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.actions.len())
            .field("arities", &self.arities)
            .finish()
    }
}

impl<C> ActionRegistry<C> {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Register a getter for `name` on `for_object` that pushes `return_count` values.
    ///
    /// The type comes first and the member second, in the same order as the
    /// canonical name: `register_getter("Vector", "X", ..)` registers `get Vector::X`.
    pub fn register_getter<F>(&mut self, for_object: &str, name: &str, return_count: usize, f: F)
    where
        F: Fn(&mut C) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        let key = ActionName::getter(for_object, name);
        self.register_with_arity(key, return_count, NativeAction::new(f));
    }

    /// Register a setter for `name` on `for_object` that pops `param_count` values.
    ///
    /// Arguments follow the canonical name order, type then member, as in
    /// [`register_getter`](Self::register_getter).
    pub fn register_setter<F>(&mut self, for_object: &str, name: &str, param_count: usize, f: F)
    where
        F: Fn(&mut C) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        let key = ActionName::setter(for_object, name);
        self.register_with_arity(key, param_count, NativeAction::new(f));
    }

    /// Register the constructor for type `name`.
    ///
    /// A previous constructor is replaced with a warning. Constructors have no
    /// arity entry.
    pub fn register_constructor<F>(&mut self, name: &str, f: F)
    where
        F: Fn(&mut C) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        let key = ActionName::constructor(name);
        if !key.is_well_formed() {
            warn!(name = %key, "skipping constructor registration with an empty type name");
            return;
        }

        debug!(name = %key, "registering constructor");
        if self.actions.insert(key.clone(), NativeAction::new(f)).is_some() {
            warn!(name = %key, "constructor already registered, replacing callback");
        }
    }

    fn register_with_arity(&mut self, key: ActionName, arity: usize, action: NativeAction<C>) {
        if !key.is_well_formed() {
            warn!(name = %key, "skipping registration with an empty type or member name");
            return;
        }

        debug!(name = %key, arity, "registering action");
        if self.actions.insert(key.clone(), action).is_some() {
            warn!(name = %key, "action already registered, replacing callback");
        }

        match self.arities.entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(arity);
            }
            Entry::Occupied(mut entry) => {
                let existing = *entry.get();
                if existing != arity {
                    let kept = existing.max(arity);
                    warn!(
                        name = %entry.key(),
                        existing,
                        requested = arity,
                        kept,
                        "arity conflict on re-registration, keeping the larger value"
                    );
                    entry.insert(kept);
                }
            }
        }
    }

    // ==========================================================================
    // Removal
    // ==========================================================================

    /// Remove a getter and its arity. Removing an absent getter does nothing.
    pub fn unregister_getter(&mut self, for_object: &str, name: &str) {
        self.remove_with_arity(&ActionName::getter(for_object, name));
    }

    /// Remove a setter and its arity. Removing an absent setter does nothing.
    pub fn unregister_setter(&mut self, for_object: &str, name: &str) {
        self.remove_with_arity(&ActionName::setter(for_object, name));
    }

    /// Remove the constructor for type `name`. Removing an absent constructor does nothing.
    pub fn unregister_constructor(&mut self, name: &str) {
        let key = ActionName::constructor(name);
        if self.actions.remove(&key).is_some() {
            debug!(name = %key, "unregistered constructor");
        }
    }

    fn remove_with_arity(&mut self, key: &ActionName) {
        let removed_action = self.actions.remove(key).is_some();
        let removed_arity = self.arities.remove(key).is_some();
        if removed_action || removed_arity {
            debug!(name = %key, "unregistered action");
        }
    }

    /// Remove every registered callback and arity.
    pub fn clear_instructions(&mut self) {
        debug!(actions = self.actions.len(), "clearing action registry");
        self.actions.clear();
        self.arities.clear();
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    /// Get the callback registered under a key.
    pub fn action(&self, name: &ActionName) -> Option<&NativeAction<C>> {
        self.actions.get(name)
    }

    /// Get the arity recorded for a getter or setter key.
    pub fn arity(&self, name: &ActionName) -> Option<usize> {
        self.arities.get(name).copied()
    }

    pub fn getter(&self, for_object: &str, name: &str) -> Option<&NativeAction<C>> {
        self.action(&ActionName::getter(for_object, name))
    }

    pub fn setter(&self, for_object: &str, name: &str) -> Option<&NativeAction<C>> {
        self.action(&ActionName::setter(for_object, name))
    }

    pub fn constructor(&self, name: &str) -> Option<&NativeAction<C>> {
        self.action(&ActionName::constructor(name))
    }

    /// Check if a callback is registered under a key.
    pub fn contains(&self, name: &ActionName) -> bool {
        self.actions.contains_key(name)
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Iterate over every registered key, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &ActionName> {
        self.actions.keys()
    }

    /// Dispatch the callback registered under `name` against `ctx`.
    pub fn call(&self, name: &ActionName, ctx: &mut C) -> Result<(), ActionError> {
        self.action(name)
            .ok_or_else(|| ActionError::NotRegistered(name.clone()))?
            .call(ctx)
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing::Level;
    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    /// Log output captured from a single test.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Run `f` and return every warning it logged, one line each.
    fn warnings(f: impl FnOnce()) -> Vec<String> {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_max_level(Level::WARN)
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::with_default(subscriber, f);

        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .filter(|line| line.contains("WARN"))
            .map(str::to_string)
            .collect()
    }

    fn push(value: i64) -> impl Fn(&mut Vec<i64>) -> Result<(), ActionError> + Send + Sync {
        move |stack: &mut Vec<i64>| {
            stack.push(value);
            Ok(())
        }
    }

    #[test]
    fn register_getter_records_arity() {
        let mut registry = ActionRegistry::new();
        registry.register_getter("Vector", "X", 1, push(1));

        let key = ActionName::getter("Vector", "X");
        assert!(registry.contains(&key));
        assert_eq!(registry.arity(&key), Some(1));
        assert!(registry.getter("Vector", "X").is_some());
        assert!(registry.setter("Vector", "X").is_none());
    }

    #[test]
    fn duplicate_getter_uses_second_callback() {
        let mut registry = ActionRegistry::new();
        registry.register_getter("Vector", "X", 1, push(1));
        registry.register_getter("Vector", "X", 1, push(2));

        let mut stack = Vec::new();
        registry
            .call(&ActionName::getter("Vector", "X"), &mut stack)
            .unwrap();
        assert_eq!(stack, [2]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn setter_arity_takes_maximum_increasing() {
        let mut registry = ActionRegistry::new();
        registry.register_setter("Vector", "X", 2, push(0));
        registry.register_setter("Vector", "X", 5, push(0));
        assert_eq!(registry.arity(&ActionName::setter("Vector", "X")), Some(5));
    }

    #[test]
    fn setter_arity_takes_maximum_decreasing() {
        let mut registry = ActionRegistry::new();
        registry.register_setter("Vector", "X", 5, push(0));
        registry.register_setter("Vector", "X", 2, push(0));
        assert_eq!(registry.arity(&ActionName::setter("Vector", "X")), Some(5));
    }

    #[test]
    fn getter_and_setter_keys_are_distinct() {
        let mut registry = ActionRegistry::new();
        registry.register_getter("Vector", "X", 1, push(1));
        registry.register_setter("Vector", "X", 3, push(2));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.arity(&ActionName::getter("Vector", "X")), Some(1));
        assert_eq!(registry.arity(&ActionName::setter("Vector", "X")), Some(3));
    }

    #[test]
    fn unregister_getter_removes_callback_and_arity() {
        let mut registry = ActionRegistry::new();
        registry.register_getter("Vector", "X", 1, push(1));
        registry.unregister_getter("Vector", "X");

        let key = ActionName::getter("Vector", "X");
        assert!(!registry.contains(&key));
        assert_eq!(registry.arity(&key), None);

        // Idempotent
        registry.unregister_getter("Vector", "X");
        assert!(registry.is_empty());
    }

    #[test]
    fn unregister_setter_leaves_getter() {
        let mut registry = ActionRegistry::new();
        registry.register_getter("Vector", "X", 1, push(1));
        registry.register_setter("Vector", "X", 1, push(2));
        registry.unregister_setter("Vector", "X");

        assert!(registry.getter("Vector", "X").is_some());
        assert!(registry.setter("Vector", "X").is_none());
        assert_eq!(registry.arity(&ActionName::setter("Vector", "X")), None);
    }

    #[test]
    fn constructor_replaced_without_arity() {
        let mut registry = ActionRegistry::new();
        registry.register_constructor("Vector", push(1));
        registry.register_constructor("Vector", push(2));

        let key = ActionName::constructor("Vector");
        assert_eq!(registry.arity(&key), None);

        let mut stack = Vec::new();
        registry.call(&key, &mut stack).unwrap();
        assert_eq!(stack, [2]);
    }

    #[test]
    fn unregister_constructor_is_idempotent() {
        let mut registry = ActionRegistry::new();
        registry.register_constructor("Vector", push(1));
        registry.unregister_constructor("Vector");
        registry.unregister_constructor("Vector");
        assert!(registry.constructor("Vector").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn clear_removes_everything() {
        let mut registry = ActionRegistry::new();
        registry.register_getter("Vector", "X", 1, push(1));
        registry.register_setter("Vector", "Y", 2, push(2));
        registry.register_constructor("Vector", push(3));

        let names: Vec<ActionName> = registry.names().cloned().collect();
        assert_eq!(names.len(), 3);

        registry.clear_instructions();
        for name in &names {
            assert!(registry.action(name).is_none());
            assert_eq!(registry.arity(name), None);
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn empty_names_are_skipped() {
        let mut registry = ActionRegistry::new();
        registry.register_getter("", "X", 1, push(1));
        registry.register_setter("Vector", "", 1, push(1));
        registry.register_constructor("", push(1));
        assert!(registry.is_empty());
    }

    #[test]
    fn call_unknown_name() {
        let registry: ActionRegistry<Vec<i64>> = ActionRegistry::new();
        let key = ActionName::getter("Vector", "X");
        assert_eq!(
            registry.call(&key, &mut Vec::new()),
            Err(ActionError::NotRegistered(key))
        );
    }

    #[test]
    fn registries_are_isolated() {
        let mut first = ActionRegistry::new();
        let second: ActionRegistry<Vec<i64>> = ActionRegistry::new();
        first.register_getter("Vector", "X", 1, push(1));
        assert!(!second.contains(&ActionName::getter("Vector", "X")));
    }

    #[test]
    fn duplicate_registrations_warn() {
        let mut registry = ActionRegistry::new();
        let logged = warnings(|| {
            registry.register_getter("Vector", "X", 1, push(1));
            registry.register_getter("Vector", "X", 3, push(2));
        });

        assert_eq!(logged.len(), 2, "{logged:?}");
        assert!(logged[0].contains("replacing callback"));
        assert!(logged[1].contains("arity conflict"));
        assert!(logged[1].contains("kept=3"));
    }

    #[test]
    fn equal_arity_warns_only_for_callback() {
        let mut registry = ActionRegistry::new();
        let logged = warnings(|| {
            registry.register_setter("Vector", "X", 2, push(1));
            registry.register_setter("Vector", "X", 2, push(2));
        });

        assert_eq!(logged.len(), 1, "{logged:?}");
        assert!(logged[0].contains("replacing callback"));
    }

    #[test]
    fn duplicate_constructor_warns() {
        let mut registry = ActionRegistry::new();
        let logged = warnings(|| {
            registry.register_constructor("Vector", push(1));
            registry.register_constructor("Vector", push(2));
        });

        assert_eq!(logged.len(), 1, "{logged:?}");
        assert!(logged[0].contains("constructor already registered"));
    }

    #[test]
    fn first_registration_is_silent() {
        let mut registry = ActionRegistry::new();
        let logged = warnings(|| {
            registry.register_getter("Vector", "X", 1, push(1));
            registry.register_setter("Vector", "X", 1, push(1));
            registry.register_constructor("Vector", push(1));
        });
        assert!(logged.is_empty(), "{logged:?}");
    }

    #[test]
    fn empty_names_warn() {
        let mut registry = ActionRegistry::new();
        let logged = warnings(|| {
            registry.register_getter("", "X", 1, push(1));
            registry.register_constructor("", push(1));
        });
        assert_eq!(logged.len(), 2, "{logged:?}");
        assert!(logged.iter().all(|line| line.contains("skipping")));
    }

    #[test]
    fn type_comes_before_member() {
        let mut registry = ActionRegistry::new();
        registry.register_getter("Vector", "Length", 1, push(1));

        let names: Vec<String> = registry.names().map(ToString::to_string).collect();
        assert_eq!(names, ["get Vector::Length"]);
    }
}
