//! Error types shared across the Blueprint crates.

use thiserror::Error;

/// Errors produced when parsing the textual form of an [`ActionName`].
///
/// [`ActionName`]: crate::ActionName
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// The leading verb token is not `get`, `set` or `new`.
    #[error("unknown action verb '{0}'")]
    UnknownVerb(String),

    /// There was no space separating the verb from the target.
    #[error("missing verb separator in '{0}'")]
    MissingVerb(String),

    /// A getter or setter key has no `::member` part.
    #[error("missing member in '{0}'")]
    MissingMember(String),

    /// The type or member component is empty.
    #[error("empty component in '{0}'")]
    EmptyComponent(String),
}
