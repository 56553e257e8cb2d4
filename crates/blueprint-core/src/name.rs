use std::fmt;
use std::str::FromStr;

use crate::NameError;

/// The leading verb of a canonical action name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionVerb {
    /// Reads a member and pushes the result.
    Get,
    /// Pops values and writes them to a member.
    Set,
    /// Constructs a new object of a type.
    New,
}

impl ActionVerb {
    /// The verb token as it appears in the textual key.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionVerb::Get => "get",
            ActionVerb::Set => "set",
            ActionVerb::New => "new",
        }
    }
}

impl fmt::Display for ActionVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionVerb {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "get" => Ok(ActionVerb::Get),
            "set" => Ok(ActionVerb::Set),
            "new" => Ok(ActionVerb::New),
            other => Err(NameError::UnknownVerb(other.to_string())),
        }
    }
}

/// Canonical name of a host operation exposed to the bytecode layer.
///
/// The key is stored structurally and only turned into text at the boundary:
///
/// | Kind | Text |
/// |------|------|
/// | getter | `get <Type>::<member>` |
/// | setter | `set <Type>::<member>` |
/// | constructor | `new <Type>` |
///
/// # Examples
///
/// ```
/// use blueprint_core::{ActionName, ActionVerb};
///
/// let name = ActionName::setter("Vector", "X");
/// assert_eq!(name.verb(), ActionVerb::Set);
/// assert_eq!(name.to_string(), "set Vector::X");
/// assert_eq!(name.target(), "Vector::X");
///
/// let parsed: ActionName = "new Vector".parse().unwrap();
/// assert_eq!(parsed, ActionName::constructor("Vector"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionName {
    verb: ActionVerb,
    type_name: String,
    /// `None` for constructors
    member: Option<String>,
}

impl ActionName {
    /// Key for a getter of `member` on `type_name`.
    pub fn getter(type_name: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            verb: ActionVerb::Get,
            type_name: type_name.into(),
            member: Some(member.into()),
        }
    }

    /// Key for a setter of `member` on `type_name`.
    pub fn setter(type_name: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            verb: ActionVerb::Set,
            type_name: type_name.into(),
            member: Some(member.into()),
        }
    }

    /// Key for the constructor of `type_name`.
    pub fn constructor(type_name: impl Into<String>) -> Self {
        Self {
            verb: ActionVerb::New,
            type_name: type_name.into(),
            member: None,
        }
    }

    /// The kind of action this key names.
    pub fn verb(&self) -> ActionVerb {
        self.verb
    }

    /// The type the action belongs to, including any namespace path.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The member name, `None` for constructors.
    pub fn member(&self) -> Option<&str> {
        self.member.as_deref()
    }

    /// The name with its verb removed (`Vector::X`, or `Vector` for a constructor).
    pub fn target(&self) -> String {
        match &self.member {
            Some(member) => format!("{}::{}", self.type_name, member),
            None => self.type_name.clone(),
        }
    }

    /// Whether every component is non-empty.
    pub fn is_well_formed(&self) -> bool {
        !self.type_name.is_empty() && self.member.as_deref().is_none_or(|m| !m.is_empty())
    }

    /// Rebuild a key from a verb and the verb-less target text.
    ///
    /// The member of a getter or setter is split off at the last `::`, so
    /// namespaced types such as `Game::Vector::X` keep their full path.
    pub fn from_target(verb: ActionVerb, target: &str) -> Result<Self, NameError> {
        let full = || format!("{} {}", verb, target);
        match verb {
            ActionVerb::New => {
                if target.is_empty() {
                    return Err(NameError::EmptyComponent(full()));
                }
                Ok(Self::constructor(target))
            }
            ActionVerb::Get | ActionVerb::Set => {
                let (type_name, member) = target
                    .rsplit_once("::")
                    .ok_or_else(|| NameError::MissingMember(full()))?;
                if type_name.is_empty() || member.is_empty() {
                    return Err(NameError::EmptyComponent(full()));
                }
                Ok(Self {
                    verb,
                    type_name: type_name.to_string(),
                    member: Some(member.to_string()),
                })
            }
        }
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.member {
            Some(member) => write!(f, "{} {}::{}", self.verb, self.type_name, member),
            None => write!(f, "{} {}", self.verb, self.type_name),
        }
    }
}

impl FromStr for ActionName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (verb, target) = s
            .split_once(' ')
            .ok_or_else(|| NameError::MissingVerb(s.to_string()))?;
        Self::from_target(verb.parse()?, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn getter_text() {
        let name = ActionName::getter("Transform", "Position");
        assert_eq!(name.to_string(), "get Transform::Position");
        assert_eq!(name.member(), Some("Position"));
        assert_eq!(name.target(), "Transform::Position");
    }

    #[test]
    fn constructor_text() {
        let name = ActionName::constructor("Transform");
        assert_eq!(name.to_string(), "new Transform");
        assert_eq!(name.member(), None);
        assert_eq!(name.target(), "Transform");
    }

    #[test]
    fn keys_are_case_sensitive() {
        assert_ne!(
            ActionName::getter("Vector", "X"),
            ActionName::getter("vector", "X")
        );
    }

    #[test]
    fn same_parts_different_verb_differ() {
        assert_ne!(ActionName::getter("Vector", "X"), ActionName::setter("Vector", "X"));
    }

    #[test]
    fn parse_round_trip() {
        for text in ["get Vector::X", "set Vector::Y", "new Vector", "set Game::Vector::Z"] {
            let name: ActionName = text.parse().unwrap();
            assert_eq!(name.to_string(), text);
        }
    }

    #[test]
    fn parse_namespaced_member_splits_last() {
        let name: ActionName = "get Game::Vector::X".parse().unwrap();
        assert_eq!(name.type_name(), "Game::Vector");
        assert_eq!(name.member(), Some("X"));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            "fetch Vector::X".parse::<ActionName>(),
            Err(NameError::UnknownVerb("fetch".into()))
        );
        assert_eq!(
            "Vector".parse::<ActionName>(),
            Err(NameError::MissingVerb("Vector".into()))
        );
        assert_eq!(
            "get Vector".parse::<ActionName>(),
            Err(NameError::MissingMember("get Vector".into()))
        );
        assert_eq!(
            "set Vector::".parse::<ActionName>(),
            Err(NameError::EmptyComponent("set Vector::".into()))
        );
        assert_eq!(
            "new ".parse::<ActionName>(),
            Err(NameError::EmptyComponent("new ".into()))
        );
    }

    #[test]
    fn well_formed() {
        assert!(ActionName::getter("A", "b").is_well_formed());
        assert!(!ActionName::getter("", "b").is_well_formed());
        assert!(!ActionName::setter("A", "").is_well_formed());
        assert!(!ActionName::constructor("").is_well_formed());
    }
}
