//! Gateway directives and command maps.

use crate::value::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Command parameters sent to the gateway: parameter name to value.
///
/// Directive flags are stored as `Value::Bool(true)` under their wire name.
pub type CommandMap = BTreeMap<String, Value>;

/// The operation the gateway is asked to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    /// Find records matching the payload fields.
    Find,
    /// Return every record in the layout.
    FindAll,
    /// Create a new record from the payload.
    New,
    /// Edit the row named by `-recid`.
    Edit,
    /// Delete the row named by `-recid`.
    Delete,
}

impl Directive {
    /// Every directive, in wire-name order.
    pub const ALL: [Directive; 5] = [
        Directive::Delete,
        Directive::Edit,
        Directive::Find,
        Directive::FindAll,
        Directive::New,
    ];

    /// Returns the parameter name the gateway expects for this directive.
    pub fn as_str(self) -> &'static str {
        match self {
            Directive::Find => "-find",
            Directive::FindAll => "-findall",
            Directive::New => "-new",
            Directive::Edit => "-edit",
            Directive::Delete => "-delete",
        }
    }

    /// Parses a wire name back into a directive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == name)
    }

    /// Returns the directive flagged in a command map, if exactly one is set.
    pub fn of(command: &CommandMap) -> Option<Self> {
        let mut flagged = Self::ALL
            .into_iter()
            .filter(|d| matches!(command.get(d.as_str()), Some(Value::Bool(true))));

        match (flagged.next(), flagged.next()) {
            (Some(d), None) => Some(d),
            _ => None,
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sets a directive flag on a command map.
///
/// Starts from an empty map when `command` is `None`. The given map is taken
/// by value and returned, so the result is the one canonical copy.
pub fn with_flag(command: Option<CommandMap>, directive: Directive) -> CommandMap {
    let mut command = command.unwrap_or_default();
    command.insert(directive.as_str().to_string(), Value::Bool(true));
    command
}
