//! Machine definitions as configuration data.
//!
//! A workflow's vocabulary and rules can be described in JSON and loaded into
//! a [`MachineBuilder`]. Hooks are code and are attached to the returned
//! builder afterwards.
//!
//! ```json
//! {
//!   "initial": "Pending",
//!   "transitions": [
//!     { "from": "Pending", "event": "Cancel", "to": "Cancelled",
//!       "guard": { "kind": "role", "role": "Sender" }, "label": "SENDER_CANCEL" },
//!     { "from": "Cancelled", "event": "Auto", "to": "Completed" }
//!   ]
//! }
//! ```

use crate::builder::{ConfigurationError, MachineBuilder};
use crate::core::{Guard, State, Symbol};
use crate::engine::{Machine, TransitionRule};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Guard description. Absent guards are unconditional.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "", tag = "kind", rename_all = "snake_case")]
pub enum GuardDefinition<R: Symbol> {
    Always,
    Role { role: R },
    AnyRole { roles: Vec<R> },
    Attribute { key: String, value: Value },
}

impl<R: Symbol> Default for GuardDefinition<R> {
    fn default() -> Self {
        Self::Always
    }
}

impl<R: Symbol> GuardDefinition<R> {
    pub fn to_guard(&self) -> Guard<R> {
        match self {
            Self::Always => Guard::always(),
            Self::Role { role } => Guard::role(role.clone()),
            Self::AnyRole { roles } => Guard::any_role(roles.iter().cloned()),
            Self::Attribute { key, value } => Guard::attribute_equals(key.clone(), value.clone()),
        }
    }
}

/// One transition rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct RuleDefinition<S: State, E: Symbol, R: Symbol> {
    pub from: S,
    pub event: E,
    pub to: S,
    #[serde(default)]
    pub guard: GuardDefinition<R>,
    /// Overrides the guard's derived label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl<S: State, E: Symbol, R: Symbol> RuleDefinition<S, E, R> {
    pub fn to_rule(&self) -> TransitionRule<S, E, R> {
        let guard = match &self.label {
            Some(label) => self.guard.to_guard().labeled(label.clone()),
            None => self.guard.to_guard(),
        };
        TransitionRule::new(self.from.clone(), self.event.clone(), self.to.clone(), guard)
    }
}

/// A complete machine description. Transition order is rule priority.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct MachineDefinition<S: State, E: Symbol, R: Symbol> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<S>,
    /// States to declare in addition to those the rules mention
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub states: Vec<S>,
    pub transitions: Vec<RuleDefinition<S, E, R>>,
}

impl<S: State, E: Symbol, R: Symbol> MachineDefinition<S, E, R> {
    /// Parse a definition from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        serde_json::from_str(json).map_err(|e| ConfigurationError::Definition(e.to_string()))
    }

    /// Read and parse a JSON definition file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            ConfigurationError::Definition(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigurationError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigurationError::Definition(e.to_string()))
    }

    /// Turn the definition into a builder, ready for hooks.
    pub fn into_builder(self) -> MachineBuilder<S, E, R> {
        let mut builder = MachineBuilder::new().states(self.states);
        if let Some(initial) = self.initial {
            builder = builder.initial(initial);
        }
        self.transitions
            .iter()
            .fold(builder, |builder, rule| builder.add_rule(rule.to_rule()))
    }

    /// Validate, freeze and build a machine without hooks.
    pub fn build(self) -> Result<Machine<S, E, R>, ConfigurationError> {
        self.into_builder().build()
    }
}
