//! Errors raised while firing events.

use crate::builder::ConfigurationError;
use std::fmt;
use thiserror::Error;

/// Lifecycle phase in which a hook ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPhase {
    Exit,
    Transition,
    Entry,
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exit => f.write_str("exit"),
            Self::Transition => f.write_str("transition"),
            Self::Entry => f.write_str("entry"),
        }
    }
}

/// Error returned by a lifecycle hook.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("{0}")]
    Failed(String),

    /// The hook panicked. The panic is contained by the engine.
    #[error("hook panicked")]
    Panicked,

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl HookError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Errors that can occur when firing an event.
#[derive(Debug, Error)]
pub enum FireError {
    /// No rule exists for (state, event), or every candidate's guard rejected
    /// the context. The instance's state is unchanged.
    #[error("no applicable transition from '{state}' on '{event}': {reason}")]
    NoApplicableTransition {
        state: String,
        event: String,
        reason: String,
    },

    /// The transition committed, but a hook failed afterwards.
    #[error("{phase} hook failed during '{from}' -> '{to}' on '{event}'")]
    HookExecution {
        phase: HookPhase,
        from: String,
        to: String,
        event: String,
        #[source]
        source: HookError,
    },

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

impl FireError {
    /// Check whether the instance moved to a new state despite the error.
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::HookExecution { .. })
    }
}
