//! Current agent selection
//!
//! [`SelectionState`] holds the pure transition logic. [`SelectionStore`] owns
//! a [`KeyValueStore`](crate::storage::KeyValueStore) and applies the
//! persistence effects the transitions produce. [`AgentProvider`] scopes a
//! store and hands out [`AgentContext`] handles to consumers.

mod provider;
mod state;
mod store;

pub use provider::{AgentContext, AgentProvider};
pub use state::{Effect, SelectionEvent, SelectionState};
pub use store::{SelectionOptions, SelectionStore};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Persisted-slot key used when none is configured
pub const DEFAULT_STORAGE_KEY: &str = "deep-researcher-selected-agent";

/// Whether `select` accepts ids missing from the registry
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionPolicy {
    /// Store any id verbatim; lookups fall back to echoing it
    #[default]
    Permissive,
    /// Reject ids that are not in the registry
    Strict,
}

/// Errors surfaced by the selection layer
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// A consumer asked for the selection with no store installed
    #[error("use_agent must be used within AgentProvider")]
    MissingProvider,

    /// Strict policy rejected an id that is not registered
    #[error("unknown agent id: {0}")]
    UnknownAgent(String),
}
