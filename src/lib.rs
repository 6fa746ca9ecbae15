//! agent-picker - persisted selector for deep-research agent configurations
//!
//! A static registry of agents, a selection store that writes the chosen id
//! through to a durable key-value slot, and a terminal picker on top.

pub mod config;
pub mod paths;
pub mod picker;
pub mod registry;
pub mod selection;
pub mod storage;
pub mod widget;

pub use config::Config;
pub use registry::{AgentDescriptor, DEFAULT_AGENT_ID, get_agent_by_id, get_agent_name, list_agents};
pub use selection::{
    AgentContext, AgentProvider, SelectionError, SelectionOptions, SelectionPolicy, SelectionStore,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
