//! Static catalog of research agent configurations
//!
//! The order of [`AGENTS`] is the menu order shown by the selector.

use serde::Serialize;

/// A preconfigured research agent the user can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgentDescriptor {
    /// Stable identifier, also the value written to the persisted slot
    pub id: &'static str,
    /// Display label
    pub name: &'static str,
    /// One-line summary shown next to the current selection
    pub description: &'static str,
}

impl AgentDescriptor {
    /// Case-insensitive match of `filter` against the id or the name.
    ///
    /// An empty filter matches everything.
    #[must_use]
    pub fn matches(&self, filter: &str) -> bool {
        if filter.is_empty() {
            return true;
        }
        let filter = filter.to_ascii_lowercase();
        self.id.to_ascii_lowercase().contains(&filter)
            || self.name.to_ascii_lowercase().contains(&filter)
    }
}

/// All agents, in display order.
pub const AGENTS: &[AgentDescriptor] = &[
    AgentDescriptor {
        id: "research_agent_full",
        name: "Full Research System",
        description: "Complete end-to-end research system with all capabilities",
    },
    AgentDescriptor {
        id: "scope_research",
        name: "Scope Research",
        description: "User clarification and brief generation",
    },
    AgentDescriptor {
        id: "research_agent",
        name: "Research Agent",
        description: "Research agent with Tavily search",
    },
    AgentDescriptor {
        id: "research_agent_mcp",
        name: "Research Agent (MCP)",
        description: "Research agent with MCP filesystem",
    },
    AgentDescriptor {
        id: "research_agent_supervisor",
        name: "Multi-Agent Supervisor",
        description: "Multi-agent coordinator for complex research",
    },
];

/// Agent selected when nothing has been persisted yet.
pub const DEFAULT_AGENT_ID: &str = "research_agent_full";

/// List every registered agent in menu order.
#[must_use]
pub const fn list_agents() -> &'static [AgentDescriptor] {
    AGENTS
}

/// Look up an agent by exact (case-sensitive) id.
#[must_use]
pub fn get_agent_by_id(id: &str) -> Option<&'static AgentDescriptor> {
    AGENTS.iter().find(|agent| agent.id == id)
}

/// Display name for `id`, or `id` itself when no agent matches.
#[must_use]
pub fn get_agent_name(id: &str) -> &str {
    get_agent_by_id(id).map_or(id, |agent| agent.name)
}

/// Position of `id` in menu order.
#[must_use]
pub fn position_of(id: &str) -> Option<usize> {
    AGENTS.iter().position(|agent| agent.id == id)
}
