//! Agent selector widget
//!
//! Holds only cursor and filter state; the selected agent always comes from
//! an [`AgentContext`].

mod colors;
mod render;

pub use render::{render_selector, selector_height};

use crate::registry::{self, AgentDescriptor};
use crate::selection::{AgentContext, SelectionError};
use crate::storage::KeyValueStore;

/// Cursor and filter over the registry
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectorState {
    /// Current filter text
    pub filter: String,

    /// Cursor index into the filtered list
    pub cursor: usize,
}

impl SelectorState {
    /// Create a new selector state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            filter: String::new(),
            cursor: 0,
        }
    }

    /// Reset the filter and put the cursor on `current`
    pub fn start(&mut self, current: &str) {
        self.filter.clear();
        self.cursor = registry::position_of(current).unwrap_or(0);
    }

    /// Agents matching the filter, in menu order
    #[must_use]
    pub fn filtered_agents(&self) -> Vec<&'static AgentDescriptor> {
        registry::list_agents()
            .iter()
            .filter(|agent| agent.matches(&self.filter))
            .collect()
    }

    /// Move the cursor down, wrapping
    pub fn select_next(&mut self) {
        let count = self.filtered_agents().len();
        if count > 0 {
            self.cursor = (self.cursor + 1) % count;
        }
    }

    /// Move the cursor up, wrapping
    pub fn select_prev(&mut self) {
        let count = self.filtered_agents().len();
        if count > 0 {
            self.cursor = self.cursor.checked_sub(1).unwrap_or(count - 1);
        }
    }

    /// Agent under the cursor
    #[must_use]
    pub fn highlighted(&self) -> Option<&'static AgentDescriptor> {
        self.filtered_agents().get(self.cursor).copied()
    }

    /// Append to the filter
    pub fn handle_filter_char(&mut self, c: char) {
        self.filter.push(c);
        self.cursor = 0;
    }

    /// Remove the last filter character
    pub fn handle_filter_backspace(&mut self) {
        self.filter.pop();
        self.cursor = 0;
    }

    /// Select the highlighted agent through `ctx`.
    ///
    /// Returns `Ok(None)` when the filter matches nothing.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`AgentContext::select`].
    pub fn confirm<S: KeyValueStore>(
        &self,
        ctx: &AgentContext<S>,
    ) -> Result<Option<&'static AgentDescriptor>, SelectionError> {
        let Some(agent) = self.highlighted() else {
            return Ok(None);
        };
        ctx.select(agent.id)?;
        Ok(Some(agent))
    }
}
