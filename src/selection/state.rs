//! Pure selection state machine

/// Inputs to [`SelectionState::apply`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    /// Store creation: take the optimistic default
    Init {
        /// Id to show until storage has been read
        default: String,
    },
    /// One-time correction from the persisted slot
    Hydrate {
        /// Value read from storage, `None` when the slot is absent
        persisted: Option<String>,
    },
    /// User picked an agent
    Select {
        /// Chosen id, accepted verbatim
        id: String,
    },
    /// Forget the saved choice and go back to the default
    Reset {
        /// Id to fall back to
        default: String,
    },
}

/// Side effects the owning shell must perform after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Write this id to the persisted slot
    Persist(String),
    /// Remove the persisted slot
    Clear,
}

/// Live selection value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectionState {
    /// Not yet created
    #[default]
    Uninitialized,
    /// Holding a selected id
    Initialized {
        /// Currently selected agent id
        selected: String,
        /// Whether the persisted slot has already been consulted
        hydrated: bool,
    },
}

impl SelectionState {
    /// Selected id, if initialized
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        match self {
            Self::Uninitialized => None,
            Self::Initialized { selected, .. } => Some(selected),
        }
    }

    /// Whether the one-time hydration already ran
    #[must_use]
    pub const fn is_hydrated(&self) -> bool {
        matches!(self, Self::Initialized { hydrated: true, .. })
    }

    /// Apply `event`, returning the effect the caller must carry out.
    ///
    /// Hydration only takes effect once and ignores empty values. Selecting
    /// before hydration marks the state hydrated so a late read of storage
    /// cannot clobber the user's choice.
    pub fn apply(&mut self, event: SelectionEvent) -> Option<Effect> {
        match event {
            SelectionEvent::Init { default } => {
                if matches!(self, Self::Uninitialized) {
                    *self = Self::Initialized {
                        selected: default,
                        hydrated: false,
                    };
                }
                None
            }
            SelectionEvent::Hydrate { persisted } => {
                if let Self::Initialized { selected, hydrated } = self
                    && !*hydrated
                {
                    *hydrated = true;
                    if let Some(value) = persisted.filter(|v| !v.is_empty()) {
                        *selected = value;
                    }
                }
                None
            }
            SelectionEvent::Select { id } => {
                *self = Self::Initialized {
                    selected: id.clone(),
                    hydrated: true,
                };
                Some(Effect::Persist(id))
            }
            SelectionEvent::Reset { default } => {
                *self = Self::Initialized {
                    selected: default,
                    hydrated: true,
                };
                Some(Effect::Clear)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn initialized(default: &str) -> SelectionState {
        let mut state = SelectionState::default();
        state.apply(SelectionEvent::Init {
            default: default.to_string(),
        });
        state
    }

    #[test]
    fn test_default_is_uninitialized() {
        let state = SelectionState::default();
        assert_eq!(state, SelectionState::Uninitialized);
        assert_eq!(state.selected(), None);
        assert!(!state.is_hydrated());
    }

    #[test]
    fn test_init_sets_default() {
        let state = initialized("research_agent_full");
        assert_eq!(state.selected(), Some("research_agent_full"));
        assert!(!state.is_hydrated());
    }

    #[test]
    fn test_init_twice_keeps_first() {
        let mut state = initialized("a");
        let effect = state.apply(SelectionEvent::Init {
            default: "b".to_string(),
        });
        assert_eq!(effect, None);
        assert_eq!(state.selected(), Some("a"));
    }

    #[test]
    fn test_hydrate_applies_persisted() {
        let mut state = initialized("research_agent_full");
        let effect = state.apply(SelectionEvent::Hydrate {
            persisted: Some("research_agent".to_string()),
        });
        assert_eq!(effect, None);
        assert_eq!(state.selected(), Some("research_agent"));
        assert!(state.is_hydrated());
    }

    #[test]
    fn test_hydrate_absent_keeps_default() {
        let mut state = initialized("research_agent_full");
        state.apply(SelectionEvent::Hydrate { persisted: None });
        assert_eq!(state.selected(), Some("research_agent_full"));
        assert!(state.is_hydrated());
    }

    #[test]
    fn test_hydrate_empty_string_counts_as_absent() {
        let mut state = initialized("research_agent_full");
        state.apply(SelectionEvent::Hydrate {
            persisted: Some(String::new()),
        });
        assert_eq!(state.selected(), Some("research_agent_full"));
    }

    #[test]
    fn test_hydrate_only_once() {
        let mut state = initialized("d");
        state.apply(SelectionEvent::Hydrate {
            persisted: Some("first".to_string()),
        });
        state.apply(SelectionEvent::Hydrate {
            persisted: Some("second".to_string()),
        });
        assert_eq!(state.selected(), Some("first"));
    }

    #[test]
    fn test_hydrate_before_init_is_ignored() {
        let mut state = SelectionState::default();
        state.apply(SelectionEvent::Hydrate {
            persisted: Some("x".to_string()),
        });
        assert_eq!(state, SelectionState::Uninitialized);
    }

    #[test]
    fn test_select_yields_persist() {
        let mut state = initialized("d");
        let effect = state.apply(SelectionEvent::Select {
            id: "scope_research".to_string(),
        });
        assert_eq!(effect, Some(Effect::Persist("scope_research".to_string())));
        assert_eq!(state.selected(), Some("scope_research"));
    }

    #[test]
    fn test_select_before_hydrate_wins() {
        let mut state = initialized("d");
        state.apply(SelectionEvent::Select {
            id: "picked".to_string(),
        });
        state.apply(SelectionEvent::Hydrate {
            persisted: Some("stale".to_string()),
        });
        assert_eq!(state.selected(), Some("picked"));
    }

    #[test]
    fn test_reset_yields_clear() {
        let mut state = initialized("d");
        state.apply(SelectionEvent::Select {
            id: "x".to_string(),
        });
        let effect = state.apply(SelectionEvent::Reset {
            default: "d".to_string(),
        });
        assert_eq!(effect, Some(Effect::Clear));
        assert_eq!(state.selected(), Some("d"));
    }
}
