//! Selection store backed by a persisted slot

use super::{
    DEFAULT_STORAGE_KEY, Effect, SelectionError, SelectionEvent, SelectionPolicy, SelectionState,
};
use crate::registry::{self, DEFAULT_AGENT_ID};
use crate::storage::KeyValueStore;
use tracing::{debug, info, warn};

/// Knobs for a [`SelectionStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionOptions {
    /// Key of the persisted slot
    pub storage_key: String,
    /// Whether unknown ids are accepted
    pub policy: SelectionPolicy,
    /// Id used before (or instead of) a persisted value
    pub default_id: String,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            policy: SelectionPolicy::default(),
            default_id: DEFAULT_AGENT_ID.to_string(),
        }
    }
}

/// Owns the live selection and writes it through to storage.
#[derive(Debug)]
pub struct SelectionStore<S> {
    state: SelectionState,
    storage: S,
    options: SelectionOptions,
    revision: u64,
    persisted: bool,
}

impl<S: KeyValueStore> SelectionStore<S> {
    /// Create a store holding the default id. Storage is not read until
    /// [`hydrate`](Self::hydrate) is called.
    #[must_use]
    pub fn create(storage: S, options: SelectionOptions) -> Self {
        let mut state = SelectionState::default();
        state.apply(SelectionEvent::Init {
            default: options.default_id.clone(),
        });
        Self {
            state,
            storage,
            options,
            revision: 0,
            persisted: true,
        }
    }

    /// Create a store and immediately apply the persisted value, if any
    #[must_use]
    pub fn open(storage: S, options: SelectionOptions) -> Self {
        let mut store = Self::create(storage, options);
        store.hydrate();
        store
    }

    /// Apply the persisted value once. Later calls do nothing.
    ///
    /// Read failures keep the default. Under [`SelectionPolicy::Strict`] a
    /// persisted id that is not registered is ignored.
    pub fn hydrate(&mut self) -> &str {
        if self.state.is_hydrated() {
            return self.read();
        }

        let persisted = match self.storage.get(&self.options.storage_key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read persisted agent selection: {}", e);
                None
            }
        };

        let persisted = persisted.filter(|id| {
            let allowed = self.accepts(id);
            if !allowed {
                warn!("Ignoring persisted unknown agent id {:?}", id);
            }
            allowed
        });

        debug!("Hydrating agent selection from {:?}", persisted);
        self.transition(SelectionEvent::Hydrate { persisted });
        self.read()
    }

    /// Currently selected id; the default when nothing else is known
    #[must_use]
    pub fn read(&self) -> &str {
        self.state
            .selected()
            .unwrap_or(self.options.default_id.as_str())
    }

    /// Select `id` and persist it.
    ///
    /// The live value is updated before storage is written. A failed write
    /// is logged and does not roll back the live value.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownAgent`] under the strict policy when
    /// `id` is not registered. Nothing changes in that case.
    pub fn select(&mut self, id: &str) -> Result<(), SelectionError> {
        if !self.accepts(id) {
            return Err(SelectionError::UnknownAgent(id.to_string()));
        }
        info!("Selecting agent {:?}", id);
        self.transition(SelectionEvent::Select { id: id.to_string() });
        Ok(())
    }

    /// Return to the default and remove the persisted slot
    pub fn reset(&mut self) {
        info!("Resetting agent selection");
        self.transition(SelectionEvent::Reset {
            default: self.options.default_id.clone(),
        });
    }

    /// Counter bumped whenever the live value changes
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Options this store was created with
    #[must_use]
    pub const fn options(&self) -> &SelectionOptions {
        &self.options
    }

    /// Whether the last write to storage succeeded.
    ///
    /// Stays `true` until a persist or clear fails, and becomes `true` again
    /// on the next successful write.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// End the store's lifecycle and hand back the backend
    #[must_use]
    pub fn dispose(self) -> S {
        debug!("Disposing agent selection store");
        self.storage
    }

    fn accepts(&self, id: &str) -> bool {
        self.options.policy == SelectionPolicy::Permissive
            || registry::get_agent_by_id(id).is_some()
    }

    fn transition(&mut self, event: SelectionEvent) {
        let before = self.read().to_string();
        let effect = self.state.apply(event);
        if self.read() != before {
            self.revision += 1;
        }
        if let Some(effect) = effect {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        let key = &self.options.storage_key;
        let result = match &effect {
            Effect::Persist(id) => self.storage.set(key, id),
            Effect::Clear => self.storage.remove(key),
        };
        self.persisted = result.is_ok();
        if let Err(e) = result {
            warn!("Failed to persist agent selection ({:?}): {}", effect, e);
        }
    }
}
