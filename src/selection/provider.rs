//! Provider scope and consumer handles

use super::{SelectionError, SelectionStore};
use crate::registry::{self, AgentDescriptor};
use crate::storage::KeyValueStore;
use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::debug;

/// Owns the active [`SelectionStore`] for a UI tree.
///
/// Consumers get an [`AgentContext`] through [`use_agent`](Self::use_agent).
/// Contexts do not keep the store alive: once the provider is disposed they
/// report [`SelectionError::MissingProvider`].
pub struct AgentProvider<S> {
    store: Option<Arc<Mutex<SelectionStore<S>>>>,
}

impl<S> fmt::Debug for AgentProvider<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentProvider")
            .field("active", &self.store.is_some())
            .finish()
    }
}

impl<S> Default for AgentProvider<S> {
    fn default() -> Self {
        Self { store: None }
    }
}

impl<S: KeyValueStore> AgentProvider<S> {
    /// Provider with no store installed
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider scoping `store`
    #[must_use]
    pub fn with_store(store: SelectionStore<S>) -> Self {
        let mut provider = Self::new();
        provider.provide(store);
        provider
    }

    /// Install `store`, replacing (and disposing) any previous one
    pub fn provide(&mut self, store: SelectionStore<S>) {
        let _ = self.dispose();
        self.store = Some(Arc::new(Mutex::new(store)));
    }

    /// Whether a store is installed
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.store.is_some()
    }

    /// Handle to the current selection
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::MissingProvider`] when no store is installed.
    pub fn use_agent(&self) -> Result<AgentContext<S>, SelectionError> {
        self.store
            .as_ref()
            .map(|store| AgentContext {
                store: Arc::downgrade(store),
            })
            .ok_or(SelectionError::MissingProvider)
    }

    /// Tear down the store and return its backend
    pub fn dispose(&mut self) -> Option<S> {
        let store = self.store.take()?;
        debug!("Disposing agent provider");
        Arc::into_inner(store).map(|store| store.into_inner().dispose())
    }
}

/// Consumer handle onto the provider's store.
///
/// Cheap to clone. Every operation fails with
/// [`SelectionError::MissingProvider`] once the provider is gone.
pub struct AgentContext<S> {
    store: Weak<Mutex<SelectionStore<S>>>,
}

impl<S> Clone for AgentContext<S> {
    fn clone(&self) -> Self {
        Self {
            store: Weak::clone(&self.store),
        }
    }
}

impl<S> fmt::Debug for AgentContext<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentContext")
            .field("attached", &(self.store.strong_count() > 0))
            .finish()
    }
}

impl<S: KeyValueStore> AgentContext<S> {
    fn with_store<T>(
        &self,
        f: impl FnOnce(&mut SelectionStore<S>) -> T,
    ) -> Result<T, SelectionError> {
        let store = self.store.upgrade().ok_or(SelectionError::MissingProvider)?;
        let mut guard = store.lock();
        Ok(f(&mut *guard))
    }

    /// Currently selected agent id
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::MissingProvider`] if the provider is gone.
    pub fn read(&self) -> Result<String, SelectionError> {
        self.with_store(|store| store.read().to_string())
    }

    /// Select `id` and persist it
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::MissingProvider`] if the provider is gone, or
    /// [`SelectionError::UnknownAgent`] when the strict policy rejects `id`.
    pub fn select(&self, id: &str) -> Result<(), SelectionError> {
        self.with_store(|store| store.select(id))?
    }

    /// Apply the persisted value if that has not happened yet
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::MissingProvider`] if the provider is gone.
    pub fn hydrate(&self) -> Result<String, SelectionError> {
        self.with_store(|store| store.hydrate().to_string())
    }

    /// Return to the default selection and clear the persisted slot
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::MissingProvider`] if the provider is gone.
    pub fn reset(&self) -> Result<(), SelectionError> {
        self.with_store(SelectionStore::reset)
    }

    /// Change counter of the underlying store
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::MissingProvider`] if the provider is gone.
    pub fn revision(&self) -> Result<u64, SelectionError> {
        self.with_store(|store| store.revision())
    }

    /// Whether the last write to storage succeeded
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::MissingProvider`] if the provider is gone.
    pub fn is_persisted(&self) -> Result<bool, SelectionError> {
        self.with_store(|store| store.is_persisted())
    }

    /// Descriptor for the current selection, `None` for unregistered ids
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::MissingProvider`] if the provider is gone.
    pub fn current_agent(&self) -> Result<Option<&'static AgentDescriptor>, SelectionError> {
        self.with_store(|store| registry::get_agent_by_id(store.read()))
    }
}
