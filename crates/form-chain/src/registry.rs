//! One shared event source fanning out to many forms.
//!
//! The host owns a [`ListenerRegistry`], registers a listener per mounted
//! form namespace and unregisters it on unmount. Events are routed by
//! namespace.

use std::fmt;

use indexmap::IndexMap;
use thiserror::Error;
use tracing::{debug, trace};

use crate::form::FormEvent;

pub type Listener = Box<dyn FnMut(&FormEvent)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("a listener is already registered for namespace '{namespace}'")]
    DuplicateNamespace { namespace: String },
}

struct Registration {
    id: ListenerId,
    listener: Listener,
}

#[derive(Default)]
pub struct ListenerRegistry {
    listeners: IndexMap<String, Registration>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        namespace: impl Into<String>,
        listener: impl FnMut(&FormEvent) + 'static,
    ) -> Result<ListenerId, RegistryError> {
        let namespace = namespace.into();
        if self.listeners.contains_key(&namespace) {
            return Err(RegistryError::DuplicateNamespace { namespace });
        }
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        debug!(%namespace, %id, "listener registered");
        self.listeners.insert(
            namespace,
            Registration {
                id,
                listener: Box::new(listener),
            },
        );
        Ok(id)
    }

    /// Returns the namespace the listener was registered for, or `None` if
    /// the id is unknown.
    pub fn unregister(&mut self, id: ListenerId) -> Option<String> {
        let index = self
            .listeners
            .values()
            .position(|registration| registration.id == id)?;
        let (namespace, _) = self.listeners.shift_remove_index(index)?;
        debug!(%namespace, %id, "listener unregistered");
        Some(namespace)
    }

    /// Deliver `event` to the listener of `namespace`. Returns whether a
    /// listener received it.
    pub fn dispatch(&mut self, namespace: &str, event: &FormEvent) -> bool {
        match self.listeners.get_mut(namespace) {
            Some(registration) => {
                trace!(namespace, ?event, "dispatching form event");
                (registration.listener)(event);
                true
            }
            None => {
                trace!(namespace, ?event, "no listener for form event");
                false
            }
        }
    }

    pub fn contains(&self, namespace: &str) -> bool {
        self.listeners.contains_key(namespace)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("namespaces", &self.listeners.keys().collect::<Vec<_>>())
            .field("next_id", &self.next_id)
            .finish()
    }
}
