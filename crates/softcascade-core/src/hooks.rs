//! Explicit lifecycle hook registration.
//!
//! Hosts own a [`LifecycleHooks`] table and fire it from their own
//! `delete` / `restore`. Nothing registers itself implicitly: behaviors are
//! attached per entity path by whoever builds the host.

use crate::{
    error::InternalError,
    host::{RecordHost, RecordSnapshot},
};
use std::{collections::BTreeMap, fmt, rc::Rc};

///
/// LifecycleHook
///
/// Callback run before the host mutates a record. An error aborts the
/// triggering operation.
///

pub type LifecycleHook = Rc<dyn Fn(&mut dyn RecordHost, &RecordSnapshot) -> Result<(), InternalError>>;

///
/// LifecycleEvent
///

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum LifecycleEvent {
    /// About to be deleted.
    Deleting,

    /// About to be restored.
    Restoring,
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Deleting => "deleting",
            Self::Restoring => "restoring",
        };
        write!(f, "{label}")
    }
}

///
/// EntityHooks
///

#[derive(Clone, Default)]
struct EntityHooks {
    deleting: Vec<LifecycleHook>,
    restoring: Vec<LifecycleHook>,
}

impl EntityHooks {
    const fn slot(&self, event: LifecycleEvent) -> &Vec<LifecycleHook> {
        match event {
            LifecycleEvent::Deleting => &self.deleting,
            LifecycleEvent::Restoring => &self.restoring,
        }
    }

    const fn slot_mut(&mut self, event: LifecycleEvent) -> &mut Vec<LifecycleHook> {
        match event {
            LifecycleEvent::Deleting => &mut self.deleting,
            LifecycleEvent::Restoring => &mut self.restoring,
        }
    }
}

///
/// LifecycleHooks
///
/// Per-entity hook table. Hooks for one entity and event run in
/// registration order.
///

#[derive(Clone, Default)]
pub struct LifecycleHooks {
    entities: BTreeMap<&'static str, EntityHooks>,
}

impl LifecycleHooks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook for one entity path and event.
    pub fn listen(&mut self, entity: &'static str, event: LifecycleEvent, hook: LifecycleHook) {
        self.entities
            .entry(entity)
            .or_default()
            .slot_mut(event)
            .push(hook);
    }

    pub fn on_deleting<F>(&mut self, entity: &'static str, hook: F)
    where
        F: Fn(&mut dyn RecordHost, &RecordSnapshot) -> Result<(), InternalError> + 'static,
    {
        self.listen(entity, LifecycleEvent::Deleting, Rc::new(hook));
    }

    pub fn on_restoring<F>(&mut self, entity: &'static str, hook: F)
    where
        F: Fn(&mut dyn RecordHost, &RecordSnapshot) -> Result<(), InternalError> + 'static,
    {
        self.listen(entity, LifecycleEvent::Restoring, Rc::new(hook));
    }

    /// Clone out the hooks for one entity and event.
    ///
    /// Hosts fire the returned list, not the table, so hooks may re-enter the
    /// host (and this table) while running.
    #[must_use]
    pub fn listeners(&self, entity: &str, event: LifecycleEvent) -> Vec<LifecycleHook> {
        self.entities
            .get(entity)
            .map(|hooks| hooks.slot(event).clone())
            .unwrap_or_default()
    }
}

impl fmt::Debug for LifecycleHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (entity, hooks) in &self.entities {
            map.entry(entity, &(hooks.deleting.len(), hooks.restoring.len()));
        }
        map.finish()
    }
}

/// Run a cloned hook list in order, stopping at the first error.
pub fn fire(
    host: &mut dyn RecordHost,
    hooks: &[LifecycleHook],
    snapshot: &RecordSnapshot,
) -> Result<(), InternalError> {
    for hook in hooks {
        hook(host, snapshot)?;
    }

    Ok(())
}
