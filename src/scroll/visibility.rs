//! Visibility sources
//!
//! Abstraction over "tell me when this position scrolls into view".

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Opaque handle naming an observed position (e.g. the element under the last post)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sentinel(String);

impl Sentinel {
    /// Create a sentinel handle
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Sentinel id
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Sentinel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Called with no arguments each time the sentinel becomes visible
pub type VisibilityCallback = Arc<dyn Fn() + Send + Sync>;

/// Host capability: register a visibility callback on a sentinel
pub trait VisibilitySource: Send + Sync {
    /// Start observing `sentinel`. Observation stops when the returned
    /// registration is dropped.
    fn register(&self, sentinel: &Sentinel, on_visible: VisibilityCallback) -> Registration;
}

/// Live observation; unregisters on drop
#[must_use = "dropping a Registration stops observation"]
pub struct Registration {
    unregister: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Registration {
    /// Create a registration that runs `unregister` when dropped
    pub fn new(unregister: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            unregister: Some(Box::new(unregister)),
        }
    }

    /// Stop observing now
    pub fn cancel(mut self) {
        self.run_unregister();
    }

    fn run_unregister(&mut self) {
        if let Some(unregister) = self.unregister.take() {
            unregister();
        }
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.run_unregister();
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("active", &self.unregister.is_some())
            .finish()
    }
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    callbacks: HashMap<Sentinel, Vec<(u64, VisibilityCallback)>>,
}

/// In-process visibility source driven by explicit [`fire`](Self::fire) calls
///
/// Useful for headless hosts (the CLI) and for tests.
#[derive(Clone, Default)]
pub struct ManualVisibility {
    registry: Arc<Mutex<Registry>>,
}

impl ManualVisibility {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `sentinel` as visible. Returns how many callbacks ran.
    pub fn fire(&self, sentinel: &Sentinel) -> usize {
        // run outside the lock so callbacks may (un)register
        let callbacks: Vec<VisibilityCallback> = self
            .registry
            .lock()
            .callbacks
            .get(sentinel)
            .map(|entries| entries.iter().map(|(_, cb)| Arc::clone(cb)).collect())
            .unwrap_or_default();

        for callback in &callbacks {
            callback();
        }
        callbacks.len()
    }

    /// Number of live registrations on `sentinel`
    pub fn observers(&self, sentinel: &Sentinel) -> usize {
        self.registry
            .lock()
            .callbacks
            .get(sentinel)
            .map_or(0, Vec::len)
    }
}

impl VisibilitySource for ManualVisibility {
    fn register(&self, sentinel: &Sentinel, on_visible: VisibilityCallback) -> Registration {
        let id = {
            let mut registry = self.registry.lock();
            let id = registry.next_id;
            registry.next_id += 1;
            registry
                .callbacks
                .entry(sentinel.clone())
                .or_default()
                .push((id, on_visible));
            id
        };

        let registry = Arc::clone(&self.registry);
        let sentinel = sentinel.clone();
        Registration::new(move || {
            let mut registry = registry.lock();
            if let Some(entries) = registry.callbacks.get_mut(&sentinel) {
                entries.retain(|(entry_id, _)| *entry_id != id);
                if entries.is_empty() {
                    registry.callbacks.remove(&sentinel);
                }
            }
        })
    }
}

impl std::fmt::Debug for ManualVisibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.registry.lock();
        f.debug_struct("ManualVisibility")
            .field("sentinels", &registry.callbacks.len())
            .finish()
    }
}
