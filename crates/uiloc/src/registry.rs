//! Weak tracking of live UI elements.
//!
//! The registry never extends an element's lifetime and never fails: a
//! dropped element is an expected condition, discovered lazily when a
//! snapshot is taken, and a poisoned lock is recovered rather than surfaced.

use crate::element::LocalizedElement;
use indexmap::IndexMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError, Weak};

/// Element churn notification, for diagnostics and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// An element was registered. `total` is the tracked count afterwards.
    Added {
        type_name: &'static str,
        total: usize,
    },
    /// A dead entry was pruned. `total` is the tracked count afterwards.
    Removed {
        type_name: &'static str,
        total: usize,
    },
}

type EventSink = Box<dyn Fn(&RegistryEvent) + Send + Sync>;

struct TrackedEntry {
    element: Weak<dyn LocalizedElement>,
    // captured at add time; the element may be gone when we report pruning
    type_name: &'static str,
}

#[derive(Default)]
pub struct WeakElementRegistry {
    entries: Mutex<Vec<TrackedEntry>>,
    sink: OnceLock<EventSink>,
}

impl WeakElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a sink for churn events, once. Events are always traced;
    /// the sink is an additional outlet.
    pub fn set_event_sink<F>(&self, sink: F)
    where
        F: Fn(&RegistryEvent) + Send + Sync + 'static,
    {
        if self.sink.set(Box::new(sink)).is_err() {
            tracing::warn!("registry event sink already installed, ignoring replacement");
        }
    }

    /// Starts tracking `element`.
    pub fn add(&self, element: &Arc<dyn LocalizedElement>) {
        let type_name = element.type_name();
        let total = {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            entries.push(TrackedEntry {
                element: Arc::downgrade(element),
                type_name,
            });
            entries.len()
        };
        self.emit(&RegistryEvent::Added { type_name, total });
    }

    /// Number of tracked entries, including dead ones not yet pruned.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tracked-entry counts grouped by element type name.
    pub fn tracked_by_type(&self) -> IndexMap<&'static str, usize> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let mut counts = IndexMap::new();
        for entry in entries.iter() {
            *counts.entry(entry.type_name).or_insert(0) += 1;
        }
        counts
    }

    /// The elements still alive at the time of the call.
    ///
    /// Dead entries are removed as a side effect, one `Removed` event per
    /// entry with the total decreasing monotonically. Pruning only happens
    /// here, never eagerly on drop.
    pub async fn snapshot(&self) -> Vec<Arc<dyn LocalizedElement>> {
        let (live, events) = {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            let mut live = Vec::with_capacity(entries.len());
            let mut events = Vec::new();
            let mut total = entries.len();
            entries.retain(|entry| {
                if let Some(element) = entry.element.upgrade() {
                    live.push(element);
                    true
                } else {
                    total -= 1;
                    events.push(RegistryEvent::Removed {
                        type_name: entry.type_name,
                        total,
                    });
                    false
                }
            });
            (live, events)
        };
        // emit outside the lock so a sink may query the registry
        for event in &events {
            self.emit(event);
        }
        live
    }

    fn emit(&self, event: &RegistryEvent) {
        match event {
            RegistryEvent::Added { type_name, total } => {
                tracing::debug!("tracking element of type {} ({} tracked)", type_name, total);
            },
            RegistryEvent::Removed { type_name, total } => {
                tracing::debug!(
                    "pruned dead element of type {} ({} tracked)",
                    type_name,
                    total
                );
            },
        }
        if let Some(sink) = self.sink.get() {
            sink(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::sync::Arc;

    struct Probe;

    impl LocalizedElement for Probe {
        fn uid(&self) -> Option<String> {
            Some("probe".to_string())
        }
    }

    fn probe() -> Arc<dyn LocalizedElement> {
        Arc::new(Probe)
    }

    #[test]
    fn add_then_snapshot_returns_live_elements() {
        let registry = WeakElementRegistry::new();
        let first = probe();
        let second = probe();
        registry.add(&first);
        registry.add(&second);

        let live = block_on(registry.snapshot());
        assert_eq!(live.len(), 2);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn dropped_elements_are_pruned_on_snapshot_only() {
        let registry = WeakElementRegistry::new();
        let kept = probe();
        registry.add(&kept);
        {
            let dropped = probe();
            registry.add(&dropped);
        }

        // drop alone does not prune
        assert_eq!(registry.len(), 2);

        let live = block_on(registry.snapshot());
        assert_eq!(live.len(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn events_carry_monotonic_totals() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let registry = WeakElementRegistry::new();
        registry.set_event_sink(move |event| {
            let _ = tx.send(event.clone());
        });

        let kept = probe();
        registry.add(&kept);
        {
            let a = probe();
            let b = probe();
            registry.add(&a);
            registry.add(&b);
        }
        let live = block_on(registry.snapshot());
        assert_eq!(live.len(), 1);

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            [
                RegistryEvent::Added {
                    type_name: std::any::type_name::<Probe>(),
                    total: 1
                },
                RegistryEvent::Added {
                    type_name: std::any::type_name::<Probe>(),
                    total: 2
                },
                RegistryEvent::Added {
                    type_name: std::any::type_name::<Probe>(),
                    total: 3
                },
                RegistryEvent::Removed {
                    type_name: std::any::type_name::<Probe>(),
                    total: 2
                },
                RegistryEvent::Removed {
                    type_name: std::any::type_name::<Probe>(),
                    total: 1
                },
            ]
        );
    }

    #[test]
    fn second_sink_is_ignored() {
        let registry = WeakElementRegistry::new();
        registry.set_event_sink(|_| {});
        registry.set_event_sink(|_| panic!("replacement sink must not run"));

        let element = probe();
        registry.add(&element);
    }

    #[test]
    fn tracked_by_type_groups_entries() {
        struct OtherProbe;

        impl LocalizedElement for OtherProbe {
            fn uid(&self) -> Option<String> {
                None
            }
        }

        let registry = WeakElementRegistry::new();
        let a = probe();
        let b = probe();
        let c: Arc<dyn LocalizedElement> = Arc::new(OtherProbe);
        registry.add(&a);
        registry.add(&b);
        registry.add(&c);

        let counts = registry.tracked_by_type();
        assert_eq!(counts[std::any::type_name::<Probe>()], 2);
        assert_eq!(counts[std::any::type_name::<OtherProbe>()], 1);
    }
}
