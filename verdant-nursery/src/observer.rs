//! Care observers and the weak registration list groups keep.

use std::sync::{Arc, Weak};
use tracing::debug;
use verdant_types::CareEvent;

/// Receives one event per plant visited by a group care operation.
pub trait CareObserver: Send + Sync {
    /// Called while the group operation is still running, so any lock held
    /// around it (the nursery root lock under [`Nursery::with_root`]) is
    /// still held. Calling back into `with_root` from here deadlocks.
    ///
    /// [`Nursery::with_root`]: crate::Nursery::with_root
    fn on_care_event(&self, event: &CareEvent);
}

/// Observers attached to a group.
///
/// Registrations are weak: a group never keeps an observer alive, and a
/// dropped observer is pruned on the next notification. The same observer
/// may be attached more than once and is then notified once per attachment.
#[derive(Default)]
pub struct ObserverList {
    entries: Vec<Weak<dyn CareObserver>>,
}

impl ObserverList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, observer: &Arc<dyn CareObserver>) {
        self.entries.push(Arc::downgrade(observer));
    }

    /// Removes every registration of `observer`. Returns how many were removed.
    pub fn detach(&mut self, observer: &Arc<dyn CareObserver>) -> usize {
        let target = Arc::downgrade(observer);
        let before = self.entries.len();
        self.entries.retain(|w| !Weak::ptr_eq(w, &target));
        before - self.entries.len()
    }

    /// Registrations whose observer is still alive.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|w| w.strong_count() > 0).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Delivers every event to every live observer.
    pub fn notify(&mut self, events: &[CareEvent]) {
        let before = self.entries.len();
        self.entries.retain(|w| w.strong_count() > 0);
        let pruned = before - self.entries.len();
        if pruned > 0 {
            debug!(pruned, "dropped observers pruned");
        }
        if events.is_empty() {
            return;
        }

        for weak in &self.entries {
            let Some(observer) = weak.upgrade() else {
                continue;
            };
            for event in events {
                observer.on_care_event(event);
            }
        }
    }
}

impl std::fmt::Debug for ObserverList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverList")
            .field("registered", &self.entries.len())
            .field("live", &self.len())
            .finish()
    }
}
