use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BreadcrumbEvent<S, V> {
    /// A state was appended. `index` is its position at the time of the add.
    StateAdded {
        state: S,
        value: Option<V>,
        index: usize,
    },
    /// The current state moved. `state` and `index` are `None` once the
    /// history got emptied.
    CurrentChanged {
        state: Option<S>,
        value: Option<V>,
        index: Option<usize>,
        old_state: Option<S>,
        old_value: Option<V>,
    },
}

pub trait BreadcrumbListener<S, V>: Send + Sync {
    fn on_event(&self, event: &BreadcrumbEvent<S, V>);
}

impl<S, V, F> BreadcrumbListener<S, V> for F
where
    F: Fn(&BreadcrumbEvent<S, V>) + Send + Sync,
{
    fn on_event(&self, event: &BreadcrumbEvent<S, V>) {
        self(event)
    }
}

type ListenerWeak<S, V> = Weak<dyn BreadcrumbListener<S, V>>;

/// Registry of weakly held listeners. Dropping the last `Arc` of a listener
/// unregisters it; dead entries get pruned on the next dispatch.
///
/// Events go through a single queue. Whoever starts draining it delivers
/// every queued event in order, including events queued by listeners or by
/// other threads while the drain is running.
pub(crate) struct Listeners<S, V> {
    entries: Mutex<Vec<ListenerWeak<S, V>>>,
    queue: Mutex<EventQueue<S, V>>,
}

struct EventQueue<S, V> {
    events: VecDeque<BreadcrumbEvent<S, V>>,
    draining: bool,
}

impl<S, V> Default for Listeners<S, V> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            queue: Mutex::new(EventQueue {
                events: VecDeque::new(),
                draining: false,
            }),
        }
    }
}

impl<S, V> Listeners<S, V> {
    pub fn add(&self, listener: &Arc<dyn BreadcrumbListener<S, V>>) -> bool {
        let weak = Arc::downgrade(listener);

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.iter().any(|entry| Weak::ptr_eq(entry, &weak)) {
            return false;
        }

        entries.push(weak);
        true
    }

    pub fn remove(&self, listener: &Arc<dyn BreadcrumbListener<S, V>>) -> bool {
        let weak = Arc::downgrade(listener);

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let count = entries.len();
        entries.retain(|entry| !Weak::ptr_eq(entry, &weak));

        count != entries.len()
    }

    pub fn len(&self) -> usize {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|entry| entry.strong_count() > 0);
        entries.len()
    }

    /// Appends events to the queue. Callers enqueue while still holding the
    /// history lock, so the queue order is the order of the mutations.
    pub fn enqueue(&self, events: Vec<BreadcrumbEvent<S, V>>) {
        if events.is_empty() {
            return;
        }

        self.lock_queue().events.extend(events);
    }

    /// Delivers queued events until the queue is empty. Returns right away if
    /// a drain is already running, that drain picks up the new events.
    pub fn drain(&self) {
        {
            let mut queue = self.lock_queue();
            if queue.draining {
                tracing::trace!("drain already running, events stay queued");
                return;
            }
            queue.draining = true;
        }

        let mut guard = DrainGuard {
            queue: &self.queue,
            armed: true,
        };
        loop {
            let event = {
                let mut queue = self.lock_queue();
                match queue.events.pop_front() {
                    Some(event) => event,
                    None => {
                        queue.draining = false;
                        guard.armed = false;
                        return;
                    }
                }
            };

            // NOTE: snapshot per event, so changes to the registry made by a
            // listener apply to the following events
            for listener in self.snapshot() {
                listener.on_event(&event);
            }
        }
    }

    fn lock_queue(&self) -> MutexGuard<'_, EventQueue<S, V>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot(&self) -> Vec<Arc<dyn BreadcrumbListener<S, V>>> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|entry| entry.strong_count() > 0);
        entries.iter().filter_map(Weak::upgrade).collect()
    }
}

/// Releases the drain if a listener panics.
struct DrainGuard<'a, S, V> {
    queue: &'a Mutex<EventQueue<S, V>>,
    armed: bool,
}

impl<S, V> Drop for DrainGuard<'_, S, V> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        queue.draining = false;
    }
}
