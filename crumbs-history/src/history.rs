use std::{
    fmt,
    hash::Hash,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use indexmap::IndexMap;

use crate::{
    entry::Entry,
    error::HistoryError,
    event::{BreadcrumbEvent, BreadcrumbListener, Listeners},
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HistoryOptions {
    /// Emit a `CurrentChanged` event when `goto_state` targets the state that
    /// is already current.
    pub notify_same_state_goto: bool,
}

impl Default for HistoryOptions {
    fn default() -> Self {
        Self {
            notify_same_state_goto: true,
        }
    }
}

/// A linear navigation history of states with an associated value each.
///
/// The current state is always the last pushed one. Going to an earlier state
/// discards every state pushed after it. All operations lock an internal
/// mutex, listeners get notified after the lock is released. Events arrive
/// in the order of the mutations, also when a listener mutates the history
/// while it gets notified.
pub struct BreadcrumbHistory<S, V> {
    inner: Mutex<Inner<S, V>>,
    listeners: Listeners<S, V>,
    options: HistoryOptions,
}

struct Inner<S, V> {
    states: Vec<S>,
    values: IndexMap<S, Option<V>>,
}

impl<S, V> Default for BreadcrumbHistory<S, V> {
    fn default() -> Self {
        Self::with_options(HistoryOptions::default())
    }
}

impl<S, V> fmt::Debug for BreadcrumbHistory<S, V>
where
    S: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("BreadcrumbHistory")
            .field("states", &inner.states)
            .field("values", &inner.values)
            .field("options", &self.options)
            .finish()
    }
}

impl<S, V> BreadcrumbHistory<S, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: HistoryOptions) -> Self {
        Self {
            inner: Mutex::new(Inner {
                states: Vec::new(),
                values: IndexMap::new(),
            }),
            listeners: Listeners::default(),
            options,
        }
    }

    pub fn options(&self) -> &HistoryOptions {
        &self.options
    }

    /// Registers a listener. The history only keeps a weak reference, the
    /// caller owns the listener. Returns `false` if it was registered already.
    pub fn add_listener(&self, listener: &Arc<dyn BreadcrumbListener<S, V>>) -> bool {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&self, listener: &Arc<dyn BreadcrumbListener<S, V>>) -> bool {
        self.listeners.remove(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().states.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lock().states.len()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.lock().current_index()
    }

    fn lock(&self) -> MutexGuard<'_, Inner<S, V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S, V> BreadcrumbHistory<S, V>
where
    S: Clone + Eq + Hash,
    V: Clone,
{
    pub fn contains_state(&self, state: &S) -> bool {
        self.lock().states.contains(state)
    }

    pub fn current_state(&self) -> Option<S> {
        self.lock().states.last().cloned()
    }

    pub fn current_value(&self) -> Option<V> {
        let (_, value) = self.lock().current();
        value
    }

    pub fn index_of_state(&self, state: &S) -> Option<usize> {
        self.lock().states.iter().position(|it| it == state)
    }

    /// State at `index`, counted from the oldest state at index 0.
    pub fn peek_state(&self, index: usize) -> Result<S, HistoryError> {
        let inner = self.lock();
        match inner.states.get(index) {
            Some(state) => Ok(state.clone()),
            None => Err(HistoryError::IndexOutOfRange {
                index,
                len: inner.states.len(),
            }),
        }
    }

    pub fn value(&self, state: &S) -> Option<V> {
        self.lock().values.get(state).cloned().flatten()
    }

    /// Replaces the value of `state`. Does nothing if the state is not part of
    /// the history.
    pub fn set_value(&self, state: &S, value: Option<V>) {
        let mut inner = self.lock();
        match inner.values.get_mut(state) {
            Some(current) => *current = value,
            None => tracing::debug!("ignoring value for state not in history"),
        }
    }

    pub fn states(&self) -> Vec<S> {
        self.lock().states.clone()
    }

    pub fn values(&self) -> Vec<Option<V>> {
        self.lock().values.values().cloned().collect()
    }

    pub fn entries(&self) -> Vec<Entry<S, V>> {
        let inner = self.lock();
        inner
            .states
            .iter()
            .map(|state| Entry {
                state: state.clone(),
                value: inner.values.get(state).cloned().flatten(),
            })
            .collect()
    }

    pub fn push_state(&self, state: S, value: Option<V>) {
        {
            let mut inner = self.lock();
            let (old_state, old_value) = inner.current();

            inner.push(state.clone(), value.clone());
            let index = inner.states.len() - 1;
            tracing::debug!("pushed state at index {}", index);

            self.listeners.enqueue(vec![
                BreadcrumbEvent::StateAdded {
                    state,
                    value,
                    index,
                },
                inner.current_changed(old_state, old_value),
            ]);
        }

        self.listeners.drain();
    }

    pub fn pop_state(&self) -> Option<Entry<S, V>> {
        let entry = {
            let mut inner = self.lock();
            let entry = inner.pop()?;
            tracing::debug!("popped state, {} remaining", inner.states.len());

            let event = inner.current_changed(Some(entry.state.clone()), entry.value.clone());
            self.listeners.enqueue(vec![event]);

            entry
        };

        self.listeners.drain();

        Some(entry)
    }

    /// Makes `state` the current state by discarding every state after it.
    /// Does nothing if `state` is not part of the history.
    pub fn goto_state(&self, state: &S) {
        {
            let mut inner = self.lock();
            if !inner.states.contains(state) {
                tracing::warn!("goto ignored, state is not part of the history");
                return;
            }

            let (old_state, old_value) = inner.current();
            if old_state.as_ref() == Some(state) && !self.options.notify_same_state_goto {
                tracing::trace!("goto ignored, state is already current");
                return;
            }

            let mut removed = 0;
            while inner.states.last() != Some(state) {
                inner.pop();
                removed += 1;
            }
            tracing::debug!("goto removed {} states", removed);

            self.listeners.enqueue(vec![inner.current_changed(old_state, old_value)]);
        }

        self.listeners.drain();
    }

    pub fn clear(&self) {
        {
            let mut inner = self.lock();
            if inner.states.is_empty() {
                return;
            }

            let (old_state, old_value) = inner.current();
            inner.clear();
            tracing::debug!("cleared history");

            self.listeners.enqueue(vec![inner.current_changed(old_state, old_value)]);
        }

        self.listeners.drain();
    }

    /// Replaces the whole history. Listeners see the event of the implied
    /// clear, one `StateAdded` per entry and a final `CurrentChanged` from the
    /// state current before the call to the new current state.
    pub fn replace_all<I>(&self, entries: I)
    where
        I: IntoIterator<Item = Entry<S, V>>,
    {
        {
            let mut inner = self.lock();
            let (old_state, old_value) = inner.current();

            let mut events = Vec::new();
            if !inner.states.is_empty() {
                inner.clear();
                events.push(inner.current_changed(old_state.clone(), old_value.clone()));
            }

            for Entry { state, value } in entries {
                inner.push(state.clone(), value.clone());
                events.push(BreadcrumbEvent::StateAdded {
                    state,
                    value,
                    index: inner.states.len() - 1,
                });
            }

            if old_state.is_some() || !inner.states.is_empty() {
                events.push(inner.current_changed(old_state, old_value));
            }

            tracing::debug!("replaced history with {} states", inner.states.len());

            self.listeners.enqueue(events);
        }

        self.listeners.drain();
    }
}

impl<S, V> Inner<S, V> {
    fn current_index(&self) -> Option<usize> {
        self.states.len().checked_sub(1)
    }
}

impl<S, V> Inner<S, V>
where
    S: Clone + Eq + Hash,
    V: Clone,
{
    fn current(&self) -> (Option<S>, Option<V>) {
        match self.states.last() {
            Some(state) => (
                Some(state.clone()),
                self.values.get(state).cloned().flatten(),
            ),
            None => (None, None),
        }
    }

    fn push(&mut self, state: S, value: Option<V>) {
        self.states.push(state.clone());
        self.values.insert(state, value);
    }

    fn pop(&mut self) -> Option<Entry<S, V>> {
        let state = self.states.pop()?;

        // NOTE: a state pushed more than once shares a single value slot, which
        // must outlive every occurrence in the stack
        let value = if self.states.contains(&state) {
            self.values.get(&state).cloned().flatten()
        } else {
            self.values.shift_remove(&state).flatten()
        };

        Some(Entry { state, value })
    }

    fn clear(&mut self) {
        self.states.clear();
        self.values.clear();
    }

    fn current_changed(
        &self,
        old_state: Option<S>,
        old_value: Option<V>,
    ) -> BreadcrumbEvent<S, V> {
        let (state, value) = self.current();
        let index = self.current_index();

        tracing::trace!("current changed to index {:?}", index);

        BreadcrumbEvent::CurrentChanged {
            state,
            value,
            index,
            old_state,
            old_value,
        }
    }
}
