//! Local patches applied to a list once the API has confirmed a mutation.
//!
//! Nothing here runs before confirmation: a failed create, update or delete
//! never reaches these methods, so the list cannot be partially patched.

use crate::list::ListItem;
use crate::list::state::ListState;

/// How a page reflects a confirmed update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UpdateStrategy {
    /// Fetch the current page again.
    #[default]
    Refetch,
    /// Swap the row in place with the item returned by the API.
    ReplaceInPlace,
}

/// Counter shown next to a list ("programmes en cours", "non lues", ...).
///
/// The predicate mirrors the rule the API uses to compute the same number,
/// so that creates and deletes can adjust it without a round trip.
pub struct AggregateCounter<T> {
    name: &'static str,
    value: usize,
    predicate: Box<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> AggregateCounter<T> {
    pub fn new(
        name: &'static str,
        value: usize,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            value,
            predicate: Box::new(predicate),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value(&self) -> usize {
        self.value
    }

    pub fn matches(&self, item: &T) -> bool {
        (self.predicate)(item)
    }
}

impl<T> ListState<T> {
    /// Registers a counter, replacing any counter with the same name.
    pub fn register_counter(&mut self, counter: AggregateCounter<T>) {
        self.counters.retain(|existing| existing.name != counter.name);
        self.counters.push(counter);
    }

    pub fn counter(&self, name: &str) -> Option<usize> {
        self.counters
            .iter()
            .find(|counter| counter.name == name)
            .map(AggregateCounter::value)
    }

    /// Overwrites a counter value with a figure fetched from the API.
    pub fn set_counter(&mut self, name: &str, value: usize) {
        if let Some(counter) = self.counters.iter_mut().find(|c| c.name == name) {
            counter.value = value;
        }
    }
}

impl<T: ListItem> ListState<T> {
    /// Puts a freshly created item at the top of the list.
    pub fn apply_created(&mut self, item: T) {
        for counter in &mut self.counters {
            if (counter.predicate)(&item) {
                counter.value += 1;
            }
        }
        self.items.insert(0, item);
        self.pagination = self.pagination.with_total(self.pagination.total + 1);
    }

    /// Replaces the row with the same id; returns `false` when it is not on
    /// the current page.
    pub fn apply_updated(&mut self, item: T) -> bool {
        let Some(slot) = self.items.iter_mut().find(|row| row.id() == item.id()) else {
            return false;
        };
        for counter in &mut self.counters {
            let before = (counter.predicate)(&*slot);
            let after = (counter.predicate)(&item);
            match (before, after) {
                (false, true) => counter.value += 1,
                (true, false) => counter.value = counter.value.saturating_sub(1),
                _ => {}
            }
        }
        *slot = item;
        true
    }

    /// Removes exactly the row with `id`; every other row is left as is.
    pub fn apply_deleted(&mut self, id: T::Id) -> bool {
        let Some(index) = self.items.iter().position(|row| row.id() == id) else {
            return false;
        };
        let removed = self.items.remove(index);
        for counter in &mut self.counters {
            if (counter.predicate)(&removed) {
                counter.value = counter.value.saturating_sub(1);
            }
        }
        self.pagination = self
            .pagination
            .with_total(self.pagination.total.saturating_sub(1));
        true
    }
}
