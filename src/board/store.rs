//! Partition store: the single authority that owns the partition.
//!
//! All board mutations enter through [`PartitionStore::dispatch`]. The store runs
//! the pure reducer, bumps its revision when the partition actually changed and
//! then notifies every registered observer with the new partition. Observers get
//! read access only; they cannot mutate the board.

use super::partition::{BoardAction, Partition};
use std::fmt;

/// Handle returned by [`PartitionStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&Partition)>;

/// Owner of the authoritative [`Partition`].
pub struct PartitionStore {
    partition: Partition,
    revision: u64,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl PartitionStore {
    #[must_use]
    pub const fn new(partition: Partition) -> Self {
        Self {
            partition,
            revision: 0,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Current partition (read-only).
    #[must_use]
    pub const fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Number of changes applied since construction.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Registers an observer that is called with the partition after every change.
    ///
    /// The observer is also invoked once immediately so it starts from the current state.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    /// use tierboard::board::{BoardAction, Partition, PartitionStore, Tier};
    /// use tierboard::domain::Item;
    ///
    /// let mut store = PartitionStore::new(Partition::new(vec![Tier::new("S", "S", "#ef4444")]));
    /// let seen = Rc::new(Cell::new(0));
    /// let sink = Rc::clone(&seen);
    /// store.subscribe(move |p| sink.set(p.pool().len()));
    ///
    /// store.dispatch(&BoardAction::AddToPool(Item::new(1, "Alien", "a.jpg")));
    /// assert_eq!(seen.get(), 1);
    /// ```
    pub fn subscribe<F>(&mut self, mut observer: F) -> SubscriptionId
    where
        F: FnMut(&Partition) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        observer(&self.partition);
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer. Returns `false` if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    /// Applies one action. Returns `true` if the partition changed.
    ///
    /// Stale actions (unknown containers, items or indices) leave the partition
    /// untouched and do not notify observers.
    pub fn dispatch(&mut self, action: &BoardAction) -> bool {
        let _span = tracing::debug_span!("board_dispatch", action = ?action).entered();

        if !self.partition.apply(action) {
            tracing::debug!("action had no effect");
            return false;
        }

        self.revision += 1;
        let summary = self.partition.summary();
        tracing::debug!(
            revision = self.revision,
            ranked = summary.ranked,
            unranked = summary.unranked,
            "partition changed"
        );

        for (_, observer) in &mut self.observers {
            observer(&self.partition);
        }
        true
    }
}

impl fmt::Debug for PartitionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartitionStore")
            .field("partition", &self.partition)
            .field("revision", &self.revision)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Tier;
    use crate::domain::{Item, ItemId, TierId};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn store() -> PartitionStore {
        PartitionStore::new(Partition::new(vec![Tier::new("S", "S", "#ef4444"), Tier::new("A", "A", "#f97316")]))
    }

    #[test]
    fn observers_see_every_change_but_not_no_ops() {
        let mut store = store();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        store.subscribe(move |p| sink.borrow_mut().push(p.total_items()));

        store.dispatch(&BoardAction::AddToPool(Item::new(1, "a", "a")));
        store.dispatch(&BoardAction::AddToPool(Item::new(1, "a", "a")));
        store.dispatch(&BoardAction::RemoveFromPool(ItemId(1)));

        assert_eq!(*log.borrow(), vec![0, 1, 0]);
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn unsubscribed_observers_are_not_called() {
        let mut store = store();
        let calls = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&calls);
        let id = store.subscribe(move |_| *sink.borrow_mut() += 1);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.dispatch(&BoardAction::AddToPool(Item::new(1, "a", "a")));
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn stale_dispatch_keeps_revision() {
        let mut store = store();
        assert!(!store.dispatch(&BoardAction::Unrank { item: ItemId(4), tier: TierId::from("S") }));
        assert_eq!(store.revision(), 0);
    }
}
