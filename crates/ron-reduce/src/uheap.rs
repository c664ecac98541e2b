//! Priority queue of UUIDs for fanning in sorted op streams.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ron_core::Uuid;

/// Which end of the UUID order comes out first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeapOrder {
    #[default]
    Ascending,
    Descending,
}

/// A UUID tagged with the stream it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapEntry {
    pub uuid: Uuid,
    pub source: usize,
}

/// Entries with equal UUIDs come out in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    entry: HeapEntry,
    order: HeapOrder,
}

impl Ord for Slot {
    fn cmp(&self, other: &Self) -> Ordering {
        let by_uuid = match self.order {
            HeapOrder::Ascending => other.entry.uuid.cmp(&self.entry.uuid),
            HeapOrder::Descending => self.entry.uuid.cmp(&other.entry.uuid),
        };
        by_uuid.then_with(|| other.entry.source.cmp(&self.entry.source))
    }
}

impl PartialOrd for Slot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Binary heap over UUIDs. Duplicates are kept.
#[derive(Debug, Clone, Default)]
pub struct UuidHeap {
    slots: BinaryHeap<Slot>,
    order: HeapOrder,
}

impl UuidHeap {
    pub fn new(order: HeapOrder) -> Self {
        Self {
            slots: BinaryHeap::new(),
            order,
        }
    }

    /// A heap pre-sized for `capacity` entries.
    pub fn with_capacity(order: HeapOrder, capacity: usize) -> Self {
        Self {
            slots: BinaryHeap::with_capacity(capacity),
            order,
        }
    }

    pub fn order(&self) -> HeapOrder {
        self.order
    }

    pub fn put(&mut self, uuid: Uuid) {
        self.put_from(uuid, 0);
    }

    pub fn put_from(&mut self, uuid: Uuid, source: usize) {
        self.slots.push(Slot {
            entry: HeapEntry { uuid, source },
            order: self.order,
        });
    }

    pub fn peek(&self) -> Option<HeapEntry> {
        self.slots.peek().map(|slot| slot.entry)
    }

    /// Remove and return the top UUID.
    pub fn take(&mut self) -> Option<Uuid> {
        self.take_from().map(|entry| entry.uuid)
    }

    /// Remove and return the top entry with its source.
    pub fn take_from(&mut self) -> Option<HeapEntry> {
        self.slots.pop().map(|slot| slot.entry)
    }

    /// Remove the top UUID together with every copy of it.
    pub fn pop_unique(&mut self) -> Option<Uuid> {
        let top = self.take()?;
        while self.peek().is_some_and(|next| next.uuid == top) {
            self.slots.pop();
        }
        Some(top)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

impl Extend<Uuid> for UuidHeap {
    fn extend<I: IntoIterator<Item = Uuid>>(&mut self, iter: I) {
        for uuid in iter {
            self.put(uuid);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ron_core::{NEVER_UUID, ZERO_UUID};

    #[test]
    fn take_then_pop_unique() {
        let mut h = UuidHeap::default();
        h.put(ZERO_UUID);
        h.put(ZERO_UUID);
        h.put(NEVER_UUID);
        h.put(NEVER_UUID);
        h.put(NEVER_UUID);
        assert_eq!(h.len(), 5);
        assert_eq!(h.take(), Some(ZERO_UUID));
        assert_eq!(h.pop_unique(), Some(ZERO_UUID));
        assert_eq!(h.len(), 3);
        assert_eq!(h.pop_unique(), Some(NEVER_UUID));
        assert_eq!(h.len(), 0);
        assert_eq!(h.pop_unique(), None);
    }

    #[test]
    fn descending_order() {
        let mut h = UuidHeap::new(HeapOrder::Descending);
        h.extend([Uuid::name(1), Uuid::name(3), Uuid::name(2)]);
        assert_eq!(h.take(), Some(Uuid::name(3)));
        assert_eq!(h.take(), Some(Uuid::name(2)));
        assert_eq!(h.take(), Some(Uuid::name(1)));
        assert!(h.is_empty());
    }

    #[test]
    fn equal_uuids_come_out_in_source_order() {
        let mut h = UuidHeap::with_capacity(HeapOrder::Ascending, 4);
        h.put_from(Uuid::name(5), 2);
        h.put_from(Uuid::name(5), 0);
        h.put_from(Uuid::name(4), 9);
        h.put_from(Uuid::name(5), 1);
        let sources: Vec<_> = std::iter::from_fn(|| h.take_from())
            .map(|e| e.source)
            .collect();
        assert_eq!(sources, [9, 0, 1, 2]);
    }
}
