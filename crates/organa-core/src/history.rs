//! Fixed-capacity ring buffer.
//!
//! Storage grows up to `capacity` once, then `push` overwrites the oldest
//! slot in place. Appends are O(1) and memory stays bounded no matter how
//! long the simulation runs.

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq)]
pub struct RingBuffer<T> {
    slots: Vec<T>,
    /// Next slot to overwrite once the buffer is full.
    head: usize,
    capacity: usize,
}

impl<T> RingBuffer<T> {
    /// Create an empty buffer. A capacity of 0 is raised to 1.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: Vec::with_capacity(capacity),
            head: 0,
            capacity,
        }
    }

    /// Append a value, evicting the oldest one when full.
    pub fn push(&mut self, value: T) {
        if self.slots.len() < self.capacity {
            self.slots.push(value);
        } else {
            self.slots[self.head] = value;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recently pushed value.
    pub fn latest(&self) -> Option<&T> {
        if self.slots.is_empty() {
            return None;
        }
        let idx = if self.is_full() {
            (self.head + self.capacity - 1) % self.capacity
        } else {
            self.slots.len() - 1
        };
        self.slots.get(idx)
    }

    /// Oldest value still retained.
    pub fn oldest(&self) -> Option<&T> {
        if self.is_full() {
            self.slots.get(self.head)
        } else {
            self.slots.first()
        }
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let split = if self.is_full() { self.head } else { 0 };
        self.slots[split..].iter().chain(self.slots[..split].iter())
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = 0;
    }
}

impl<T: Serialize> Serialize for RingBuffer<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
