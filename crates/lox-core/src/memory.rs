//! Growable Storage
//!
//! Owning, append-only array used for chunk code, constant pools, line runs
//! and the VM evaluation stack.
//! Capacity is tracked explicitly so the growth policy is observable.

use std::ops::Index;

/// Smallest capacity allocated on first growth
pub const MIN_CAPACITY: usize = 8;

/// Growth policy: double, never below `MIN_CAPACITY`
pub fn grow_capacity(old: usize) -> usize {
    std::cmp::max(MIN_CAPACITY, old.saturating_mul(2))
}

/// Append-only array with an explicit doubling policy.
///
/// Invariant: `count() <= capacity()`. Capacity only grows, except through
/// [`GrowableArray::free`] which releases the storage entirely.
#[derive(Debug, Clone)]
pub struct GrowableArray<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> GrowableArray<T> {
    /// Create an empty array with no storage allocated
    pub fn new() -> Self {
        GrowableArray {
            items: Vec::new(),
            capacity: 0,
        }
    }

    /// Append a value, growing if full. Returns the index it was stored at.
    pub fn push(&mut self, value: T) -> usize {
        if self.items.len() == self.capacity {
            self.grow();
        }
        let index = self.items.len();
        self.items.push(value);
        index
    }

    fn grow(&mut self) {
        let new_capacity = grow_capacity(self.capacity);
        self.items.reserve_exact(new_capacity - self.items.len());
        self.capacity = new_capacity;
    }

    /// Value at `index`, or `None` past the logical length
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.items.last_mut()
    }

    /// Remove and return the most recently appended value
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Drop all values; storage is kept
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Release storage and reset to the empty state.
    /// Safe to call any number of times.
    pub fn free(&mut self) {
        self.items = Vec::new();
        self.capacity = 0;
    }

    /// Logical length
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Allocated length according to the growth policy
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> Default for GrowableArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for GrowableArray<T> {
    type Output = T;

    /// Panics when `index >= count()`
    fn index(&self, index: usize) -> &T {
        match self.items.get(index) {
            Some(value) => value,
            None => panic!(
                "index {} out of bounds for array of count {}",
                index,
                self.items.len()
            ),
        }
    }
}

impl<'a, T> IntoIterator for &'a GrowableArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_follows_doubling_policy() {
        let mut array = GrowableArray::new();
        assert_eq!(array.capacity(), 0);

        array.push(1u8);
        assert_eq!(array.capacity(), 8);

        for b in 0..8u8 {
            array.push(b);
        }
        assert_eq!(array.count(), 9);
        assert_eq!(array.capacity(), 16);
    }

    #[test]
    fn push_returns_index() {
        let mut array = GrowableArray::new();
        assert_eq!(array.push('a'), 0);
        assert_eq!(array.push('b'), 1);
        assert_eq!(array[1], 'b');
        assert_eq!(array.get(2), None);
    }

    #[test]
    fn clear_keeps_capacity_free_releases_it() {
        let mut array = GrowableArray::new();
        for i in 0..20 {
            array.push(i);
        }
        array.clear();
        assert_eq!(array.count(), 0);
        assert_eq!(array.capacity(), 32);

        array.free();
        assert_eq!(array.capacity(), 0);
        array.free();
        assert!(array.is_empty());
        assert_eq!(array.capacity(), 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn index_past_count_panics() {
        let mut array = GrowableArray::new();
        array.push(1);
        let _ = array[1];
    }

    #[test]
    fn grow_capacity_floor() {
        assert_eq!(grow_capacity(0), 8);
        assert_eq!(grow_capacity(4), 8);
        assert_eq!(grow_capacity(8), 16);
        assert_eq!(grow_capacity(64), 128);
    }
}
