//! Growable container backing every enumeration step
//!
//! Driver enumeration calls return variable-length lists (layers, extensions,
//! devices, queue families, surface formats, present modes). All of them are
//! held in a [`GrowableList`], which keeps an explicit capacity policy:
//! amortized doubling on append, seeded at 256, plus exact sizing ahead of a
//! bulk write of a driver-reported count.

use std::cmp::Ordering;
use std::ops::Index;

const SEED_CAPACITY: usize = 256;

/// A resizable array with amortized-doubling growth and an in-place,
/// non-recursive quicksort.
///
/// The logical capacity is tracked by the list itself: appending past it
/// doubles it (never below the seed of 256), and [`set_capacity`] pins it to
/// an exact value before bulk-writing. Elements are value-copied on insert.
///
/// Allocation failure aborts the process, which matches the contract that a
/// setup sequence without complete capability data cannot continue.
///
/// [`set_capacity`]: GrowableList::set_capacity
#[derive(Debug, Default)]
pub struct GrowableList<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> GrowableList<T> {
    /// An empty list with zero capacity.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            capacity: 0,
        }
    }

    /// Take ownership of a driver-returned buffer, with capacity pinned to
    /// its exact length.
    pub fn from_vec(items: Vec<T>) -> Self {
        let capacity = items.len();
        Self { items, capacity }
    }

    /// Append one element, doubling the capacity when the list is full.
    pub fn push(&mut self, value: T) {
        if self.items.len() >= self.capacity {
            let grown = (self.capacity * 2).max(SEED_CAPACITY);
            self.items.reserve_exact(grown - self.items.len());
            self.capacity = grown;
        }
        self.items.push(value);
    }

    /// Set the capacity to exactly `capacity`, truncating the element count
    /// if it is smaller. Used ahead of bulk-writing a driver-supplied count.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.items.truncate(capacity);
        let len = self.items.len();
        self.items.reserve_exact(capacity - len);
        self.capacity = capacity;
    }

    /// Drop all elements. The capacity is left as-is and is considered stale;
    /// reset it before reuse.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Exchange the elements at `i` and `j` in place.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.items.swap(i, j);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The tracked capacity, which can exceed what the backing storage would
    /// report on its own.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Sort in place with an iterative quicksort.
    ///
    /// Median-of-range pivot, partitioning driven by an explicit range stack
    /// rather than recursion, so the stack depth never depends on the order
    /// of driver-reported input. The sort is not stable; equal elements end
    /// up in an unspecified order.
    pub fn sort_by<F>(&mut self, mut cmp: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let len = self.items.len();
        if len <= 1 {
            return;
        }

        let mut ranges: Vec<(usize, usize)> = Vec::with_capacity(32);
        ranges.push((0, len - 1));

        while let Some((start, end)) = ranges.pop() {
            if start >= end {
                continue;
            }

            // Move the middle element to the end and partition around it.
            let pivot = start + (end - start) / 2;
            self.items.swap(pivot, end);

            let mut store = start;
            for i in start..end {
                if cmp(&self.items[i], &self.items[end]) == Ordering::Less {
                    self.items.swap(i, store);
                    store += 1;
                }
            }
            self.items.swap(store, end);

            if store > start + 1 {
                ranges.push((start, store - 1));
            }
            if store + 1 < end {
                ranges.push((store + 1, end));
            }
        }
    }
}

impl<T: Clone> Clone for GrowableList<T> {
    /// An independent copy with identical count and capacity.
    fn clone(&self) -> Self {
        let mut items = Vec::with_capacity(self.capacity);
        items.extend(self.items.iter().cloned());
        Self {
            items,
            capacity: self.capacity,
        }
    }
}

impl<T> Index<usize> for GrowableList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> Extend<T> for GrowableList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a GrowableList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
