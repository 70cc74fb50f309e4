//! The [`DaryHeap`] — an array-backed D-ary min-heap.
//!
//! `D` is a type parameter between 2 and 8; the default binary shape suits
//! most frontiers, while wider nodes trade deeper comparisons for better
//! cache behaviour on large open sets.
//!
//! Besides the usual `push`/`top`/`pop`, the heap supports batched
//! insertion: [`push_nosort`](DaryHeap::push_nosort) appends without
//! restoring order, and one [`reheapify_back`](DaryHeap::reheapify_back)
//! after the batch sifts every appended element into place.

/// An array-backed D-ary min-heap under `T`'s `Ord`.
#[derive(Debug, Clone)]
pub struct DaryHeap<T, const D: usize = 2> {
    data: Vec<T>,
    /// Prefix length known to satisfy the heap property.
    sorted: usize,
}

impl<T: Ord, const D: usize> DaryHeap<T, D> {
    /// An empty heap.
    #[must_use]
    pub fn new() -> Self {
        const {
            assert!(D >= 2, "a heap node needs at least two children");
            assert!(D <= 8, "heap arity is capped at eight children");
        }
        Self {
            data: Vec::new(),
            sorted: 0,
        }
    }

    /// An empty heap with reserved room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut heap = Self::new();
        heap.data.reserve(capacity);
        heap
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The minimum element.
    #[inline]
    #[must_use]
    pub fn top(&self) -> Option<&T> {
        debug_assert!(
            self.sorted == self.data.len(),
            "top() with uncommitted push_nosort batch"
        );
        self.data.first()
    }

    /// Insert an element, restoring heap order.
    pub fn push(&mut self, item: T) {
        self.commit();
        self.data.push(item);
        self.sift_up(self.data.len() - 1);
        self.sorted = self.data.len();
    }

    /// Append without restoring order. Must be followed by
    /// [`reheapify_back`](Self::reheapify_back) before the next ordered
    /// access; `pop` commits a forgotten batch itself.
    pub fn push_nosort(&mut self, item: T) {
        self.data.push(item);
    }

    /// Sift every element appended since the last ordered operation into
    /// place, restoring the heap invariant after a `push_nosort` batch.
    pub fn reheapify_back(&mut self) {
        self.commit();
    }

    /// Remove and return the minimum element.
    pub fn pop(&mut self) -> Option<T> {
        self.commit();
        if self.data.is_empty() {
            return None;
        }
        let last = self.data.len() - 1;
        self.data.swap(0, last);
        let min = self.data.pop();
        self.sorted = self.data.len();
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        min
    }

    /// Remove a specific element, located by equality.
    ///
    /// Removing an element that is not in the heap is a programmer error
    /// (debug panic; silently ignored in release builds).
    pub fn remove(&mut self, item: &T) -> Option<T>
    where
        T: PartialEq,
    {
        self.commit();
        let Some(pos) = self.data.iter().position(|x| x == item) else {
            debug_assert!(false, "remove() of an element not in the heap");
            return None;
        };
        let last = self.data.len() - 1;
        self.data.swap(pos, last);
        let removed = self.data.pop();
        self.sorted = self.data.len();
        if pos < self.data.len() {
            if pos > 0 && self.data[pos] < self.data[(pos - 1) / D] {
                self.sift_up(pos);
            } else {
                self.sift_down(pos);
            }
        }
        removed
    }

    pub fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional);
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.sorted = 0;
    }

    /// Iterate the elements in storage order (not sorted order).
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    fn commit(&mut self) {
        while self.sorted < self.data.len() {
            let next = self.sorted;
            self.sorted += 1;
            self.sift_up(next);
        }
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / D;
            if self.data[i] < self.data[parent] {
                self.data.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.data.len();
        loop {
            let first = i * D + 1;
            if first >= len {
                break;
            }
            let mut min = first;
            for child in (first + 1)..usize::min(first + D, len) {
                if self.data[child] < self.data[min] {
                    min = child;
                }
            }
            if self.data[min] < self.data[i] {
                self.data.swap(i, min);
                i = min;
            } else {
                break;
            }
        }
    }
}

impl<T: Ord, const D: usize> Default for DaryHeap<T, D> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    fn drain<const D: usize>(mut heap: DaryHeap<u32, D>) -> Vec<u32> {
        let mut out = Vec::with_capacity(heap.len());
        while let Some(v) = heap.pop() {
            out.push(v);
        }
        out
    }

    #[test]
    fn pops_in_ascending_order() {
        let mut heap = DaryHeap::<u32>::new();
        for v in [5, 1, 4, 2, 8, 0, 3] {
            heap.push(v);
        }
        assert_eq!(heap.top(), Some(&0));
        assert_eq!(drain(heap), vec![0, 1, 2, 3, 4, 5, 8]);
    }

    #[test]
    fn every_arity_agrees_with_sorted_order() {
        fn check<const D: usize>() {
            let mut rng = StdRng::seed_from_u64(0x5eed);
            let mut heap = DaryHeap::<u32, D>::new();
            let mut reference = Vec::new();
            for _ in 0..500 {
                if reference.is_empty() || rng.random_range(0..3) > 0 {
                    let v = rng.random_range(0..10_000);
                    heap.push(v);
                    reference.push(v);
                } else {
                    reference.sort_unstable();
                    assert_eq!(heap.pop(), Some(reference.remove(0)));
                }
            }
            reference.sort_unstable();
            assert_eq!(drain(heap), reference);
        }
        check::<2>();
        check::<3>();
        check::<4>();
        check::<8>();
    }

    #[test]
    fn batched_insertion_restores_order() {
        let mut heap = DaryHeap::<u32>::new();
        heap.push(10);
        for v in [7, 3, 9, 1] {
            heap.push_nosort(v);
        }
        heap.reheapify_back();
        assert_eq!(heap.top(), Some(&1));
        assert_eq!(drain(heap), vec![1, 3, 7, 9, 10]);
    }

    #[test]
    fn forgotten_batch_is_committed_by_pop() {
        let mut heap = DaryHeap::<u32>::new();
        heap.push_nosort(4);
        heap.push_nosort(2);
        assert_eq!(heap.pop(), Some(2));
        assert_eq!(heap.pop(), Some(4));
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn remove_keeps_the_invariant() {
        let mut heap = DaryHeap::<u32, 4>::new();
        for v in 0..64 {
            heap.push((v * 37) % 64);
        }
        heap.remove(&13);
        heap.remove(&0);
        let drained = drain(heap);
        let expected: Vec<u32> = (0..64).filter(|v| *v != 13 && *v != 0).collect();
        assert_eq!(drained, expected);
    }

    #[test]
    fn pop_reduces_len_by_one() {
        let mut heap = DaryHeap::<u32>::new();
        heap.push(2);
        heap.push(1);
        let before = heap.len();
        heap.pop();
        assert_eq!(heap.len(), before - 1);
    }
}
