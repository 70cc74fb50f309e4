//! The [`ExistenceSet`] — a dense membership set over `usize` keys.
//!
//! Solvers use it as the closed set: it answers "have I seen index `i`"
//! without storing the original data. The backing layout is selected by a
//! zero-sized tag — one bit per key at the small end, one machine word per
//! key at the fast end — so the memory/speed trade-off is a type parameter
//! rather than a runtime switch.

use std::marker::PhantomData;

use fixedbitset::FixedBitSet;

// ---------------------------------------------------------------------------
// Storage layouts
// ---------------------------------------------------------------------------

/// Backing storage for an [`ExistenceSet`].
pub trait Store: Default {
    /// Logical length (the highest addressable key + 1).
    fn len(&self) -> usize;
    /// Reserved length, in keys.
    fn capacity(&self) -> usize;
    /// Reserve room for `total` keys without changing the logical length.
    fn reserve(&mut self, total: usize);
    /// Grow or shrink the logical length; new keys are absent.
    fn resize(&mut self, len: usize);
    /// Whether key `i` is present. `i` may be out of range.
    fn get(&self, i: usize) -> bool;
    /// Set presence of key `i`. `i` must be within the logical length.
    fn set(&mut self, i: usize, present: bool);
    /// Highest present key, if any.
    fn last_present(&self) -> Option<usize>;
    /// Drop every key and reset the logical length to zero.
    fn clear(&mut self);
    /// Release unused reserved storage.
    fn trim(&mut self);
}

impl Store for FixedBitSet {
    #[inline]
    fn len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        // A bitset holds no spare slack; every grown bit is addressable.
        self.len()
    }

    #[inline]
    fn reserve(&mut self, total: usize) {
        self.grow(total);
    }

    fn resize(&mut self, len: usize) {
        if len >= self.len() {
            self.grow(len);
        } else {
            let mut smaller = FixedBitSet::with_capacity(len);
            for one in self.ones().take_while(|&i| i < len) {
                smaller.insert(one);
            }
            *self = smaller;
        }
    }

    #[inline]
    fn get(&self, i: usize) -> bool {
        self.contains(i)
    }

    #[inline]
    fn set(&mut self, i: usize, present: bool) {
        FixedBitSet::set(self, i, present);
    }

    #[inline]
    fn last_present(&self) -> Option<usize> {
        self.ones().last()
    }

    #[inline]
    fn clear(&mut self) {
        *self = FixedBitSet::new();
    }

    #[inline]
    fn trim(&mut self) {}
}

macro_rules! vec_store {
    ($($t:ty),*) => {$(
        impl Store for Vec<$t> {
            #[inline]
            fn len(&self) -> usize {
                Vec::len(self)
            }

            #[inline]
            fn capacity(&self) -> usize {
                Vec::capacity(self)
            }

            #[inline]
            fn reserve(&mut self, total: usize) {
                Vec::reserve(self, total.saturating_sub(self.len()));
            }

            #[inline]
            fn resize(&mut self, len: usize) {
                Vec::resize(self, len, 0);
            }

            #[inline]
            fn get(&self, i: usize) -> bool {
                i < self.len() && self[i] != 0
            }

            #[inline]
            fn set(&mut self, i: usize, present: bool) {
                self[i] = present as $t;
            }

            #[inline]
            fn last_present(&self) -> Option<usize> {
                self.iter().rposition(|&unit| unit != 0)
            }

            #[inline]
            fn clear(&mut self) {
                Vec::clear(self);
            }

            #[inline]
            fn trim(&mut self) {
                self.shrink_to_fit();
            }
        }
    )*};
}

vec_store!(u8, u32, usize);

/// Selects the backing [`Store`] of an [`ExistenceSet`].
pub trait MemoryLayout {
    /// The chosen storage.
    type Store: Store;
}

/// One bit per key (packed bitset).
#[derive(Debug, Default, Clone, Copy)]
pub struct LowestMemoryUsage;

/// One byte per key.
#[derive(Debug, Default, Clone, Copy)]
pub struct LowMemoryUsage;

/// One `u32` per key.
#[derive(Debug, Default, Clone, Copy)]
pub struct Balanced;

/// One machine word per key.
#[derive(Debug, Default, Clone, Copy)]
pub struct HighestPerformance;

impl MemoryLayout for LowestMemoryUsage {
    type Store = FixedBitSet;
}

impl MemoryLayout for LowMemoryUsage {
    type Store = Vec<u8>;
}

impl MemoryLayout for Balanced {
    type Store = Vec<u32>;
}

impl MemoryLayout for HighestPerformance {
    type Store = Vec<usize>;
}

// ---------------------------------------------------------------------------
// ExistenceSet
// ---------------------------------------------------------------------------

/// A lazily grown membership set over `usize` keys.
///
/// `add` grows the set on demand; `contains` and `remove` never allocate.
#[derive(Default)]
pub struct ExistenceSet<M: MemoryLayout = LowestMemoryUsage> {
    bits: M::Store,
    _layout: PhantomData<M>,
}

impl<M: MemoryLayout> ExistenceSet<M> {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bits: M::Store::default(),
            _layout: PhantomData,
        }
    }

    /// An empty set with room reserved for `capacity` keys.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut set = Self::new();
        set.reserve(capacity);
        set
    }

    /// Add key `i`, growing the set up to `i + 1` if needed.
    pub fn add(&mut self, i: usize) {
        if i >= self.bits.len() {
            self.bits.resize(i + 1);
        }
        self.bits.set(i, true);
    }

    /// Remove key `i`. A no-op for keys beyond the current length.
    pub fn remove(&mut self, i: usize) {
        if i < self.bits.len() {
            self.bits.set(i, false);
        }
    }

    /// Whether key `i` is present. Never resizes.
    #[inline]
    #[must_use]
    pub fn contains(&self, i: usize) -> bool {
        self.bits.get(i)
    }

    /// Reserve storage for keys up to `capacity` without adding any.
    pub fn reserve(&mut self, capacity: usize) {
        self.bits.reserve(capacity);
    }

    /// Grow or shrink the addressable key range; new keys are absent.
    pub fn resize(&mut self, len: usize) {
        self.bits.resize(len);
    }

    /// Geometric growth hint used by the solvers: reserve
    /// `min(chunk * ((i % chunk) + 1), limit)` keys before inserting near
    /// `i`. Purely an allocation hint; correctness never depends on it.
    pub fn preallocate(&mut self, i: usize, chunk: usize, limit: usize) {
        if self.capacity() < i {
            let chunk = chunk.max(1);
            self.reserve(usize::min(chunk * ((i % chunk) + 1), limit));
        }
    }

    /// Shrink the set to end at the highest present key.
    pub fn prune(&mut self) {
        match self.bits.last_present() {
            Some(last) => self.bits.resize(last + 1),
            None => self.bits.clear(),
        }
    }

    /// Remove every key.
    pub fn clear(&mut self) {
        self.bits.clear();
    }

    /// Release unused reserved storage.
    pub fn trim(&mut self) {
        self.bits.trim();
    }

    /// The logical length (highest addressable key + 1).
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.bits.len()
    }

    /// The reserved length, in keys.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.bits.capacity()
    }
}

impl<M: MemoryLayout> FromIterator<usize> for ExistenceSet<M> {
    fn from_iter<I: IntoIterator<Item = usize>>(items: I) -> Self {
        let mut set = Self::new();
        for i in items {
            set.add(i);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise_layout<M: MemoryLayout>() {
        let mut set = ExistenceSet::<M>::new();

        // add is idempotent and lazily grows.
        set.add(5);
        assert!(set.contains(5));
        assert_eq!(set.size(), 6);
        set.add(5);
        assert!(set.contains(5));
        assert_eq!(set.size(), 6);

        // contains never resizes.
        assert!(!set.contains(1000));
        assert_eq!(set.size(), 6);

        // remove within range clears; out of range is a no-op.
        set.remove(5);
        assert!(!set.contains(5));
        set.remove(1000);
        assert_eq!(set.size(), 6);

        // prune shrinks to the last present key.
        set.add(2);
        set.add(9);
        set.remove(9);
        set.prune();
        assert_eq!(set.size(), 3);
        assert!(set.contains(2));

        set.clear();
        assert_eq!(set.size(), 0);
        assert!(!set.contains(2));
    }

    #[test]
    fn all_layouts_agree() {
        exercise_layout::<LowestMemoryUsage>();
        exercise_layout::<LowMemoryUsage>();
        exercise_layout::<Balanced>();
        exercise_layout::<HighestPerformance>();
    }

    #[test]
    fn preallocate_is_only_a_hint() {
        let mut set = ExistenceSet::<LowMemoryUsage>::new();
        set.preallocate(100, 64, 1000);
        assert!(!set.contains(100));
        set.add(100);
        assert!(set.contains(100));

        // A zero chunk must not panic.
        let mut other = ExistenceSet::<LowMemoryUsage>::new();
        other.preallocate(10, 0, 100);
        other.add(10);
        assert!(other.contains(10));
    }

    #[test]
    fn from_iterator_merges_duplicates() {
        let set: ExistenceSet = [3, 1, 3, 7].into_iter().collect();
        assert!(set.contains(1));
        assert!(set.contains(3));
        assert!(set.contains(7));
        assert!(!set.contains(2));
    }
}
