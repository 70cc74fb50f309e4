//! Frontier abstraction and size-class dispatch.
//!
//! Algorithms that offer both a heap and a linear frontier are written
//! once against [`Frontier`] and monomorphised per backing container.
//! [`size_class`] picks the container from the maze size: up to 256
//! vertices a scanned stack buffer beats the heap's constant factor.

use chdr_core::{DaryHeap, LinearQueue};

/// A minimum-first frontier.
pub(crate) trait Frontier<T: Ord> {
    fn with_capacity(capacity: usize) -> Self;
    fn push(&mut self, item: T);
    fn pop(&mut self) -> Option<T>;
    fn len(&self) -> usize;
}

impl<T: Ord, const D: usize> Frontier<T> for DaryHeap<T, D> {
    fn with_capacity(capacity: usize) -> Self {
        DaryHeap::with_capacity(capacity)
    }

    #[inline]
    fn push(&mut self, item: T) {
        DaryHeap::push(self, item);
    }

    #[inline]
    fn pop(&mut self) -> Option<T> {
        DaryHeap::pop(self)
    }

    #[inline]
    fn len(&self) -> usize {
        DaryHeap::len(self)
    }
}

impl<T: Ord, const N: usize> Frontier<T> for LinearQueue<T, N> {
    /// The inline buffer is the capacity; nothing to reserve.
    fn with_capacity(_capacity: usize) -> Self {
        LinearQueue::new()
    }

    #[inline]
    fn push(&mut self, item: T) {
        LinearQueue::push(self, item);
    }

    #[inline]
    fn pop(&mut self) -> Option<T> {
        LinearQueue::pop(self)
    }

    #[inline]
    fn len(&self) -> usize {
        LinearQueue::len(self)
    }
}

/// The frontier size classes, by maze vertex count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SizeClass {
    /// Linear queue over a 16-slot stack buffer.
    Linear16,
    /// Linear queue over a 32-slot stack buffer.
    Linear32,
    /// Linear queue over a 64-slot stack buffer.
    Linear64,
    /// Linear queue over a 128-slot stack buffer.
    Linear128,
    /// Binary heap on the general allocator.
    Heap,
}

/// Pick a frontier class for a maze of `count` vertices.
pub(crate) fn size_class(count: usize) -> SizeClass {
    let class = match count {
        0..=32 => SizeClass::Linear16,
        33..=64 => SizeClass::Linear32,
        65..=128 => SizeClass::Linear64,
        129..=256 => SizeClass::Linear128,
        _ => SizeClass::Heap,
    };
    log::trace!("frontier for {count} vertices: {class:?}");
    class
}
