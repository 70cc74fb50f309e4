//! Parent links and path reconstruction.
//!
//! Two disciplines coexist:
//!
//! - **Unmanaged** links: a node records its parent as a `u32` slot
//!   handle into a solver-owned store (append arena, stable forward
//!   buffer or pool). Nothing is freed until the solver returns.
//! - **Managed** links ([`PathLink`]): reference-counted parents. When a
//!   branch dies, the last holder unlinks its ancestors **iteratively**,
//!   so deep chains cannot overflow the stack, and memory is reclaimed
//!   while the search is still running.

use std::rc::Rc;

use chdr_core::{AppendArena, Coord, PoolArena, StableForwardBuf, to_nd};

// ---------------------------------------------------------------------------
// Unmanaged links
// ---------------------------------------------------------------------------

/// A search node holding an unmanaged parent handle.
pub(crate) trait Parented {
    fn index(&self) -> usize;
    fn parent(&self) -> Option<u32>;
}

/// A store that resolves unmanaged parent handles.
pub(crate) trait ParentStore<N> {
    fn node(&self, handle: u32) -> &N;
}

impl<N> ParentStore<N> for AppendArena<N> {
    #[inline]
    fn node(&self, handle: u32) -> &N {
        self.get(handle)
    }
}

impl<N, const B: usize> ParentStore<N> for StableForwardBuf<N, B> {
    #[inline]
    fn node(&self, handle: u32) -> &N {
        self.get(handle)
    }
}

impl<N> ParentStore<N> for PoolArena<N> {
    #[inline]
    fn node(&self, handle: u32) -> &N {
        self.get(handle)
    }
}

/// Walk the parent chain from `goal` back to the root and return the
/// coordinates start-to-goal, both endpoints included.
pub(crate) fn backtrack<const K: usize, N, P>(goal: &N, store: &P, size: Coord<K>) -> Vec<Coord<K>>
where
    N: Parented,
    P: ParentStore<N>,
{
    let mut path = Vec::new();
    path.push(to_nd(goal.index(), size));
    let mut parent = goal.parent();
    while let Some(handle) = parent {
        let node = store.node(handle);
        path.push(to_nd(node.index(), size));
        parent = node.parent();
    }
    path.reverse();
    path
}

// ---------------------------------------------------------------------------
// Managed links
// ---------------------------------------------------------------------------

/// A reference-counted parent link.
pub(crate) struct PathLink {
    pub(crate) index: usize,
    parent: Option<Rc<PathLink>>,
}

impl PathLink {
    /// A chain root (no parent).
    pub(crate) fn root(index: usize) -> Rc<Self> {
        Rc::new(Self {
            index,
            parent: None,
        })
    }

    /// A link whose parent is `parent`.
    pub(crate) fn child(index: usize, parent: &Rc<Self>) -> Rc<Self> {
        Rc::new(Self {
            index,
            parent: Some(Rc::clone(parent)),
        })
    }
}

impl Drop for PathLink {
    /// Unlink singly-referenced ancestors in a loop. A naive recursive
    /// drop would recurse once per ancestor and overflow on long chains.
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(link) = parent {
            match Rc::try_unwrap(link) {
                Ok(mut inner) => parent = inner.parent.take(),
                Err(_) => break,
            }
        }
    }
}

/// Walk a managed chain from `goal` to the root and return the
/// coordinates start-to-goal, both endpoints included.
pub(crate) fn backtrack_managed<const K: usize>(goal: &Rc<PathLink>, size: Coord<K>) -> Vec<Coord<K>> {
    let mut path = Vec::new();
    path.push(to_nd(goal.index, size));
    let mut parent = goal.parent.clone();
    while let Some(link) = parent {
        path.push(to_nd(link.index, size));
        parent = link.parent.clone();
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestNode {
        index: usize,
        parent: Option<u32>,
    }

    impl Parented for TestNode {
        fn index(&self) -> usize {
            self.index
        }
        fn parent(&self) -> Option<u32> {
            self.parent
        }
    }

    #[test]
    fn backtrack_includes_both_endpoints() {
        let mut store = AppendArena::new();
        let root = store.push(TestNode {
            index: 0,
            parent: None,
        });
        let mid = store.push(TestNode {
            index: 1,
            parent: Some(root),
        });
        let goal = TestNode {
            index: 2,
            parent: Some(mid),
        };
        let path = backtrack(&goal, &store, [3]);
        assert_eq!(path, vec![[0], [1], [2]]);
    }

    #[test]
    fn managed_backtrack_matches() {
        let root = PathLink::root(0);
        let mid = PathLink::child(1, &root);
        let goal = PathLink::child(2, &mid);
        assert_eq!(backtrack_managed(&goal, [3]), vec![[0], [1], [2]]);
    }

    #[test]
    fn dropping_a_long_chain_does_not_recurse() {
        let mut tip = PathLink::root(0);
        for i in 1..200_000 {
            tip = PathLink::child(i, &tip);
        }
        // The iterative drop must unlink 200k ancestors without
        // overflowing the stack.
        drop(tip);
    }
}
