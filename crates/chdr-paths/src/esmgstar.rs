//! ESMG* — bounded-memory best-first search.
//!
//! A simplified memory-bounded A* over a tree of reference-counted
//! nodes. The open set never exceeds `memory_limit`: when it would, the
//! worst leaf is culled — removed from its parent's successor list,
//! with its f recorded in the parent's *forgotten* table so the parent
//! can later re-generate it at the remembered cost instead of from
//! scratch. Children hold strong references to parents; parents track
//! children weakly, so a culled branch really is released.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use chdr_core::{Coord, DaryHeap, Scalar, to_1d, to_nd};

use crate::maze::{Maze, NodeData};
use crate::solve::{Params, Solver};

/// Memory-bounded best-first search. `memory_limit` caps the open set;
/// a limit of zero can admit nothing and always reports no path.
pub struct EsmgStar;

struct SmaNode<S> {
    index: usize,
    depth: usize,
    g: S,
    f: Cell<S>,
    parent: Option<Rc<SmaNode<S>>>,
    successors: RefCell<Vec<Weak<SmaNode<S>>>>,
    forgotten: RefCell<IndexMap<usize, S>>,
}

impl<S> Drop for SmaNode<S> {
    /// Iterative ancestor unlink, as for any managed chain.
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(node) = parent {
            match Rc::try_unwrap(node) {
                Ok(mut inner) => parent = inner.parent.take(),
                Err(_) => break,
            }
        }
    }
}

/// Heap entry: identity by node, order by `(f, g)`.
struct Entry<S>(Rc<SmaNode<S>>);

impl<S> Clone for Entry<S> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<S: Scalar> PartialEq for Entry<S> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<S: Scalar> Eq for Entry<S> {}

impl<S: Scalar> Ord for Entry<S> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0
            .f
            .get()
            .key_cmp(other.0.f.get())
            .then(other.0.g.key_cmp(self.0.g))
    }
}

impl<S: Scalar> PartialOrd for Entry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

type Open<S> = DaryHeap<Entry<S>, 2>;

fn in_open<S: Scalar>(open: &Open<S>, node: &Rc<SmaNode<S>>) -> bool {
    open.iter().any(|entry| Rc::ptr_eq(&entry.0, node))
}

/// Live successors of `curr`, generating them on first expansion (or
/// re-generating after a full cull).
fn expand<M, const K: usize, S>(
    curr: &Rc<SmaNode<S>>,
    params: &Params<'_, M, K, S>,
) -> Vec<Rc<SmaNode<S>>>
where
    M: Maze<K, S>,
    S: Scalar,
{
    let live: Vec<Rc<SmaNode<S>>> = curr
        .successors
        .borrow()
        .iter()
        .filter_map(Weak::upgrade)
        .collect();
    if !live.is_empty() {
        return live;
    }

    let mut nbuf: Vec<NodeData<K, S>> = Vec::with_capacity(2 * K);
    params.maze.neighbours_into(curr.index, params.size, &mut nbuf);

    let mut fresh = Vec::with_capacity(nbuf.len());
    let mut weak = curr.successors.borrow_mut();
    weak.clear();
    for n in nbuf {
        // Never step straight back, and never admit nodes the memory
        // bound could not hold on a path.
        if curr.parent.as_ref().is_some_and(|p| p.index == n.index) {
            continue;
        }
        if curr.depth + 1 >= params.memory_limit {
            continue;
        }
        let g = curr.g + n.distance;
        let child = Rc::new(SmaNode {
            index: n.index,
            depth: curr.depth + 1,
            g,
            f: Cell::new(g + (params.h)(n.coord, params.end) * params.weight),
            parent: Some(Rc::clone(curr)),
            successors: RefCell::new(Vec::new()),
            forgotten: RefCell::new(IndexMap::new()),
        });
        weak.push(Rc::downgrade(&child));
        fresh.push(child);
    }
    fresh
}

/// Remove the worst leaf (second worst when the worst is also the
/// best), book its f into the parent's forgotten table and put the
/// parent back on the open set.
fn cull_worst_leaf<S: Scalar>(open: &mut Open<S>) {
    let mut ranked: Vec<Entry<S>> = open.iter().cloned().collect();
    ranked.sort();
    let Some(mut worst) = ranked.pop() else {
        return;
    };
    // Never cull the node about to be expanded; fall back to the
    // second-worst when the worst is also the best.
    if let Some(best) = open.top() {
        if Rc::ptr_eq(&best.0, &worst.0) {
            if let Some(second) = ranked.pop() {
                worst = second;
            }
        }
    }
    open.remove(&worst);

    let Some(parent) = worst.0.parent.as_ref() else {
        return; // culling the root just discards it
    };

    parent
        .successors
        .borrow_mut()
        .retain(|w| w.upgrade().is_some_and(|rc| !Rc::ptr_eq(&rc, &worst.0)));
    parent
        .forgotten
        .borrow_mut()
        .insert(worst.0.index, worst.0.f.get());

    let min = parent
        .forgotten
        .borrow()
        .values()
        .copied()
        .reduce(|a, b| if b.key_cmp(a).is_lt() { b } else { a });
    if let Some(min) = min {
        let entry = Entry(Rc::clone(parent));
        if in_open(open, parent) {
            // Its key changes; re-seat it.
            open.remove(&entry);
            parent.f.set(min);
            open.push(entry);
        } else {
            parent.f.set(min);
            open.push(entry);
        }
    }
}

fn backtrack<const K: usize, S: Scalar>(goal: &Rc<SmaNode<S>>, size: Coord<K>) -> Vec<Coord<K>> {
    let mut path = vec![to_nd(goal.index, size)];
    let mut parent = goal.parent.clone();
    while let Some(node) = parent {
        path.push(to_nd(node.index, size));
        parent = node.parent.clone();
    }
    path.reverse();
    path
}

impl<M, const K: usize, S> Solver<M, K, S> for EsmgStar
where
    M: Maze<K, S>,
    S: Scalar,
{
    fn execute(params: &Params<'_, M, K, S>) -> Vec<Coord<K>> {
        let size = params.size;
        let e = to_1d(params.end, size);

        let root = Rc::new(SmaNode {
            index: to_1d(params.start, size),
            depth: 0,
            g: S::ZERO,
            f: Cell::new((params.h)(params.start, params.end) * params.weight),
            parent: None,
            successors: RefCell::new(Vec::new()),
            forgotten: RefCell::new(IndexMap::new()),
        });

        let mut open: Open<S> = DaryHeap::new();
        open.push(Entry(root));

        while let Some(Entry(curr)) = open.pop() {
            if curr.index == e {
                return backtrack(&curr, size);
            }

            for child in expand(&curr, params) {
                // Children already queued keep their keys untouched.
                if in_open(&open, &child) {
                    continue;
                }
                // A forgotten child resumes at its recorded cost;
                // anything else starts at path-max.
                let remembered = curr.forgotten.borrow_mut().shift_remove(&child.index);
                match remembered {
                    Some(f) => child.f.set(f),
                    None => {
                        let parent_f = curr.f.get();
                        if parent_f.key_cmp(child.f.get()).is_gt() {
                            child.f.set(parent_f);
                        }
                    }
                }
                open.push(Entry(child));
            }

            // Each cull either shrinks the open set or moves the
            // pressure one level up the tree, so this drains.
            while open.len() > params.memory_limit {
                cull_worst_leaf(&mut open);
            }
        }

        Vec::new()
    }
}
