//! Solver-local arenas: [`AppendArena`], [`PoolArena`] and [`BumpArena`].
//!
//! All three hand out `u32` slot handles into block-chained storage whose
//! blocks never move once allocated. Block widths double from
//! [`INITIAL_WIDTH`] up to a cap of 64 KiB worth of elements, so small
//! searches stay small while large ones amortise allocation.
//!
//! - [`AppendArena`] — append-only; nothing is ever released. The parent
//!   store for unmanaged search nodes.
//! - [`PoolArena`] — adds a free list; removed slots are recycled by later
//!   insertions. Backs bounded-memory searches that retire dead branches.
//! - [`BumpArena`] — releases only the most recently issued slot (LIFO),
//!   which makes it a stack with stable storage.

/// First block width of every arena.
pub const INITIAL_WIDTH: usize = 64;

const fn max_width<T>() -> usize {
    let size = size_of::<T>();
    let size = if size < 1 { 1 } else { size };
    let per_block = 65536 / size;
    if per_block < 1 { 1 } else { per_block }
}

/// Locate `handle` in a block chain described by `starts` (the first
/// handle of each block, ascending).
#[inline]
fn locate(starts: &[u32], handle: u32) -> (usize, usize) {
    let block = starts.partition_point(|&s| s <= handle) - 1;
    (block, (handle - starts[block]) as usize)
}

// ---------------------------------------------------------------------------
// AppendArena
// ---------------------------------------------------------------------------

/// An append-only arena with stable slots and no deallocation.
#[derive(Debug)]
pub struct AppendArena<T> {
    blocks: Vec<Vec<T>>,
    starts: Vec<u32>,
    next_width: usize,
    len: usize,
}

impl<T> AppendArena<T> {
    /// An empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            starts: Vec::new(),
            next_width: INITIAL_WIDTH.min(max_width::<T>()),
            len: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append an element and return its handle.
    pub fn push(&mut self, item: T) -> u32 {
        let handle = self.len as u32;
        match self.blocks.last_mut() {
            Some(block) if block.len() < block.capacity() => block.push(item),
            _ => {
                let width = self.next_width;
                self.next_width = (width * 2).min(max_width::<T>());
                self.starts.push(handle);
                let mut block = Vec::with_capacity(width);
                block.push(item);
                self.blocks.push(block);
            }
        }
        self.len += 1;
        handle
    }

    /// Resolve a handle returned by [`push`](Self::push).
    #[inline]
    #[must_use]
    pub fn get(&self, handle: u32) -> &T {
        let (block, slot) = locate(&self.starts, handle);
        &self.blocks[block][slot]
    }

    /// Drop every element and block.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.starts.clear();
        self.next_width = INITIAL_WIDTH.min(max_width::<T>());
        self.len = 0;
    }
}

impl<T> Default for AppendArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// PoolArena
// ---------------------------------------------------------------------------

/// A block-chained pool: removals feed a free list that later insertions
/// drain before new slots are carved.
#[derive(Debug)]
pub struct PoolArena<T> {
    blocks: Vec<Vec<Option<T>>>,
    starts: Vec<u32>,
    free: Vec<u32>,
    next_width: usize,
    slots: usize,
}

impl<T> PoolArena<T> {
    /// An empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            starts: Vec::new(),
            free: Vec::new(),
            next_width: INITIAL_WIDTH.min(max_width::<T>()),
            slots: 0,
        }
    }

    /// Number of live (occupied) slots.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots - self.free.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert an element, reusing a freed slot when one is available.
    pub fn insert(&mut self, item: T) -> u32 {
        if let Some(handle) = self.free.pop() {
            let (block, slot) = locate(&self.starts, handle);
            debug_assert!(self.blocks[block][slot].is_none());
            self.blocks[block][slot] = Some(item);
            return handle;
        }
        let handle = self.slots as u32;
        match self.blocks.last_mut() {
            Some(block) if block.len() < block.capacity() => block.push(Some(item)),
            _ => {
                let width = self.next_width;
                self.next_width = (width * 2).min(max_width::<T>());
                self.starts.push(handle);
                let mut block = Vec::with_capacity(width);
                block.push(Some(item));
                self.blocks.push(block);
            }
        }
        self.slots += 1;
        handle
    }

    /// Remove the element in `handle`'s slot and recycle the slot.
    pub fn remove(&mut self, handle: u32) -> T {
        let (block, slot) = locate(&self.starts, handle);
        let item = self.blocks[block][slot]
            .take()
            .expect("remove() of an empty pool slot");
        self.free.push(handle);
        item
    }

    /// Resolve a live handle.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: u32) -> &T {
        let (block, slot) = locate(&self.starts, handle);
        self.blocks[block][slot]
            .as_ref()
            .expect("get() of an empty pool slot")
    }

    /// Resolve a live handle mutably.
    #[inline]
    #[must_use]
    pub fn get_mut(&mut self, handle: u32) -> &mut T {
        let (block, slot) = locate(&self.starts, handle);
        self.blocks[block][slot]
            .as_mut()
            .expect("get_mut() of an empty pool slot")
    }

    /// Drop every element and rebuild the free list over all carved slots.
    pub fn release(&mut self) {
        for block in &mut self.blocks {
            for slot in block.iter_mut() {
                *slot = None;
            }
        }
        self.free = (0..self.slots as u32).rev().collect();
    }

    /// Drop every element and block.
    pub fn reset(&mut self) {
        self.blocks.clear();
        self.starts.clear();
        self.free.clear();
        self.next_width = INITIAL_WIDTH.min(max_width::<T>());
        self.slots = 0;
    }
}

impl<T> Default for PoolArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// BumpArena
// ---------------------------------------------------------------------------

/// A stack-disciplined arena: only the most recently issued slot can be
/// released.
#[derive(Debug)]
pub struct BumpArena<T> {
    blocks: Vec<Vec<T>>,
    starts: Vec<u32>,
    next_width: usize,
    len: usize,
}

impl<T> BumpArena<T> {
    /// An empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            starts: Vec::new(),
            next_width: INITIAL_WIDTH.min(max_width::<T>()),
            len: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Carve the next slot and return its handle.
    pub fn push(&mut self, item: T) -> u32 {
        let handle = self.len as u32;
        match self.blocks.last_mut() {
            Some(block) if block.len() < block.capacity() => block.push(item),
            _ => {
                let width = self.next_width;
                self.next_width = (width * 2).min(max_width::<T>());
                self.starts.push(handle);
                let mut block = Vec::with_capacity(width);
                block.push(item);
                self.blocks.push(block);
            }
        }
        self.len += 1;
        handle
    }

    /// Release the most recently issued slot. Releasing anything else is
    /// not expressible — the LIFO discipline is the API.
    pub fn pop(&mut self) -> Option<T> {
        let last = self.blocks.last_mut()?;
        let item = last.pop();
        debug_assert!(item.is_some());
        if last.is_empty() {
            self.blocks.pop();
            self.starts.pop();
        }
        self.len -= 1;
        item
    }

    /// The most recently issued element.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.blocks.last().and_then(|block| block.last())
    }

    /// The most recently issued element, mutably.
    #[must_use]
    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.blocks.last_mut().and_then(|block| block.last_mut())
    }

    /// Resolve a live handle.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: u32) -> &T {
        let (block, slot) = locate(&self.starts, handle);
        &self.blocks[block][slot]
    }

    /// Drop every element and block.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.starts.clear();
        self.next_width = INITIAL_WIDTH.min(max_width::<T>());
        self.len = 0;
    }
}

impl<T> Default for BumpArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
