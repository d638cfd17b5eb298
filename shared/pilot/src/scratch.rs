use crate::math::Vec2;
use std::cell::{Cell, RefCell};
use std::ops::{Deref, DerefMut};

pub const DEFAULT_CAPACITY: usize = 16;

/// Fixed-capacity free list of scratch vectors.
///
/// Every [`Scratch`] returns its slot when dropped, so a borrow can never
/// outlive the call that made it. When the free list runs dry the arena
/// allocates a fresh slot instead of failing.
pub struct ScratchArena {
    free: RefCell<Vec<Box<Vec2>>>,
    capacity: usize,
    borrowed: Cell<u64>,
    released: Cell<u64>,
    heap_fallbacks: Cell<u64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScratchStats {
    pub borrowed: u64,
    pub released: u64,
    pub heap_fallbacks: u64,
}

pub struct Scratch<'a> {
    arena: &'a ScratchArena,
    slot: Option<Box<Vec2>>,
}

impl ScratchArena {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let free = (0..capacity).map(|_| Box::new(Vec2::zeros())).collect();
        Self {
            free: RefCell::new(free),
            capacity,
            borrowed: Cell::new(0),
            released: Cell::new(0),
            heap_fallbacks: Cell::new(0),
        }
    }

    pub fn take(&self, value: Vec2) -> Scratch {
        let slot = self.free.borrow_mut().pop();
        let mut slot = slot.unwrap_or_else(|| {
            log::trace!("scratch arena exhausted, allocating");
            self.heap_fallbacks.set(self.heap_fallbacks.get() + 1);
            Box::new(Vec2::zeros())
        });
        *slot = value;
        self.borrowed.set(self.borrowed.get() + 1);
        Scratch {
            arena: self,
            slot: Some(slot),
        }
    }

    fn release(&self, slot: Box<Vec2>) {
        assert!(
            self.outstanding() > 0,
            "released a scratch vector that was never borrowed"
        );
        self.released.set(self.released.get() + 1);
        let mut free = self.free.borrow_mut();
        if free.len() < self.capacity {
            free.push(slot);
        }
    }

    pub fn outstanding(&self) -> u64 {
        self.borrowed.get() - self.released.get()
    }

    pub fn is_balanced(&self) -> bool {
        self.outstanding() == 0
    }

    pub fn stats(&self) -> ScratchStats {
        ScratchStats {
            borrowed: self.borrowed.get(),
            released: self.released.get(),
            heap_fallbacks: self.heap_fallbacks.get(),
        }
    }
}

impl Default for ScratchArena {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Scratch<'a> {
    pub fn get(&self) -> Vec2 {
        **self
    }
}

impl<'a> Deref for Scratch<'a> {
    type Target = Vec2;

    fn deref(&self) -> &Vec2 {
        self.slot.as_ref().unwrap()
    }
}

impl<'a> DerefMut for Scratch<'a> {
    fn deref_mut(&mut self) -> &mut Vec2 {
        self.slot.as_mut().unwrap()
    }
}

impl<'a> Drop for Scratch<'a> {
    fn drop(&mut self) {
        if let Some(slot) = self.slot.take() {
            self.arena.release(slot);
        }
    }
}
