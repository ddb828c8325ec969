//! Scoped bump allocator.
//!
//! An `Arena` hands out pointer-aligned byte ranges that live as long as the
//! arena itself and are never individually freed — only released en masse
//! when the arena is dropped. Allocations never move once written: each
//! block is an owned `Vec<u8>` grown only by appending new blocks, so a
//! [`ArenaHandle`] resolved against `&Arena` stays valid for the arena's
//! whole lifetime.
//!
//! Interior pointers are deliberately not used here (see the arena refactor
//! note in DESIGN.md): a handle is a small `Copy` offset triple, resolved
//! against the arena at read time instead of being stored as a raw pointer.

/// A stable reference into an [`Arena`]. Cheap to copy and store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaHandle {
    block: u32,
    offset: u32,
    len: u32,
}

/// Bump allocator over a growable list of never-reallocated blocks.
#[derive(Debug)]
pub struct Arena {
    block_size: usize,
    blocks: Vec<Vec<u8>>,
}

fn align_up(n: usize) -> usize {
    let align = std::mem::align_of::<usize>();
    (n + align - 1) & !(align - 1)
}

impl Arena {
    /// Creates a new arena whose blocks grow in increments of at least
    /// `block_size` bytes.
    #[must_use]
    pub fn new(block_size: usize) -> Self {
        let block_size = block_size.max(64);
        Self {
            block_size,
            blocks: vec![Vec::with_capacity(block_size)],
        }
    }

    /// Copies `data` into the arena and returns a handle to the copy.
    pub fn alloc_bytes(&mut self, data: &[u8]) -> ArenaHandle {
        let len = data.len();
        let padded = align_up(len.max(1));

        let last = self.blocks.len() - 1;
        if self.blocks[last].capacity() - self.blocks[last].len() < padded {
            let new_cap = self.block_size.max(padded);
            self.blocks.push(Vec::with_capacity(new_cap));
        }

        let idx = self.blocks.len() - 1;
        let block = &mut self.blocks[idx];
        let offset = block.len();
        block.extend_from_slice(data);
        block.resize(offset + padded, 0);

        ArenaHandle {
            block: idx as u32,
            offset: offset as u32,
            len: len as u32,
        }
    }

    /// Copies `s` into the arena and returns a handle to the copy.
    pub fn alloc_str(&mut self, s: &str) -> ArenaHandle {
        self.alloc_bytes(s.as_bytes())
    }

    /// Resolves a handle to the bytes it was allocated with.
    #[must_use]
    pub fn get(&self, handle: ArenaHandle) -> &[u8] {
        let block = &self.blocks[handle.block as usize];
        let start = handle.offset as usize;
        &block[start..start + handle.len as usize]
    }

    /// Resolves a handle that was allocated via [`Arena::alloc_str`] back to a `&str`.
    #[must_use]
    pub fn get_str(&self, handle: ArenaHandle) -> &str {
        std::str::from_utf8(self.get(handle)).expect("arena-interned string is valid utf8")
    }

    /// Total number of blocks currently allocated.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

#[cfg(test)]
#[path = "arena_tests.rs"]
mod tests;
