/// Frame arena: recycles `IndexList` buffers across cull invocations.
///
/// Lists are acquired at the start of a cull and released in bulk when the
/// caller is done with the results. Buffers keep their capacity, so steady
/// state frames allocate nothing.

use super::index_list::IndexList;

#[derive(Debug, Default)]
pub struct FrameArena {
    free: Vec<IndexList>,
    outstanding: usize,
    allocations: usize,
}

impl FrameArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take an empty list with at least `reserved_size` slots.
    pub fn acquire(&mut self, reserved_size: usize) -> IndexList {
        self.outstanding += 1;
        match self.free.pop() {
            Some(mut list) => {
                list.reset(reserved_size);
                list
            }
            None => {
                self.allocations += 1;
                IndexList::with_reserved(reserved_size)
            }
        }
    }

    /// Return one list to the pool.
    pub fn release(&mut self, list: IndexList) {
        debug_assert!(self.outstanding > 0, "releasing a list the arena never handed out");
        self.outstanding = self.outstanding.saturating_sub(1);
        self.free.push(list);
    }

    /// Return every list of a finished invocation.
    pub fn release_all(&mut self, lists: impl IntoIterator<Item = IndexList>) {
        for list in lists {
            self.release(list);
        }
    }

    /// Lists handed out and not yet released.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Lists waiting for reuse.
    pub fn pooled(&self) -> usize {
        self.free.len()
    }

    /// Fresh buffers created since the arena was built.
    pub fn allocations(&self) -> usize {
        self.allocations
    }
}

#[cfg(test)]
#[path = "arena_tests.rs"]
mod tests;
