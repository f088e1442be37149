/// Reusable, pre-sized index buffer: the output of every culling stage.
///
/// Entries index into a parallel source array (node/bounds arrays, light
/// arrays). `size <= reserved_size` always holds. A list is sized once per
/// cull invocation and filtered in place by successive passes.

/// Pre-sized index buffer with a live `size` prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexList {
    indices: Vec<usize>,
    size: usize,
}

impl IndexList {
    /// Empty list with `reserved_size` slots.
    pub fn with_reserved(reserved_size: usize) -> Self {
        Self {
            indices: vec![0; reserved_size],
            size: 0,
        }
    }

    /// List holding `0..count`.
    pub fn from_range(count: usize) -> Self {
        Self {
            indices: (0..count).collect(),
            size: count,
        }
    }

    /// Ensure `reserved_size` slots and clear.
    pub fn reset(&mut self, reserved_size: usize) {
        if self.indices.len() < reserved_size {
            self.indices.resize(reserved_size, 0);
        }
        self.size = 0;
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn reserved_size(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Append an index, growing the buffer geometrically when full.
    pub fn push(&mut self, index: usize) {
        if self.size == self.indices.len() {
            let grown = (self.indices.len() * 2).max(16);
            self.indices.resize(grown, 0);
        }
        self.indices[self.size] = index;
        self.size += 1;
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.indices[..self.size]
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.as_slice().iter().copied()
    }

    pub fn get(&self, position: usize) -> Option<usize> {
        self.as_slice().get(position).copied()
    }

    /// Keep entries matching `keep`, preserving their relative order.
    pub fn retain(&mut self, mut keep: impl FnMut(usize) -> bool) {
        let mut write = 0;
        for read in 0..self.size {
            let index = self.indices[read];
            if keep(index) {
                self.indices[write] = index;
                write += 1;
            }
        }
        self.size = write;
    }

    /// Replace the contents with `indices`.
    pub fn assign(&mut self, indices: &[usize]) {
        self.reset(indices.len());
        self.indices[..indices.len()].copy_from_slice(indices);
        self.size = indices.len();
    }

    pub fn clear(&mut self) {
        self.size = 0;
    }
}

#[cfg(test)]
#[path = "index_list_tests.rs"]
mod tests;
