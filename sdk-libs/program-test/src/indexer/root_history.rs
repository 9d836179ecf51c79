/// Cyclic buffer of the most recent roots of a tree.
///
/// A proof references its root by position. Once `capacity` newer roots have
/// been pushed the position is reused and the proof no longer verifies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootHistory {
    roots: Vec<[u8; 32]>,
    capacity: usize,
    current_index: usize,
}

impl RootHistory {
    /// `capacity` is clamped to `1..=u16::MAX + 1` since root indices are
    /// `u16` in instruction data.
    pub fn new(capacity: usize, initial_root: [u8; 32]) -> Self {
        let capacity = capacity.clamp(1, u16::MAX as usize + 1);
        let mut roots = Vec::with_capacity(capacity);
        roots.push(initial_root);
        Self {
            roots,
            capacity,
            current_index: 0,
        }
    }

    pub fn push(&mut self, root: [u8; 32]) {
        if self.roots.len() < self.capacity {
            self.roots.push(root);
            self.current_index = self.roots.len() - 1;
        } else {
            self.current_index = (self.current_index + 1) % self.capacity;
            self.roots[self.current_index] = root;
        }
    }

    pub fn get(&self, index: u16) -> Option<&[u8; 32]> {
        self.roots.get(index as usize)
    }

    pub fn current_index(&self) -> u16 {
        self.current_index as u16
    }

    pub fn current_root(&self) -> [u8; 32] {
        self.roots[self.current_index]
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
