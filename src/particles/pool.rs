/// A capped collection of short-lived entities with never-reused ids.
///
/// Spawns beyond the cap are rejected. Finished entries are removed by the
/// owner's `reap`, which visits each entry once per call and drops it at most
/// once overall.
#[derive(Debug)]
pub struct Pool<T> {
    capacity: usize,
    next_id: u64,
    entries: Vec<Entry<T>>,
}

#[derive(Debug)]
pub struct Entry<T> {
    pub id: u64,
    pub item: T,
}

impl<T> Pool<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            next_id: 0,
            entries: Vec::with_capacity(capacity),
        }
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Insert `item`, returning its id, or `None` when the pool is full.
    pub fn spawn(&mut self, item: T) -> Option<u64> {
        if self.is_full() {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Entry { id, item });
        Some(id)
    }

    pub fn remove(&mut self, id: u64) -> Option<T> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.swap_remove(index).item)
    }

    /// Drop every entry for which `finished` returns true. Returns how many
    /// were dropped.
    pub fn reap(&mut self, mut finished: impl FnMut(&mut T) -> bool) -> usize {
        let before = self.entries.len();
        let mut i = 0;
        while i < self.entries.len() {
            if finished(&mut self.entries[i].item) {
                self.entries.swap_remove(i);
            } else {
                i += 1;
            }
        }
        before - self.entries.len()
    }

    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry<T>> {
        self.entries.iter()
    }
}
