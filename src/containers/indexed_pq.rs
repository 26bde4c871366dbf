use std::collections::HashMap;
use std::hash::Hash;

/// Binary heap indexed by element, supporting O(log n) `decrease_key` and
/// O(1) `contains`. Used by Priority-Flood's frontier and by A*'s
/// open set, where relaxing an already-queued neighbor must update its
/// priority in place rather than push a duplicate.
pub struct IndexedPriorityQueue<Id: Copy + Eq + Hash> {
    heap: Vec<Id>,
    pos: HashMap<Id, usize>,
    priority: HashMap<Id, f64>,
}

impl<Id: Copy + Eq + Hash> IndexedPriorityQueue<Id> {
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            pos: HashMap::new(),
            priority: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, id: Id) -> bool {
        self.pos.contains_key(&id)
    }

    fn key_of(&self, id: Id) -> f64 {
        self.priority[&id]
    }

    /// Insert `id` with `priority`, or decrease its existing priority if
    /// `priority` is lower. No-op if `id` is already present with a
    /// priority that is not higher.
    pub fn push(&mut self, id: Id, priority: f64) {
        if let Some(&p) = self.priority.get(&id) {
            if priority < p {
                self.decrease_key(id, priority);
            }
            return;
        }
        self.priority.insert(id, priority);
        let i = self.heap.len();
        self.heap.push(id);
        self.pos.insert(id, i);
        self.sift_up(i);
    }

    /// Lower the priority of an already-present element and restore heap
    /// order. No-op if `priority` is not lower than the current key.
    pub fn decrease_key(&mut self, id: Id, priority: f64) {
        let Some(&i) = self.pos.get(&id) else {
            self.push(id, priority);
            return;
        };
        if priority >= self.key_of(id) {
            return;
        }
        self.priority.insert(id, priority);
        self.sift_up(i);
    }

    pub fn pop_min(&mut self) -> Option<(Id, f64)> {
        if self.heap.is_empty() {
            return None;
        }
        let top = self.heap[0];
        let top_priority = self.key_of(top);
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        self.heap.pop();
        self.pos.remove(&top);
        self.priority.remove(&top);
        if !self.heap.is_empty() {
            self.pos.insert(self.heap[0], 0);
            self.sift_down(0);
        }
        Some((top, top_priority))
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.key_of(self.heap[i]) < self.key_of(self.heap[parent]) {
                self.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.heap.len();
        loop {
            let l = 2 * i + 1;
            let r = 2 * i + 2;
            let mut smallest = i;
            if l < n && self.key_of(self.heap[l]) < self.key_of(self.heap[smallest]) {
                smallest = l;
            }
            if r < n && self.key_of(self.heap[r]) < self.key_of(self.heap[smallest]) {
                smallest = r;
            }
            if smallest == i {
                break;
            }
            self.swap(i, smallest);
            i = smallest;
        }
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.pos.insert(self.heap[i], i);
        self.pos.insert(self.heap[j], j);
    }
}

impl<Id: Copy + Eq + Hash> Default for IndexedPriorityQueue<Id> {
    fn default() -> Self {
        Self::new()
    }
}
