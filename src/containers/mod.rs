//! Primitive containers shared by Priority-Flood, A*, and lake-component
//! labeling. Kept separate from the algorithms that use them so each
//! one can be tested in isolation.

pub mod indexed_pq;
pub mod min_heap;
pub mod union_find;

pub use indexed_pq::IndexedPriorityQueue;
pub use min_heap::MinHeap;
pub use union_find::UnionFind;
