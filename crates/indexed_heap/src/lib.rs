//! Indexed binary min-heap over a dense key space.
//!
//! Every key in `[0, capacity)` may be queued at most once. A reverse index
//! from key to heap position makes [`IndexedMinHeap::decrease_key`] run in
//! `O(log n)` without searching the heap.

mod error;
mod heap;

pub use error::HeapError;
pub use heap::IndexedMinHeap;
