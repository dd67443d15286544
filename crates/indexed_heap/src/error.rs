use thiserror::Error;

/// Failure of a queue operation. A failing call leaves the queue untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum HeapError {
    #[error("key {key} is outside of the key space [0, {capacity})")]
    KeyOutOfRange { key: usize, capacity: usize },
    #[error("key {0} is already in the queue")]
    DuplicateKey(usize),
    #[error("key {0} is not in the queue")]
    Absent(usize),
    #[error("new priority of key {0} is not smaller than the current one")]
    NotDecreasing(usize),
}
