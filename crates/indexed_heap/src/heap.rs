use crate::HeapError;

// Positions are 1-based: the parent of `p` is `p / 2`, its children are
// `2 * p` and `2 * p + 1`.
const ROOT: usize = 1;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Entry<P> {
    priority: P,
    key: usize,
}

/// Fixed-capacity binary min-heap of `(key, priority)` pairs.
///
/// - Keys are dense integers in `[0, capacity)`; each is queued at most once.
/// - The smallest priority is extracted first.
/// - `index[key]` holds the current position of a queued key, `None` otherwise.
#[derive(Clone, Debug)]
pub struct IndexedMinHeap<P> {
    // `slots[p - 1]` is the entry at position `p`.
    slots: Vec<Entry<P>>,
    index: Vec<Option<usize>>,
}

impl<P: Ord + Copy> IndexedMinHeap<P> {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            index: vec![None; capacity],
        }
    }

    /// Empties the queue, keeping its capacity.
    pub fn reset(&mut self) {
        self.slots.clear();
        self.index.fill(None);
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn contains(&self, key: usize) -> bool {
        self.index.get(key).is_some_and(Option::is_some)
    }

    pub fn priority(&self, key: usize) -> Option<P> {
        let pos = (*self.index.get(key)?)?;
        Some(self.entry(pos).priority)
    }

    pub fn peek(&self) -> Option<(usize, P)> {
        self.slots.first().map(|e| (e.key, e.priority))
    }

    pub fn insert(&mut self, key: usize, priority: P) -> Result<(), HeapError> {
        self.check_key(key)?;
        if self.index[key].is_some() {
            return Err(HeapError::DuplicateKey(key));
        }

        self.slots.push(Entry { priority, key });
        let pos = self.slots.len();
        self.index[key] = Some(pos);
        self.sift_up(pos);
        Ok(())
    }

    /// Removes and returns the entry with the smallest priority.
    pub fn extract_min(&mut self) -> Option<(usize, P)> {
        if self.slots.is_empty() {
            return None;
        }

        let min = self.slots.swap_remove(ROOT - 1);
        self.index[min.key] = None;
        if let Some(&moved) = self.slots.first() {
            self.index[moved.key] = Some(ROOT);
            self.sift_down(ROOT);
        }

        Some((min.key, min.priority))
    }

    /// Lowers the priority of a queued key. Never moves an entry downward, so
    /// a priority that is not strictly smaller is rejected.
    pub fn decrease_key(&mut self, key: usize, priority: P) -> Result<(), HeapError> {
        self.check_key(key)?;
        let pos = self.index[key].ok_or(HeapError::Absent(key))?;

        let entry = &mut self.slots[pos - 1];
        if priority >= entry.priority {
            return Err(HeapError::NotDecreasing(key));
        }
        entry.priority = priority;

        self.sift_up(pos);
        Ok(())
    }

    #[inline]
    fn check_key(&self, key: usize) -> Result<(), HeapError> {
        if key < self.capacity() {
            Ok(())
        } else {
            Err(HeapError::KeyOutOfRange {
                key,
                capacity: self.capacity(),
            })
        }
    }

    #[inline]
    fn entry(&self, pos: usize) -> &Entry<P> {
        &self.slots[pos - 1]
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > ROOT {
            let parent = pos / 2;
            if self.entry(parent).priority <= self.entry(pos).priority {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
    }

    // Bounded by the current length, not by the capacity.
    fn sift_down(&mut self, mut pos: usize) {
        let len = self.len();
        loop {
            let left = pos * 2;
            if left > len {
                break;
            }

            let right = left + 1;
            let child = if right <= len && self.entry(right).priority < self.entry(left).priority {
                right
            } else {
                left
            };

            if self.entry(pos).priority <= self.entry(child).priority {
                break;
            }
            self.swap(pos, child);
            pos = child;
        }
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a - 1, b - 1);
        self.index[self.slots[a - 1].key] = Some(a);
        self.index[self.slots[b - 1].key] = Some(b);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::fmt::Debug;

    use proptest::prelude::*;
    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::IndexedMinHeap;
    use crate::HeapError;

    const CAPACITY: usize = 37;

    fn assert_invariants<P: Ord + Copy + Debug>(heap: &IndexedMinHeap<P>) {
        let len = heap.len();
        for pos in 2..=len {
            let parent = pos / 2;
            assert!(
                heap.entry(parent).priority <= heap.entry(pos).priority,
                "heap order broken at position {pos}: {heap:?}"
            );
        }

        let mut queued = 0;
        for (key, slot) in heap.index.iter().enumerate() {
            match *slot {
                Some(pos) => {
                    assert!((1..=len).contains(&pos), "key {key} points outside the heap");
                    assert_eq!(heap.entry(pos).key, key);
                    queued += 1;
                }
                None => assert!(heap.slots.iter().all(|e| e.key != key)),
            }
        }
        assert_eq!(queued, len);
    }

    fn drain<P: Ord + Copy>(heap: &mut IndexedMinHeap<P>) -> Vec<(usize, P)> {
        std::iter::from_fn(|| heap.extract_min()).collect()
    }

    #[test]
    fn extract_from_fresh_queue() {
        let mut heap = IndexedMinHeap::<u32>::new(8);
        assert_eq!(heap.extract_min(), None);
        assert_eq!(heap.len(), 0);
        assert!(heap.is_empty());
        assert_eq!(heap.peek(), None);
    }

    #[test]
    fn descending_inserts_then_decrease() {
        let mut heap = IndexedMinHeap::new(11);
        for key in (1..=10).rev() {
            heap.insert(key, key as u32).unwrap();
            assert_invariants(&heap);
        }

        heap.decrease_key(10, 0).unwrap();
        assert_invariants(&heap);
        assert_eq!(heap.peek(), Some((10, 0)));

        assert_eq!(heap.extract_min(), Some((10, 0)));
        assert_invariants(&heap);
        assert_eq!(heap.extract_min(), Some((1, 1)));
        assert_invariants(&heap);
        assert_eq!(heap.len(), 8);
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let mut heap = IndexedMinHeap::new(4);
        heap.insert(2, 7_u32).unwrap();
        heap.insert(0, 9).unwrap();

        assert_eq!(heap.insert(2, 1), Err(HeapError::DuplicateKey(2)));
        assert_eq!(heap.len(), 2);
        assert_eq!(heap.priority(2), Some(7));
        assert_eq!(heap.peek(), Some((2, 7)));
        assert_invariants(&heap);
    }

    #[test]
    fn out_of_range_key_is_rejected() {
        let mut heap = IndexedMinHeap::new(3);
        let err = HeapError::KeyOutOfRange {
            key: 3,
            capacity: 3,
        };
        assert_eq!(heap.insert(3, 0_u32), Err(err));
        assert_eq!(heap.decrease_key(3, 0), Err(err));
        assert!(!heap.contains(3));
        assert_eq!(heap.priority(3), None);
        assert!(heap.is_empty());
    }

    #[test]
    fn decrease_key_rules() {
        let mut heap = IndexedMinHeap::new(5);
        heap.insert(1, 10_u32).unwrap();
        heap.insert(4, 20).unwrap();

        assert_eq!(heap.decrease_key(0, 1), Err(HeapError::Absent(0)));
        assert_eq!(heap.decrease_key(4, 20), Err(HeapError::NotDecreasing(4)));
        assert_eq!(heap.decrease_key(4, 25), Err(HeapError::NotDecreasing(4)));
        assert_eq!(heap.priority(4), Some(20));

        heap.decrease_key(4, 5).unwrap();
        assert_eq!(heap.priority(4), Some(5));
        assert_eq!(heap.peek(), Some((4, 5)));
        assert_invariants(&heap);

        heap.extract_min().unwrap();
        assert_eq!(heap.decrease_key(4, 1), Err(HeapError::Absent(4)));
    }

    #[test]
    fn extracted_key_can_be_inserted_again() {
        let mut heap = IndexedMinHeap::new(2);
        heap.insert(0, 3_u32).unwrap();
        heap.insert(1, 4).unwrap();
        assert_eq!(heap.extract_min(), Some((0, 3)));
        assert!(!heap.contains(0));

        heap.insert(0, 5).unwrap();
        assert_eq!(drain(&mut heap), vec![(1, 4), (0, 5)]);
    }

    #[test]
    fn reset_clears_everything() {
        let mut heap = IndexedMinHeap::new(6);
        for key in 0..6 {
            heap.insert(key, 6 - key as u32).unwrap();
        }
        heap.reset();

        assert!(heap.is_empty());
        assert_eq!(heap.capacity(), 6);
        assert!((0..6).all(|key| !heap.contains(key)));
        heap.insert(5, 0).unwrap();
        assert_eq!(heap.extract_min(), Some((5, 0)));
    }

    #[test]
    fn shrinking_non_power_of_two_heap_stays_ordered() {
        // A sift bound derived from the capacity would read past the logical
        // end of the heap once it shrinks.
        let priorities = [5_u32, 1, 9, 3, 3, 8, 0];
        let mut heap = IndexedMinHeap::new(priorities.len());
        for (key, &p) in priorities.iter().enumerate() {
            heap.insert(key, p).unwrap();
        }

        let mut got = Vec::new();
        while let Some((_, p)) = heap.extract_min() {
            assert_invariants(&heap);
            got.push(p);
        }
        assert_eq!(got, vec![0, 1, 3, 3, 5, 8, 9]);
    }

    #[test]
    fn random_decrease_then_drain_is_sorted() {
        for seed in 0..20_u64 {
            let mut rng = StdRng::seed_from_u64(0x1DE4_0000 + seed);
            let n = rng.random_range(1..200);
            let mut heap = IndexedMinHeap::new(n);
            let mut expected = vec![0_u64; n];

            for (key, slot) in expected.iter_mut().enumerate() {
                *slot = rng.random_range(0..1_000_000);
                heap.insert(key, *slot).unwrap();
            }
            for _ in 0..n {
                let key = rng.random_range(0..n);
                let p = rng.random_range(0..1_000_000);
                let ok = heap.decrease_key(key, p).is_ok();
                assert_eq!(ok, p < expected[key], "seed={seed}");
                if ok {
                    expected[key] = p;
                }
            }
            assert_invariants(&heap);

            let drained = drain(&mut heap);
            assert_eq!(drained.len(), n, "seed={seed}");
            assert!(drained.windows(2).all(|w| w[0].1 <= w[1].1), "seed={seed}");
            for (key, p) in drained {
                assert_eq!(expected[key], p, "seed={seed}");
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(usize, u32),
        ExtractMin,
        Decrease(usize, u32),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..CAPACITY + 3, 0..500_u32).prop_map(|(k, p)| Op::Insert(k, p)),
            Just(Op::ExtractMin),
            (0..CAPACITY + 3, 0..500_u32).prop_map(|(k, p)| Op::Decrease(k, p)),
        ]
    }

    proptest! {
        #[test]
        fn behaves_like_a_keyed_map(ops in prop::collection::vec(op_strategy(), 0..300)) {
            let mut heap = IndexedMinHeap::new(CAPACITY);
            let mut model: BTreeMap<usize, u32> = BTreeMap::new();

            for op in ops {
                match op {
                    Op::Insert(key, p) => {
                        let res = heap.insert(key, p);
                        if key >= CAPACITY {
                            prop_assert_eq!(res, Err(HeapError::KeyOutOfRange { key, capacity: CAPACITY }));
                        } else if model.contains_key(&key) {
                            prop_assert_eq!(res, Err(HeapError::DuplicateKey(key)));
                        } else {
                            prop_assert_eq!(res, Ok(()));
                            model.insert(key, p);
                        }
                    }
                    Op::ExtractMin => match model.values().min().copied() {
                        None => prop_assert_eq!(heap.extract_min(), None),
                        Some(min) => {
                            let (key, p) = heap.extract_min().unwrap();
                            prop_assert_eq!(p, min);
                            prop_assert_eq!(model.remove(&key), Some(p));
                        }
                    },
                    Op::Decrease(key, p) => {
                        let res = heap.decrease_key(key, p);
                        match model.get(&key).copied() {
                            _ if key >= CAPACITY => {
                                prop_assert_eq!(res, Err(HeapError::KeyOutOfRange { key, capacity: CAPACITY }));
                            }
                            None => prop_assert_eq!(res, Err(HeapError::Absent(key))),
                            Some(current) if p < current => {
                                prop_assert_eq!(res, Ok(()));
                                prop_assert_eq!(heap.priority(key), Some(p));
                                model.insert(key, p);
                            }
                            Some(_) => prop_assert_eq!(res, Err(HeapError::NotDecreasing(key))),
                        }
                    }
                }

                prop_assert_eq!(heap.len(), model.len());
                assert_invariants(&heap);
            }
        }

        #[test]
        fn extraction_is_non_decreasing(priorities in prop::collection::vec(any::<u64>(), 0..CAPACITY)) {
            let mut heap = IndexedMinHeap::new(CAPACITY);
            for (key, &p) in priorities.iter().enumerate() {
                heap.insert(key, p).unwrap();
            }

            let drained = drain(&mut heap);
            prop_assert_eq!(drained.len(), priorities.len());
            prop_assert!(drained.windows(2).all(|w| w[0].1 <= w[1].1));
            prop_assert_eq!(heap.len(), 0);
        }
    }
}
