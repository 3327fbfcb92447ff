use thiserror::Error;

/// Popped or peeked an empty heap.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("heap is empty")]
pub struct HeapEmpty;

/// Array-backed binary min-heap ordered by a caller-supplied comparator.
///
/// `better(a, b)` returns true when `a` must pop strictly before `b`; it is
/// handed to each mutating operation, `sort_by` style, so it may consult
/// state that changes between calls. There is no remove or decrease-key: an
/// item whose key improves in place keeps its stale position until a later
/// sift touches it.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    items: Vec<T>,
}

impl<T> MinHeap<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Items in internal array order, root first.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn peek_min(&self) -> Result<&T, HeapEmpty> {
        self.items.first().ok_or(HeapEmpty)
    }

    pub fn push(&mut self, item: T, better: impl Fn(&T, &T) -> bool) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1, &better);
    }

    /// Remove and return the minimum under `better`.
    pub fn pop_min(&mut self, better: impl Fn(&T, &T) -> bool) -> Result<T, HeapEmpty> {
        let last = self.items.len().checked_sub(1).ok_or(HeapEmpty)?;
        self.items.swap(0, last);
        let min = self.items.pop().ok_or(HeapEmpty)?;
        if !self.items.is_empty() {
            self.sift_down(0, &better);
        }
        Ok(min)
    }

    fn sift_up(&mut self, mut index: usize, better: &impl Fn(&T, &T) -> bool) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if better(&self.items[index], &self.items[parent]) {
                self.items.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize, better: &impl Fn(&T, &T) -> bool) {
        let len = self.items.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut best = index;

            if left < len && better(&self.items[left], &self.items[best]) {
                best = left;
            }
            if right < len && better(&self.items[right], &self.items[best]) {
                best = right;
            }

            if best == index {
                return;
            }
            self.items.swap(index, best);
            index = best;
        }
    }
}

impl<T: PartialEq> MinHeap<T> {
    /// Linear membership scan.
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn asc(a: &u32, b: &u32) -> bool {
        a < b
    }

    // No child may compare strictly better than its parent.
    fn assert_heap_property<T>(heap: &MinHeap<T>, better: impl Fn(&T, &T) -> bool) {
        let items: Vec<&T> = heap.iter().collect();
        for i in 1..items.len() {
            let parent = (i - 1) / 2;
            assert!(
                !better(items[i], items[parent]),
                "heap property violated between {} and parent {}",
                i,
                parent
            );
        }
    }

    #[test]
    fn pops_in_comparator_order() {
        let mut heap = MinHeap::new();
        for value in [5u32, 1, 4, 2, 3] {
            heap.push(value, asc);
        }

        assert_eq!(heap.len(), 5);
        assert_eq!(heap.peek_min(), Ok(&1));

        let mut drained = Vec::new();
        while !heap.is_empty() {
            drained.push(heap.pop_min(asc).unwrap());
        }
        assert_eq!(drained, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn empty_heap_is_an_error() {
        let mut heap: MinHeap<u32> = MinHeap::new();
        assert_eq!(heap.peek_min(), Err(HeapEmpty));
        assert_eq!(heap.pop_min(asc), Err(HeapEmpty));
    }

    #[test]
    fn pre_sized_heap_starts_empty() {
        let mut heap: MinHeap<u32> = MinHeap::with_capacity(16);
        assert!(heap.is_empty());
        assert_eq!(heap.pop_min(asc), Err(HeapEmpty));
        heap.push(3, asc);
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn single_element_pop_leaves_empty() {
        let mut heap = MinHeap::new();
        heap.push(7u32, asc);
        assert_eq!(heap.pop_min(asc), Ok(7));
        assert!(heap.is_empty());
        assert_eq!(heap.pop_min(asc), Err(HeapEmpty));
    }

    #[test]
    fn duplicate_keys_all_surface() {
        let mut heap = MinHeap::new();
        for value in [2u32, 1, 2, 1, 2] {
            heap.push(value, asc);
        }
        let mut drained = Vec::new();
        while let Ok(value) = heap.pop_min(asc) {
            drained.push(value);
        }
        assert_eq!(drained, vec![1, 1, 2, 2, 2]);
    }

    #[test]
    fn contains_is_by_equality() {
        let mut heap = MinHeap::new();
        heap.push(3u32, asc);
        heap.push(9, asc);
        assert!(heap.contains(&3));
        assert!(heap.contains(&9));
        assert!(!heap.contains(&4));
    }

    #[test]
    fn lexicographic_tie_break_comparator() {
        // Primary key first, secondary key only on exact primary ties.
        // Same shape the engine uses for (final_cost, goal_cost).
        let better = |a: &(u32, u32), b: &(u32, u32)| a.0 < b.0 || (a.0 == b.0 && a.1 < b.1);
        let mut heap = MinHeap::new();
        for pair in [(10, 4), (10, 2), (8, 9), (10, 3), (8, 1)] {
            heap.push(pair, better);
        }

        let mut drained = Vec::new();
        while let Ok(pair) = heap.pop_min(better) {
            drained.push(pair);
        }
        assert_eq!(drained, vec![(8, 1), (8, 9), (10, 2), (10, 3), (10, 4)]);
    }

    #[test]
    fn comparator_reads_live_external_state() {
        // The engine stores coordinates and compares through the grid, so
        // a key change between operations must be observed by later sifts.
        let mut costs = vec![50u32, 10, 30];
        let mut heap = MinHeap::new();
        for idx in 0..costs.len() {
            heap.push(idx, |a: &usize, b: &usize| costs[*a] < costs[*b]);
        }
        assert_eq!(heap.peek_min(), Ok(&1));

        // Item 0 becomes the cheapest without being re-pushed.
        costs[0] = 5;
        let popped = heap.pop_min(|a, b| costs[*a] < costs[*b]).unwrap();
        // The stale root (item 1) pops first, its position predates the
        // improvement, but the very next pop observes the new key.
        assert_eq!(popped, 1);
        assert_eq!(heap.pop_min(|a, b| costs[*a] < costs[*b]), Ok(0));
        assert_eq!(heap.pop_min(|a, b| costs[*a] < costs[*b]), Ok(2));
    }

    #[test]
    fn random_workload_preserves_heap_property() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut heap = MinHeap::new();
        let mut shadow: Vec<u32> = Vec::new();

        for _ in 0..500 {
            if shadow.is_empty() || rng.gen_bool(0.6) {
                let value: u32 = rng.gen_range(0..1000);
                heap.push(value, asc);
                shadow.push(value);
            } else {
                let popped = heap.pop_min(asc).unwrap();
                let min = *shadow.iter().min().unwrap();
                assert_eq!(popped, min);
                let at = shadow.iter().position(|&v| v == min).unwrap();
                shadow.swap_remove(at);
            }
            assert_heap_property(&heap, asc);
            if let Ok(&root) = heap.peek_min() {
                assert_eq!(root, *shadow.iter().min().unwrap());
            }
        }
    }
}
