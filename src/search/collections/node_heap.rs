/// Record that can sit in a [`NodeHeap`]. The record remembers its own
/// position so that a changed key can be restored in O(log n) without
/// searching the heap.
pub trait HeapRecord {
    /// Strict "comes out of the heap first" relation.
    fn precedes(&self, other: &Self) -> bool;

    fn heap_index(&self) -> Option<usize>;

    fn set_heap_index(&mut self, heap_index: Option<usize>);
}

/// Binary min heap over indices into a caller owned slice of records.
///
/// Every operation takes the record slice, the heap itself only stores
/// positions. Records must not move while they are in the heap.
#[derive(Clone, Debug, Default)]
pub struct NodeHeap {
    heap: Vec<usize>,
}

impl NodeHeap {
    pub fn new() -> NodeHeap {
        NodeHeap { heap: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Forgets all entries. Heap positions stored in the records are stale
    /// afterwards and have to be reset by the owner of the records.
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    pub fn peek(&self) -> Option<usize> {
        self.heap.first().copied()
    }

    pub fn push<T: HeapRecord>(&mut self, records: &mut [T], record: usize) {
        let position = self.heap.len();
        self.heap.push(record);
        records[record].set_heap_index(Some(position));
        self.sift_up(records, position);
    }

    pub fn pop<T: HeapRecord>(&mut self, records: &mut [T]) -> Option<usize> {
        let top = *self.heap.first()?;
        let last = self.heap.pop()?;

        if !self.heap.is_empty() {
            self.heap[0] = last;
            records[last].set_heap_index(Some(0));
            self.sift_down(records, 0);
        }

        records[top].set_heap_index(None);
        Some(top)
    }

    /// Restores the heap order after the key of `record` changed in either
    /// direction. Records that are not in the heap are left alone.
    pub fn update<T: HeapRecord>(&mut self, records: &mut [T], record: usize) {
        let Some(position) = records[record].heap_index() else {
            return;
        };

        let position = self.sift_up(records, position);
        self.sift_down(records, position);
    }

    fn sift_up<T: HeapRecord>(&mut self, records: &mut [T], mut position: usize) -> usize {
        while position > 0 {
            let parent = (position - 1) / 2;
            if !records[self.heap[position]].precedes(&records[self.heap[parent]]) {
                break;
            }
            self.swap(records, position, parent);
            position = parent;
        }
        position
    }

    fn sift_down<T: HeapRecord>(&mut self, records: &mut [T], mut position: usize) {
        loop {
            let left = 2 * position + 1;
            let right = left + 1;

            let mut smallest = position;
            if left < self.heap.len()
                && records[self.heap[left]].precedes(&records[self.heap[smallest]])
            {
                smallest = left;
            }
            if right < self.heap.len()
                && records[self.heap[right]].precedes(&records[self.heap[smallest]])
            {
                smallest = right;
            }

            if smallest == position {
                break;
            }
            self.swap(records, position, smallest);
            position = smallest;
        }
    }

    fn swap<T: HeapRecord>(&mut self, records: &mut [T], a: usize, b: usize) {
        self.heap.swap(a, b);
        records[self.heap[a]].set_heap_index(Some(a));
        records[self.heap[b]].set_heap_index(Some(b));
    }
}
