//! Binary min-heap used as the open set of the search.
//!
//! Unlike [std::collections::BinaryHeap] the smallest element comes out first, so search nodes
//! can order themselves by plain ascending cost. There is no decrease-key; callers push a fresh
//! entry instead and skip outdated ones when they surface.

/// A min-heap over any totally ordered element type.
#[derive(Clone, Debug)]
pub struct PriorityQueue<T> {
    heap: Vec<T>,
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        PriorityQueue { heap: Vec::new() }
    }
}

impl<T: Ord> PriorityQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        PriorityQueue {
            heap: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// The smallest element, without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.heap.first()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    pub fn push(&mut self, element: T) {
        self.heap.push(element);
        self.sift_up(self.heap.len() - 1);
    }

    /// Removes and returns the smallest element.
    pub fn pop(&mut self) -> Option<T> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let element = self.heap.pop();
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        element
    }

    fn sift_up(&mut self, mut child: usize) {
        while child > 0 {
            let parent = (child - 1) / 2;
            if self.heap[child] < self.heap[parent] {
                self.heap.swap(child, parent);
                child = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut node: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * node + 1;
            let right = left + 1;
            let mut smallest = node;
            if left < len && self.heap[left] < self.heap[smallest] {
                smallest = left;
            }
            if right < len && self.heap[right] < self.heap[smallest] {
                smallest = right;
            }
            if smallest == node {
                break;
            }
            self.heap.swap(node, smallest);
            node = smallest;
        }
    }
}

impl<T: Ord> Extend<T> for PriorityQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.push(element);
        }
    }
}

impl<T: Ord> FromIterator<T> for PriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = PriorityQueue::new();
        queue.extend(iter);
        queue
    }
}
