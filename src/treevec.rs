//! A B-tree backed sequence with cheap insertion and removal in the middle.
//!
//! The sweep status holds every segment crossing the sweep line, ordered from
//! bottom to top. Segments get inserted at and removed from arbitrary
//! positions, and neighbors are found by position, so a plain `Vec` would
//! make each event linear in the number of active segments. A [`TreeVec`]
//! stores the sequence in the leaves of a B-tree whose internal nodes record
//! subtree sizes, which makes positional access, insertion and removal
//! logarithmic.

use arrayvec::ArrayVec;

/// A sequence stored in a B-tree with node capacity `B`.
#[derive(Clone, Debug)]
pub struct TreeVec<T, const B: usize> {
    root: Box<Node<T, B>>,
}

#[derive(Clone, Debug)]
enum Node<T, const B: usize> {
    Leaf {
        data: ArrayVec<T, B>,
    },
    Internal {
        size: ArrayVec<usize, B>,
        children: ArrayVec<Box<Node<T, B>>, B>,
    },
}

enum InsertResult<T, const B: usize> {
    Done,
    Split(Box<Node<T, B>>),
}

enum RemoveResult<T> {
    Done(T),
    Undersize(T),
}

enum MergeResult {
    Absorbed,
    Rebalanced,
}

fn child_idx(sizes: &[usize], mut offset: usize) -> Option<(usize, usize)> {
    for (idx, &size) in sizes.iter().enumerate() {
        if size > offset {
            return Some((idx, offset));
        }
        offset -= size;
    }
    None
}

impl<T, const B: usize> Node<T, B> {
    fn subtree_size(&self) -> usize {
        match self {
            Node::Leaf { data } => data.len(),
            Node::Internal { size, .. } => size.iter().copied().sum(),
        }
    }

    // offset is the offset relative to this node
    fn get(&self, offset: usize) -> Option<&T> {
        match self {
            Node::Leaf { data } => data.get(offset),
            Node::Internal { size, children } => {
                let (idx, offset) = child_idx(size, offset)?;
                children[idx].get(offset)
            }
        }
    }

    fn first(&self) -> Option<&T> {
        match self {
            Node::Leaf { data } => data.first(),
            Node::Internal { children, .. } => children.first()?.first(),
        }
    }

    // The partition point relative to this node. Only the first element of
    // each child is needed to pick the child that contains it.
    fn partition_point<P>(&self, pred: &mut P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        match self {
            Node::Leaf { data } => data.partition_point(|x| pred(x)),
            Node::Internal { size, children } => {
                let k = children.partition_point(|c| c.first().is_some_and(|x| pred(x)));
                if k == 0 {
                    return 0;
                }
                let before: usize = size[..k - 1].iter().sum();
                before + children[k - 1].partition_point(pred)
            }
        }
    }

    fn insert(&mut self, offset: usize, element: T) -> InsertResult<T, B> {
        match self {
            Node::Leaf { data } => {
                if data.is_full() {
                    let mut second_half: ArrayVec<T, B> = data.drain(B / 2..).collect();
                    if offset <= B / 2 {
                        data.insert(offset, element)
                    } else {
                        second_half.insert(offset - B / 2, element)
                    }
                    InsertResult::Split(Box::new(Node::Leaf { data: second_half }))
                } else {
                    data.insert(offset, element);
                    InsertResult::Done
                }
            }
            Node::Internal { size, children } => {
                let (idx, offset) = if offset > 0 {
                    // unwrap: if this fails, it's out-of-bounds
                    let (idx, offset) = child_idx(size, offset - 1).unwrap();
                    (idx, offset + 1)
                } else {
                    (0, 0)
                };
                match children[idx].insert(offset, element) {
                    InsertResult::Done => {
                        size[idx] += 1;
                        InsertResult::Done
                    }
                    InsertResult::Split(node) => {
                        size[idx] = children[idx].subtree_size();

                        if children.is_full() {
                            let mut second_half_children: ArrayVec<_, B> =
                                children.drain(B / 2..).collect();
                            let mut second_half_size: ArrayVec<_, B> =
                                size.drain(B / 2..).collect();
                            if idx < B / 2 {
                                size.insert(idx + 1, node.subtree_size());
                                children.insert(idx + 1, node);
                            } else {
                                second_half_size.insert(idx + 1 - B / 2, node.subtree_size());
                                second_half_children.insert(idx + 1 - B / 2, node);
                            }
                            InsertResult::Split(Box::new(Node::Internal {
                                size: second_half_size,
                                children: second_half_children,
                            }))
                        } else {
                            size.insert(idx + 1, node.subtree_size());
                            children.insert(idx + 1, node);
                            InsertResult::Done
                        }
                    }
                }
            }
        }
    }

    fn merge_from_right(&mut self, right_sibling: &mut Node<T, B>) -> MergeResult {
        match (self, right_sibling) {
            (Node::Leaf { data: left_data }, Node::Leaf { data: right_data }) => {
                debug_assert!(right_data.len() >= left_data.len());
                if left_data.len() + right_data.len() <= B {
                    left_data.extend(right_data.drain(..));
                    MergeResult::Absorbed
                } else {
                    let count = (right_data.len() - left_data.len()) / 2;
                    debug_assert!(count > 0);
                    left_data.extend(right_data.drain(..count));
                    MergeResult::Rebalanced
                }
            }
            (
                Node::Internal {
                    size: left_size,
                    children: left_children,
                },
                Node::Internal {
                    size: right_size,
                    children: right_children,
                },
            ) => {
                if left_children.len() + right_children.len() <= B {
                    left_size.extend(right_size.drain(..));
                    left_children.extend(right_children.drain(..));
                    MergeResult::Absorbed
                } else {
                    let count = (right_children.len() - left_children.len()) / 2;
                    debug_assert!(count > 0);
                    left_children.extend(right_children.drain(..count));
                    left_size.extend(right_size.drain(..count));
                    MergeResult::Rebalanced
                }
            }
            _ => unreachable!(),
        }
    }

    fn merge_from_left(&mut self, left_sibling: &mut Node<T, B>) -> MergeResult {
        match (left_sibling, self) {
            (Node::Leaf { data: left_data }, Node::Leaf { data: right_data }) => {
                debug_assert!(right_data.len() <= left_data.len());
                if left_data.len() + right_data.len() <= B {
                    left_data.extend(right_data.drain(..));
                    std::mem::swap(left_data, right_data);
                    MergeResult::Absorbed
                } else {
                    // Unlike merge_from_right, here we only move a single element
                    // from the left to the right. This is just because safe rust
                    // makes it tricky to efficiently move more; ideally we'd also
                    // be rebalancing here.
                    right_data.insert(0, left_data.pop().unwrap());
                    MergeResult::Rebalanced
                }
            }
            (
                Node::Internal {
                    size: left_size,
                    children: left_children,
                },
                Node::Internal {
                    size: right_size,
                    children: right_children,
                },
            ) => {
                if left_children.len() + right_children.len() <= B {
                    left_size.extend(right_size.drain(..));
                    left_children.extend(right_children.drain(..));
                    std::mem::swap(left_children, right_children);
                    std::mem::swap(left_size, right_size);
                    MergeResult::Absorbed
                } else {
                    right_children.insert(0, left_children.pop().unwrap());
                    right_size.insert(0, left_size.pop().unwrap());
                    MergeResult::Rebalanced
                }
            }
            _ => unreachable!(),
        }
    }

    fn remove(&mut self, offset: usize) -> RemoveResult<T> {
        match self {
            Node::Leaf { data } => {
                let removed = data.remove(offset);
                if data.len() < B / 2 {
                    RemoveResult::Undersize(removed)
                } else {
                    RemoveResult::Done(removed)
                }
            }
            Node::Internal { size, children } => {
                // unwrap: if this fails, it's out-of-bounds
                let (idx, offset) = child_idx(size, offset).unwrap();
                size[idx] -= 1;
                match children[idx].remove(offset) {
                    RemoveResult::Done(removed) => RemoveResult::Done(removed),
                    RemoveResult::Undersize(removed) => {
                        if idx + 1 < children.len() {
                            let (a, b) = children.split_at_mut(idx + 1);
                            let cur = a.last_mut().unwrap();
                            let next = b.first_mut().unwrap();

                            match cur.merge_from_right(next) {
                                MergeResult::Absorbed => {
                                    size[idx] = cur.subtree_size();

                                    children.remove(idx + 1);
                                    size.remove(idx + 1);

                                    if children.len() < B / 2 {
                                        RemoveResult::Undersize(removed)
                                    } else {
                                        RemoveResult::Done(removed)
                                    }
                                }
                                MergeResult::Rebalanced => {
                                    size[idx] = cur.subtree_size();
                                    size[idx + 1] = next.subtree_size();
                                    RemoveResult::Done(removed)
                                }
                            }
                        } else {
                            debug_assert!(idx > 0);

                            let (a, b) = children.split_at_mut(idx);
                            let prev = a.last_mut().unwrap();
                            let cur = b.first_mut().unwrap();

                            match cur.merge_from_left(prev) {
                                MergeResult::Absorbed => {
                                    size[idx] = cur.subtree_size();

                                    children.remove(idx - 1);
                                    size.remove(idx - 1);
                                    if children.len() < B / 2 {
                                        RemoveResult::Undersize(removed)
                                    } else {
                                        RemoveResult::Done(removed)
                                    }
                                }
                                MergeResult::Rebalanced => {
                                    size[idx - 1] = prev.subtree_size();
                                    size[idx] = cur.subtree_size();
                                    RemoveResult::Done(removed)
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    fn check_invariants(&self, is_root: bool) {
        match self {
            Node::Leaf { data } => {
                if !is_root {
                    assert!(data.len() >= B / 2);
                }
            }
            Node::Internal { size, children } => {
                assert_eq!(size.len(), children.len());
                if !is_root {
                    assert!(size.len() >= B / 2);
                }

                for (child, size) in children.iter().zip(size) {
                    assert_eq!(child.subtree_size(), *size);

                    child.check_invariants(false);
                }
            }
        }
    }
}

impl<T, const B: usize> Default for TreeVec<T, B> {
    fn default() -> Self {
        Self {
            root: Box::new(Node::Leaf {
                data: ArrayVec::new(),
            }),
        }
    }
}

impl<T, const B: usize> TreeVec<T, B> {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Is the sequence empty?
    pub fn is_empty(&self) -> bool {
        match &*self.root {
            Node::Leaf { data } => data.is_empty(),
            Node::Internal { .. } => false,
        }
    }

    /// The number of elements.
    pub fn len(&self) -> usize {
        self.root.subtree_size()
    }

    /// The element at `index`, if there is one.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.root.get(index)
    }

    /// Inserts `element` at `index`, shifting everything after it.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, element: T) {
        assert!(index <= self.len(), "insertion index out of bounds");
        match self.root.insert(index, element) {
            InsertResult::Done => {}
            InsertResult::Split(node) => {
                let mut root = Box::new(Node::Internal {
                    size: ArrayVec::new(),
                    children: ArrayVec::new(),
                });
                std::mem::swap(&mut root, &mut self.root);

                let Node::Internal { size, children } = &mut *self.root else {
                    unreachable!();
                };
                size.push(root.subtree_size());
                size.push(node.subtree_size());
                children.push(root);
                children.push(node);
            }
        }
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(index < self.len(), "removal index out of bounds");
        let removed = match self.root.remove(index) {
            RemoveResult::Done(x) | RemoveResult::Undersize(x) => x,
        };

        if let Node::Internal { children, .. } = &mut *self.root {
            if children.len() == 1 {
                // unwrap: an internal node always has children
                self.root = children.pop().unwrap()
            }
        }
        removed
    }

    /// Checks the B-tree balance and size bookkeeping, panicking on failure.
    pub fn check_invariants(&self) {
        self.root.check_invariants(true);
    }

    /// Iterates over the elements in order.
    pub fn iter(&self) -> Iter<'_, T, B> {
        let mut ret = Iter {
            stack: Vec::new(),
            leaf: [].iter(),
            remaining: self.len(),
        };
        ret.descend(&*self.root);
        ret
    }

    /// Returns the index of the first element for which `pred` is false,
    /// assuming the sequence is partitioned by `pred` (all the trues first).
    pub fn partition_point<P>(&self, mut pred: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        self.root.partition_point(&mut pred)
    }

    /// Iterates over the elements in a range of positions.
    pub fn range(&self, range: impl std::ops::RangeBounds<usize>) -> Iter<'_, T, B> {
        let start = match range.start_bound() {
            std::ops::Bound::Included(x) => *x,
            std::ops::Bound::Excluded(x) => *x + 1,
            std::ops::Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            std::ops::Bound::Included(x) => *x + 1,
            std::ops::Bound::Excluded(x) => *x,
            std::ops::Bound::Unbounded => self.len(),
        };

        if end > self.len() || start > end {
            panic!("out of bounds");
        }
        let mut ret = Iter {
            stack: Vec::new(),
            leaf: [].iter(),
            remaining: end - start,
        };
        ret.descend_to(&*self.root, start);
        ret
    }
}

impl<T, const B: usize> std::ops::Index<usize> for TreeVec<T, B> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        // unwrap: out-of-bounds indexing panics, like for slices
        self.get(index).unwrap()
    }
}

/// An iterator over (part of) a [`TreeVec`].
pub struct Iter<'a, T, const B: usize> {
    stack: Vec<std::slice::Iter<'a, Box<Node<T, B>>>>,
    leaf: std::slice::Iter<'a, T>,
    remaining: usize,
}

impl<'a, T, const B: usize> Iter<'a, T, B> {
    fn descend(&mut self, mut node: &'a Node<T, B>) {
        loop {
            match node {
                Node::Leaf { data } => {
                    self.leaf = data.iter();
                    return;
                }
                Node::Internal { children, .. } => {
                    let mut children = children.iter();
                    // unwrap: internal nodes are always non-empty
                    node = children.next().unwrap();
                    self.stack.push(children);
                }
            }
        }
    }

    fn descend_to(&mut self, mut node: &'a Node<T, B>, mut offset: usize) {
        loop {
            match node {
                Node::Leaf { data } => {
                    self.leaf = data[offset..].iter();
                    return;
                }
                Node::Internal { children, size } => {
                    let Some((idx, child_offset)) = child_idx(size, offset) else {
                        return;
                    };
                    offset = child_offset;
                    let mut children = children[idx..].iter();
                    // unwrap: child_idx always returns a valid index into children
                    node = children.next().unwrap();
                    self.stack.push(children);
                }
            }
        }
    }
}

impl<'a, T, const B: usize> Iterator for Iter<'a, T, B> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        if let Some(ret) = self.leaf.next() {
            return Some(ret);
        }
        loop {
            let stack_top = self.stack.last_mut()?;

            let Some(next_node) = stack_top.next() else {
                self.stack.pop();
                continue;
            };

            self.descend(next_node);
            return self.leaf.next();
        }
    }
}
