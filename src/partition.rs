//! Partition tracking over the index space.
//!
//! [`PartitionTree`] records which contiguous ranges of the backing storage have been settled
//! by earlier requests. Leaves tile the owned range without gaps or overlaps. A leaf is either
//! pending (elements are in the right partition relative to their neighbours but unordered
//! within it) or sorted. Split partitions keep their children for the tree's lifetime.
//!
//! Nodes live in an arena (`Vec`) and children are allocated as adjacent pairs, so a lookup
//! is a walk over indices with no pointer chasing through the allocator.

/// Identifier of a partition inside a [`PartitionTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

const ROOT: NodeId = NodeId(0);

#[derive(Clone, Debug)]
pub struct Partition {
    start: usize,
    end: usize,
    depth: usize,
    sorted: bool,
    // Split index and id of the left child; the right child is `left + 1`.
    children: Option<(usize, NodeId)>,
}

impl Partition {
    fn new(start: usize, end: usize, depth: usize) -> Self {
        Self {
            start,
            end,
            depth,
            sorted: false,
            children: None,
        }
    }

    #[inline(always)]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline(always)]
    pub fn end(&self) -> usize {
        self.end
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of splits between the root and this partition.
    #[inline(always)]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline(always)]
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    #[inline(always)]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

#[derive(Clone, Debug)]
pub struct PartitionTree {
    nodes: Vec<Partition>,
}

impl PartitionTree {
    /// Creates a tree with a single pending leaf covering `[start, end)`.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self {
            nodes: vec![Partition::new(start, end, 0)],
        }
    }

    pub fn root(&self) -> NodeId {
        ROOT
    }

    #[inline(always)]
    pub fn get(&self, id: NodeId) -> &Partition {
        &self.nodes[id.0]
    }

    /// Returns the leaf containing `position`.
    pub fn find(&self, position: usize) -> NodeId {
        let mut id = ROOT;
        while let Some((split, left)) = self.nodes[id.0].children {
            id = if position < split {
                left
            } else {
                NodeId(left.0 + 1)
            };
        }
        id
    }

    /// Splits the pending leaf `id` at `k` into `[start, k)` and `[k, end)`.
    ///
    /// Requires `start < k < end`; the split node becomes internal.
    pub fn split(&mut self, id: NodeId, k: usize) -> (NodeId, NodeId) {
        let node = &self.nodes[id.0];
        debug_assert!(node.is_leaf() && !node.sorted);
        debug_assert!(node.start < k && k < node.end);

        let (start, end, depth) = (node.start, node.end, node.depth + 1);
        let left = NodeId(self.nodes.len());
        self.nodes.push(Partition::new(start, k, depth));
        self.nodes.push(Partition::new(k, end, depth));
        self.nodes[id.0].children = Some((k, left));

        log::trace!("split [{start}, {end}) at {k} (depth {depth})");
        (left, NodeId(left.0 + 1))
    }

    pub fn mark_sorted(&mut self, id: NodeId) {
        debug_assert!(self.nodes[id.0].is_leaf());
        self.nodes[id.0].sorted = true;
    }

    /// Whether the element at `position` lies in a sorted leaf.
    pub fn is_sorted(&self, position: usize) -> bool {
        self.get(self.find(position)).sorted
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        // Every split turns one leaf into two.
        (self.nodes.len() + 1) / 2
    }

    /// Leaves in index order.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves {
            tree: self,
            stack: vec![ROOT],
        }
    }
}

pub struct Leaves<'a> {
    tree: &'a PartitionTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a Partition;

    fn next(&mut self) -> Option<&'a Partition> {
        while let Some(id) = self.stack.pop() {
            let node = self.tree.get(id);
            match node.children {
                None => return Some(node),
                Some((_, left)) => {
                    self.stack.push(NodeId(left.0 + 1));
                    self.stack.push(left);
                }
            }
        }
        None
    }
}
