//! Decomposition tree for recursive cluster partitioning
//!
//! When a cluster is split into independently-enumerable subnets, the split
//! is recursive: each sub-problem may partition again once its shared
//! detections are committed. The [`DecompositionTree`] mirrors that
//! recursion. It is built bottom-up by the construction algorithm and is
//! immutable afterwards; visualisation and debugging read it through the
//! accessors.
//!
//! Unlike the net, the tree is acyclic with a single owner per child, so it
//! is an owned tree of allocated nodes with no index indirection.

use std::collections::BTreeSet;

/// One node of the decomposition, owning its child subtrees
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecompositionTree {
    track: usize,
    children: Vec<DecompositionTree>,
    detections: BTreeSet<usize>,
    subnet: usize,
}

impl DecompositionTree {
    /// Create a tree node over its already-built children
    pub fn new(
        track: usize,
        children: Vec<DecompositionTree>,
        detections: BTreeSet<usize>,
        subnet: usize,
    ) -> Self {
        Self {
            track,
            children,
            detections,
            subnet,
        }
    }

    /// Create a leaf (a node with no children)
    pub fn leaf(track: usize, detections: BTreeSet<usize>, subnet: usize) -> Self {
        Self::new(track, Vec::new(), detections, subnet)
    }

    /// Track id this node decomposes
    #[inline]
    pub fn track(&self) -> usize {
        self.track
    }

    /// Child subtrees, in construction order
    pub fn children(&self) -> &[DecompositionTree] {
        &self.children
    }

    /// Detections committed at this node
    pub fn detections(&self) -> &BTreeSet<usize> {
        &self.detections
    }

    /// Index of the subnet this node maps to
    #[inline]
    pub fn subnet(&self) -> usize {
        self.subnet
    }

    /// Depth of the tree: 1 for a leaf, else 1 plus the deepest child
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(DecompositionTree::depth)
            .max()
            .unwrap_or(0)
    }

    /// Preorder flattening: self first, then each child's flattening in
    /// order
    pub fn nodes(&self) -> Vec<&DecompositionTree> {
        let mut nodes = vec![self];
        for child in &self.children {
            nodes.extend(child.nodes());
        }
        nodes
    }
}
