//! The layered hypothesis net
//!
//! A [`HypothesisNet`] compactly encodes every jointly-feasible assignment of
//! detections to the tracks of one cluster. It is grown layer by layer, one
//! layer per track, by an external construction algorithm calling
//! [`add_node`](HypothesisNet::add_node) and
//! [`add_edge`](HypothesisNet::add_edge); a finished net is then walked by an
//! external probability-propagation pass through the read accessors.
//!
//! Nodes live in a single arena owned by the net and are referred to by
//! [`NodeId`] handles, assigned at insertion and stable for the lifetime of
//! the net. Nodes and edges are append-only; nothing is ever removed.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use nalgebra::DMatrix;

use crate::errors::NetError;

/// Stable handle to a node in a [`HypothesisNet`] arena
///
/// Ids order by insertion, so sorting a node list by id reproduces insertion
/// order. A `NodeId` is only meaningful for the net that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the net's insertion order
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node in the hypothesis net
///
/// The `identity` is the set of detections already irrevocably committed
/// along some root-to-node path. Two nodes at the same layer with equal
/// identities are interchangeable for everything downstream; merging them is
/// the construction algorithm's job and is what bounds net size by the count
/// of distinct identities per layer rather than by the number of assignment
/// permutations.
///
/// `track` and `subnet` are populated only by construction algorithms that
/// split a cluster into independently-enumerable subnets and need to know
/// which track and subnet a node came from. A single record with optional
/// fields keeps every node in one arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetNode {
    /// Index of the net layer the node is placed in (one layer per track in
    /// the fixed processing order; the root may sit at layer -1)
    pub layer: i32,
    /// Detections committed along some ancestor path
    pub identity: BTreeSet<usize>,
    /// Originating track index, for track-aware construction
    pub track: Option<usize>,
    /// Index of the subnet the node belongs to
    pub subnet: usize,
}

impl NetNode {
    /// Create a plain node at the given layer
    pub fn new(layer: i32, identity: BTreeSet<usize>) -> Self {
        Self {
            layer,
            identity,
            track: None,
            subnet: 0,
        }
    }

    /// Create a track-aware node for subnet-splitting construction
    pub fn with_track(layer: i32, track: usize, subnet: usize, identity: BTreeSet<usize>) -> Self {
        Self {
            layer,
            identity,
            track: Some(track),
            subnet,
        }
    }
}

impl fmt::Display for NetNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NetNode(layer={}, identity={:?}", self.layer, self.identity)?;
        if let Some(track) = self.track {
            write!(f, ", track={}, subnet={}", track, self.subnet)?;
        }
        write!(f, ")")
    }
}

/// Layered, identity-merged directed multigraph over one cluster's
/// assignments
///
/// Each edge carries the set of detection indices justifying the
/// parent-to-child transition. Two derived lookups, parents by
/// `(node, detection)` and children by `(parent, detection)`, are kept in
/// step with the edge map and only ever grow by union.
#[derive(Debug, Clone)]
pub struct HypothesisNet {
    nodes: Vec<NetNode>,
    edges: BTreeMap<(NodeId, NodeId), BTreeSet<usize>>,
    parents_per_detection: HashMap<(NodeId, usize), BTreeSet<NodeId>>,
    children_per_detection: HashMap<(NodeId, usize), BTreeSet<NodeId>>,
    nodes_per_track: HashMap<usize, BTreeSet<NodeId>>,
    validation_matrix: DMatrix<bool>,
}

impl HypothesisNet {
    /// Create a net holding only the root node.
    ///
    /// The validation matrix the net is being built against is stored for
    /// the consumers that walk the finished net.
    pub fn new(root: NetNode, validation_matrix: DMatrix<bool>) -> Self {
        let mut net = Self {
            nodes: Vec::new(),
            edges: BTreeMap::new(),
            parents_per_detection: HashMap::new(),
            children_per_detection: HashMap::new(),
            nodes_per_track: HashMap::new(),
            validation_matrix,
        };
        net.push_node(root);
        net
    }

    fn push_node(&mut self, node: NetNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        if let Some(track) = node.track {
            self.nodes_per_track.entry(track).or_default().insert(id);
        }
        self.nodes.push(node);
        id
    }

    fn check_member(&self, id: NodeId) -> Result<(), NetError> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(NetError::UnknownNode {
                index: id.0,
                num_nodes: self.nodes.len(),
            })
        }
    }

    /// The root node (first inserted)
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes in the net
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct parent-child edges
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Whether the id refers to a node of this net
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// The node behind an id, if it belongs to this net
    pub fn node(&self, id: NodeId) -> Option<&NetNode> {
        self.nodes.get(id.0)
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> &[NetNode] {
        &self.nodes
    }

    /// All node ids in insertion order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Node ids ordered by ascending layer, ties broken by insertion order.
    ///
    /// A forward dynamic-programming pass visiting nodes in this order sees
    /// every possible parent before the node itself.
    pub fn nodes_forward(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.node_ids().collect();
        ids.sort_by_key(|id| (self.nodes[id.0].layer, id.0));
        ids
    }

    /// The validation matrix this net is being built against
    pub fn validation_matrix(&self) -> &DMatrix<bool> {
        &self.validation_matrix
    }

    /// Add a new node under an existing parent.
    ///
    /// The node receives the next insertion index and a fresh parent-to-node
    /// edge labelled with `detection`; both per-detection lookups gain the
    /// association. Use this when the node has exactly one known incoming
    /// path so far; further paths are added with
    /// [`add_edge`](Self::add_edge).
    ///
    /// # Errors
    ///
    /// [`NetError::UnknownNode`] if `parent` does not belong to this net.
    /// The node is not inserted in that case.
    pub fn add_node(
        &mut self,
        node: NetNode,
        parent: NodeId,
        detection: usize,
    ) -> Result<NodeId, NetError> {
        self.check_member(parent)?;
        let child = self.push_node(node);
        self.edges.insert((parent, child), BTreeSet::from([detection]));
        self.parents_per_detection
            .entry((child, detection))
            .or_default()
            .insert(parent);
        self.children_per_detection
            .entry((parent, detection))
            .or_default()
            .insert(child);
        Ok(child)
    }

    /// Add an edge between two existing nodes, or extend an existing edge by
    /// adding the detection to its label set.
    ///
    /// Idempotent: repeating a call with the same arguments changes nothing.
    ///
    /// # Errors
    ///
    /// [`NetError::UnknownNode`] if either endpoint does not belong to this
    /// net. No state changes in that case.
    pub fn add_edge(
        &mut self,
        parent: NodeId,
        child: NodeId,
        detection: usize,
    ) -> Result<(), NetError> {
        self.check_member(parent)?;
        self.check_member(child)?;
        self.edges.entry((parent, child)).or_default().insert(detection);
        self.parents_per_detection
            .entry((child, detection))
            .or_default()
            .insert(parent);
        self.children_per_detection
            .entry((parent, detection))
            .or_default()
            .insert(child);
        Ok(())
    }

    /// All nodes with an edge into `node`, regardless of which detections
    /// label the edge, ordered by id
    pub fn get_parents(&self, node: NodeId) -> Vec<NodeId> {
        self.edges
            .keys()
            .filter(|(_, child)| *child == node)
            .map(|&(parent, _)| parent)
            .collect()
    }

    /// All nodes with an edge out of `node`, regardless of which detections
    /// label the edge, ordered by id
    pub fn get_children(&self, node: NodeId) -> Vec<NodeId> {
        self.edges
            .keys()
            .filter(|(parent, _)| *parent == node)
            .map(|&(_, child)| child)
            .collect()
    }

    /// Detections labelling the parent-to-child edge, if the edge exists
    pub fn edge_detections(&self, parent: NodeId, child: NodeId) -> Option<&BTreeSet<usize>> {
        self.edges.get(&(parent, child))
    }

    /// Iterate all edges as `(parent, child, detections)`
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, &BTreeSet<usize>)> {
        self.edges
            .iter()
            .map(|(&(parent, child), detections)| (parent, child, detections))
    }

    /// Parents reaching `node` through an edge labelled with `detection`
    pub fn parents_per_detection(
        &self,
        node: NodeId,
        detection: usize,
    ) -> Option<&BTreeSet<NodeId>> {
        self.parents_per_detection.get(&(node, detection))
    }

    /// Children reached from `parent` through an edge labelled with
    /// `detection`
    pub fn children_per_detection(
        &self,
        parent: NodeId,
        detection: usize,
    ) -> Option<&BTreeSet<NodeId>> {
        self.children_per_detection.get(&(parent, detection))
    }

    /// Nodes originating from the given track, if any were inserted with
    /// track information
    pub fn nodes_per_track(&self, track: usize) -> Option<&BTreeSet<NodeId>> {
        self.nodes_per_track.get(&track)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_net() -> HypothesisNet {
        // Root carries an empty identity at layer -1
        HypothesisNet::new(
            NetNode::new(-1, BTreeSet::new()),
            DMatrix::from_element(2, 3, true),
        )
    }

    #[test]
    fn test_new_net_holds_only_root() {
        let net = empty_net();
        assert_eq!(net.num_nodes(), 1);
        assert_eq!(net.num_edges(), 0);
        assert_eq!(net.root().index(), 0);
        assert!(net.contains(net.root()));
        assert_eq!(net.node(net.root()).unwrap().layer, -1);
    }

    #[test]
    fn test_add_node_assigns_insertion_indices() {
        let mut net = empty_net();
        let root = net.root();

        let a = net
            .add_node(NetNode::new(0, BTreeSet::from([1])), root, 1)
            .unwrap();
        let b = net
            .add_node(NetNode::new(0, BTreeSet::from([2])), root, 2)
            .unwrap();

        assert_eq!(a.index(), 1);
        assert_eq!(b.index(), 2);
        assert_eq!(net.num_nodes(), 3);
    }

    #[test]
    fn test_parents_of_fresh_node_is_exactly_the_one_parent() {
        let mut net = empty_net();
        let root = net.root();
        let child = net
            .add_node(NetNode::new(0, BTreeSet::from([1])), root, 1)
            .unwrap();

        assert_eq!(net.get_parents(child), vec![root]);
        assert_eq!(net.get_children(root), vec![child]);
        assert_eq!(net.edge_detections(root, child), Some(&BTreeSet::from([1])));
        assert_eq!(
            net.parents_per_detection(child, 1),
            Some(&BTreeSet::from([root]))
        );
        assert_eq!(
            net.children_per_detection(root, 1),
            Some(&BTreeSet::from([child]))
        );
    }

    #[test]
    fn test_add_node_rejects_foreign_parent() {
        let mut net = empty_net();
        let foreign = NodeId(5);

        let err = net
            .add_node(NetNode::new(0, BTreeSet::new()), foreign, 0)
            .unwrap_err();
        assert_eq!(
            err,
            NetError::UnknownNode {
                index: 5,
                num_nodes: 1
            }
        );
        // Nothing was inserted
        assert_eq!(net.num_nodes(), 1);
        assert_eq!(net.num_edges(), 0);
    }

    #[test]
    fn test_add_edge_rejects_foreign_endpoints() {
        let mut net = empty_net();
        let root = net.root();
        let foreign = NodeId(9);

        assert!(net.add_edge(root, foreign, 0).is_err());
        assert!(net.add_edge(foreign, root, 0).is_err());
        assert_eq!(net.num_edges(), 0);
    }

    #[test]
    fn test_add_edge_unions_detections_into_existing_edge() {
        let mut net = empty_net();
        let root = net.root();
        let child = net
            .add_node(NetNode::new(0, BTreeSet::from([1])), root, 1)
            .unwrap();

        net.add_edge(root, child, 2).unwrap();

        assert_eq!(
            net.edge_detections(root, child),
            Some(&BTreeSet::from([1, 2]))
        );
        // Still one edge, two parent-lookup entries
        assert_eq!(net.num_edges(), 1);
        assert_eq!(
            net.parents_per_detection(child, 2),
            Some(&BTreeSet::from([root]))
        );
    }

    #[test]
    fn test_add_edge_is_idempotent() {
        let mut net = empty_net();
        let root = net.root();
        let child = net
            .add_node(NetNode::new(0, BTreeSet::from([1])), root, 1)
            .unwrap();

        net.add_edge(root, child, 1).unwrap();
        let edges_before: Vec<_> = net
            .edges()
            .map(|(p, c, d)| (p, c, d.clone()))
            .collect();
        let parents_before = net.parents_per_detection(child, 1).cloned();
        let children_before = net.children_per_detection(root, 1).cloned();

        net.add_edge(root, child, 1).unwrap();

        let edges_after: Vec<_> = net
            .edges()
            .map(|(p, c, d)| (p, c, d.clone()))
            .collect();
        assert_eq!(edges_before, edges_after);
        assert_eq!(parents_before, net.parents_per_detection(child, 1).cloned());
        assert_eq!(
            children_before,
            net.children_per_detection(root, 1).cloned()
        );
    }

    #[test]
    fn test_get_parents_collects_all_incoming_edges() {
        let mut net = empty_net();
        let root = net.root();
        let a = net
            .add_node(NetNode::new(0, BTreeSet::from([1])), root, 1)
            .unwrap();
        let b = net
            .add_node(NetNode::new(0, BTreeSet::from([2])), root, 2)
            .unwrap();
        let c = net
            .add_node(NetNode::new(1, BTreeSet::from([1, 2])), a, 2)
            .unwrap();
        net.add_edge(b, c, 1).unwrap();

        assert_eq!(net.get_parents(c), vec![a, b]);
        assert_eq!(net.get_children(root), vec![a, b]);
    }

    #[test]
    fn test_nodes_forward_orders_by_layer_then_insertion() {
        let mut net = empty_net();
        let root = net.root();
        // Insert a layer-1 node before a layer-0 node
        let deep = net
            .add_node(NetNode::new(1, BTreeSet::from([2])), root, 2)
            .unwrap();
        let shallow = net
            .add_node(NetNode::new(0, BTreeSet::from([1])), root, 1)
            .unwrap();
        let tied = net
            .add_node(NetNode::new(0, BTreeSet::from([3])), root, 3)
            .unwrap();

        assert_eq!(net.nodes_forward(), vec![root, shallow, tied, deep]);
    }

    #[test]
    fn test_lookup_indexes_agree_with_edges() {
        let mut net = empty_net();
        let root = net.root();
        let a = net
            .add_node(NetNode::new(0, BTreeSet::from([1])), root, 1)
            .unwrap();
        let b = net
            .add_node(NetNode::new(1, BTreeSet::from([1, 2])), a, 2)
            .unwrap();
        net.add_edge(root, b, 2).unwrap();
        net.add_edge(a, b, 3).unwrap();

        for (parent, child, detections) in net.edges() {
            assert!(!detections.is_empty());
            for &detection in detections {
                assert!(net
                    .parents_per_detection(child, detection)
                    .is_some_and(|parents| parents.contains(&parent)));
                assert!(net
                    .children_per_detection(parent, detection)
                    .is_some_and(|children| children.contains(&child)));
            }
        }
    }

    #[test]
    fn test_track_aware_nodes_register_in_track_lookup() {
        let mut net = empty_net();
        let root = net.root();
        let a = net
            .add_node(NetNode::with_track(0, 4, 0, BTreeSet::from([1])), root, 1)
            .unwrap();
        let b = net
            .add_node(NetNode::with_track(0, 4, 1, BTreeSet::from([2])), root, 2)
            .unwrap();

        assert_eq!(net.nodes_per_track(4), Some(&BTreeSet::from([a, b])));
        assert_eq!(net.nodes_per_track(0), None);
    }

    #[test]
    fn test_node_display() {
        let plain = NetNode::new(-1, BTreeSet::new());
        assert!(plain.to_string().contains("layer=-1"));

        let aware = NetNode::with_track(2, 3, 1, BTreeSet::from([4]));
        let repr = aware.to_string();
        assert!(repr.contains("track=3"));
        assert!(repr.contains("subnet=1"));
    }
}
