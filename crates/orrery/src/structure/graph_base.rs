//! Low-level graph data structures and primitives.
//!
//! This module provides the foundational graph implementation used by both
//! component and sequence diagrams. It offers a lightweight, custom graph
//! structure that is optimized for Orrery's specific needs without requiring
//! external dependencies.
//!
//! # Architecture
//!
//! The module provides:
//! - [`EdgeIndex`]: Type-safe edge indices with lifetime tracking
//! - [`Edge`]: Edge structure storing source, target, and associated data
//! - [`GraphInternal`]: Core graph implementation with nodes and edges
//!
//! Capabilities:
//! - Node and edge storage via `HashMap` and `Vec`
//! - Tracking of both incoming and outgoing edges per node
//! - Root detection (nodes with no incoming edges)
//! - Type-safe node and edge access with lifetime guarantees
//!
//! This is an internal module; its types are not exposed publicly but are used
//! by the higher-level `ComponentGraph` and `SequenceGraph` structures.

use std::{collections::HashMap, marker::PhantomData};

use orrery_core::identifier::Id;

// =============================================================================
// Low-level primitive types and internal data structures
// =============================================================================

/// Type-safe index for edges in the graph.
///
/// Uses phantom data to track lifetime relationships, ensuring that edge indices
/// cannot outlive the graph they belong to. The lifetime parameter prevents
/// use-after-free bugs when graphs are modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) struct EdgeIndex<'idx>(usize, PhantomData<&'idx ()>);

impl<'idx> EdgeIndex<'idx> {
    /// Creates a new edge index with the given numeric index.
    fn new(index: usize) -> Self {
        EdgeIndex(index, PhantomData)
    }
}

/// A directed edge in the graph.
///
/// Stores the source and target node IDs along with an associated value
/// of generic type `E`.
#[derive(Debug)]
struct Edge<E>
where
    E: Copy + std::fmt::Debug,
{
    #[allow(dead_code)]
    source: Id,
    target: Id,
    value: E,
}

impl<E> Edge<E>
where
    E: Copy + std::fmt::Debug,
{
    /// Creates a new edge with the given source, target, and value.
    fn new(source: Id, target: Id, value: E) -> Self {
        Edge {
            source,
            target,
            value,
        }
    }
}

// =============================================================================
// Core internal graph structure
// =============================================================================

/// Core graph data structure.
///
/// This generic graph implementation provides:
/// - Node storage by ID with generic node data type `N`
/// - Edge storage with generic edge data type `E`
/// - Tracking of incoming and outgoing edges for each node
/// - Efficient lookups and traversals
///
/// The graph is directed and allows self-loops and multiple edges between nodes.
///
/// Type parameters:
/// - `'idx`: Lifetime for edge indices
/// - `N`: Node data type (must be Copy and Debug)
/// - `E`: Edge data type (must be Copy and Debug)
#[derive(Debug)]
pub(super) struct GraphInternal<'idx, N, E>
where
    N: Copy + std::fmt::Debug,
    E: Copy + std::fmt::Debug,
{
    nodes: HashMap<Id, N>,
    edges: Vec<Edge<E>>,
    income_edges: HashMap<Id, Vec<EdgeIndex<'idx>>>,
    outgoing_edges: HashMap<Id, Vec<EdgeIndex<'idx>>>,
}

impl<'idx, N, E> GraphInternal<'idx, N, E>
where
    N: Copy + std::fmt::Debug,
    E: Copy + std::fmt::Debug,
{
    /// Creates a new empty graph.
    pub(super) fn new() -> Self {
        GraphInternal {
            nodes: HashMap::new(),
            edges: Vec::new(),
            income_edges: HashMap::new(),
            outgoing_edges: HashMap::new(),
        }
    }

    /// Returns the node data for the given ID, if it exists.
    pub(super) fn node(&self, id: Id) -> Option<N> {
        self.nodes.get(&id).copied()
    }

    /// Returns the node data for the given ID without checking existence.
    ///
    /// # Panics
    /// Panics if the node ID does not exist in the graph.
    pub(super) fn node_unchecked(&self, id: Id) -> N {
        self.nodes[&id]
    }

    /// Returns an iterator over all node data in the graph.
    pub(super) fn nodes(&self) -> impl Iterator<Item = N> {
        self.nodes.values().copied()
    }

    /// Returns the total number of nodes in the graph.
    pub(super) fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    /// Checks if a node with the given ID exists in the graph.
    pub(super) fn contains_node(&self, id: Id) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Returns the edge data for the given index without checking existence.
    ///
    /// # Panics
    /// Panics if the edge index does not exist in the graph.
    pub(super) fn edge_unchecked(&self, idx: EdgeIndex) -> E {
        self.edges[idx.0].value
    }

    /// Returns an iterator over all edge data in the graph.
    pub(super) fn edges(&self) -> impl Iterator<Item = E> {
        self.edges.iter().map(|edge| edge.value)
    }

    /// Returns an iterator over root nodes (nodes with no incoming edges).
    pub(super) fn roots(&self) -> impl Iterator<Item = N> {
        self.nodes.iter().filter_map(|(node_id, node)| {
            if !self.income_edges.contains_key(node_id) {
                Some(*node)
            } else {
                None
            }
        })
    }

    /// Returns an iterator over nodes that are targets of outgoing edges from the given source.
    ///
    /// This provides all nodes directly connected from the source node via outgoing edges.
    /// Returns an empty iterator if the source node has no outgoing edges.
    pub(super) fn outgoing_nodes(&self, source_id: Id) -> impl Iterator<Item = N> {
        self.outgoing_edges
            .get(&source_id)
            .into_iter()
            .flatten() // TODO: This should return an Error.
            .map(|idx| {
                let outgoing_node_id = self.edges[idx.0].target;
                self.node_unchecked(outgoing_node_id)
            })
    }

    /// Adds a node to the graph with the given ID and data.
    ///
    /// If a node with the same ID already exists, it will be replaced.
    pub(super) fn add_node(&mut self, id: Id, node: N) {
        self.nodes.insert(id, node);
    }

    /// Adds a directed edge to the graph between two nodes.
    ///
    /// Updates both the edge storage and the incoming/outgoing edge indices for
    /// efficient traversal. Both source and target nodes must exist in the graph.
    ///
    /// # Returns
    /// The index of the newly added edge.
    ///
    /// # Panics
    /// Panics in debug mode if either the source or target node does not exist in the graph.
    /// This panic is for internal developer testing and bug detection. In a release build,
    /// this check is optimized away.
    pub(super) fn add_edge(&mut self, source_id: Id, target_id: Id, edge: E) -> EdgeIndex<'idx> {
        #[cfg(debug_assertions)]
        {
            assert!(
                self.nodes.contains_key(&source_id),
                "Adding edge: Source node {source_id} does not exist for {edge:?}",
            );
            assert!(
                self.nodes.contains_key(&target_id),
                "Adding edge: Target node {target_id} does not exist for {edge:?}",
            );
        }

        self.edges.push(Edge::new(source_id, target_id, edge));

        let idx = EdgeIndex::new(self.edges.len() - 1);
        self.outgoing_edges.entry(source_id).or_default().push(idx);
        self.income_edges.entry(target_id).or_default().push(idx);
        idx
    }
}
