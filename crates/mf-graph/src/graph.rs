//! The mutable mission graph.

use mf_core::{NodeId, Position};
use petgraph::algo::has_path_connecting;
use tracing::debug;

use crate::error::{GraphError, GraphResult};
use crate::node::{Node, NodeKind, NodeProperty};
use crate::policy::{ConnectPolicy, LayoutPolicy};
use crate::validate::{edge_map, validate_nodes};

/// The authoritative in-memory mission graph.
///
/// Nodes are kept in insertion order, which is also the export order.
/// Invariants held after every operation:
/// - node ids are unique and never reused
/// - every id in an `outgoing` set names a live node
/// - no node points to itself
#[derive(Debug, Clone)]
pub struct MissionGraph {
    name: String,
    nodes: Vec<Node>,
    next_index: u32,
    layout: LayoutPolicy,
    connect_policy: ConnectPolicy,
}

impl MissionGraph {
    /// Create an empty graph with default policies.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_policies(name, LayoutPolicy::default(), ConnectPolicy::default())
    }

    pub fn with_policies(
        name: impl Into<String>,
        layout: LayoutPolicy,
        connect_policy: ConnectPolicy,
    ) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            next_index: 0,
            layout,
            connect_policy,
        }
    }

    /// Build a graph from an existing node collection (validated).
    pub fn from_nodes(
        name: impl Into<String>,
        nodes: Vec<Node>,
        layout: LayoutPolicy,
        connect_policy: ConnectPolicy,
    ) -> GraphResult<Self> {
        let mut graph = Self::with_policies(name, layout, connect_policy);
        graph.replace_nodes(nodes)?;
        Ok(graph)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn connect_policy(&self) -> &ConnectPolicy {
        &self.connect_policy
    }

    pub fn layout(&self) -> &LayoutPolicy {
        &self.layout
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == *id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.outgoing.len()).sum()
    }

    /// Iterate over `(from, to)` pairs in export order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes
            .iter()
            .flat_map(|n| n.outgoing.iter().map(move |&to| (n.id, to)))
    }

    fn node_mut(&mut self, id: &NodeId) -> GraphResult<&mut Node> {
        self.nodes
            .iter_mut()
            .find(|n| n.id == *id)
            .ok_or(GraphError::NodeNotFound { id: *id })
    }

    fn require(&self, id: &NodeId) -> GraphResult<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(GraphError::NodeNotFound { id: *id })
        }
    }

    /// Add a node of `kind` and return its fresh id.
    ///
    /// The label is `"<Kind> <count>"` and the position is the next grid
    /// slot, keyed by the id so deleted nodes leave their slot empty.
    /// Fails with `IdsExhausted` once the last ordinal has been used.
    pub fn add_node(&mut self, kind: NodeKind) -> GraphResult<NodeId> {
        let id = NodeId::try_from_index(self.next_index).ok_or(GraphError::IdsExhausted)?;
        // id.index() <= MAX_INDEX, so this cannot overflow.
        self.next_index = id.index() + 1;

        let label = format!("{} {}", kind.display_name(), self.nodes.len() + 1);
        let position = self.layout.slot(id.index());
        self.nodes.push(Node::new(id, kind, label, position));

        debug!(%id, %kind, "node added");
        Ok(id)
    }

    /// Remove a node together with every edge pointing at it.
    pub fn delete_node(&mut self, id: &NodeId) -> GraphResult<Node> {
        let idx = self
            .nodes
            .iter()
            .position(|n| n.id == *id)
            .ok_or(GraphError::NodeNotFound { id: *id })?;

        let removed = self.nodes.remove(idx);
        let mut dropped_edges = 0;
        for node in &mut self.nodes {
            let before = node.outgoing.len();
            node.outgoing.retain(|target| target != id);
            dropped_edges += before - node.outgoing.len();
        }

        debug!(%id, dropped_edges, "node deleted");
        Ok(removed)
    }

    pub fn update_node_position(&mut self, id: &NodeId, x: f64, y: f64) -> GraphResult<()> {
        self.node_mut(id)?.position = Position::new(x, y);
        Ok(())
    }

    pub fn update_node_property(&mut self, id: &NodeId, property: NodeProperty) -> GraphResult<()> {
        let node = self.node_mut(id)?;
        match property {
            NodeProperty::Label(label) => node.label = label,
            NodeProperty::Data(patch) => node.data.apply(patch),
        }
        Ok(())
    }

    /// Add the edge `from -> to`.
    ///
    /// Returns `Ok(false)` when the edge already exists. Self-loops are
    /// always rejected; cycles are rejected when the connect policy forbids
    /// them.
    pub fn connect(&mut self, from: &NodeId, to: &NodeId) -> GraphResult<bool> {
        self.require(from)?;
        self.require(to)?;

        if from == to {
            return Err(GraphError::SelfLoopRejected { id: *from });
        }

        if self.node(from).is_some_and(|n| n.points_to(to)) {
            return Ok(false);
        }

        if !self.connect_policy.allow_cycles && self.reaches(to, from) {
            return Err(GraphError::CycleRejected {
                from: *from,
                to: *to,
            });
        }

        self.node_mut(from)?.outgoing.push(*to);
        debug!(%from, %to, "edge added");
        Ok(true)
    }

    /// Remove the edge `from -> to`. Returns `Ok(false)` when it was absent.
    pub fn disconnect(&mut self, from: &NodeId, to: &NodeId) -> GraphResult<bool> {
        self.require(to)?;
        let node = self.node_mut(from)?;
        let before = node.outgoing.len();
        node.outgoing.retain(|target| target != to);
        Ok(node.outgoing.len() != before)
    }

    /// Whether `to` is reachable from `from` along existing edges.
    pub fn reaches(&self, from: &NodeId, to: &NodeId) -> bool {
        let map = edge_map(&self.nodes);
        map.contains_node(*from)
            && map.contains_node(*to)
            && has_path_connecting(&map, *from, *to, None)
    }

    /// Deep copy of the node collection.
    pub fn snapshot(&self) -> Vec<Node> {
        self.nodes.clone()
    }

    /// Swap in a whole node collection, all or nothing.
    ///
    /// Ids are kept as given. The id allocator moves past the largest
    /// loaded id so later `add_node` calls cannot collide.
    pub fn replace_nodes(&mut self, nodes: Vec<Node>) -> GraphResult<()> {
        validate_nodes(&nodes, &self.connect_policy)?;

        let loaded_next = nodes.iter().map(|n| n.id.index() + 1).max().unwrap_or(0);
        self.next_index = self.next_index.max(loaded_next);
        self.nodes = nodes;

        debug!(nodes = self.nodes.len(), "node collection replaced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::StepDataPatch;

    #[test]
    fn add_node_assigns_defaults() {
        let mut graph = MissionGraph::new("m");
        let a = graph.add_node(NodeKind::Action).unwrap();
        let v = graph.add_node(NodeKind::Verification).unwrap();

        let a_node = graph.node(&a).unwrap();
        assert_eq!(a_node.label, "Action 1");
        assert!(a_node.outgoing.is_empty());
        assert!(a_node.data.is_empty());

        let v_node = graph.node(&v).unwrap();
        assert_eq!(v_node.label, "Verification 2");
        assert_ne!(a_node.position, v_node.position);
    }

    #[test]
    fn ids_not_reused_after_delete() {
        let mut graph = MissionGraph::new("m");
        let a = graph.add_node(NodeKind::Action).unwrap();
        let b = graph.add_node(NodeKind::Action).unwrap();
        graph.delete_node(&b).unwrap();
        let c = graph.add_node(NodeKind::Action).unwrap();
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn unknown_ids_surface_not_found() {
        let mut graph = MissionGraph::new("m");
        let a = graph.add_node(NodeKind::Action).unwrap();
        let ghost = NodeId::from_index(99);

        assert_eq!(
            graph.update_node_position(&ghost, 1.0, 2.0),
            Err(GraphError::NodeNotFound { id: ghost })
        );
        assert!(graph.delete_node(&ghost).is_err());
        assert!(graph.connect(&a, &ghost).is_err());
        assert!(graph.connect(&ghost, &a).is_err());
        assert!(
            graph
                .update_node_property(&ghost, NodeProperty::Label("x".into()))
                .is_err()
        );
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn property_updates_merge() {
        let mut graph = MissionGraph::new("m");
        let a = graph.add_node(NodeKind::Action).unwrap();
        graph
            .update_node_property(&a, NodeProperty::Label("Restart web".into()))
            .unwrap();
        graph
            .update_node_property(
                &a,
                NodeProperty::Data(StepDataPatch {
                    action: Some("restart_service".into()),
                    ..StepDataPatch::default()
                }),
            )
            .unwrap();
        graph
            .update_node_property(
                &a,
                NodeProperty::Data(StepDataPatch {
                    retries: Some(2),
                    ..StepDataPatch::default()
                }),
            )
            .unwrap();

        let node = graph.node(&a).unwrap();
        assert_eq!(node.label, "Restart web");
        assert_eq!(node.data.action.as_deref(), Some("restart_service"));
        assert_eq!(node.data.retries, Some(2));
    }

    #[test]
    fn connect_is_idempotent() {
        let mut graph = MissionGraph::new("m");
        let a = graph.add_node(NodeKind::Action).unwrap();
        let b = graph.add_node(NodeKind::Verification).unwrap();
        assert_eq!(graph.connect(&a, &b), Ok(true));
        assert_eq!(graph.connect(&a, &b), Ok(false));
        assert_eq!(graph.node(&a).unwrap().outgoing, vec![b]);
    }

    #[test]
    fn cycles_follow_policy() {
        let mut open = MissionGraph::new("m");
        let a = open.add_node(NodeKind::Action).unwrap();
        let d = open.add_node(NodeKind::Decision).unwrap();
        open.connect(&a, &d).unwrap();
        assert_eq!(open.connect(&d, &a), Ok(true));

        let mut strict = MissionGraph::with_policies(
            "m",
            LayoutPolicy::default(),
            ConnectPolicy {
                allow_cycles: false,
            },
        );
        let a = strict.add_node(NodeKind::Action).unwrap();
        let d = strict.add_node(NodeKind::Decision).unwrap();
        strict.connect(&a, &d).unwrap();
        assert_eq!(
            strict.connect(&d, &a),
            Err(GraphError::CycleRejected { from: d, to: a })
        );
        assert!(strict.node(&d).unwrap().outgoing.is_empty());
    }

    #[test]
    fn disconnect_removes_single_edge() {
        let mut graph = MissionGraph::new("m");
        let a = graph.add_node(NodeKind::Action).unwrap();
        let b = graph.add_node(NodeKind::Verification).unwrap();
        let c = graph.add_node(NodeKind::Rollback).unwrap();
        graph.connect(&a, &b).unwrap();
        graph.connect(&a, &c).unwrap();

        assert_eq!(graph.disconnect(&a, &b), Ok(true));
        assert_eq!(graph.disconnect(&a, &b), Ok(false));
        assert_eq!(graph.node(&a).unwrap().outgoing, vec![c]);
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn replace_nodes_is_all_or_nothing() {
        let mut graph = MissionGraph::new("m");
        let a = graph.add_node(NodeKind::Action).unwrap();
        let before = graph.snapshot();

        let mut bad = before.clone();
        bad[0].outgoing.push(NodeId::from_index(41));
        assert!(matches!(
            graph.replace_nodes(bad),
            Err(GraphError::Validation(_))
        ));
        assert_eq!(graph.nodes(), before.as_slice());
        assert!(graph.contains(&a));
    }

    #[test]
    fn replace_nodes_advances_allocator() {
        let mut source = MissionGraph::new("src");
        for _ in 0..5 {
            source.add_node(NodeKind::Action).unwrap();
        }

        let mut target = MissionGraph::new("dst");
        target.replace_nodes(source.snapshot()).unwrap();
        let fresh = target.add_node(NodeKind::Rollback).unwrap();
        assert_eq!(fresh, NodeId::from_index(5));
    }

    fn loaded_with(ordinal: &str) -> MissionGraph {
        let id: NodeId = ordinal.parse().unwrap();
        let node = Node::new(id, NodeKind::Action, "Action 1", Position::ORIGIN);
        MissionGraph::from_nodes(
            "m",
            vec![node],
            LayoutPolicy::default(),
            ConnectPolicy::default(),
        )
        .unwrap()
    }

    #[test]
    fn add_node_after_last_ordinal_is_refused() {
        let mut graph = loaded_with("n4294967295");
        let before = graph.snapshot();

        assert_eq!(graph.add_node(NodeKind::Action), Err(GraphError::IdsExhausted));
        assert_eq!(graph.nodes(), before.as_slice());
    }

    #[test]
    fn add_node_near_last_ordinal_stays_unique() {
        let mut graph = loaded_with("n4294967294");

        let last = graph.add_node(NodeKind::Rollback).unwrap();
        assert_eq!(last.to_string(), "n4294967295");
        assert_eq!(graph.add_node(NodeKind::Rollback), Err(GraphError::IdsExhausted));
        assert_eq!(graph.len(), 2);
    }
}
