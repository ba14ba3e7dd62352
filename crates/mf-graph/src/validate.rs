//! Structural validation for whole node collections.

use std::collections::HashSet;

use mf_core::NodeId;
use petgraph::algo::is_cyclic_directed;
use petgraph::graphmap::DiGraphMap;

use crate::node::Node;
use crate::policy::ConnectPolicy;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Duplicate node id: {id}")]
    DuplicateId { id: NodeId },

    #[error("Edge {from} -> {to} targets a node that does not exist")]
    DanglingEdge { from: NodeId, to: NodeId },

    #[error("Edge {from} -> {to} is listed more than once")]
    DuplicateEdge { from: NodeId, to: NodeId },

    #[error("Node {id} points to itself")]
    SelfLoop { id: NodeId },

    #[error("Node collection contains a cycle")]
    Cycle,
}

/// Check that `nodes` could be the content of a graph governed by `policy`.
///
/// Ids must be unique, every edge target must exist, outgoing sets must not
/// repeat a target, self-loops are never allowed and longer cycles only
/// when the policy permits them.
pub fn validate_nodes(nodes: &[Node], policy: &ConnectPolicy) -> Result<(), ValidationError> {
    let mut ids = HashSet::with_capacity(nodes.len());
    for node in nodes {
        if !ids.insert(node.id) {
            return Err(ValidationError::DuplicateId { id: node.id });
        }
    }

    for node in nodes {
        let mut seen = HashSet::with_capacity(node.outgoing.len());
        for &target in &node.outgoing {
            if target == node.id {
                return Err(ValidationError::SelfLoop { id: node.id });
            }
            if !ids.contains(&target) {
                return Err(ValidationError::DanglingEdge {
                    from: node.id,
                    to: target,
                });
            }
            if !seen.insert(target) {
                return Err(ValidationError::DuplicateEdge {
                    from: node.id,
                    to: target,
                });
            }
        }
    }

    if !policy.allow_cycles && is_cyclic_directed(&edge_map(nodes)) {
        return Err(ValidationError::Cycle);
    }

    Ok(())
}

/// Build a petgraph view of the edges for reachability queries.
pub(crate) fn edge_map(nodes: &[Node]) -> DiGraphMap<NodeId, ()> {
    let mut map = DiGraphMap::with_capacity(nodes.len(), nodes.len());
    for node in nodes {
        map.add_node(node.id);
    }
    for node in nodes {
        for &target in &node.outgoing {
            map.add_edge(node.id, target, ());
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;
    use mf_core::Position;

    fn node(index: u32, outgoing: &[u32]) -> Node {
        let mut node = Node::new(
            NodeId::from_index(index),
            NodeKind::Action,
            format!("Action {}", index + 1),
            Position::ORIGIN,
        );
        node.outgoing = outgoing.iter().map(|&i| NodeId::from_index(i)).collect();
        node
    }

    #[test]
    fn validate_empty_collection() {
        assert!(validate_nodes(&[], &ConnectPolicy::default()).is_ok());
    }

    #[test]
    fn duplicate_id_rejected() {
        let nodes = vec![node(0, &[]), node(0, &[])];
        assert_eq!(
            validate_nodes(&nodes, &ConnectPolicy::default()),
            Err(ValidationError::DuplicateId {
                id: NodeId::from_index(0)
            })
        );
    }

    #[test]
    fn dangling_edge_rejected() {
        let nodes = vec![node(0, &[7])];
        assert!(matches!(
            validate_nodes(&nodes, &ConnectPolicy::default()),
            Err(ValidationError::DanglingEdge { .. })
        ));
    }

    #[test]
    fn repeated_target_rejected() {
        let nodes = vec![node(0, &[1, 1]), node(1, &[])];
        assert!(matches!(
            validate_nodes(&nodes, &ConnectPolicy::default()),
            Err(ValidationError::DuplicateEdge { .. })
        ));
    }

    #[test]
    fn self_loop_rejected_even_when_cycles_allowed() {
        let nodes = vec![node(0, &[0])];
        assert!(matches!(
            validate_nodes(&nodes, &ConnectPolicy { allow_cycles: true }),
            Err(ValidationError::SelfLoop { .. })
        ));
    }

    #[test]
    fn cycle_depends_on_policy() {
        let nodes = vec![node(0, &[1]), node(1, &[2]), node(2, &[0])];
        assert!(validate_nodes(&nodes, &ConnectPolicy { allow_cycles: true }).is_ok());
        assert_eq!(
            validate_nodes(&nodes, &ConnectPolicy { allow_cycles: false }),
            Err(ValidationError::Cycle)
        );
    }
}
