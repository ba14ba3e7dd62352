//! mf-graph: the mission graph model.
//!
//! Provides:
//! - Node data structures (Node, NodeKind, StepData)
//! - The mutable `MissionGraph` with cascading deletes and idempotent connects
//! - Structural validation used when a whole node collection is swapped in
//!
//! # Example
//!
//! ```
//! use mf_graph::{MissionGraph, NodeKind};
//!
//! let mut graph = MissionGraph::new("restart-web");
//! let a = graph.add_node(NodeKind::Action).unwrap();
//! let v = graph.add_node(NodeKind::Verification).unwrap();
//! graph.connect(&a, &v).unwrap();
//!
//! assert_eq!(graph.len(), 2);
//! assert_eq!(graph.edge_count(), 1);
//! ```

pub mod error;
pub mod graph;
pub mod node;
pub mod policy;
pub mod validate;

pub use error::{GraphError, GraphResult};
pub use graph::MissionGraph;
pub use node::{Node, NodeKind, NodeProperty, StepData, StepDataPatch};
pub use policy::{ConnectPolicy, LayoutPolicy};
pub use validate::{ValidationError, validate_nodes};
