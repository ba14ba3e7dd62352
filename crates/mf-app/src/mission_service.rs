//! Mission document loading, saving and introspection.

use std::path::Path;

use mf_graph::{MissionGraph, Node, NodeKind, validate_nodes};
use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::error::{AppError, AppResult};

pub const MISSION_VERSION: u32 = 1;

/// On-disk form of a mission graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionDoc {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
}

impl MissionDoc {
    pub fn from_graph(graph: &MissionGraph) -> Self {
        Self {
            version: MISSION_VERSION,
            name: graph.name().to_string(),
            nodes: graph.snapshot(),
        }
    }

    /// Validate and turn into a live graph governed by `config`'s policies.
    pub fn into_graph(self, config: &EditorConfig) -> AppResult<MissionGraph> {
        if self.version > MISSION_VERSION {
            return Err(AppError::UnsupportedVersion {
                version: self.version,
                latest: MISSION_VERSION,
            });
        }
        Ok(MissionGraph::from_nodes(
            self.name,
            self.nodes,
            config.layout,
            config.connect,
        )?)
    }
}

/// Summary of a mission for listing.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionSummary {
    pub name: String,
    pub node_count: usize,
    pub edge_count: usize,
    /// Node counts per kind, in `NodeKind::ALL` order.
    pub kinds: Vec<(NodeKind, usize)>,
}

pub fn summarize(graph: &MissionGraph) -> MissionSummary {
    let kinds = NodeKind::ALL
        .iter()
        .map(|&kind| {
            let count = graph.nodes().iter().filter(|n| n.kind == kind).count();
            (kind, count)
        })
        .collect();
    MissionSummary {
        name: graph.name().to_string(),
        node_count: graph.len(),
        edge_count: graph.edge_count(),
        kinds,
    }
}

/// Load a mission from a YAML file.
pub fn load_mission(path: &Path, config: &EditorConfig) -> AppResult<MissionGraph> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let doc: MissionDoc = serde_yaml::from_str(&content).map_err(|e| AppError::Parse {
        what: "mission YAML",
        message: e.to_string(),
    })?;

    doc.into_graph(config)
}

/// Save a mission to a YAML file.
pub fn save_mission(path: &Path, graph: &MissionGraph) -> AppResult<()> {
    let doc = MissionDoc::from_graph(graph);
    validate_nodes(&doc.nodes, graph.connect_policy()).map_err(mf_graph::GraphError::from)?;

    let content = serde_yaml::to_string(&doc).map_err(|e| AppError::Parse {
        what: "mission YAML",
        message: e.to_string(),
    })?;

    std::fs::write(path, content).map_err(|e| AppError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
