//! Editor configuration file.
//!
//! ```yaml
//! mission_name: restart-web
//! connect:
//!   allow_cycles: false
//! layout:
//!   columns: 3
//! estimator:
//!   cost_per_node: 1.5
//! ```
//!
//! Every field is optional.

use std::path::Path;

use mf_editor::EditorSession;
use mf_graph::{ConnectPolicy, LayoutPolicy, MissionGraph};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::estimate::Estimator;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub mission_name: String,
    pub layout: LayoutPolicy,
    pub connect: ConnectPolicy,
    pub estimator: Estimator,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            mission_name: "untitled-mission".to_string(),
            layout: LayoutPolicy::default(),
            connect: ConnectPolicy::default(),
            estimator: Estimator::default(),
        }
    }
}

impl EditorConfig {
    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        serde_yaml::from_str(content).map_err(|e| AppError::Parse {
            what: "editor config",
            message: e.to_string(),
        })
    }

    /// An empty graph named after `mission_name` with the configured policies.
    pub fn new_graph(&self) -> MissionGraph {
        MissionGraph::with_policies(self.mission_name.clone(), self.layout, self.connect)
    }

    pub fn new_session(&self) -> EditorSession {
        EditorSession::new(self.new_graph())
    }
}

/// Load config from a YAML file.
pub fn load_config(path: &Path) -> AppResult<EditorConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    EditorConfig::from_yaml_str(&content)
}
