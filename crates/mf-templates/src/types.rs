//! Template data types.

use chrono::{DateTime, Utc};
use mf_core::TemplateId;
use mf_graph::Node;
use serde::{Deserialize, Serialize};

/// A named, timestamped snapshot of a mission graph's nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub nodes: Vec<Node>,
}

/// Input to [`crate::TemplateStore::save`]; the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTemplate {
    pub name: String,
    pub description: String,
    pub nodes: Vec<Node>,
}

impl NewTemplate {
    pub fn new(name: impl Into<String>, nodes: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            nodes,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Stamp with a fresh id and the current time.
    pub fn into_template(self) -> Template {
        Template {
            id: TemplateId::new(),
            name: self.name,
            description: self.description,
            created_at: Utc::now(),
            nodes: self.nodes,
        }
    }
}

impl Template {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.outgoing.len()).sum()
    }
}
