//! Node data structures.

use std::collections::BTreeMap;
use std::fmt;

use mf_core::{NodeId, Position};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of a mission step. Fixed when the node is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Action,
    Verification,
    Decision,
    Safehold,
    Rollback,
}

impl NodeKind {
    pub const ALL: [NodeKind; 5] = [
        NodeKind::Action,
        NodeKind::Verification,
        NodeKind::Decision,
        NodeKind::Safehold,
        NodeKind::Rollback,
    ];

    /// Wire name used in exports and documents.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Action => "action",
            NodeKind::Verification => "verification",
            NodeKind::Decision => "decision",
            NodeKind::Safehold => "safehold",
            NodeKind::Rollback => "rollback",
        }
    }

    /// Human-readable name used for default labels.
    pub fn display_name(self) -> &'static str {
        match self {
            NodeKind::Action => "Action",
            NodeKind::Verification => "Verification",
            NodeKind::Decision => "Decision",
            NodeKind::Safehold => "Safehold",
            NodeKind::Rollback => "Rollback",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Execution parameters attached to a step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StepData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retries: Option<u32>,
}

impl StepData {
    pub fn is_empty(&self) -> bool {
        self.action.is_none()
            && self.params.is_empty()
            && self.timeout_seconds.is_none()
            && self.retries.is_none()
    }

    /// Merge a partial update. Fields absent from the patch are untouched;
    /// params are merged key by key.
    pub fn apply(&mut self, patch: StepDataPatch) {
        if let Some(action) = patch.action {
            self.action = Some(action);
        }
        if let Some(params) = patch.params {
            self.params.extend(params);
        }
        if let Some(timeout) = patch.timeout_seconds {
            self.timeout_seconds = Some(timeout);
        }
        if let Some(retries) = patch.retries {
            self.retries = Some(retries);
        }
    }
}

/// Partial update for [`StepData`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StepDataPatch {
    pub action: Option<String>,
    pub params: Option<BTreeMap<String, Value>>,
    pub timeout_seconds: Option<u32>,
    pub retries: Option<u32>,
}

/// A property edit on a node: either its label or its step data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeProperty {
    Label(String),
    Data(StepDataPatch),
}

/// A vertex of the mission graph.
///
/// `outgoing` has set semantics: a target appears at most once, in the
/// order it was first connected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub label: String,
    pub position: Position,
    #[serde(default, skip_serializing_if = "StepData::is_empty")]
    pub data: StepData,
    #[serde(default)]
    pub outgoing: Vec<NodeId>,
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind, label: impl Into<String>, position: Position) -> Self {
        Self {
            id,
            kind,
            label: label.into(),
            position,
            data: StepData::default(),
            outgoing: Vec::new(),
        }
    }

    pub fn points_to(&self, target: &NodeId) -> bool {
        self.outgoing.contains(target)
    }
}
