//! Replay scripts: a recorded sequence of editor gestures.
//!
//! Nodes are referred to by aliases chosen in the script, since ids are only
//! known once a node has been added.
//!
//! ```yaml
//! name: restart-web
//! steps:
//!   - { op: add, kind: action, alias: restart }
//!   - { op: add, kind: verification, alias: check }
//!   - { op: link, from: restart, to: check }
//!   - { op: set, node: restart, data: { action: restart_service, retries: 2 } }
//! ```

use std::collections::HashMap;
use std::path::Path;

use mf_core::NodeId;
use mf_editor::{EditorEvent, EditorSession, SessionError, SessionResult};
use mf_graph::{GraphError, NodeKind, NodeProperty, StepDataPatch};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::EditorConfig;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Overrides the configured mission name.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    Add {
        kind: NodeKind,
        alias: String,
    },
    Press {
        node: String,
    },
    Move {
        dx: f64,
        dy: f64,
    },
    Release,
    /// One connect gesture on `node`.
    Connect {
        node: String,
    },
    /// Two connect gestures: `from` then `to`.
    Link {
        from: String,
        to: String,
    },
    Unlink {
        from: String,
        to: String,
    },
    Cancel,
    Select {
        #[serde(default)]
        node: Option<String>,
    },
    DeleteSelected,
    Set {
        node: String,
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        data: Option<StepDataPatch>,
    },
}

/// A replayed session plus every edit the graph refused along the way.
#[derive(Debug)]
pub struct Replay {
    pub session: EditorSession,
    pub rejected: Vec<GraphError>,
}

struct Aliases(HashMap<String, NodeId>);

impl Aliases {
    fn get(&self, alias: &str) -> AppResult<NodeId> {
        self.0
            .get(alias)
            .copied()
            .ok_or_else(|| AppError::UnknownAlias {
                alias: alias.to_string(),
            })
    }
}

pub fn load_script(path: &Path) -> AppResult<Script> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_yaml::from_str(&content).map_err(|e| AppError::Parse {
        what: "replay script",
        message: e.to_string(),
    })
}

/// Run `script` against a fresh session built from `config`.
///
/// Graph refusals (self-loops, stale ids) are collected, not fatal, the same
/// way an interactive session would report and carry on. Unknown aliases and
/// duplicate aliases abort the replay.
pub fn replay(script: &Script, config: &EditorConfig) -> AppResult<Replay> {
    let mut session = match &script.name {
        Some(name) => EditorConfig {
            mission_name: name.clone(),
            ..config.clone()
        }
        .new_session(),
        None => config.new_session(),
    };

    let mut aliases = Aliases(HashMap::new());
    let mut rejected = Vec::new();

    for (index, step) in script.steps.iter().enumerate() {
        debug!(index, ?step, "replaying step");
        let events = match step {
            ScriptStep::Add { kind, alias } => {
                if aliases.0.contains_key(alias) {
                    return Err(AppError::InvalidInput(format!(
                        "step {index}: alias '{alias}' is already bound"
                    )));
                }
                let id = session.add_node(*kind)?;
                aliases.0.insert(alias.clone(), id);
                Vec::new()
            }
            ScriptStep::Press { node } => vec![EditorEvent::Press(aliases.get(node)?)],
            ScriptStep::Move { dx, dy } => vec![EditorEvent::Move { dx: *dx, dy: *dy }],
            ScriptStep::Release => vec![EditorEvent::Release],
            ScriptStep::Connect { node } => vec![EditorEvent::ConnectRequest(aliases.get(node)?)],
            ScriptStep::Link { from, to } => vec![
                EditorEvent::ConnectRequest(aliases.get(from)?),
                EditorEvent::ConnectRequest(aliases.get(to)?),
            ],
            ScriptStep::Unlink { from, to } => {
                let (from, to) = (aliases.get(from)?, aliases.get(to)?);
                let result = session.disconnect(&from, &to);
                collect_refusal(result, index, &mut rejected)?;
                Vec::new()
            }
            ScriptStep::Cancel => vec![EditorEvent::Cancel],
            ScriptStep::Select { node } => {
                let selected = node.as_deref().map(|alias| aliases.get(alias)).transpose()?;
                vec![EditorEvent::Select(selected)]
            }
            ScriptStep::DeleteSelected => vec![EditorEvent::DeleteSelected],
            ScriptStep::Set { node, label, data } => {
                let id = aliases.get(node)?;
                if let Some(label) = label {
                    let result =
                        session.update_node_property(&id, NodeProperty::Label(label.clone()));
                    collect_refusal(result, index, &mut rejected)?;
                }
                if let Some(patch) = data {
                    let result =
                        session.update_node_property(&id, NodeProperty::Data(patch.clone()));
                    collect_refusal(result, index, &mut rejected)?;
                }
                Vec::new()
            }
        };

        for event in events {
            let outcome = session.handle(event)?;
            rejected.extend(outcome.rejected);
        }
    }

    Ok(Replay { session, rejected })
}

/// Keep a graph refusal from a direct session call; anything else aborts.
fn collect_refusal<T>(
    result: SessionResult<T>,
    index: usize,
    rejected: &mut Vec<GraphError>,
) -> AppResult<()> {
    match result {
        Ok(_) => Ok(()),
        Err(SessionError::Graph(err)) => {
            warn!(index, %err, "edit refused");
            rejected.push(err);
            Ok(())
        }
        Err(other) => Err(other.into()),
    }
}
