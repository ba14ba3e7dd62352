//! Editing session: the single writer of a mission graph.

use std::fmt;

use mf_core::NodeId;
use mf_graph::{GraphError, MissionGraph, NodeKind, NodeProperty};
use mf_templates::{NewTemplate, Template, TemplateStore};
use tracing::{debug, warn};

use crate::controller::{ControllerState, EditorEvent, GraphEffect, Interaction, reduce};
use crate::error::{SessionError, SessionResult};

/// Kind of an outstanding request to a (possibly remote) collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    SaveTemplate,
    LoadTemplate,
    Export,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RequestKind::SaveTemplate => "save-template",
            RequestKind::LoadTemplate => "load-template",
            RequestKind::Export => "export",
        })
    }
}

/// Result of handling one event.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outcome {
    /// Effects that changed the graph.
    pub applied: usize,
    /// Effects the graph refused; the controller state is already settled.
    pub rejected: Vec<GraphError>,
}

impl Outcome {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct EditorSession {
    graph: MissionGraph,
    state: ControllerState,
    pending: Option<RequestKind>,
    last_feedback: Option<GraphError>,
}

impl EditorSession {
    pub fn new(graph: MissionGraph) -> Self {
        Self {
            graph,
            state: ControllerState::default(),
            pending: None,
            last_feedback: None,
        }
    }

    pub fn graph(&self) -> &MissionGraph {
        &self.graph
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn interaction(&self) -> Interaction {
        self.state.interaction
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.state.selected
    }

    pub fn pending_request(&self) -> Option<RequestKind> {
        self.pending
    }

    /// The most recent graph error caught while handling events.
    pub fn last_feedback(&self) -> Option<&GraphError> {
        self.last_feedback.as_ref()
    }

    pub fn take_feedback(&mut self) -> Option<GraphError> {
        self.last_feedback.take()
    }

    fn ensure_writable(&self) -> SessionResult<()> {
        match self.pending {
            Some(kind) => Err(SessionError::RequestInFlight { kind }),
            None => Ok(()),
        }
    }

    /// Mark a request as in flight. Any gesture in progress is abandoned and
    /// graph edits are refused until [`Self::finish_request`].
    pub fn begin_request(&mut self, kind: RequestKind) -> SessionResult<()> {
        self.ensure_writable()?;
        self.abandon_gesture();
        self.pending = Some(kind);
        debug!(%kind, "request started");
        Ok(())
    }

    pub fn finish_request(&mut self) -> Option<RequestKind> {
        let finished = self.pending.take();
        if let Some(kind) = finished {
            debug!(%kind, "request finished");
        }
        finished
    }

    /// Drop any drag or connect in progress without completing it.
    pub fn abandon_gesture(&mut self) {
        self.state.interaction = Interaction::Idle;
    }

    pub fn add_node(&mut self, kind: NodeKind) -> SessionResult<NodeId> {
        self.ensure_writable()?;
        Ok(self.graph.add_node(kind)?)
    }

    pub fn update_node_property(&mut self, id: &NodeId, property: NodeProperty) -> SessionResult<()> {
        self.ensure_writable()?;
        self.graph.update_node_property(id, property)?;
        Ok(())
    }

    pub fn disconnect(&mut self, from: &NodeId, to: &NodeId) -> SessionResult<bool> {
        self.ensure_writable()?;
        Ok(self.graph.disconnect(from, to)?)
    }

    /// Feed one gesture through the controller and apply its effects.
    ///
    /// Graph errors do not fail the call: they are reported in the outcome
    /// and kept as feedback, and the controller state is the reducer's.
    pub fn handle(&mut self, event: EditorEvent) -> SessionResult<Outcome> {
        if !event.is_passive() {
            self.ensure_writable()?;
        }

        let transition = reduce(&self.state, event);
        self.state = transition.state;

        let mut outcome = Outcome::default();
        for effect in transition.effects {
            match self.apply(effect) {
                Ok(()) => outcome.applied += 1,
                Err(err) => {
                    warn!(?effect, %err, "graph rejected edit");
                    self.last_feedback = Some(err.clone());
                    outcome.rejected.push(err);
                }
            }
        }
        Ok(outcome)
    }

    fn apply(&mut self, effect: GraphEffect) -> Result<(), GraphError> {
        match effect {
            GraphEffect::MoveBy { node, dx, dy } => {
                let position = self
                    .graph
                    .node(&node)
                    .map(|n| n.position.translated(dx, dy))
                    .ok_or(GraphError::NodeNotFound { id: node })?;
                self.graph.update_node_position(&node, position.x, position.y)
            }
            GraphEffect::Connect { from, to } => self.graph.connect(&from, &to).map(|_| ()),
            GraphEffect::Delete { node } => {
                self.graph.delete_node(&node)?;
                if self.state.selected == Some(node) {
                    self.state.selected = None;
                }
                Ok(())
            }
        }
    }

    /// Run `f` as a `kind` request, either starting one or completing a
    /// request of the same kind begun earlier by the caller.
    fn within_request<T>(
        &mut self,
        kind: RequestKind,
        f: impl FnOnce(&mut Self) -> SessionResult<T>,
    ) -> SessionResult<T> {
        match self.pending {
            None => self.begin_request(kind)?,
            Some(pending) if pending == kind => {}
            Some(pending) => return Err(SessionError::RequestInFlight { kind: pending }),
        }
        let result = f(self);
        self.finish_request();
        result
    }

    /// Snapshot the current nodes into `store`. The live graph is not touched.
    pub fn save_template(
        &mut self,
        store: &mut dyn TemplateStore,
        name: &str,
        description: &str,
    ) -> SessionResult<Template> {
        self.within_request(RequestKind::SaveTemplate, |session| {
            let template = store
                .save(NewTemplate::new(name, session.graph.snapshot()).with_description(description))?;
            debug!(id = %template.id, nodes = template.node_count(), "template saved");
            Ok(template)
        })
    }

    /// Replace the live nodes with a copy of `template.nodes`.
    ///
    /// All or nothing: on a validation error the graph is unchanged. On
    /// success the selection is cleared and the controller is `Idle`.
    pub fn load_template(&mut self, template: &Template) -> SessionResult<()> {
        self.within_request(RequestKind::LoadTemplate, |session| {
            session.graph.replace_nodes(template.nodes.clone())?;
            session.state = ControllerState::default();
            debug!(id = %template.id, "template loaded");
            Ok(())
        })
    }
}
