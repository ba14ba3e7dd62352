//! Interaction state machine.

use mf_core::NodeId;

/// What the pointer is currently doing. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Dragging {
        node: NodeId,
    },
    Connecting {
        from: NodeId,
    },
}

/// Interaction plus the (orthogonal) single selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControllerState {
    pub interaction: Interaction,
    pub selected: Option<NodeId>,
}

impl ControllerState {
    pub fn is_idle(&self) -> bool {
        self.interaction == Interaction::Idle
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorEvent {
    /// Pointer pressed on a node.
    Press(NodeId),
    /// Pointer moved by a delta while pressed.
    Move { dx: f64, dy: f64 },
    Release,
    /// "Connect" gesture on a node: first one picks the source, second the target.
    ConnectRequest(NodeId),
    /// Escape or a click on empty canvas.
    Cancel,
    Select(Option<NodeId>),
    DeleteSelected,
}

impl EditorEvent {
    /// Events that neither start nor continue a graph edit.
    pub fn is_passive(&self) -> bool {
        matches!(
            self,
            EditorEvent::Select(_) | EditorEvent::Cancel | EditorEvent::Release
        )
    }
}

/// A graph mutation requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GraphEffect {
    MoveBy { node: NodeId, dx: f64, dy: f64 },
    Connect { from: NodeId, to: NodeId },
    Delete { node: NodeId },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: ControllerState,
    pub effects: Vec<GraphEffect>,
}

impl Transition {
    fn to(state: ControllerState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    fn with(state: ControllerState, effect: GraphEffect) -> Self {
        Self {
            state,
            effects: vec![effect],
        }
    }
}

/// Compute the next state and the graph effects for `event`.
///
/// Events with no transition out of the current state leave it unchanged.
/// A `ConnectRequest` on the source node itself still emits `Connect`; the
/// graph rejects the self-loop and the controller is back in `Idle` either way.
pub fn reduce(state: &ControllerState, event: EditorEvent) -> Transition {
    use Interaction::*;

    let current = *state;
    match (current.interaction, event) {
        (Idle, EditorEvent::Press(node)) => Transition::to(ControllerState {
            interaction: Dragging { node },
            selected: Some(node),
        }),
        (Dragging { node }, EditorEvent::Move { dx, dy }) => {
            Transition::with(current, GraphEffect::MoveBy { node, dx, dy })
        }
        (Dragging { .. }, EditorEvent::Release) => Transition::to(ControllerState {
            interaction: Idle,
            ..current
        }),
        (Idle, EditorEvent::ConnectRequest(from)) => Transition::to(ControllerState {
            interaction: Connecting { from },
            ..current
        }),
        (Connecting { from }, EditorEvent::ConnectRequest(to)) => Transition::with(
            ControllerState {
                interaction: Idle,
                ..current
            },
            GraphEffect::Connect { from, to },
        ),
        (_, EditorEvent::Cancel) => Transition::to(ControllerState {
            interaction: Idle,
            ..current
        }),
        (_, EditorEvent::Select(selected)) => Transition::to(ControllerState {
            selected,
            ..current
        }),
        (Idle, EditorEvent::DeleteSelected) => match current.selected {
            Some(node) => Transition::with(
                ControllerState {
                    interaction: Idle,
                    selected: None,
                },
                GraphEffect::Delete { node },
            ),
            None => Transition::to(current),
        },
        _ => Transition::to(current),
    }
}
