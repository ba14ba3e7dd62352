//! mf-editor: turns pointer and keyboard gestures into mission graph edits.
//!
//! The controller is a pure reducer (`reduce`) from a state and an event to
//! a new state plus a list of graph effects. `EditorSession` owns the graph,
//! applies those effects and enforces the in-flight request rule.

pub mod controller;
pub mod error;
pub mod session;

pub use controller::{ControllerState, EditorEvent, GraphEffect, Interaction, Transition, reduce};
pub use error::{SessionError, SessionResult};
pub use session::{EditorSession, Outcome, RequestKind};
