//! Error types for editor sessions.

use mf_graph::GraphError;
use mf_templates::TemplateError;
use thiserror::Error;

use crate::session::RequestKind;

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Error, Debug)]
pub enum SessionError {
    /// A save/load request is pending; graph edits are disabled until it ends.
    #[error("A {kind} request is in flight")]
    RequestInFlight { kind: RequestKind },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("Template store error: {0}")]
    Template(#[from] TemplateError),
}
