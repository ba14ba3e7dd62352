//! mf-core: shared primitives for the mission editor.
//!
//! Contains:
//! - ids (compact node ids, template ids)
//! - geometry (canvas positions)
//! - error (shared error types)

pub mod error;
pub mod geometry;
pub mod ids;

pub use error::{CoreError, CoreResult};
pub use geometry::Position;
pub use ids::{NodeId, TemplateId};
