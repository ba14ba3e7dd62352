//! mf-templates: named snapshots of mission graphs.

pub mod dir_store;
pub mod store;
pub mod types;

pub use dir_store::DirTemplateStore;
pub use store::{InMemoryTemplateStore, TemplateStore};
pub use types::*;

use mf_core::TemplateId;

pub type TemplateResult<T> = Result<T, TemplateError>;

#[derive(thiserror::Error, Debug)]
pub enum TemplateError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template not found: {id}")]
    TemplateNotFound { id: TemplateId },
}
