use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid id: {id:?} ({reason})")]
    InvalidId { id: String, reason: &'static str },
}
