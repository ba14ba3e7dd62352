//! mf-export: deterministic declarative serialization of mission graphs.
//!
//! The output is a pure function of graph state: blocks follow node
//! insertion order and `next` lists follow edge insertion order.

pub mod declarative;
pub mod fingerprint;

pub use declarative::export_to_declarative;
pub use fingerprint::fingerprint;
