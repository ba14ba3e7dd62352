//! Application service layer for the mission editor.
//!
//! Shared by the CLI and any other front-end: configuration, mission
//! document I/O, replay scripts and the cost/time estimator.

pub mod config;
pub mod error;
pub mod estimate;
pub mod mission_service;
pub mod script;

pub use config::{EditorConfig, load_config};
pub use error::{AppError, AppResult};
pub use estimate::{Estimate, Estimator, estimate};
pub use mission_service::{
    MISSION_VERSION, MissionDoc, MissionSummary, load_mission, save_mission, summarize,
};
pub use script::{Replay, Script, ScriptStep, load_script, replay};
