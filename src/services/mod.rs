//! External service interactions
//!
//! This module contains services that reach outside the listing:
//! - Server requests (delete, logout) built from a command template
//! - Background request execution
//! - Panel control enhancement
//! - CSV export

pub mod enhance;
pub mod export;
pub mod job_runner;
pub mod requests;

pub use enhance::{ControlRegistry, Enhance};
pub use export::export_table;
pub use job_runner::{DeleteOutcome, JobRunner};
pub use requests::{absolute_url, build_delete_command, build_logout_command, run_request};
