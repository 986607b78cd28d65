//! SnapMark Application
//!
//! Command-line shell that loads a base image, replays a script of editing
//! steps against the editor and exports the annotated result as PNG.

mod app;
mod error;
mod script;

pub use app::{App, AppConfig, RunSummary};
pub use error::{AppError, AppResult};
pub use script::{parse_script, ScriptRunner, ScriptStep};
