//! Convert HTML sitting on an X selection into another markup format.
//!
//! The work is done by external tools (`xclip` and `pandoc` by default);
//! this crate wires them into a three-stage [`pipeline::Pipeline`] and maps
//! failures back onto process exit codes.

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod executor;
pub mod pipeline;
pub mod tools;
pub mod tracing_sub;

pub use config::{Config, Selection, ToolCommand};
pub use error::{ConfigError, PipelineError};
pub use executor::{CommandExecutor, SystemExecutor};
pub use pipeline::{Destination, Pipeline, Stage};
