use std::io;

use thiserror::Error;

use crate::config::Selection;
use crate::executor::CommandError;
use crate::pipeline::Stage;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{role} command is empty")]
    EmptyCommand { role: &'static str },
    #[error("could not parse {role} command: {source}")]
    Parse {
        role: &'static str,
        #[source]
        source: shell_words::ParseError,
    },
    #[error("output format must not be empty")]
    EmptyFormat,
}

/// Why a pipeline run stopped early.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("could not read HTML from the {selection} selection: {source}")]
    Acquire {
        selection: Selection,
        #[source]
        source: CommandError,
    },
    #[error("could not convert HTML to {format}: {source}")]
    Conversion {
        format: String,
        #[source]
        source: CommandError,
    },
    #[error("could not put the result on the {selection} selection: {source}")]
    Delivery {
        selection: Selection,
        #[source]
        source: CommandError,
    },
    #[error("could not write to stdout: {0}")]
    Output(#[from] io::Error),
}

impl PipelineError {
    /// Stage that was running when the failure happened.
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Acquire { .. } => Stage::Acquiring,
            PipelineError::Conversion { .. } => Stage::Converting,
            PipelineError::Delivery { .. } | PipelineError::Output(_) => Stage::Delivering,
        }
    }

    /// Process exit code mirroring the failed tool.
    pub fn exit_code(&self) -> u8 {
        match self {
            PipelineError::Acquire { source, .. }
            | PipelineError::Conversion { source, .. }
            | PipelineError::Delivery { source, .. } => source.exit_code(),
            PipelineError::Output(_) => 1,
        }
    }
}
