//! The acquire → convert → deliver pipeline.
//!
//! Each stage runs one external tool and blocks until it exits. The first
//! failure stops the run; nothing downstream of it is invoked and no partial
//! output is delivered.

use std::io::Write;

use crate::config::Config;
use crate::error::PipelineError;
use crate::executor::CommandExecutor;
use crate::tools;

/// Where the converted text ends up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    Clipboard,
    Stdout,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Acquiring,
    Converting,
    Delivering,
    Done,
    Failed,
}

pub struct Pipeline<'a, E> {
    config: &'a Config,
    executor: E,
    stage: Stage,
}

impl<'a, E: CommandExecutor> Pipeline<'a, E> {
    pub fn new(config: &'a Config, executor: E) -> Self {
        Self {
            config,
            executor,
            stage: Stage::Acquiring,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn into_executor(self) -> E {
        self.executor
    }

    /// Run all three stages. `out` only receives bytes for
    /// [`Destination::Stdout`].
    pub fn run<W: Write>(
        &mut self,
        destination: Destination,
        out: &mut W,
    ) -> Result<(), PipelineError> {
        let result = self.run_stages(destination, out);
        match &result {
            Ok(()) => self.enter(Stage::Done),
            Err(err) => {
                tracing::debug!(stage = ?err.stage(), error = %err, "pipeline failed");
                self.enter(Stage::Failed);
            }
        }
        result
    }

    fn run_stages<W: Write>(
        &mut self,
        destination: Destination,
        out: &mut W,
    ) -> Result<(), PipelineError> {
        self.enter(Stage::Acquiring);
        let html = self.acquire()?;

        self.enter(Stage::Converting);
        let text = self.convert(html)?;

        self.enter(Stage::Delivering);
        match destination {
            Destination::Stdout => write_text(out, &text),
            Destination::Clipboard => self.serve(text),
        }
    }

    fn enter(&mut self, stage: Stage) {
        tracing::debug!(from = ?self.stage, to = ?stage, "stage");
        self.stage = stage;
    }

    fn acquire(&mut self) -> Result<Vec<u8>, PipelineError> {
        let html = self
            .executor
            .run_checked(&tools::read_html(self.config))
            .map_err(|source| PipelineError::Acquire {
                selection: self.config.selection,
                source,
            })?;
        tracing::info!(selection = %self.config.selection, bytes = html.len(), "read HTML");
        if html.is_empty() {
            tracing::warn!(selection = %self.config.selection, "selection holds no HTML");
        }
        Ok(html)
    }

    fn convert(&mut self, html: Vec<u8>) -> Result<Vec<u8>, PipelineError> {
        let text = self
            .executor
            .run_checked(&tools::convert(self.config, html))
            .map_err(|source| PipelineError::Conversion {
                format: self.config.format.clone(),
                source,
            })?;
        tracing::info!(format = %self.config.format, bytes = text.len(), "converted");
        Ok(text)
    }

    fn serve(&mut self, text: Vec<u8>) -> Result<(), PipelineError> {
        tracing::info!(
            selection = %self.config.selection,
            loops = self.config.loops,
            "serving converted text"
        );
        self.executor
            .run_checked(&tools::serve(self.config, text))
            .map_err(|source| PipelineError::Delivery {
                selection: self.config.selection,
                source,
            })?;
        Ok(())
    }
}

fn write_text<W: Write>(out: &mut W, bytes: &[u8]) -> Result<(), PipelineError> {
    let text = String::from_utf8_lossy(bytes);
    if let std::borrow::Cow::Owned(_) = text {
        tracing::warn!("converter output is not valid UTF-8; replaced invalid sequences");
    }
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}
