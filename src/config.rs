//! Resolved run configuration.
//!
//! [`Cli`] is what the user typed; [`Config`] is the validated form the
//! pipeline consumes, with tool command lines already split into words.

use std::fmt;

use clap::ValueEnum;

use crate::cli::Cli;
use crate::error::ConfigError;
use crate::pipeline::Destination;

/// X11 selection buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Selection {
    /// Whatever text was last highlighted.
    Primary,
    Secondary,
    /// The explicit copy/paste buffer.
    Clipboard,
}

impl Selection {
    pub fn as_str(self) -> &'static str {
        match self {
            Selection::Primary => "primary",
            Selection::Secondary => "secondary",
            Selection::Clipboard => "clipboard",
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A program and the arguments that always precede the ones we add.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolCommand {
    /// Split a shell-style command line. `role` names the tool in errors.
    pub fn parse(role: &'static str, line: &str) -> Result<Self, ConfigError> {
        let mut words = shell_words::split(line)
            .map_err(|source| ConfigError::Parse { role, source })?
            .into_iter();
        let program = words
            .next()
            .filter(|p| !p.is_empty())
            .ok_or(ConfigError::EmptyCommand { role })?;
        Ok(Self {
            program,
            args: words.collect(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub destination: Destination,
    pub selection: Selection,
    pub format: String,
    pub loops: u32,
    pub clipboard_tool: ToolCommand,
    pub converter: ToolCommand,
}

impl TryFrom<&Cli> for Config {
    type Error = ConfigError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        let format = cli.format.trim();
        if format.is_empty() {
            return Err(ConfigError::EmptyFormat);
        }
        Ok(Self {
            destination: if cli.stdout {
                Destination::Stdout
            } else {
                Destination::Clipboard
            },
            selection: cli.selection,
            format: format.to_string(),
            loops: cli.loops,
            clipboard_tool: ToolCommand::parse("clipboard tool", &cli.clipboard_tool)?,
            converter: ToolCommand::parse("converter", &cli.converter)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["cliporg", "--clipboard-tool", "xclip", "--converter", "pandoc"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn stdout_flag_selects_destination() {
        let config = Config::try_from(&cli(&[])).unwrap();
        assert_eq!(config.destination, Destination::Clipboard);
        let config = Config::try_from(&cli(&["--stdout"])).unwrap();
        assert_eq!(config.destination, Destination::Stdout);
    }

    #[test]
    fn tool_commands_keep_leading_arguments() {
        let tool = ToolCommand::parse("converter", "pandoc --lua-filter 'my filter.lua'").unwrap();
        assert_eq!(tool.program, "pandoc");
        assert_eq!(tool.args, vec!["--lua-filter", "my filter.lua"]);
    }

    #[test]
    fn empty_tool_command_is_rejected() {
        let err = ToolCommand::parse("converter", "   ").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyCommand { role: "converter" }));
        let err = ToolCommand::parse("converter", "''").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyCommand { .. }));
    }

    #[test]
    fn unbalanced_quotes_are_rejected() {
        let err = ToolCommand::parse("clipboard tool", "xclip 'oops").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn blank_format_is_rejected() {
        let err = Config::try_from(&cli(&["--to", " "])).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyFormat));
    }

    #[test]
    fn selection_names_match_x11() {
        assert_eq!(Selection::Primary.to_string(), "primary");
        assert_eq!(Selection::Clipboard.as_str(), "clipboard");
    }
}
