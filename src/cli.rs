use clap::{ArgAction, Parser};

use crate::config::Selection;
use crate::constants::{
    CLIPBOARD_TOOL_ENV, CONVERTER_ENV, DEFAULT_CLIPBOARD_TOOL, DEFAULT_CONVERTER, DEFAULT_FORMAT,
    DEFAULT_LOOPS, MIN_LOOPS,
};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "cliporg",
    version = env!("CARGO_PKG_VERSION"),
    about = "Convert HTML on the X clipboard to org mode (or another pandoc format)",
    long_about = "Reads HTML from an X selection, converts it with pandoc and puts the \
                  result back on the same selection. Useful when pasting material from a \
                  web page into an org file."
)]
pub struct Cli {
    /// Print the converted text to stdout instead of putting it back on the clipboard.
    #[arg(short = 'o', long = "stdout")]
    pub stdout: bool,

    /// X selection to read the HTML from and write the result to.
    #[arg(
        short = 's',
        long = "selection",
        value_enum,
        default_value_t = Selection::Clipboard
    )]
    pub selection: Selection,

    /// Output format handed to the converter.
    #[arg(short = 't', long = "to", value_name = "FORMAT", default_value = DEFAULT_FORMAT)]
    pub format: String,

    /// Paste requests to serve before giving up clipboard ownership.
    #[arg(
        short = 'l',
        long = "loops",
        value_name = "N",
        default_value_t = DEFAULT_LOOPS,
        value_parser = clap::value_parser!(u32).range(i64::from(MIN_LOOPS)..)
    )]
    pub loops: u32,

    /// Clipboard tool command line (program plus leading arguments).
    #[arg(
        long = "clipboard-tool",
        value_name = "CMD",
        env = CLIPBOARD_TOOL_ENV,
        default_value = DEFAULT_CLIPBOARD_TOOL
    )]
    pub clipboard_tool: String,

    /// Converter command line (program plus leading arguments).
    #[arg(
        long = "converter",
        value_name = "CMD",
        env = CONVERTER_ENV,
        default_value = DEFAULT_CONVERTER
    )]
    pub converter: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}
