//! Command lines for the three external tools.
//!
//! The argument shapes follow `xclip` and `pandoc`; a replacement tool
//! configured through [`Config`] has to accept the same flags.

use crate::config::{Config, ToolCommand};
use crate::constants::{HTML_TARGET, TEXT_TARGET};
use crate::executor::{Invocation, StdoutMode};

fn base(tool: &ToolCommand) -> Invocation {
    Invocation::new(tool.program.clone()).args(tool.args.iter().cloned())
}

/// Dump the HTML representation of the configured selection on stdout.
pub fn read_html(config: &Config) -> Invocation {
    base(&config.clipboard_tool).args([
        "-selection",
        config.selection.as_str(),
        "-target",
        HTML_TARGET,
        "-out",
    ])
}

/// Convert `html` to the configured format without line wrapping.
pub fn convert(config: &Config, html: Vec<u8>) -> Invocation {
    base(&config.converter)
        .args([
            "--from=html".to_string(),
            format!("--to={}", config.format),
            "--wrap=none".to_string(),
        ])
        .stdin(html)
}

/// Take ownership of the configured selection and serve `text` for
/// `config.loops` paste requests.
///
/// `-verbose` keeps xclip in the foreground so the pipeline knows when it is
/// done; its chatter goes to our stderr.
pub fn serve(config: &Config, text: Vec<u8>) -> Invocation {
    base(&config.clipboard_tool)
        .args([
            "-target".to_string(),
            TEXT_TARGET.to_string(),
            "-in".to_string(),
            "-verbose".to_string(),
            "-selection".to_string(),
            config.selection.as_str().to_string(),
            "-loops".to_string(),
            config.loops.to_string(),
        ])
        .stdin(text)
        .stdout(StdoutMode::Stderr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Selection;
    use crate::pipeline::Destination;

    fn config() -> Config {
        Config {
            destination: Destination::Clipboard,
            selection: Selection::Primary,
            format: "gfm".into(),
            loops: 3,
            clipboard_tool: ToolCommand::parse("clipboard tool", "xclip -display :1").unwrap(),
            converter: ToolCommand::parse("converter", "pandoc").unwrap(),
        }
    }

    #[test]
    fn read_requests_html_from_selection() {
        let inv = read_html(&config());
        assert_eq!(inv.program, "xclip");
        assert_eq!(
            inv.args,
            ["-display", ":1", "-selection", "primary", "-target", "text/html", "-out"]
        );
        assert_eq!(inv.stdin, None);
        assert_eq!(inv.stdout, StdoutMode::Capture);
    }

    #[test]
    fn convert_disables_wrapping() {
        let inv = convert(&config(), b"<p>x</p>".to_vec());
        assert_eq!(inv.program, "pandoc");
        assert_eq!(inv.args, ["--from=html", "--to=gfm", "--wrap=none"]);
        assert_eq!(inv.stdin.as_deref(), Some(&b"<p>x</p>"[..]));
    }

    #[test]
    fn serve_keeps_stdout_off_our_stdout() {
        let inv = serve(&config(), b"x".to_vec());
        assert_eq!(
            inv.args,
            [
                "-display",
                ":1",
                "-target",
                "UTF8_STRING",
                "-in",
                "-verbose",
                "-selection",
                "primary",
                "-loops",
                "3"
            ]
        );
        assert_eq!(inv.stdout, StdoutMode::Stderr);
        assert_eq!(inv.stdin.as_deref(), Some(&b"x"[..]));
    }
}
