//! Shared crate-wide constants.

/// Clipboard target requested when reading, so the selection owner hands over
/// its HTML representation rather than plain text.
pub const HTML_TARGET: &str = "text/html";

/// Clipboard target the converted text is served under.
pub const TEXT_TARGET: &str = "UTF8_STRING";

/// Converter output format used when none is given (a pandoc writer name).
pub const DEFAULT_FORMAT: &str = "org";

/// Number of paste requests the clipboard-writing process serves before it
/// exits.
///
/// Some desktop environments read the clipboard once as soon as it changes,
/// which consumes one serve cycle before the user ever pastes. Two cycles is
/// the minimum that leaves one for the user.
pub const DEFAULT_LOOPS: u32 = 2;

/// Lower bound accepted for `--loops`.
pub const MIN_LOOPS: u32 = 2;

pub const DEFAULT_CLIPBOARD_TOOL: &str = "xclip";
pub const DEFAULT_CONVERTER: &str = "pandoc";

pub const CLIPBOARD_TOOL_ENV: &str = "CLIPORG_CLIPBOARD_TOOL";
pub const CONVERTER_ENV: &str = "CLIPORG_CONVERTER";
