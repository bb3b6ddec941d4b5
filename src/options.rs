use serde::Serialize;

/// Indent unit for pretty-printed JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndentStyle {
    /// Two spaces per level.
    #[default]
    Two,
    /// Four spaces per level.
    Four,
    /// One tab per level.
    Tab,
}

impl IndentStyle {
    /// The literal string written once per indent level.
    pub fn unit(self) -> &'static str {
        match self {
            IndentStyle::Two => "  ",
            IndentStyle::Four => "    ",
            IndentStyle::Tab => "\t",
        }
    }
}

/// Line ending style for generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum LineEnding {
    /// Unix-style line endings (`\n`).
    #[default]
    Lf,
    /// Windows-style line endings (`\r\n`).
    Crlf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }
}

/// Spacing around `=` in formatted `.env` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum EnvSpacing {
    /// `KEY=value`.
    #[default]
    None,
    /// `KEY = value`.
    Around,
}

/// Configuration for [`crate::format_env`].
///
/// # Example
///
/// ```rust
/// use devtoolbox::{EnvSpacing, FormatEnvOptions, LineEnding};
///
/// let mut options = FormatEnvOptions::default();
/// options.sort_keys = true;
/// options.spacing = EnvSpacing::Around;
/// options.line_ending = LineEnding::Crlf;
/// ```
#[derive(Debug, Clone)]
pub struct FormatEnvOptions {
    /// Re-order entries alphabetically (case-insensitive). Comments and
    /// blank lines keep their original positions, so a comment written
    /// above one entry may end up above another after sorting.
    /// Default: false.
    pub sort_keys: bool,

    /// Spacing around `=`. Default: [`EnvSpacing::None`].
    pub spacing: EnvSpacing,

    /// End the output with a line terminator. Default: true.
    pub trailing_newline: bool,

    /// Prefix every entry with `export `. Default: false.
    pub export_prefix: bool,

    /// Emit entries only, dropping comments and blank lines. Spacing is
    /// forced to `KEY=value` in this mode. Default: false.
    pub minify: bool,

    /// Line ending for the output. Default: [`LineEnding::Lf`].
    pub line_ending: LineEnding,
}

impl Default for FormatEnvOptions {
    fn default() -> Self {
        Self {
            sort_keys: false,
            spacing: EnvSpacing::None,
            trailing_newline: true,
            export_prefix: false,
            minify: false,
            line_ending: LineEnding::Lf,
        }
    }
}
