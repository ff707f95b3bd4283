//! Console sink: apply style tokens and write rendered tables.

use console::Style;
use resultprintlib::{RenderedTable, StyleToken};
use std::io::Write;

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Styled, column-aligned text
    Table,
    /// The rendered table serialized as JSON
    Json,
}

impl std::str::FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(OutputMode::Table),
            "json" => Ok(OutputMode::Json),
            _ => Err(format!("Unknown output mode: {}", s)),
        }
    }
}

/// Terminal color policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Apply the policy process-wide; `Auto` keeps console's tty detection.
    pub fn apply(self) {
        match self {
            ColorChoice::Auto => {}
            ColorChoice::Always => console::set_colors_enabled(true),
            ColorChoice::Never => console::set_colors_enabled(false),
        }
    }
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(format!("Unknown color choice: {}", s)),
        }
    }
}

/// Turn a style token into a console style.
///
/// Tokens are dotted style strings (`"green"`, `"yellow.bold"`); unknown parts
/// are ignored by console, so a bad token degrades to unstyled text.
pub fn to_style(token: &StyleToken) -> Style {
    Style::from_dotted_str(token.as_str())
}

/// Write the header and every data line, each with its own style.
pub fn write_table<W: Write>(out: &mut W, table: &RenderedTable) -> std::io::Result<()> {
    for line in table.lines() {
        writeln!(out, "{}", to_style(&line.style).apply_to(&line.text))?;
    }
    Ok(())
}

/// Write the rendered table as pretty-printed JSON.
pub fn write_json<W: Write>(out: &mut W, table: &RenderedTable) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, table)?;
    writeln!(out)?;
    Ok(())
}
