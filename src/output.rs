//! Output formatting for search results

use crate::index::types::SearchResult;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// How results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `path:line`, colored when the terminal supports it
    Plain { color: bool },
    /// One JSON object per line
    Json,
}

/// Print results to stdout in the requested format
pub fn print_results(results: &[SearchResult], format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain { color } => {
            let choice = if color {
                ColorChoice::Auto
            } else {
                ColorChoice::Never
            };
            let mut stdout = StandardStream::stdout(choice);
            write_plain(&mut stdout, results)
        }
        OutputFormat::Json => {
            let stdout = io::stdout();
            write_json(&mut stdout.lock(), results)
        }
    }
}

/// Write `path:line` for every result
pub fn write_plain<W: WriteColor>(out: &mut W, results: &[SearchResult]) -> io::Result<()> {
    for result in results {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(out, "{}", result.path.display())?;
        out.reset()?;
        write!(out, ":")?;

        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "{}", result.line_number)?;
        out.reset()?;
        writeln!(out)?;
    }
    Ok(())
}

/// Write one JSON object per result
pub fn write_json<W: Write>(out: &mut W, results: &[SearchResult]) -> io::Result<()> {
    for result in results {
        serde_json::to_writer(&mut *out, result)?;
        writeln!(out)?;
    }
    Ok(())
}
