//! JSON rendering of records.
//!
//! Output key order is always the manifest order, and rendering the same
//! record twice yields identical bytes. Database regenerations are diffed
//! file by file, so this is relied upon.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::RecordResult;
use crate::record::Record;

/// Indentation used for pretty output unless configured otherwise
pub const DEFAULT_INDENT: usize = 4;

/// How to lay out rendered JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Multi-line indented output instead of a single line
    pub pretty: bool,
    /// Spaces per nesting level when `pretty` is set
    pub indent: usize,
}

impl RenderOptions {
    pub fn pretty() -> Self {
        RenderOptions {
            pretty: true,
            indent: DEFAULT_INDENT,
        }
    }

    pub fn compact() -> Self {
        RenderOptions {
            pretty: false,
            indent: DEFAULT_INDENT,
        }
    }
}

impl From<bool> for RenderOptions {
    fn from(pretty: bool) -> Self {
        if pretty {
            Self::pretty()
        } else {
            Self::compact()
        }
    }
}

/// Render a record as JSON text
pub fn to_text(record: &Record, pretty: bool) -> RecordResult<String> {
    render(record, RenderOptions::from(pretty))
}

pub fn render(record: &Record, options: RenderOptions) -> RecordResult<String> {
    let mut buf = Vec::new();
    write_to(record, &mut buf, options)?;
    Ok(String::from_utf8(buf)?)
}

/// Render a record into any writer
pub fn write_to<W: Write>(record: &Record, writer: W, options: RenderOptions) -> RecordResult<()> {
    let structure = record.to_ordered();
    if options.pretty {
        let indent = " ".repeat(options.indent);
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        structure.serialize(&mut serializer)?;
    } else {
        serde_json::to_writer(writer, &structure)?;
    }
    Ok(())
}

/// Print a record to stdout followed by a newline
pub fn print(record: &Record, pretty: bool) -> RecordResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_to(record, &mut out, RenderOptions::from(pretty))?;
    writeln!(out)?;
    Ok(())
}

/// Write a record to `path`, replacing any existing content
pub fn to_file(record: &Record, path: &Path, pretty: bool) -> RecordResult<()> {
    to_file_with(record, path, RenderOptions::from(pretty))
}

pub fn to_file_with(record: &Record, path: &Path, options: RenderOptions) -> RecordResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_to(record, &mut writer, options)?;
    writer.flush()?;

    tracing::debug!(record = record.schema().name, path = %path.display(), "wrote record");
    Ok(())
}
