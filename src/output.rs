//! Record printing.
//!
//! One line per record, in the format selected with `--format`.

use std::io::{self, ErrorKind, Write};

use crate::config::{OutputFormat, EXIT_FAILURE, EXIT_SUCCESS};
use crate::error_handling::OutputError;
use crate::record::Record;
use crate::SearchOutcome;

/// Wrapper around a Write that ignores broken pipe errors (EPIPE).
/// This allows graceful handling when stdout is piped to a command that exits early.
pub struct IgnoreBrokenPipe<W: Write> {
    inner: W,
}

impl<W: Write> IgnoreBrokenPipe<W> {
    /// Wraps `inner`.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl IgnoreBrokenPipe<io::Stdout> {
    /// Broken-pipe tolerant standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Write for IgnoreBrokenPipe<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf).or_else(|e| {
            if e.kind() == ErrorKind::BrokenPipe {
                // Downstream command closed the pipe
                Ok(buf.len())
            } else {
                Err(e)
            }
        })
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush().or_else(|e| {
            if e.kind() == ErrorKind::BrokenPipe {
                Ok(())
            } else {
                Err(e)
            }
        })
    }
}

/// Renders one record as a single line (without the trailing newline).
///
/// # Errors
///
/// Returns an error if the record lacks a field the format needs.
pub fn render_record(record: &Record, format: OutputFormat) -> Result<String, OutputError> {
    Ok(match format {
        OutputFormat::Plain => record.summary()?,
        OutputFormat::Verbose => record.verbose()?,
        OutputFormat::Json => serde_json::to_string(&record.to_json()?)?,
    })
}

/// Writes every record on its own line and returns the number written.
///
/// Stops at the first record that cannot be rendered; records before it are
/// already written.
pub fn write_records<W: Write>(
    writer: &mut W,
    records: &[Record],
    format: OutputFormat,
) -> Result<usize, OutputError> {
    for record in records {
        let line = render_record(record, format)?;
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;
    Ok(records.len())
}

/// Prints a search outcome and returns the process exit status.
///
/// Records are written to `out` first, including those fetched before a failing
/// page. An API rejection is then printed to `out` as the server's message and
/// the run still counts as successful. Any other error is written to `err` as
/// `mnemonic-pdns error: ...` and yields [`EXIT_FAILURE`].
///
/// # Errors
///
/// Returns an error if a record cannot be rendered or a stream cannot be written.
pub fn report_outcome<O: Write, E: Write>(
    outcome: &SearchOutcome,
    format: OutputFormat,
    out: &mut O,
    err: &mut E,
) -> Result<i32, OutputError> {
    write_records(out, &outcome.records, format)?;

    match &outcome.error {
        None => Ok(EXIT_SUCCESS),
        Some(e) if e.is_api_error() => {
            writeln!(out, "{}", e)?;
            out.flush()?;
            Ok(EXIT_SUCCESS)
        }
        Some(e) => {
            writeln!(err, "mnemonic-pdns error: {}", e)?;
            err.flush()?;
            Ok(EXIT_FAILURE)
        }
    }
}
