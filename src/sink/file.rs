//! Append-only single-line file sink.

use std::fs::{File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::Path;

use chrono::SecondsFormat;
use parking_lot::Mutex;

use crate::entry::Entry;
use crate::sink::SinkError;

/// An append-opened, line-buffered log file.
///
/// A single worker consumes the sink, but writes still take the mutex to
/// defend the handle against any future sharing of the resource.
pub(crate) struct FileSink {
    writer: Mutex<LineWriter<File>>,
}

impl FileSink {
    pub(crate) fn open(path: &Path) -> Result<Self, SinkError> {
        let file = OpenOptions::new().append(true).create(true).open(path)?;
        Ok(Self {
            writer: Mutex::new(LineWriter::new(file)),
        })
    }

    pub(crate) fn write(&self, entry: &Entry) -> Result<(), SinkError> {
        let mut writer = self.writer.lock();
        writer.write_all(line(entry).as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    pub(crate) fn close(self) -> Result<(), SinkError> {
        let mut writer = self.writer.into_inner();
        writer.flush()?;
        Ok(())
    }
}

/// One entry as a single line:
/// `<rfc3339 millis> [<LABEL>] <namespace> | <message> | name=value ...`
/// The trailing segment is omitted when the entry carries no pairs.
fn line(entry: &Entry) -> String {
    let mut out = format!(
        "{} [{}] {} | {}",
        entry.time.to_rfc3339_opts(SecondsFormat::Millis, true),
        entry.severity.label(),
        entry.namespace,
        entry.message,
    );
    if !entry.context.is_empty() {
        out.push_str(" |");
        for (name, value) in &entry.context {
            out.push_str(&format!(" {name}={value}"));
        }
    }
    out
}
