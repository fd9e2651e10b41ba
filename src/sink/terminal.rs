//! Coloured stdout rendering.

use std::io::Write;

use colored::{ColoredString, Colorize};

use crate::entry::{Entry, Severity};
use crate::sink::SinkError;

pub(crate) fn write(entry: &Entry) -> Result<(), SinkError> {
    let rendered = render(entry);
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    Ok(())
}

fn header(entry: &Entry) -> ColoredString {
    let text = format!("{} {}", entry.severity, entry.namespace);
    match entry.severity {
        Severity::Debug | Severity::Info => text.cyan(),
        Severity::Warning => text.yellow(),
        Severity::Error => text.magenta(),
        Severity::Alert => text.red(),
    }
}

/// One entry as a multi-line block: coloured `<Severity> <namespace>`
/// header, the message, then the context pairs indented four spaces with a
/// synthetic trailing `time` pair.
fn render(entry: &Entry) -> String {
    let mut out = String::new();
    out.push_str(&header(entry).to_string());
    out.push('\n');
    out.push_str(&entry.message);
    out.push_str("\n\nFor context:\n\n");
    for (name, value) in &entry.context {
        out.push_str(&format!("    {name}: {value}\n"));
    }
    out.push_str(&format!(
        "    time: {}\n\n",
        entry.time.format("%Y-%m-%d %H:%M:%S%.3f UTC")
    ));
    out
}
