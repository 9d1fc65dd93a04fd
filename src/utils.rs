//! Terminal output helpers for decoded documents.

use anyhow::Context as _;
use colored::Colorize;
use serde_json::Value;
use std::io::Write;
use std::io::{self, ErrorKind};

/// Write one decoded document (optional ordinal header + colorized JSON) to
/// `writer`. Silently returns `Ok(())` on broken pipe so that piping to
/// tools like `less` or `head` exits cleanly.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_colored_doc<W: Write>(
    writer: &mut W,
    value: &Value,
    ordinal: usize,
    pretty: bool,
    show_ordinal: bool,
) -> anyhow::Result<()> {
    let mut painter = Painter { writer, pretty };
    let result = (|| -> io::Result<()> {
        if show_ordinal {
            writeln!(painter.writer, "{}", format!("#{ordinal}:").bold().magenta())?;
        }
        painter.value(value, 0)?;
        writeln!(painter.writer)?;
        Ok(())
    })();

    match result {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::BrokenPipe => Ok(()),
        Err(err) => Err(err).context("write colorized JSON to stdout"),
    }
}

/// Syntax-highlighting JSON renderer, compact or indented.
struct Painter<'w, W: Write> {
    writer: &'w mut W,
    pretty: bool,
}

impl<W: Write> Painter<'_, W> {
    /// Render `value` at the given indent depth.
    fn value(&mut self, value: &Value, indent: usize) -> io::Result<()> {
        match value {
            Value::Null => write!(self.writer, "{}", "null".red().dimmed()),
            Value::Bool(b) => {
                write!(self.writer, "{}", b.to_string().yellow().bold())
            }
            Value::Number(n) => {
                write!(self.writer, "{}", n.to_string().yellow())
            }
            Value::String(s) => write!(self.writer, "{}", quote(s).green()),
            Value::Array(items) => {
                write!(self.writer, "[")?;
                let last = items.len().saturating_sub(1);
                for (i, item) in items.iter().enumerate() {
                    self.item_break(indent + 2)?;
                    self.value(item, indent + 2)?;
                    self.separator(i < last)?;
                }
                self.close(']', indent, items.is_empty())
            }
            Value::Object(entries) => {
                write!(self.writer, "{{")?;
                let last = entries.len().saturating_sub(1);
                for (i, (key, child)) in entries.iter().enumerate() {
                    self.item_break(indent + 2)?;
                    write!(self.writer, "{}", quote(key).cyan())?;
                    write!(self.writer, ":{}", if self.pretty { " " } else { "" })?;
                    self.value(child, indent + 2)?;
                    self.separator(i < last)?;
                }
                self.close('}', indent, entries.is_empty())
            }
        }
    }

    /// Before each item: a newline and indent when pretty-printing.
    fn item_break(&mut self, indent: usize) -> io::Result<()> {
        if self.pretty {
            writeln!(self.writer)?;
            write!(self.writer, "{:indent$}", "")?;
        }
        Ok(())
    }

    fn separator(&mut self, more: bool) -> io::Result<()> {
        if more {
            write!(self.writer, ",")?;
        }
        Ok(())
    }

    /// After the last item: return to the enclosing indent level.
    fn close(&mut self, bracket: char, indent: usize, empty: bool) -> io::Result<()> {
        if self.pretty && !empty {
            writeln!(self.writer)?;
            write!(self.writer, "{:indent$}", "")?;
        }
        write!(self.writer, "{bracket}")
    }
}

/// JSON-quote a string, giving proper escaping for display.
fn quote(s: &str) -> String {
    serde_json::to_string(s).expect("string serialization cannot fail")
}
