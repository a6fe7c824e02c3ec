//! Delivery target for generated text (order summaries, print documents).
//!
//! Stands in for the clipboard: the text goes to stdout or to a file. A
//! failed write is reported once and never retried.

use std::fmt;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Sink {
    Stdout,
    File(PathBuf),
}

impl Sink {
    pub(crate) fn from_arg(out: Option<PathBuf>) -> Self {
        out.map_or(Sink::Stdout, Sink::File)
    }

    /// Writes `text` followed by a newline.
    pub(crate) fn deliver(&self, text: &str) -> std::io::Result<()> {
        let result = match self {
            Sink::Stdout => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{text}").and_then(|()| stdout.flush())
            }
            Sink::File(path) => std::fs::write(path, format!("{text}\n")),
        };
        if let Err(ref e) = result {
            tracing::error!(sink = %self, error = %e, "failed to deliver text");
        }
        result
    }

    /// Whether delivered text lands in the same stream as interactive output.
    pub(crate) fn is_stdout(&self) -> bool {
        matches!(self, Sink::Stdout)
    }
}

impl fmt::Display for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::Stdout => write!(f, "stdout"),
            Sink::File(path) => write!(f, "{}", path.display()),
        }
    }
}
