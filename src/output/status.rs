//! Console status table
//!
//! Package workers never write to the console themselves. They send
//! `StatusEvent`s over a channel to a single printer task that owns the
//! writer, so lines from concurrent packages cannot interleave.

use crate::output::stats::CrawlSummary;
use crate::state::{PackageOutcome, PackageStatus};
use std::fmt;
use std::io::Write;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Something to print
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    /// Column headings
    Header,
    /// One finished package
    Package(StatusLine),
    /// Final counts
    Tally(CrawlSummary),
}

/// One row of the status table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub status: PackageStatus,
    pub package: String,
    pub done: Option<usize>,
    pub total: Option<usize>,
    pub misc: String,
}

impl From<&PackageOutcome> for StatusLine {
    fn from(outcome: &PackageOutcome) -> Self {
        Self {
            status: outcome.status,
            package: outcome.package.clone(),
            done: outcome.succeeded,
            total: outcome.total,
            misc: outcome.cause.clone().unwrap_or_default(),
        }
    }
}

fn count(value: Option<usize>) -> String {
    value.map_or_else(|| "-".to_string(), |n| n.to_string())
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = format!(
            "    {:>7}    {:<46}    {:>5}    {:>5}    {}",
            self.status.label(),
            self.package,
            count(self.done),
            count(self.total),
            self.misc
        );
        write!(f, "{}", line.trim_end())
    }
}

/// Formats the column headings
pub fn header_line() -> String {
    format!(
        "    {:>7}    {:^46}    {:>5}    {:>5}    {}",
        "status", "package", "done", "total", "errors"
    )
}

/// Cloneable handle used by workers to report progress
#[derive(Debug, Clone)]
pub struct StatusSender {
    tx: mpsc::UnboundedSender<StatusEvent>,
}

impl StatusSender {
    pub fn header(&self) {
        self.send(StatusEvent::Header);
    }

    pub fn package(&self, outcome: &PackageOutcome) {
        self.send(StatusEvent::Package(StatusLine::from(outcome)));
    }

    pub fn tally(&self, summary: CrawlSummary) {
        self.send(StatusEvent::Tally(summary));
    }

    fn send(&self, event: StatusEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("Status printer has stopped; dropping status event");
        }
    }
}

/// The task that owns the console writer
pub struct StatusPrinter;

impl StatusPrinter {
    /// Starts the printer task
    ///
    /// The task runs until every `StatusSender` clone is dropped, then flushes
    /// and hands the writer back through its join handle.
    pub fn spawn<W>(writer: W) -> (StatusSender, JoinHandle<W>)
    where
        W: Write + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(async move {
            let mut writer = writer;
            while let Some(event) = rx.recv().await {
                if let Err(e) = write_event(&mut writer, &event) {
                    tracing::warn!("Failed to write status line: {}", e);
                }
            }
            if let Err(e) = writer.flush() {
                tracing::warn!("Failed to flush status output: {}", e);
            }
            writer
        });

        (StatusSender { tx }, handle)
    }
}

fn write_event<W: Write>(writer: &mut W, event: &StatusEvent) -> std::io::Result<()> {
    match event {
        StatusEvent::Header => writeln!(writer, "{}", header_line())?,
        StatusEvent::Package(line) => writeln!(writer, "{}", line)?,
        StatusEvent::Tally(summary) => {
            writeln!(writer)?;
            writeln!(writer, "{}", summary)?;
        }
    }
    writer.flush()
}
