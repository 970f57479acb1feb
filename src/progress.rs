use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::debug;

/// Receives a tick every time a full column of the image is finished.
pub trait Progress: Sync {
    fn column_done(&self, done: usize, total: usize);
}

/// Silent.
impl Progress for () {
    fn column_done(&self, _done: usize, _total: usize) {}
}

/// Percentage printed on stdout, rewritten in place.
#[derive(Debug, Default)]
pub struct ConsoleProgress {
    shown: AtomicUsize,
}

impl ConsoleProgress {
    pub fn new() -> ConsoleProgress {
        ConsoleProgress::default()
    }
}

impl Progress for ConsoleProgress {
    fn column_done(&self, done: usize, total: usize) {
        let percent = percent(done, total);
        // columns can finish out of order when rendering in parallel
        let previous = self.shown.fetch_max(percent + 1, Ordering::Relaxed);
        if previous > percent {
            return;
        }
        // a lost progress line is not worth failing the render over
        if let Err(error) = print_percent(std::io::stdout().lock(), percent) {
            debug!(%error, "progress output failed");
        }
    }
}

fn print_percent<W: Write>(mut out: W, percent: usize) -> io::Result<()> {
    write!(out, "\r{:3}%", percent)?;
    out.flush()
}

fn percent(done: usize, total: usize) -> usize {
    if total == 0 {
        100
    } else {
        100 * done / total
    }
}
