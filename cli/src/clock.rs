use minegrid_core::Summary;
use std::time::Duration;

use web_time::Instant;

/// Elapsed-time display fed by session summaries. Starts on the first reveal and freezes when the
/// game ends; it never touches the session.
#[derive(Debug, Default)]
pub struct Stopwatch {
    started_at: Option<Instant>,
    frozen: Option<Duration>,
}

impl Stopwatch {
    pub fn sync(&mut self, summary: &Summary) {
        if summary.started && self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
        if summary.status.is_finished() && self.frozen.is_none() {
            self.frozen = Some(self.elapsed());
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn elapsed(&self) -> Duration {
        match (self.frozen, self.started_at) {
            (Some(frozen), _) => frozen,
            (None, Some(started_at)) => started_at.elapsed(),
            (None, None) => Duration::ZERO,
        }
    }

    pub fn display(&self) -> String {
        format_secs(self.elapsed().as_secs())
    }
}

/// Whole seconds, or `∞` past 999.
pub fn format_secs(secs: u64) -> String {
    if secs > 999 {
        "∞".to_string()
    } else {
        secs.to_string()
    }
}
