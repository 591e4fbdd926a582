use std::time::{Duration, Instant};

/// Wall-clock elapsed-time tracker for the loaded file.
///
/// `rodio` sinks do not report a playback position on their own, so the
/// audio thread keeps this clock in lockstep with the transport commands:
/// started-at plus time accumulated across pauses.
#[derive(Debug, Default)]
pub(super) struct ElapsedClock {
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl ElapsedClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)start the clock at `offset` into the file.
    pub fn start_at(&mut self, offset: Duration) {
        self.accumulated = offset;
        self.started_at = Some(Instant::now());
    }

    /// Freeze the clock, folding the running span into the accumulator.
    pub fn pause(&mut self) {
        if let Some(st) = self.started_at.take() {
            self.accumulated += st.elapsed();
        }
    }

    /// Continue a paused clock. No-op while running.
    pub fn resume(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    /// Reset to zero, stopped.
    pub fn reset(&mut self) {
        self.started_at = None;
        self.accumulated = Duration::ZERO;
    }

    pub fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }
}
