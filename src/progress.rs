//! Progress reporting and the busy-state gate.
//!
//! The controller talks to the host through two small interfaces: a
//! [`ProgressSink`] that receives counter updates and status text, and a
//! [`UiGate`] whose busy state is held by an RAII [`BusyGuard`] so that the
//! "inputs re-enabled" invariant holds on every exit path, including early
//! returns and panics.

/// Percentage of completed work, rounded; 0 when there is no work.
pub fn percent(done: usize, total: usize) -> u32 {
    if total == 0 {
        0
    } else {
        ((done as f64 / total as f64) * 100.0).round() as u32
    }
}

/// Receiver for run progress. Implementations render a progress bar, log
/// lines, or nothing at all.
pub trait ProgressSink {
    /// A run is starting with `total` documents to produce.
    fn begin(&mut self, label: &str, total: usize);

    /// `done` of `total` documents are complete.
    fn update(&mut self, done: usize, total: usize);

    /// Replace the status label (e.g. "Compressing batch 2 of 3").
    fn status(&mut self, label: &str);

    /// The run ended; show a terminal message.
    fn finish(&mut self, message: &str);
}

/// Progress sink that discards everything.
#[derive(Debug, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn begin(&mut self, _label: &str, _total: usize) {}
    fn update(&mut self, _done: usize, _total: usize) {}
    fn status(&mut self, _label: &str) {}
    fn finish(&mut self, _message: &str) {}
}

/// Progress sink that logs counter milestones.
#[derive(Debug, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn begin(&mut self, label: &str, total: usize) {
        log::info!("{} ({} documents)", label, total);
    }

    fn update(&mut self, done: usize, total: usize) {
        log::debug!("{} / {} ({}%)", done, total, percent(done, total));
    }

    fn status(&mut self, label: &str) {
        log::info!("{}", label);
    }

    fn finish(&mut self, message: &str) {
        log::info!("{}", message);
    }
}

/// Host inputs that must be disabled for the duration of a run.
pub trait UiGate {
    /// Enter or leave the busy state.
    fn set_busy(&mut self, busy: bool);
}

/// Gate that ignores busy transitions, for headless use.
#[derive(Debug, Default)]
pub struct NullGate;

impl UiGate for NullGate {
    fn set_busy(&mut self, _busy: bool) {}
}

/// Scoped acquisition of the busy state; releases on drop.
pub struct BusyGuard<'a> {
    gate: &'a mut dyn UiGate,
}

impl<'a> BusyGuard<'a> {
    /// Mark the gate busy until the guard is dropped.
    pub fn acquire(gate: &'a mut dyn UiGate) -> Self {
        gate.set_busy(true);
        Self { gate }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.gate.set_busy(false);
    }
}
