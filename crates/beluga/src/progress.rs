//! Progress reporting around a layering run.

/// Brackets a run: [`begin`](ProgressMonitor::begin) is called once before
/// any work happens and [`done`](ProgressMonitor::done) once after the run
/// finished. The engine does not support mid-run cancellation, so there are
/// no intermediate callbacks.
pub trait ProgressMonitor {
    fn begin(&mut self, task: &str, total_units: usize);
    fn done(&mut self);
}

/// Default monitor that forwards both events to `tracing` at debug level.
#[derive(Debug, Default)]
pub struct BasicProgressMonitor {
    task: Option<String>,
}

impl ProgressMonitor for BasicProgressMonitor {
    fn begin(&mut self, task: &str, total_units: usize) {
        tracing::debug!(task, total_units, "task started");
        self.task = Some(task.to_string());
    }

    fn done(&mut self) {
        if let Some(task) = self.task.take() {
            tracing::debug!(task, "task finished");
        }
    }
}
