use sequence::{LinkedSequence, Sequence};

use crate::task::Board;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RunSummary {
    pub executed: usize,
    pub failed: usize,
}

/// Execute pending tasks front to back, appending one report line per task.
///
/// Executed tasks stay on the board. Tasks pushed while running execute
/// after the ones already pending. Clearing the board ends the run. A failed
/// task is reported and the run goes on.
pub fn run(board: &mut Board, report: &mut LinkedSequence<String>) -> RunSummary {
    let mut summary = RunSummary::default();
    while let Some(mut task) = board.next_task() {
        let name = task.name();
        let outcome = task.execute(board);
        match outcome {
            Ok(()) => {
                summary.executed += 1;
                if let Some(line) = task.describe() {
                    report.push_back(line);
                }
                tracing::debug!(task = name, pending = board.pending_len(), "task executed");
            }
            Err(err) => {
                summary.failed += 1;
                tracing::warn!(task = name, error = %err, "task failed");
                report.push_back(format!("{name}: {err}"));
            }
        }
        board.finish(task);
    }
    summary
}
