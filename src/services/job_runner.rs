//! Background request runner
//!
//! Delete requests run on their own thread and report back over a channel.
//! The UI thread polls for outcomes on every tick; there is no timeout, a
//! request that never finishes simply never reports.

use super::requests::{run_request, RequestError};
use crate::model::table::{RecordKey, RowId};
use std::collections::HashSet;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

/// Completion report of a delete request
#[derive(Debug)]
pub struct DeleteOutcome {
    pub row: RowId,
    pub key: Option<RecordKey>,
    pub result: Result<(), RequestError>,
}

/// Runs delete requests in the background
pub struct JobRunner {
    sender: Sender<DeleteOutcome>,
    receiver: Receiver<DeleteOutcome>,
    in_flight: HashSet<RowId>,
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl JobRunner {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            in_flight: HashSet::new(),
        }
    }

    /// Start a delete request for `row`; returns false if one is already running
    pub fn spawn_delete(&mut self, row: RowId, key: Option<RecordKey>, command: String) -> bool {
        if !self.in_flight.insert(row) {
            return false;
        }

        let tx = self.sender.clone();
        tracing::info!(row = row.0, key = ?key, "delete request started");

        thread::spawn(move || {
            let result = run_request(&command);
            let _ = tx.send(DeleteOutcome { row, key, result });
        });
        true
    }

    pub fn is_pending(&self, row: RowId) -> bool {
        self.in_flight.contains(&row)
    }

    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }

    /// Collect every outcome reported since the last poll
    pub fn poll(&mut self) -> Vec<DeleteOutcome> {
        let mut outcomes = Vec::new();

        loop {
            match self.receiver.try_recv() {
                Ok(outcome) => {
                    self.in_flight.remove(&outcome.row);
                    outcomes.push(outcome);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for(runner: &mut JobRunner) -> Vec<DeleteOutcome> {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut outcomes = Vec::new();
        while runner.pending() > 0 && Instant::now() < deadline {
            outcomes.extend(runner.poll());
            thread::sleep(Duration::from_millis(10));
        }
        outcomes
    }

    #[test]
    fn test_poll_without_jobs_is_empty() {
        let mut runner = JobRunner::new();
        assert!(runner.poll().is_empty());
        assert_eq!(runner.pending(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_delete_reports_ok() {
        let mut runner = JobRunner::new();
        assert!(runner.spawn_delete(RowId(1), RecordKey::parse("1"), "true".to_string()));
        assert!(runner.is_pending(RowId(1)));

        let outcomes = wait_for(&mut runner);
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].row, RowId(1));
        assert!(outcomes[0].result.is_ok());
        assert!(!runner.is_pending(RowId(1)));
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_delete_reports_error() {
        let mut runner = JobRunner::new();
        runner.spawn_delete(RowId(2), None, "false".to_string());

        let outcomes = wait_for(&mut runner);
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(outcomes[0].result, Err(RequestError::Rejected(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_duplicate_delete_is_refused() {
        let mut runner = JobRunner::new();
        assert!(runner.spawn_delete(RowId(3), None, "sleep 0.2".to_string()));
        assert!(!runner.spawn_delete(RowId(3), None, "true".to_string()));
        wait_for(&mut runner);
    }
}
