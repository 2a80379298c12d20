//! Program-execution request model.

use serde::{Deserialize, Serialize};

/// A pending request for processor time.
///
/// Immutable once queued, except for `called_at_tick`, which the scheduler
/// stamps at admission; a value supplied by the caller is overwritten.
///
/// # Example
///
/// ```
/// use u_cluster::models::ProgramCall;
///
/// let call = ProgramCall::new("Render", 4, 25);
/// assert_eq!(call.required_processors, 4);
/// assert_eq!(call.execution_ticks, 25);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramCall {
    /// Unique program identifier. Must be non-empty.
    pub name: String,
    /// Processors the program needs simultaneously. Must be in
    /// `[1, capacity]` at admission.
    pub required_processors: usize,
    /// Simulated duration in ticks. Must be positive.
    pub execution_ticks: u64,
    /// Simulated time the scheduler admitted this call into the queue.
    pub called_at_tick: u64,
}

impl ProgramCall {
    /// Creates a new call. The admission timestamp starts at zero and is
    /// stamped by the scheduler.
    pub fn new(name: impl Into<String>, required_processors: usize, execution_ticks: u64) -> Self {
        Self {
            name: name.into(),
            required_processors,
            execution_ticks,
            called_at_tick: 0,
        }
    }

    /// Ticks this call has spent waiting in the queue as of `current_tick`.
    pub fn waiting_ticks(&self, current_tick: u64) -> u64 {
        current_tick.saturating_sub(self.called_at_tick)
    }
}
