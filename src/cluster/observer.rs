//! Per-tick observer hook and the restricted view handed to it.
//!
//! The engine invokes the observer exactly once per tick, after statistics
//! and before cleanup. The observer sees current state through
//! [`TickContext`] and may re-enter the admission API; calls enqueued from
//! the callback are stamped with the current tick but become candidates
//! only from the next tick's admission phase.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{CallError, QueueError};
use crate::models::{ClusterReport, Processor, ProgramCall, RunningProgram};
use crate::queue::CallQueue;

use super::engine::Cluster;

/// Collaborator notified once per simulated tick.
///
/// Workload generation and visualization live behind this trait; the engine
/// itself has no knowledge of either. Closures implement it directly:
///
/// ```
/// use u_cluster::{Cluster, ClusterConfig, TickContext};
///
/// let mut cluster = Cluster::new(ClusterConfig::new(4, 3)).unwrap();
/// let mut ticks_seen = 0;
/// cluster.run(&mut |_: &mut TickContext<'_>| ticks_seen += 1);
/// assert_eq!(ticks_seen, 4);
/// ```
pub trait TickObserver {
    /// Called once per tick with a live view of cluster state.
    fn on_tick(&mut self, cluster: &mut TickContext<'_>);
}

impl<F> TickObserver for F
where
    F: FnMut(&mut TickContext<'_>),
{
    fn on_tick(&mut self, cluster: &mut TickContext<'_>) {
        self(cluster)
    }
}

/// Live view of cluster state passed to [`TickObserver::on_tick`].
///
/// Read access to the full tick state, plus re-entrant admission via
/// [`call_program`](Self::call_program). The tick loop itself cannot be
/// re-entered from here.
pub struct TickContext<'a> {
    cluster: &'a mut Cluster,
}

impl<'a> TickContext<'a> {
    pub(super) fn new(cluster: &'a mut Cluster) -> Self {
        Self { cluster }
    }

    /// Current simulated tick.
    pub fn current_tick(&self) -> u64 {
        self.cluster.current_tick()
    }

    /// Total number of processors.
    pub fn capacity(&self) -> usize {
        self.cluster.capacity()
    }

    /// Number of currently idle processors.
    pub fn free_processors(&self) -> usize {
        self.cluster.free_processors()
    }

    /// All processors in ascending id order.
    pub fn processors(&self) -> &[Processor] {
        self.cluster.processors()
    }

    /// Pending calls in queue order.
    pub fn waiting_calls(&self) -> &CallQueue<ProgramCall> {
        self.cluster.waiting_calls()
    }

    /// Currently running programs, ordered by name.
    pub fn running_programs(&self) -> impl Iterator<Item = &RunningProgram> {
        self.cluster.running_programs().values()
    }

    /// Names of programs that finished during this tick's completion phase.
    pub fn finished_this_tick(&self) -> &[String] {
        self.cluster.finished_this_tick()
    }

    /// Statistics snapshot as of this tick.
    pub fn report(&self) -> ClusterReport {
        self.cluster.report()
    }

    /// Admission score of the waiting call at `position`, as the scheduler
    /// would compute it right now.
    pub fn score(&self, position: usize) -> Result<f64, QueueError> {
        self.cluster.score(position)
    }

    /// Enqueues a new program-execution request.
    ///
    /// The call is stamped with the current tick and considered for
    /// admission starting next tick.
    pub fn call_program(&mut self, call: ProgramCall) -> Result<(), CallError> {
        self.cluster.call_program(call)
    }
}

/// Cooperative stop signal for the tick loop.
///
/// Checked at the top of each tick by
/// [`Cluster::run_until_stopped`](crate::Cluster::run_until_stopped), so a
/// triggered token never interrupts a tick mid-phase. Clones share the same
/// flag, letting an observer keep one half and trigger it from inside
/// `on_tick`.
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    flag: Arc<AtomicBool>,
}

impl StopToken {
    /// Creates an untriggered token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the loop to stop before the next tick.
    pub fn trigger(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether a stop has been requested.
    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
