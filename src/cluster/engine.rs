//! The cluster scheduling engine.
//!
//! A state machine over simulated ticks `0..=max_tick`. Each tick executes
//! six phases in a fixed order:
//!
//! 1. **Admission** — up to `max_starts_per_tick` attempts: score the
//!    admission window, and place the top candidate if enough processors
//!    are free. An under-resourced top candidate consumes its attempt
//!    without effect; the attempt does not fall through to the runner-up.
//! 2. **Completion** — release the processors of every program that has run
//!    its full duration and record it as finished.
//! 3. **Statistics** — accumulate per-processor busy ticks and the running
//!    count. Programs finished in phase 2 still count as running here; they
//!    leave the running set only in phase 5.
//! 4. **Callback** — invoke the tick observer with a live view.
//! 5. **Cleanup** — drop finished programs from the running set.
//! 6. Advance the tick.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::error::{CallError, QueueError};
use crate::models::{
    ClusterReport, Processor, ProcessorId, ProcessorPool, ProgramCall, ReportCounters,
    RunningProgram,
};
use crate::queue::CallQueue;
use crate::scoring::{score_call, select_top};

use super::config::ClusterConfig;
use super::observer::{StopToken, TickContext, TickObserver};

/// A fixed-size compute cluster driven over discrete simulated time.
///
/// Owns the processor pool, the waiting-call queue, the running-program set,
/// and the report accumulators. Single-threaded and cooperative: one tick
/// runs to completion, including its observer callback, before the next
/// begins.
///
/// # Example
///
/// ```
/// use u_cluster::{Cluster, ClusterConfig, ProgramCall};
///
/// let mut cluster = Cluster::new(ClusterConfig::new(32, 100)).unwrap();
/// cluster.call_program(ProgramCall::new("Program", 10, 25)).unwrap();
/// cluster.run(&mut |_: &mut u_cluster::TickContext<'_>| {});
///
/// let report = cluster.report();
/// assert_eq!(report.total_started, 1);
/// assert_eq!(report.total_finished, 1);
/// ```
#[derive(Debug)]
pub struct Cluster {
    config: ClusterConfig,
    pool: ProcessorPool,
    queue: CallQueue<ProgramCall>,
    running: BTreeMap<String, RunningProgram>,
    finished_this_tick: Vec<String>,
    counters: ReportCounters,
    current_tick: u64,
}

impl Cluster {
    /// Creates a cluster from a validated configuration.
    pub fn new(config: ClusterConfig) -> Result<Self, crate::error::ConfigError> {
        config.validate()?;
        let capacity = config.processors;
        Ok(Self {
            config,
            pool: ProcessorPool::new(capacity),
            queue: CallQueue::new(),
            running: BTreeMap::new(),
            finished_this_tick: Vec::new(),
            counters: ReportCounters::new(capacity),
            current_tick: 0,
        })
    }

    /// Current simulated tick.
    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }

    /// Total number of processors.
    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Number of currently idle processors. O(1).
    pub fn free_processors(&self) -> usize {
        self.pool.free_count()
    }

    /// All processors in ascending id order.
    pub fn processors(&self) -> &[Processor] {
        self.pool.processors()
    }

    /// Pending calls in queue order.
    pub fn waiting_calls(&self) -> &CallQueue<ProgramCall> {
        &self.queue
    }

    /// Currently running programs, keyed by name.
    pub fn running_programs(&self) -> &BTreeMap<String, RunningProgram> {
        &self.running
    }

    /// Names of programs finished during the current tick's completion
    /// phase. Cleared at the end of every tick.
    pub fn finished_this_tick(&self) -> &[String] {
        &self.finished_this_tick
    }

    /// The configuration this cluster was built from.
    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Statistics snapshot. Derived averages are recomputed from the
    /// cumulative counters on every call; at tick 0 they are `0.0`.
    pub fn report(&self) -> ClusterReport {
        ClusterReport::calculate(&self.counters, self.current_tick)
    }

    /// Admission score of the waiting call at `position`, as the next
    /// admission attempt would compute it.
    pub fn score(&self, position: usize) -> Result<f64, QueueError> {
        let call = self.queue.peek(position)?;
        Ok(score_call(
            &self.config.score_weights,
            call,
            position,
            self.current_tick,
            self.config.queue_analysis_depth,
            self.pool.free_count(),
        ))
    }

    /// Submits a program-execution request.
    ///
    /// On success the call is stamped with the current tick and appended to
    /// the queue; it becomes an admission candidate in the next admission
    /// phase to run. On failure the queue is untouched.
    pub fn call_program(&mut self, mut call: ProgramCall) -> Result<(), CallError> {
        if call.name.is_empty() {
            return Err(CallError::EmptyName);
        }
        if call.required_processors == 0 {
            return Err(CallError::ZeroProcessors { name: call.name });
        }
        if call.required_processors > self.pool.capacity() {
            return Err(CallError::ExcessiveProcessors {
                required: call.required_processors,
                capacity: self.pool.capacity(),
                name: call.name,
            });
        }
        if call.execution_ticks == 0 {
            return Err(CallError::ZeroExecutionTicks { name: call.name });
        }
        if self.running.contains_key(&call.name)
            || self.queue.iter().any(|queued| queued.name == call.name)
        {
            return Err(CallError::DuplicateName { name: call.name });
        }

        call.called_at_tick = self.current_tick;
        debug!(
            program = %call.name,
            processors = call.required_processors,
            ticks = call.execution_ticks,
            tick = self.current_tick,
            "call admitted to queue"
        );
        self.queue.put(call);
        self.counters.total_calls += 1;
        Ok(())
    }

    /// Runs the tick loop until the horizon is reached.
    ///
    /// The loop body executes for every tick in `0..=max_tick`; the cluster
    /// is terminal once `current_tick` exceeds the horizon, and further
    /// calls return immediately.
    pub fn run<O: TickObserver + ?Sized>(&mut self, observer: &mut O) {
        while self.current_tick <= self.config.max_tick {
            self.step(observer);
        }
    }

    /// Runs the tick loop until the horizon is reached or `stop` is
    /// triggered. The token is checked between ticks only, never mid-phase.
    pub fn run_until_stopped<O: TickObserver + ?Sized>(
        &mut self,
        observer: &mut O,
        stop: &StopToken,
    ) {
        while self.current_tick <= self.config.max_tick && !stop.is_triggered() {
            self.step(observer);
        }
    }

    /// Executes a single tick: admission, completion, statistics, callback,
    /// cleanup, advance.
    pub fn step<O: TickObserver + ?Sized>(&mut self, observer: &mut O) {
        trace!(tick = self.current_tick, "tick begin");

        // Admission phase.
        for _ in 0..self.config.max_starts_per_tick {
            if self.queue.is_empty() {
                break;
            }
            self.attempt_admission();
        }

        // Completion phase. Processors are released now; the programs stay
        // in the running set until cleanup.
        let finished: Vec<String> = self
            .running
            .values()
            .filter(|program| program.is_finished_at(self.current_tick))
            .map(|program| program.name.clone())
            .collect();
        for name in finished {
            self.finish_program(&name);
        }

        // Statistics phase.
        for processor in self.pool.processors() {
            if processor.is_occupied() {
                self.counters.busy_ticks[processor.id() as usize] += 1;
            }
        }
        self.counters.running_tick_sum += self.running.len() as u64;

        // Callback phase.
        let mut context = TickContext::new(self);
        observer.on_tick(&mut context);

        // Cleanup phase.
        for name in std::mem::take(&mut self.finished_this_tick) {
            self.running.remove(&name);
        }

        self.current_tick += 1;
    }

    /// One admission attempt: select the top-scoring candidate in the
    /// window and place it if enough processors are free. An
    /// under-resourced candidate is left in the queue and the attempt ends.
    fn attempt_admission(&mut self) {
        let Some(top) = select_top(
            &self.config.score_weights,
            &self.queue,
            self.current_tick,
            self.config.queue_analysis_depth,
            self.pool.free_count(),
        ) else {
            return;
        };

        let required = self
            .queue
            .peek(top)
            .expect("selected position is within the window")
            .required_processors;
        if self.pool.free_count() < required {
            trace!(
                position = top,
                required,
                free = self.pool.free_count(),
                "top candidate under-resourced, admission attempt skipped"
            );
            return;
        }

        let call = self
            .queue
            .pop(top)
            .expect("selected position is within the window");
        self.start_program(call);
    }

    /// Places an admitted call onto the first free processors in pool
    /// order.
    ///
    /// # Panics
    ///
    /// Panics if fewer free processors are found than admission approved;
    /// that is an engine bug, not a recoverable condition.
    fn start_program(&mut self, call: ProgramCall) {
        let free_ids: Vec<ProcessorId> = self
            .pool
            .processors()
            .iter()
            .filter(|processor| !processor.is_occupied())
            .map(Processor::id)
            .take(call.required_processors)
            .collect();
        assert!(
            free_ids.len() == call.required_processors,
            "placement found {} free processors for `{}` but admission approved {}",
            free_ids.len(),
            call.name,
            call.required_processors,
        );

        let mut program = RunningProgram::from_call(&call, self.current_tick);
        for id in free_ids {
            self.pool.assign(id, &call.name);
            program.assign_processor(id);
            self.counters.programs_served[id as usize] += 1;
        }

        debug!(
            program = %program.name,
            processors = program.required_processors,
            tick = self.current_tick,
            "program placed"
        );
        self.running.insert(program.name.clone(), program);
        self.counters.total_started += 1;
    }

    /// Releases a finished program's processors and records it for removal
    /// at cleanup.
    fn finish_program(&mut self, name: &str) {
        let program = &self.running[name];
        for &id in &program.occupied_processors {
            self.pool.release(id);
        }

        debug!(program = %name, tick = self.current_tick, "program finished");
        self.finished_this_tick.push(name.to_string());
        self.counters.total_finished += 1;
    }
}
