//! Discrete-time simulation of a fixed-size compute cluster.
//!
//! Accepts asynchronous program-execution requests, queues them, and
//! schedules them onto a pool of identical processors according to a
//! scoring heuristic. Models occupancy, queueing delay, and utilization
//! statistics over a bounded simulated horizon — execution itself is pure
//! tick bookkeeping, with no real payload, threads, or I/O.
//!
//! # Modules
//!
//! - **`queue`**: positional FIFO queue backing the admission window
//! - **`models`**: domain types — `ProgramCall`, `RunningProgram`,
//!   `Processor`, `ProcessorPool`, `ClusterReport`
//! - **`scoring`**: admission score heuristic and window selection
//! - **`cluster`**: the tick engine, its configuration, and the observer
//!   boundary
//! - **`workload`**: randomized call generation, driven entirely through
//!   the observer boundary
//!
//! # Example
//!
//! ```
//! use u_cluster::{Cluster, ClusterConfig, ProgramCall, TickContext};
//!
//! let mut cluster = Cluster::new(ClusterConfig::new(8, 50)).unwrap();
//!
//! // The observer is called once per tick and may inject new requests.
//! cluster.run(&mut |ctx: &mut TickContext<'_>| {
//!     if ctx.current_tick() == 0 {
//!         ctx.call_program(ProgramCall::new("Build", 4, 10)).unwrap();
//!     }
//! });
//!
//! let report = cluster.report();
//! assert_eq!(report.total_finished, 1);
//! ```

pub mod cluster;
pub mod error;
pub mod models;
pub mod queue;
pub mod scoring;
pub mod workload;

pub use cluster::{Cluster, ClusterConfig, StopToken, TickContext, TickObserver};
pub use error::{CallError, ConfigError, QueueError};
pub use models::{
    ClusterReport, Processor, ProcessorId, ProcessorPool, ProgramCall, RunningProgram,
};
pub use scoring::ScoreWeights;
