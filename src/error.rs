//! Error taxonomy for the cluster simulation.
//!
//! Two families exist and must not be mixed:
//!
//! - **Recoverable results** — returned as `Err` from the operation that
//!   failed: [`CallError`] (rejected admission request), [`QueueError`]
//!   (positional queue misuse), [`ConfigError`] (invalid construction
//!   parameters). The operation leaves all state untouched.
//! - **Invariant faults** — a panic, never a `Result`: assigning a program
//!   to an occupied processor, or placement finding fewer free processors
//!   than admission approved. These indicate a bug in the engine itself and
//!   must not be caught and retried.

use thiserror::Error;

/// A program-execution request was rejected before reaching the queue.
///
/// Returned by [`Cluster::call_program`](crate::Cluster::call_program).
/// The queue is unchanged on failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    /// The call carried an empty program name.
    #[error("program name must not be empty")]
    EmptyName,

    /// The call requested zero processors.
    #[error("program `{name}` requests zero processors")]
    ZeroProcessors {
        /// Name of the rejected call.
        name: String,
    },

    /// The call requested more processors than the cluster has.
    #[error("program `{name}` requests {required} processors but the cluster has {capacity}")]
    ExcessiveProcessors {
        /// Name of the rejected call.
        name: String,
        /// Processors the call asked for.
        required: usize,
        /// Total processors in the cluster.
        capacity: usize,
    },

    /// The call carried a zero execution duration.
    #[error("program `{name}` has zero execution ticks")]
    ZeroExecutionTicks {
        /// Name of the rejected call.
        name: String,
    },

    /// A call or running program with the same name already exists.
    ///
    /// Program names key the running set, so admitting a duplicate would
    /// let two programs claim the same identity.
    #[error("program name `{name}` is already queued or running")]
    DuplicateName {
        /// The conflicting name.
        name: String,
    },
}

/// Positional queue misuse, signalled by [`CallQueue`](crate::queue::CallQueue).
///
/// Indicates a caller bug, never raised during normal scheduler operation.
/// The queue is unmodified on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// `pop` was called on an empty queue.
    #[error("queue is empty")]
    Empty,

    /// The requested position does not exist.
    #[error("position {position} out of range for queue of length {len}")]
    OutOfRange {
        /// The offending 0-based position.
        position: usize,
        /// Queue length at the time of the call.
        len: usize,
    },
}

/// Invalid cluster construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The cluster was configured with zero processors.
    #[error("cluster capacity must be at least one processor")]
    NoProcessors,

    /// The queue analysis depth was zero.
    #[error("queue analysis depth must be at least 1")]
    ZeroAnalysisDepth,

    /// The per-tick admission budget was zero.
    #[error("max program starts per tick must be at least 1")]
    ZeroStartsPerTick,
}
