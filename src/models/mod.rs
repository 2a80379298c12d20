//! Cluster simulation domain models.
//!
//! Core data types for the discrete-time cluster: pending calls, running
//! programs, processors, and report statistics. The tick engine in
//! [`crate::cluster`] owns and mutates these; everything here is plain
//! serializable state.

mod call;
mod processor;
mod program;
mod report;

pub use call::ProgramCall;
pub use processor::{Processor, ProcessorId, ProcessorPool};
pub use program::RunningProgram;
pub use report::{ClusterReport, ReportCounters};
