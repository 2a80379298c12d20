//! Cluster statistics: cumulative accumulators and derived report.
//!
//! The engine only ever increments [`ReportCounters`]; derived averages are
//! recomputed on demand by [`ClusterReport::calculate`], mirroring how KPIs
//! are computed from a finished schedule rather than maintained alongside it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Cumulative counters maintained by the engine, one increment at a time.
///
/// Per-processor vectors are indexed by processor id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportCounters {
    /// Calls accepted into the queue.
    pub total_calls: u64,
    /// Programs placed onto processors.
    pub total_started: u64,
    /// Programs that released their processors.
    pub total_finished: u64,
    /// Sum over all ticks of the running-program count.
    pub running_tick_sum: u64,
    /// Per-processor count of ticks spent occupied.
    pub busy_ticks: Vec<u64>,
    /// Per-processor count of programs served.
    pub programs_served: Vec<u64>,
}

impl ReportCounters {
    /// Creates zeroed counters for a cluster of `capacity` processors.
    pub fn new(capacity: usize) -> Self {
        Self {
            total_calls: 0,
            total_started: 0,
            total_finished: 0,
            running_tick_sum: 0,
            busy_ticks: vec![0; capacity],
            programs_served: vec![0; capacity],
        }
    }
}

/// Snapshot of cluster statistics, queryable at any time including mid-run.
///
/// Derived fields divide by `elapsed_ticks`; at tick 0 they are defined as
/// `0.0` rather than dividing by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterReport {
    /// Simulated ticks elapsed when the snapshot was taken.
    pub elapsed_ticks: u64,
    /// Calls accepted into the queue.
    pub total_calls: u64,
    /// Programs placed onto processors.
    pub total_started: u64,
    /// Programs that released their processors.
    pub total_finished: u64,
    /// Mean number of running programs per tick:
    /// `running_tick_sum / elapsed_ticks`.
    pub average_running: f64,
    /// Per-processor count of ticks spent occupied.
    pub per_processor_busy_ticks: Vec<u64>,
    /// Per-processor count of programs served.
    pub per_processor_programs: Vec<u64>,
    /// Per-processor mean occupancy: `busy_ticks / elapsed_ticks`.
    pub per_processor_average_load: Vec<f64>,
}

impl ClusterReport {
    /// Computes a snapshot from cumulative counters.
    pub fn calculate(counters: &ReportCounters, elapsed_ticks: u64) -> Self {
        let average_running = if elapsed_ticks == 0 {
            0.0
        } else {
            counters.running_tick_sum as f64 / elapsed_ticks as f64
        };

        let per_processor_average_load = counters
            .busy_ticks
            .iter()
            .map(|&busy| {
                if elapsed_ticks == 0 {
                    0.0
                } else {
                    busy as f64 / elapsed_ticks as f64
                }
            })
            .collect();

        Self {
            elapsed_ticks,
            total_calls: counters.total_calls,
            total_started: counters.total_started,
            total_finished: counters.total_finished,
            average_running,
            per_processor_busy_ticks: counters.busy_ticks.clone(),
            per_processor_programs: counters.programs_served.clone(),
            per_processor_average_load,
        }
    }
}

impl fmt::Display for ClusterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total time: {} ticks;", self.elapsed_ticks)?;
        writeln!(f, "Total program calls: {};", self.total_calls)?;
        writeln!(f, "Total programs started: {};", self.total_started)?;
        writeln!(f, "Total programs finished: {};", self.total_finished)?;
        writeln!(f, "Average programs running: {:.3};", self.average_running)?;
        writeln!(f)?;
        writeln!(f, "Per-processor stats:")?;
        for (id, served) in self.per_processor_programs.iter().enumerate() {
            writeln!(
                f,
                "{id} : total {served}, utilization {:.3};",
                self.per_processor_average_load[id]
            )?;
        }
        Ok(())
    }
}
