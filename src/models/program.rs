//! Running-program model.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{ProcessorId, ProgramCall};

/// A program that currently occupies processors.
///
/// Derived from an admitted [`ProgramCall`] at the moment of placement and
/// destroyed the tick its completion condition is satisfied. The occupied
/// processor set always has exactly `required_processors` entries and is
/// disjoint from every other running program's set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningProgram {
    /// Program identifier, unique within the cluster.
    pub name: String,
    /// Processors the program occupies simultaneously.
    pub required_processors: usize,
    /// Tick the program was placed onto processors.
    pub started_at_tick: u64,
    /// Simulated duration in ticks.
    pub max_execution_ticks: u64,
    /// Identifiers of the processors this program occupies.
    pub occupied_processors: BTreeSet<ProcessorId>,
}

impl RunningProgram {
    /// Instantiates a running program from an admitted call.
    ///
    /// Processor assignment happens afterwards, one
    /// [`assign_processor`](Self::assign_processor) per slot.
    pub fn from_call(call: &ProgramCall, started_at_tick: u64) -> Self {
        Self {
            name: call.name.clone(),
            required_processors: call.required_processors,
            started_at_tick,
            max_execution_ticks: call.execution_ticks,
            occupied_processors: BTreeSet::new(),
        }
    }

    /// Records occupancy of one processor.
    pub fn assign_processor(&mut self, id: ProcessorId) {
        self.occupied_processors.insert(id);
    }

    /// Whether the program has run its full duration as of `current_tick`.
    ///
    /// A program started at tick T with duration D finishes at the first
    /// tick ≥ T + D, never earlier.
    pub fn is_finished_at(&self, current_tick: u64) -> bool {
        self.started_at_tick + self.max_execution_ticks <= current_tick
    }
}
