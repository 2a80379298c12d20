//! Randomized workload generation.
//!
//! A [`TickObserver`] that injects synthetic program calls each tick,
//! skewed toward small, short programs: most rolls produce one-processor
//! jobs of a few ticks, with an occasional wide or long outlier. Drives the
//! engine through the callback boundary only; the core never depends on it.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cluster::{TickContext, TickObserver};
use crate::models::ProgramCall;

/// Shape of the synthetic workload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadProfile {
    /// A call is spawned only when the per-slot roll in `[0, 1)` exceeds
    /// this threshold.
    pub spawn_threshold: f64,
    /// Spawn rolls per tick.
    pub max_new_calls_per_tick: usize,
    /// Multiplier on the generated processor requirement.
    pub required_processors_scale: f64,
    /// Multiplier on the generated execution duration.
    pub execution_ticks_scale: f64,
}

impl Default for WorkloadProfile {
    fn default() -> Self {
        Self {
            spawn_threshold: 0.5,
            max_new_calls_per_tick: 10,
            required_processors_scale: 1.0,
            execution_ticks_scale: 1.0,
        }
    }
}

impl WorkloadProfile {
    /// Sets the spawn threshold.
    pub fn with_spawn_threshold(mut self, threshold: f64) -> Self {
        self.spawn_threshold = threshold;
        self
    }

    /// Sets the number of spawn rolls per tick.
    pub fn with_max_new_calls_per_tick(mut self, calls: usize) -> Self {
        self.max_new_calls_per_tick = calls;
        self
    }

    /// Sets the processor-requirement multiplier.
    pub fn with_required_processors_scale(mut self, scale: f64) -> Self {
        self.required_processors_scale = scale;
        self
    }

    /// Sets the execution-duration multiplier.
    pub fn with_execution_ticks_scale(mut self, scale: f64) -> Self {
        self.execution_ticks_scale = scale;
        self
    }
}

/// Tick observer that spawns random program calls.
///
/// Generated names are `Program{tick}_{slot}`, unique per simulation run.
/// Processor requirements follow `1 + 9r³` and durations `1 + 25r⁴` (both
/// scaled by the profile), so the distribution is heavy on cheap jobs.
/// Requirements are clamped to the cluster capacity.
///
/// # Example
///
/// ```
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
/// use u_cluster::{Cluster, ClusterConfig};
/// use u_cluster::workload::{RandomWorkload, WorkloadProfile};
///
/// let mut cluster = Cluster::new(ClusterConfig::new(32, 100)).unwrap();
/// let mut workload =
///     RandomWorkload::new(WorkloadProfile::default(), SmallRng::seed_from_u64(7));
/// cluster.run(&mut workload);
/// assert!(cluster.report().total_calls > 0);
/// ```
#[derive(Debug, Clone)]
pub struct RandomWorkload<R: Rng> {
    profile: WorkloadProfile,
    rng: R,
}

impl<R: Rng> RandomWorkload<R> {
    /// Creates a workload generator with the given profile and rng.
    pub fn new(profile: WorkloadProfile, rng: R) -> Self {
        Self { profile, rng }
    }

    /// The profile driving this generator.
    pub fn profile(&self) -> &WorkloadProfile {
        &self.profile
    }
}

impl<R: Rng> TickObserver for RandomWorkload<R> {
    fn on_tick(&mut self, cluster: &mut TickContext<'_>) {
        let capacity = cluster.capacity();

        for slot in 0..self.profile.max_new_calls_per_tick {
            let roll: f64 = self.rng.random_range(0.0..1.0);
            if roll <= self.profile.spawn_threshold {
                continue;
            }

            let required = 1
                + (9.0 * roll.powi(3) * self.profile.required_processors_scale) as usize;
            let execution = 1 + (25.0 * roll.powi(4) * self.profile.execution_ticks_scale) as u64;

            let call = ProgramCall::new(
                format!("Program{}_{}", cluster.current_tick(), slot),
                required.min(capacity),
                execution,
            );
            // Names are unique per (tick, slot) and parameters are in
            // range, so admission cannot fail here.
            cluster
                .call_program(call)
                .expect("generated call is always valid");
        }
    }
}
