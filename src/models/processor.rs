//! Processor and processor-pool models.

use serde::{Deserialize, Serialize};

/// Stable processor identifier, `0..capacity`.
pub type ProcessorId = u32;

/// One execution slot of the cluster.
///
/// Either idle or occupied by exactly one running program. Lifecycle spans
/// the whole simulation; only the occupancy state toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Processor {
    id: ProcessorId,
    assigned_program: Option<String>,
}

impl Processor {
    /// Creates an idle processor with the given id.
    pub fn new(id: ProcessorId) -> Self {
        Self {
            id,
            assigned_program: None,
        }
    }

    /// Stable identifier of this processor.
    pub fn id(&self) -> ProcessorId {
        self.id
    }

    /// Whether a program currently occupies this processor.
    pub fn is_occupied(&self) -> bool {
        self.assigned_program.is_some()
    }

    /// Name of the occupying program, if any.
    pub fn assigned_program(&self) -> Option<&str> {
        self.assigned_program.as_deref()
    }

    /// Binds a program to this processor.
    ///
    /// # Panics
    ///
    /// Panics if the processor is already occupied. Double assignment is an
    /// engine invariant fault, not a recoverable condition.
    pub fn assign(&mut self, program_name: &str) {
        assert!(
            !self.is_occupied(),
            "processor {} is already occupied by `{}`",
            self.id,
            self.assigned_program.as_deref().unwrap_or_default(),
        );
        self.assigned_program = Some(program_name.to_string());
    }

    /// Clears occupancy. Idempotent; releasing an idle processor is a no-op.
    pub fn release(&mut self) {
        self.assigned_program = None;
    }
}

/// A fixed-size set of interchangeable processors.
///
/// Tracks the number of free processors incrementally, so
/// [`free_count`](Self::free_count) is O(1) rather than a rescan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorPool {
    processors: Vec<Processor>,
    free_count: usize,
}

impl ProcessorPool {
    /// Creates a pool of `capacity` idle processors with ids `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            processors: (0..capacity).map(|id| Processor::new(id as ProcessorId)).collect(),
            free_count: capacity,
        }
    }

    /// Total number of processors.
    pub fn capacity(&self) -> usize {
        self.processors.len()
    }

    /// Number of currently idle processors. O(1).
    pub fn free_count(&self) -> usize {
        self.free_count
    }

    /// All processors in ascending id order.
    pub fn processors(&self) -> &[Processor] {
        &self.processors
    }

    /// Binds a program to the processor with the given id.
    ///
    /// # Panics
    ///
    /// Panics if the processor is already occupied (invariant fault).
    pub fn assign(&mut self, id: ProcessorId, program_name: &str) {
        self.processors[id as usize].assign(program_name);
        self.free_count -= 1;
    }

    /// Releases the processor with the given id back to the pool.
    ///
    /// Releasing an already-idle processor is a no-op and does not disturb
    /// the free counter.
    pub fn release(&mut self, id: ProcessorId) {
        let processor = &mut self.processors[id as usize];
        if processor.is_occupied() {
            processor.release();
            self.free_count += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_processor_is_idle() {
        let processor = Processor::new(3);
        assert_eq!(processor.id(), 3);
        assert!(!processor.is_occupied());
        assert_eq!(processor.assigned_program(), None);
    }

    #[test]
    fn test_assign_and_release() {
        let mut processor = Processor::new(0);
        processor.assign("P1");
        assert!(processor.is_occupied());
        assert_eq!(processor.assigned_program(), Some("P1"));

        processor.release();
        assert!(!processor.is_occupied());
    }

    #[test]
    #[should_panic(expected = "already occupied")]
    fn test_double_assign_panics() {
        let mut processor = Processor::new(0);
        processor.assign("P1");
        processor.assign("P2");
    }

    #[test]
    fn test_pool_capacity_and_ids() {
        let pool = ProcessorPool::new(4);
        assert_eq!(pool.capacity(), 4);
        assert_eq!(pool.free_count(), 4);

        let ids: Vec<ProcessorId> = pool.processors().iter().map(Processor::id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_pool_free_count_tracks_assignments() {
        let mut pool = ProcessorPool::new(3);
        pool.assign(0, "P1");
        pool.assign(2, "P1");
        assert_eq!(pool.free_count(), 1);

        pool.release(0);
        assert_eq!(pool.free_count(), 2);

        // Idempotent release does not inflate the counter.
        pool.release(0);
        assert_eq!(pool.free_count(), 2);
    }

    #[test]
    fn test_occupied_plus_free_equals_capacity() {
        let mut pool = ProcessorPool::new(5);
        pool.assign(1, "A");
        pool.assign(3, "B");

        let occupied = pool.processors().iter().filter(|p| p.is_occupied()).count();
        assert_eq!(occupied + pool.free_count(), pool.capacity());
    }
}
