//! Identifier generation for mock marketplace records.

use std::sync::atomic::{AtomicU64, Ordering};

/// Produces identifiers for newly created records.
pub trait IdGenerator: Send + Sync {
    /// A fresh identifier tagged with `prefix` (e.g. `apt`, `emg`).
    fn next_id(&self, prefix: &str) -> String;
}

/// Random UUID v4 identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self, prefix: &str) -> String {
        format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
    }
}

/// Deterministic `prefix_1`, `prefix_2`, ... identifiers.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self, prefix: &str) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}_{}", prefix, n)
    }
}
