//! Scheduler configuration.

use serde::{Deserialize, Serialize};

/// Sizing knobs for the scheduler.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Task ids are allocated in `[1, id_span)`; the counter wraps within it.
    pub id_span: u32,

    /// Bounded free-id scan length before registration fails loudly.
    pub max_alloc_attempts: u32,

    /// Initial capacity hint for the slot table.
    pub initial_slots: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            id_span: 10_000,
            max_alloc_attempts: 10_000,
            initial_slots: 64,
        }
    }
}
