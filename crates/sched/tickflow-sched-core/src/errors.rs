//! Scheduler error taxonomy.
//!
//! The boolean/handle-returning surface never panics and never propagates
//! these; the `try_*` variants expose them for callers that want the typed
//! failure.

use thiserror::Error;

use crate::ids::Handle;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedError {
    /// The bounded free-id scan failed. Indicates a leak of non-persistent,
    /// never-freed tasks; reported, never thrown.
    #[error("task id space exhausted after {attempts} attempts")]
    ExhaustedIdSpace { attempts: u32 },

    /// Unknown or already-freed handle.
    #[error("unknown task handle {0:?}")]
    NotFound(Handle),

    /// The handle's id has been freed and reused by a later task.
    #[error("stale task handle {0:?}")]
    StaleHandle(Handle),

    /// Operation on the reserved uninitialized sentinel.
    #[error("task handle has not been initialized")]
    NilHandle,

    /// The scheduler has been shut down; all operations are no-ops.
    #[error("scheduler is shutting down")]
    ShuttingDown,
}
