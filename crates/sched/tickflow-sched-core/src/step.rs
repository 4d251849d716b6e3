//! Resumable step-sequences: the polled form of a task body.
//!
//! An operation body is an explicit state machine advanced once per tick.
//! Between two advances nothing of the body runs, so code inside a step is
//! atomic relative to every other task.

use crate::scheduler::Scheduler;

/// Result of advancing a step-sequence by one tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepStatus {
    /// Suspended until the next tick.
    Running,
    /// Finished; the scheduler fires completion and releases the slot.
    Done,
}

/// One resumable operation body.
///
/// `step` is invoked at most once per scheduler tick until it reports
/// [`StepStatus::Done`]. The scheduler passes itself so a body may start and
/// poll other handles (sequential composition does).
pub trait TaskStep {
    fn step(&mut self, sched: &mut Scheduler, dt: f32) -> StepStatus;
}

pub type BoxedStep = Box<dyn TaskStep>;

/// Builds a fresh step-sequence on every start. Stored per slot so a restart
/// (or a persistent slot's next run) begins from a clean state.
pub type StepFactory = Box<dyn Fn() -> BoxedStep>;
