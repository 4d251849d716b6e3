//! Scheduler: the slot registry and per-tick driver.
//!
//! One scheduler per process, explicitly constructed and owned by the host's
//! composition root. The host calls [`Scheduler::tick`] once per frame and
//! [`Scheduler::shutdown`] once at teardown. Single-threaded by design: the
//! slot table is only ever touched from the scheduling context (the type is
//! deliberately not Send/Sync).

use core::fmt;
use std::rc::Rc;

use hashbrown::HashMap;
use tickflow_api_core::Value;

use crate::callback::{CompleteFn, TargetCallback};
use crate::config::Config;
use crate::errors::SchedError;
use crate::ids::Handle;
use crate::interp::LerpTable;
use crate::step::{BoxedStep, StepFactory, StepStatus};

/// A step-sequence armed by `start`, plus the plain completion callback
/// captured at that moment. The capture is the fallback notification for a
/// stop that races natural completion.
struct Execution {
    step: BoxedStep,
    captured_on_complete: Option<CompleteFn>,
    seq: u64,
}

/// Scheduler-owned record for one registered task.
/// At most one slot exists per live id.
struct Slot {
    handle: Handle,
    factory: StepFactory,
    running: Option<Execution>,
    on_complete: Option<CompleteFn>,
    on_complete_bound: Option<TargetCallback>,
    persistent: bool,
    /// Bumped on every start and halt; lets the tick loop detect a restart
    /// or stop that raced the step it just drove.
    run_seq: u64,
}

pub struct Scheduler {
    cfg: Config,
    slots: HashMap<u32, Slot>,
    next_id: u32,
    next_gen: u32,
    lerps: LerpTable,
    quitting: bool,
}

impl Scheduler {
    pub fn new(cfg: Config) -> Self {
        Self {
            slots: HashMap::with_capacity(cfg.initial_slots),
            cfg,
            next_id: 1,
            next_gen: 1,
            lerps: LerpTable::new(),
            quitting: false,
        }
    }

    /// Store a factory and hand back its handle. Does not start execution.
    /// Returns [`Handle::NIL`] after shutdown or when the id space is
    /// exhausted (the latter is reported).
    pub fn register(&mut self, factory: StepFactory) -> Handle {
        match self.try_register(factory) {
            Ok(handle) => handle,
            Err(SchedError::ShuttingDown) => Handle::NIL,
            Err(err) => {
                log::error!("task registration failed: {err}");
                Handle::NIL
            }
        }
    }

    pub fn try_register(&mut self, factory: StepFactory) -> Result<Handle, SchedError> {
        if self.quitting {
            return Err(SchedError::ShuttingDown);
        }
        let id = self.alloc_id()?;
        let gen = self.next_gen;
        self.next_gen = self.next_gen.wrapping_add(1);
        let handle = Handle::new(id, gen);
        self.slots.insert(
            id,
            Slot {
                handle,
                factory,
                running: None,
                on_complete: None,
                on_complete_bound: None,
                persistent: false,
                run_seq: 0,
            },
        );
        Ok(handle)
    }

    /// Begin (or restart) driving a registered task. A running task is
    /// halted before the fresh step-sequence is armed — never two concurrent
    /// executions of one slot. The first advance happens on the next tick.
    pub fn start(&mut self, handle: Handle) -> bool {
        match self.try_start(handle) {
            Ok(()) => true,
            Err(SchedError::ShuttingDown) => false,
            Err(err) => {
                log::error!("task {:?} could not be started: {err}", handle);
                false
            }
        }
    }

    pub fn try_start(&mut self, handle: Handle) -> Result<(), SchedError> {
        if self.quitting {
            return Err(SchedError::ShuttingDown);
        }
        if handle.is_nil() {
            return Err(SchedError::NilHandle);
        }
        let slot = locate_mut(&mut self.slots, handle)?;
        slot.running = None;
        slot.run_seq += 1;
        slot.running = Some(Execution {
            step: (slot.factory)(),
            captured_on_complete: slot.on_complete.clone(),
            seq: slot.run_seq,
        });
        Ok(())
    }

    /// Halt the task's current execution, if any. The slot is removed unless
    /// persistent; a persistent slot keeps its factory and becomes
    /// restart-ready.
    pub fn stop(&mut self, handle: Handle) -> bool {
        self.halt(handle, false)
    }

    /// As [`Scheduler::stop`], but clears the completion callbacks first so
    /// no notification fires.
    pub fn destroy(&mut self, handle: Handle) -> bool {
        self.halt(handle, true)
    }

    fn halt(&mut self, handle: Handle, destroy: bool) -> bool {
        if handle.is_nil() {
            return false;
        }
        let Ok(slot) = locate_mut(&mut self.slots, handle) else {
            return false;
        };
        if destroy {
            slot.on_complete = None;
            slot.on_complete_bound = None;
        }
        slot.running = None;
        slot.run_seq += 1;
        if !slot.persistent {
            self.slots.remove(&handle.id());
        }
        true
    }

    /// True iff the slot exists, the handle is current, and an execution is
    /// armed. Always false during/after shutdown. Cheap; meant for hot
    /// per-tick polling.
    pub fn is_running(&self, handle: Handle) -> bool {
        if self.quitting || handle.is_nil() {
            return false;
        }
        self.slots
            .get(&handle.id())
            .filter(|slot| slot.handle == handle)
            .is_some_and(|slot| slot.running.is_some())
    }

    /// Mark the slot to survive natural completion. Does not auto-restart;
    /// the caller starts it again when wanted. Returns the handle for
    /// fluent chaining.
    pub fn persist(&mut self, handle: Handle) -> Handle {
        if !self.quitting && !handle.is_nil() {
            if let Ok(slot) = locate_mut(&mut self.slots, handle) {
                slot.persistent = true;
            }
        }
        handle
    }

    /// Register a one-shot callback fired on the next natural completion.
    /// Not fired when the task is destroyed. Returns the handle for fluent
    /// chaining.
    pub fn on_complete(&mut self, handle: Handle, callback: impl Fn() + 'static) -> Handle {
        if !handle.is_nil() {
            if let Ok(slot) = locate_mut(&mut self.slots, handle) {
                slot.on_complete = Some(Rc::new(callback));
            }
        }
        handle
    }

    /// As [`Scheduler::on_complete`], but bound to an owner: the callback is
    /// skipped silently if the owner has been dropped by completion time.
    /// A bound callback takes precedence over the plain one.
    pub fn on_complete_bound<T: 'static>(
        &mut self,
        handle: Handle,
        owner: &Rc<T>,
        callback: impl Fn(&T) + 'static,
    ) -> Handle {
        if !handle.is_nil() {
            if let Ok(slot) = locate_mut(&mut self.slots, handle) {
                slot.on_complete_bound = Some(TargetCallback::new(owner, callback));
            }
        }
        handle
    }

    /// Advance every armed task by one step. Tasks armed during this tick
    /// are first advanced on the next one, so each task runs at most once
    /// per tick. Steps are driven in ascending id order.
    pub fn tick(&mut self, dt: f32) {
        if self.quitting {
            return;
        }
        let mut armed: Vec<u32> = self
            .slots
            .iter()
            .filter(|(_, slot)| slot.running.is_some())
            .map(|(id, _)| *id)
            .collect();
        armed.sort_unstable();

        for id in armed {
            if self.quitting {
                // A task body called shutdown; nothing else may run.
                return;
            }
            let Some(slot) = self.slots.get_mut(&id) else {
                continue;
            };
            let Some(mut exec) = slot.running.take() else {
                continue;
            };
            match exec.step.step(self, dt) {
                StepStatus::Running => {
                    // Re-arm unless a reentrant stop/restart replaced us.
                    if let Some(slot) = self.slots.get_mut(&id) {
                        if slot.run_seq == exec.seq && slot.running.is_none() {
                            slot.running = Some(exec);
                        }
                    }
                }
                StepStatus::Done => self.finish(id, exec),
            }
        }
    }

    /// Completion bookkeeping for one finished execution. The slot is
    /// released (or reset, if persistent) before any callback runs.
    fn finish(&mut self, id: u32, exec: Execution) {
        match self.slots.get_mut(&id) {
            Some(slot) if slot.run_seq == exec.seq => {
                let bound = slot.on_complete_bound.take();
                let plain = slot.on_complete.take();
                // Persistent slots keep their factory and stay restart-ready.
                if !slot.persistent {
                    self.slots.remove(&id);
                }
                if let Some(callback) = bound {
                    if !callback.invoke() {
                        log::debug!("completion target for task {id} gone; callback skipped");
                    }
                } else if let Some(callback) = plain {
                    callback();
                }
            }
            Some(_) => {
                // Halted or re-armed from inside the step; the halt wins and
                // no completion fires for the superseded run.
            }
            None => {
                // Removed by a racing stop. Fire the callback captured at
                // start so the notification is not silently lost.
                if let Some(callback) = exec.captured_on_complete {
                    callback();
                }
            }
        }
    }

    /// Interpolate through the scheduler's memoized dispatch table.
    pub fn lerp(&mut self, from: &Value, to: &Value, t: f32) -> Value {
        self.lerps.lerp(from, to, t)
    }

    /// Number of live slots (running or not).
    pub fn task_count(&self) -> usize {
        self.slots.len()
    }

    /// Tear down: drop every execution and clear the table. All later calls
    /// are no-ops; no continuation executes after this returns. Idempotent.
    pub fn shutdown(&mut self) {
        if self.quitting {
            return;
        }
        self.quitting = true;
        self.slots.clear();
    }

    /// Next free id within `[1, id_span)`, scanning past collisions up to
    /// the configured attempt bound.
    fn alloc_id(&mut self) -> Result<u32, SchedError> {
        let span = self.cfg.id_span.max(2);
        let mut id = self.next_id;
        let mut attempts = 0u32;
        while attempts < self.cfg.max_alloc_attempts {
            if id == 0 || id >= span {
                id = 1;
            }
            if !self.slots.contains_key(&id) {
                self.next_id = id + 1;
                return Ok(id);
            }
            id += 1;
            attempts += 1;
        }
        Err(SchedError::ExhaustedIdSpace { attempts })
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("tasks", &self.slots.len())
            .field("quitting", &self.quitting)
            .finish_non_exhaustive()
    }
}

fn locate_mut<'a>(
    slots: &'a mut HashMap<u32, Slot>,
    handle: Handle,
) -> Result<&'a mut Slot, SchedError> {
    let slot = slots
        .get_mut(&handle.id())
        .ok_or(SchedError::NotFound(handle))?;
    if slot.handle != handle {
        return Err(SchedError::StaleHandle(handle));
    }
    Ok(slot)
}
