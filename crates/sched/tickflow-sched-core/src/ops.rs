//! Task operation builders.
//!
//! Each builder returns a [`StepFactory`] the scheduler stores per slot; the
//! factory yields a fresh state machine on every start, so restarts and
//! persistent re-runs begin from scratch. Callbacks are shared `Rc<dyn Fn>`
//! closures: the subject-bound `*_on` variants thread an explicit
//! `Rc<RefCell<S>>` through getter/setter instead of closing over it.

use std::cell::RefCell;
use std::rc::Rc;

use tickflow_api_core::Value;

use crate::ease::Curve;
use crate::ids::Handle;
use crate::scheduler::Scheduler;
use crate::step::{BoxedStep, StepFactory, StepStatus, TaskStep};

#[inline]
fn boxed(step: impl TaskStep + 'static) -> BoxedStep {
    Box::new(step)
}

/// Run a zero-argument action once, then complete.
pub fn immediate(action: impl Fn() + 'static) -> StepFactory {
    let action: Rc<dyn Fn()> = Rc::new(action);
    Box::new(move || {
        boxed(ImmediateStep {
            action: action.clone(),
        })
    })
}

/// [`immediate`] parameterized over an explicit subject.
pub fn immediate_on<S: 'static>(
    subject: Rc<RefCell<S>>,
    action: impl Fn(&mut S) + 'static,
) -> StepFactory {
    let action = Rc::new(action);
    Box::new(move || {
        let subject = subject.clone();
        let action = action.clone();
        boxed(ImmediateStep {
            action: Rc::new(move || action(&mut subject.borrow_mut())),
        })
    })
}

struct ImmediateStep {
    action: Rc<dyn Fn()>,
}

impl TaskStep for ImmediateStep {
    fn step(&mut self, _sched: &mut Scheduler, _dt: f32) -> StepStatus {
        (self.action)();
        StepStatus::Done
    }
}

/// Accumulate elapsed time; complete with no side effect once `duration` is
/// reached (exactly on the crossing tick).
pub fn delay(duration: f32) -> StepFactory {
    Box::new(move || {
        boxed(DelayStep {
            duration,
            elapsed: 0.0,
        })
    })
}

struct DelayStep {
    duration: f32,
    elapsed: f32,
}

impl TaskStep for DelayStep {
    fn step(&mut self, _sched: &mut Scheduler, dt: f32) -> StepStatus {
        self.elapsed += dt;
        if self.elapsed < self.duration {
            StepStatus::Running
        } else {
            StepStatus::Done
        }
    }
}

/// Suspend for exactly one tick, then complete.
pub fn frame_wait() -> StepFactory {
    Box::new(|| boxed(FrameWaitStep { waited: false }))
}

struct FrameWaitStep {
    waited: bool,
}

impl TaskStep for FrameWaitStep {
    fn step(&mut self, _sched: &mut Scheduler, _dt: f32) -> StepStatus {
        if self.waited {
            StepStatus::Done
        } else {
            self.waited = true;
            StepStatus::Running
        }
    }
}

/// Poll `condition` each tick until `duration` elapses. The first tick the
/// condition holds, invoke `action` and complete immediately; if the
/// duration elapses first, complete with no action. The condition is still
/// consulted on the crossing tick — a condition that turns true exactly as
/// the window closes wins.
pub fn buffered_wait(
    duration: f32,
    condition: impl Fn() -> bool + 'static,
    action: impl Fn() + 'static,
) -> StepFactory {
    let condition: Rc<dyn Fn() -> bool> = Rc::new(condition);
    let action: Rc<dyn Fn()> = Rc::new(action);
    Box::new(move || {
        boxed(BufferedWaitStep {
            duration,
            elapsed: 0.0,
            condition: condition.clone(),
            action: action.clone(),
        })
    })
}

/// [`buffered_wait`] parameterized over an explicit subject.
pub fn buffered_wait_on<S: 'static>(
    subject: Rc<RefCell<S>>,
    duration: f32,
    condition: impl Fn(&S) -> bool + 'static,
    action: impl Fn(&mut S) + 'static,
) -> StepFactory {
    let condition = Rc::new(condition);
    let action = Rc::new(action);
    Box::new(move || {
        let cond_subject = subject.clone();
        let act_subject = subject.clone();
        let condition = condition.clone();
        let action = action.clone();
        boxed(BufferedWaitStep {
            duration,
            elapsed: 0.0,
            condition: Rc::new(move || condition(&cond_subject.borrow())),
            action: Rc::new(move || action(&mut act_subject.borrow_mut())),
        })
    })
}

struct BufferedWaitStep {
    duration: f32,
    elapsed: f32,
    condition: Rc<dyn Fn() -> bool>,
    action: Rc<dyn Fn()>,
}

impl TaskStep for BufferedWaitStep {
    fn step(&mut self, _sched: &mut Scheduler, dt: f32) -> StepStatus {
        self.elapsed += dt;
        if (self.condition)() {
            (self.action)();
            StepStatus::Done
        } else if self.elapsed >= self.duration {
            StepStatus::Done
        } else {
            StepStatus::Running
        }
    }
}

/// Drive a value from `start` toward a (possibly moving) target over
/// `duration` seconds. Each tick re-reads the target, eases normalized
/// progress through `curve`, and applies the interpolated value; the
/// crossing tick applies exactly the current target, killing accumulated
/// float error. A non-positive duration snaps on the first advance.
pub fn interpolate(
    start: Value,
    get_target: impl Fn() -> Value + 'static,
    apply: impl Fn(Value) + 'static,
    duration: f32,
    curve: Curve,
) -> StepFactory {
    let get_target: Rc<dyn Fn() -> Value> = Rc::new(get_target);
    let apply: Rc<dyn Fn(Value)> = Rc::new(apply);
    Box::new(move || {
        boxed(InterpolateStep {
            start: start.clone(),
            get_target: get_target.clone(),
            apply: apply.clone(),
            duration,
            curve,
            elapsed: 0.0,
        })
    })
}

/// [`interpolate`] with the start value deferred to a getter evaluated once
/// when the step-sequence is built (start or restart time).
pub fn interpolate_from(
    get_start: impl Fn() -> Value + 'static,
    get_target: impl Fn() -> Value + 'static,
    apply: impl Fn(Value) + 'static,
    duration: f32,
    curve: Curve,
) -> StepFactory {
    let get_start: Rc<dyn Fn() -> Value> = Rc::new(get_start);
    let get_target: Rc<dyn Fn() -> Value> = Rc::new(get_target);
    let apply: Rc<dyn Fn(Value)> = Rc::new(apply);
    Box::new(move || {
        boxed(InterpolateStep {
            start: (get_start)(),
            get_target: get_target.clone(),
            apply: apply.clone(),
            duration,
            curve,
            elapsed: 0.0,
        })
    })
}

/// [`interpolate`] parameterized over an explicit subject; getter and setter
/// receive the subject instead of closing over it.
pub fn interpolate_on<S: 'static>(
    subject: Rc<RefCell<S>>,
    start: Value,
    get_target: impl Fn(&S) -> Value + 'static,
    apply: impl Fn(&mut S, Value) + 'static,
    duration: f32,
    curve: Curve,
) -> StepFactory {
    let get_target = Rc::new(get_target);
    let apply = Rc::new(apply);
    Box::new(move || {
        let get_subject = subject.clone();
        let set_subject = subject.clone();
        let get_target = get_target.clone();
        let apply = apply.clone();
        boxed(InterpolateStep {
            start: start.clone(),
            get_target: Rc::new(move || get_target(&get_subject.borrow())),
            apply: Rc::new(move |value| apply(&mut set_subject.borrow_mut(), value)),
            duration,
            curve,
            elapsed: 0.0,
        })
    })
}

/// [`interpolate_on`] with the start value deferred to a subject getter
/// evaluated once when the step-sequence is built.
pub fn interpolate_on_from<S: 'static>(
    subject: Rc<RefCell<S>>,
    get_start: impl Fn(&S) -> Value + 'static,
    get_target: impl Fn(&S) -> Value + 'static,
    apply: impl Fn(&mut S, Value) + 'static,
    duration: f32,
    curve: Curve,
) -> StepFactory {
    let get_start = Rc::new(get_start);
    let get_target = Rc::new(get_target);
    let apply = Rc::new(apply);
    Box::new(move || {
        let start = get_start(&subject.borrow());
        let get_subject = subject.clone();
        let set_subject = subject.clone();
        let get_target = get_target.clone();
        let apply = apply.clone();
        boxed(InterpolateStep {
            start,
            get_target: Rc::new(move || get_target(&get_subject.borrow())),
            apply: Rc::new(move |value| apply(&mut set_subject.borrow_mut(), value)),
            duration,
            curve,
            elapsed: 0.0,
        })
    })
}

struct InterpolateStep {
    start: Value,
    get_target: Rc<dyn Fn() -> Value>,
    apply: Rc<dyn Fn(Value)>,
    duration: f32,
    curve: Curve,
    elapsed: f32,
}

impl TaskStep for InterpolateStep {
    fn step(&mut self, sched: &mut Scheduler, dt: f32) -> StepStatus {
        self.elapsed += dt;
        if self.elapsed < self.duration {
            let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
            let eased = self.curve.eval(t);
            let target = (self.get_target)();
            let value = sched.lerp(&self.start, &target, eased);
            (self.apply)(value);
            StepStatus::Running
        } else {
            (self.apply)((self.get_target)());
            StepStatus::Done
        }
    }
}

/// Sequential composition over already-registered handles: start each link
/// in turn and suspend until it reports not-running before starting the
/// next. An unstartable link is skipped (reported by `start` itself).
pub fn sequence(links: Vec<Handle>) -> StepFactory {
    Box::new(move || {
        boxed(SequenceStep {
            links: links.clone(),
            next: 0,
            started: false,
        })
    })
}

struct SequenceStep {
    links: Vec<Handle>,
    next: usize,
    started: bool,
}

impl TaskStep for SequenceStep {
    fn step(&mut self, sched: &mut Scheduler, _dt: f32) -> StepStatus {
        loop {
            let Some(&link) = self.links.get(self.next) else {
                return StepStatus::Done;
            };
            if !self.started {
                sched.start(link);
                self.started = true;
            }
            if sched.is_running(link) {
                return StepStatus::Running;
            }
            self.next += 1;
            self.started = false;
        }
    }
}
