//! Completion callbacks: plain and owner-bound.

use std::rc::{Rc, Weak};

/// Plain one-shot completion callback.
pub type CompleteFn = Rc<dyn Fn()>;

/// Callback bound to an owner. Invocation upgrades the weak owner reference
/// and is skipped silently once the owner has been dropped — a stale target
/// is not an error.
pub struct TargetCallback {
    call: Box<dyn Fn() -> bool>,
}

impl TargetCallback {
    pub fn new<T: 'static>(owner: &Rc<T>, action: impl Fn(&T) + 'static) -> Self {
        let weak: Weak<T> = Rc::downgrade(owner);
        Self {
            call: Box::new(move || match weak.upgrade() {
                Some(target) => {
                    action(&target);
                    true
                }
                None => false,
            }),
        }
    }

    /// Returns false when the owner was gone and the call was skipped.
    pub fn invoke(&self) -> bool {
        (self.call)()
    }
}
