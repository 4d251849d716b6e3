//! Chain: a pipeline of pre-registered handles run back to back.
//!
//! The chain itself is one more scheduler-registered task wrapping a
//! [`crate::ops::sequence`] body. Because handles are plain copyable values,
//! stopping a chain fans out to every constituent through the scheduler —
//! halting only the wrapper would not reliably reach copies held elsewhere.

use crate::errors::SchedError;
use crate::ids::Handle;
use crate::ops;
use crate::scheduler::Scheduler;

#[derive(Debug)]
pub struct Chain {
    links: Vec<Handle>,
    handle: Handle,
    stopped: bool,
}

impl Chain {
    /// Wrap an ordered list of registered handles. A nil link is reported
    /// and construction proceeds; the sequence skips it at run time.
    pub fn new(sched: &mut Scheduler, links: Vec<Handle>) -> Chain {
        for link in &links {
            if link.is_nil() {
                log::error!("chain built over an uninitialized handle");
            }
        }
        let handle = sched.register(ops::sequence(links.clone()));
        Chain {
            links,
            handle,
            stopped: false,
        }
    }

    /// Checked construction: rejects nil links instead of reporting them.
    pub fn try_new(sched: &mut Scheduler, links: Vec<Handle>) -> Result<Chain, SchedError> {
        if links.iter().any(Handle::is_nil) {
            return Err(SchedError::NilHandle);
        }
        let handle = sched.try_register(ops::sequence(links.clone()))?;
        Ok(Chain {
            links,
            handle,
            stopped: false,
        })
    }

    /// Start (or restart) the pipeline.
    pub fn run(&mut self, sched: &mut Scheduler) -> &mut Self {
        self.stopped = false;
        sched.start(self.handle);
        self
    }

    /// Halt the wrapper and every constituent handle. Returns whether the
    /// wrapper slot was still present.
    pub fn stop(&mut self, sched: &mut Scheduler) -> bool {
        self.stopped = true;
        let ok = sched.stop(self.handle);
        for &link in &self.links {
            sched.stop(link);
        }
        ok
    }

    /// As [`Chain::stop`], but suppresses the wrapper's completion
    /// notification and destroys each link (freeing non-persistent link
    /// slots outright).
    pub fn destroy(&mut self, sched: &mut Scheduler) -> bool {
        self.stopped = true;
        let ok = sched.destroy(self.handle);
        for &link in &self.links {
            sched.destroy(link);
        }
        ok
    }

    /// False the moment the chain is stopped locally, even if table removal
    /// lags; otherwise a live scheduler lookup.
    pub fn is_running(&self, sched: &Scheduler) -> bool {
        !self.stopped && sched.is_running(self.handle)
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn links(&self) -> &[Handle] {
        &self.links
    }
}
