use std::cell::RefCell;
use std::rc::Rc;

use tickflow_sched::{ops, Chain, Handle, SchedError, Scheduler};

fn completion_log(sched: &mut Scheduler, h: Handle, log: &Rc<RefCell<Vec<u32>>>, tag: u32) {
    let log = log.clone();
    sched.on_complete(h, move || log.borrow_mut().push(tag));
}

/// it should run links strictly one after another
#[test]
fn links_run_sequentially() {
    let mut sched = Scheduler::default();
    let log: Rc<RefCell<Vec<u32>>> = Rc::new(RefCell::new(Vec::new()));

    let h1 = sched.register(ops::delay(1.0));
    let h2 = sched.register(ops::delay(1.0));
    let h3 = sched.register(ops::delay(1.0));
    completion_log(&mut sched, h1, &log, 1);
    completion_log(&mut sched, h2, &log, 2);
    completion_log(&mut sched, h3, &log, 3);

    let mut chain = Chain::new(&mut sched, vec![h1, h2, h3]);
    chain.run(&mut sched);
    assert!(chain.is_running(&sched));

    // First tick arms the first link; the second link must stay idle until
    // the first reports not-running.
    sched.tick(0.5);
    sched.tick(0.5);
    assert!(sched.is_running(h1));
    assert!(!sched.is_running(h2));

    sched.tick(0.5); // h1 completes; h2 starts the same tick
    assert!(!sched.is_running(h1));
    assert!(sched.is_running(h2));
    assert!(chain.is_running(&sched));

    sched.tick(0.5);
    sched.tick(0.5); // h2 completes; h3 starts
    assert!(sched.is_running(h3));

    sched.tick(0.5);
    assert!(chain.is_running(&sched));
    // h3 completes; the wrapper (highest id) observes it the same tick.
    sched.tick(0.5);
    assert!(!chain.is_running(&sched));
    assert_eq!(*log.borrow(), vec![1, 2, 3]);
}

/// it should halt every constituent when the chain is stopped
#[test]
fn stop_fans_out_to_links() {
    let mut sched = Scheduler::default();
    let h1 = sched.register(ops::delay(1.0));
    let h2 = sched.register(ops::delay(1.0));
    let h3 = sched.register(ops::delay(1.0));

    let mut chain = Chain::new(&mut sched, vec![h1, h2, h3]);
    chain.run(&mut sched);

    // Advance into the second link.
    for _ in 0..4 {
        sched.tick(0.5);
    }
    assert!(sched.is_running(h2));

    assert!(chain.stop(&mut sched));
    assert!(!chain.is_running(&sched), "locally stopped, regardless of table state");
    assert!(!sched.is_running(h2));
    assert!(!sched.is_running(h3));
    assert_eq!(sched.task_count(), 0, "non-persistent links are freed outright");

    // Stopped chains stay stopped across further ticks.
    sched.tick(0.5);
    assert!(!chain.is_running(&sched));
}

/// it should suppress the wrapper notification on destroy
#[test]
fn destroy_suppresses_wrapper_notification() {
    let mut sched = Scheduler::default();
    let log: Rc<RefCell<Vec<u32>>> = Rc::new(RefCell::new(Vec::new()));

    let h1 = sched.register(ops::delay(1.0));
    let h2 = sched.register(ops::delay(1.0));
    let mut chain = Chain::new(&mut sched, vec![h1, h2]);
    completion_log(&mut sched, chain.handle(), &log, 99);

    chain.run(&mut sched);
    sched.tick(0.5);
    assert!(chain.destroy(&mut sched));

    for _ in 0..8 {
        sched.tick(0.5);
    }
    assert!(log.borrow().is_empty());
    assert_eq!(sched.task_count(), 0);
}

/// it should reject nil links in checked construction and skip them at run time
#[test]
fn nil_links() {
    let mut sched = Scheduler::default();
    let good = sched.register(ops::frame_wait());
    assert!(matches!(
        Chain::try_new(&mut sched, vec![good, Handle::NIL]),
        Err(SchedError::NilHandle)
    ));

    // Unchecked construction reports and proceeds; the nil link is skipped.
    let mut chain = Chain::new(&mut sched, vec![Handle::NIL, good]);
    chain.run(&mut sched);
    sched.tick(0.1); // wrapper skips nil, starts `good`
    sched.tick(0.1);
    sched.tick(0.1); // good completes; wrapper finishes next advance
    sched.tick(0.1);
    assert!(!chain.is_running(&sched));
}

/// it should compose heterogeneous operations in order
#[test]
fn mixed_operation_chain() {
    let mut sched = Scheduler::default();
    let log: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));

    let l1 = log.clone();
    let fade_in = sched.register(ops::immediate(move || l1.borrow_mut().push("fade-in")));
    let hold = sched.register(ops::delay(0.5));
    let l2 = log.clone();
    let fade_out = sched.register(ops::immediate(move || l2.borrow_mut().push("fade-out")));

    let mut chain = Chain::new(&mut sched, vec![fade_in, hold, fade_out]);
    chain.run(&mut sched);

    for _ in 0..8 {
        sched.tick(0.25);
    }
    assert!(!chain.is_running(&sched));
    assert_eq!(*log.borrow(), vec!["fade-in", "fade-out"]);
}
