// Host-side tests for the shared cell that queues re-entrant calls.

#![allow(dead_code)]
mod shared {
    include!("../src/shared.rs");
}

use shared::Shared;
use std::rc::Rc;

#[test]
fn calls_apply_immediately_when_free() {
    let cell = Shared::new(Vec::<u32>::new());
    cell.dispatch(|v| v.push(1));
    cell.dispatch(|v| v.push(2));
    assert_eq!(*cell.read().unwrap(), vec![1, 2]);
    assert_eq!(cell.pending(), 0);
}

#[test]
fn reentrant_calls_run_after_the_outer_call() {
    // a listener reacting to a broadcast calls back into the handle
    let cell = Rc::new(Shared::new(Vec::<u32>::new()));
    let inner = cell.clone();
    cell.dispatch(move |v| {
        v.push(1);
        inner.dispatch(|v| v.push(3));
        inner.dispatch(|v| v.push(4));
        assert_eq!(inner.pending(), 2);
        v.push(2);
    });
    assert_eq!(*cell.read().unwrap(), vec![1, 2, 3, 4]);
    assert_eq!(cell.pending(), 0);
}

#[test]
fn calls_queued_during_a_frame_are_applied_when_it_ends() {
    let cell = Rc::new(Shared::new(Vec::<u32>::new()));
    let inner = cell.clone();
    let ticked = cell.with(move |v| {
        v.push(0);
        inner.dispatch(|v| v.push(1));
        // reads and frame ticks are skipped while busy, never queued
        assert!(inner.with(|v| v.push(99)).is_none());
        assert!(inner.read().is_none());
        v.len()
    });
    assert_eq!(ticked, Some(1));
    assert_eq!(*cell.read().unwrap(), vec![0, 1]);
}

#[test]
fn deferred_calls_may_defer_again() {
    let cell = Rc::new(Shared::new(Vec::<u32>::new()));
    let a = cell.clone();
    cell.dispatch(move |v| {
        v.push(1);
        let b = a.clone();
        a.dispatch(move |v| {
            v.push(2);
            b.dispatch(|v| v.push(3));
        });
    });
    assert_eq!(*cell.read().unwrap(), vec![1, 2, 3]);
}
