// Interior-mutable cell whose mutations may arrive re-entrantly.

use std::cell::{Ref, RefCell};
use std::collections::VecDeque;

// Deferred calls applied per drain; the remainder waits for the next call
const MAX_DEFERRED_PER_DRAIN: usize = 256;

type Deferred<T> = Box<dyn FnOnce(&mut T)>;

/// Value shared between DOM listeners, the frame loop and the JS handle.
///
/// A JS listener reacting to a broadcast may call back into the handle while
/// the value is still borrowed by the frame that broadcast. Such calls are
/// queued and applied in arrival order once the outer borrow ends.
pub struct Shared<T> {
    value: RefCell<T>,
    deferred: RefCell<VecDeque<Deferred<T>>>,
}

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            deferred: RefCell::new(VecDeque::new()),
        }
    }

    /// Apply `op` now, or queue it behind earlier calls if the value is busy.
    pub fn dispatch(&self, op: impl FnOnce(&mut T) + 'static) {
        if !self.deferred.borrow().is_empty() {
            self.deferred.borrow_mut().push_back(Box::new(op));
            self.drain();
            return;
        }
        let Ok(mut value) = self.value.try_borrow_mut() else {
            log::debug!("[shared] busy; deferred call");
            self.deferred.borrow_mut().push_back(Box::new(op));
            return;
        };
        op(&mut value);
        drop(value);
        self.drain();
    }

    /// Run `f` now if the value is free. Never queued.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let result = {
            let Ok(mut value) = self.value.try_borrow_mut() else {
                log::debug!("[shared] busy; skipped call");
                return None;
            };
            f(&mut value)
        };
        self.drain();
        Some(result)
    }

    pub fn read(&self) -> Option<Ref<'_, T>> {
        self.value.try_borrow().ok()
    }

    pub fn pending(&self) -> usize {
        self.deferred.borrow().len()
    }

    /// Apply queued calls in order. Returns early while the value is busy;
    /// the call holding it drains when it finishes.
    pub fn drain(&self) {
        for _ in 0..MAX_DEFERRED_PER_DRAIN {
            let Ok(mut value) = self.value.try_borrow_mut() else {
                return;
            };
            let Some(op) = self.deferred.borrow_mut().pop_front() else {
                return;
            };
            op(&mut value);
        }
        log::warn!("[shared] {} deferred calls left for the next drain", self.pending());
    }
}
