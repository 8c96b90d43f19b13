//! Ready signal for values that finish initializing asynchronously.

use std::cell::RefCell;
use std::rc::Rc;

type Callback<T> = Box<dyn FnOnce(&mut T)>;

enum Slot<T> {
    Pending(Vec<Callback<T>>),
    Resolved(T),
}

/// A shared slot that starts empty and is filled exactly once.
///
/// Work registered with [`when_ready`](Self::when_ready) before the value
/// arrives is queued and runs once, in registration order, when
/// [`resolve`](Self::resolve) is called; afterwards it runs immediately.
/// Clones share the same slot. Single-threaded by construction
/// (`Rc<RefCell<_>>`), matching the browser's event loop.
pub struct Ready<T> {
    slot: Rc<RefCell<Slot<T>>>,
}

impl<T> Clone for Ready<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T: 'static> Default for Ready<T> {
    fn default() -> Self {
        Self::pending()
    }
}

impl<T: 'static> Ready<T> {
    /// A handle with no value yet.
    #[must_use]
    pub fn pending() -> Self {
        Self {
            slot: Rc::new(RefCell::new(Slot::Pending(Vec::new()))),
        }
    }

    /// A handle that is ready from the start.
    #[must_use]
    pub fn resolved(value: T) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Slot::Resolved(value))),
        }
    }

    /// Store `value`, first running every queued callback on it.
    ///
    /// Callbacks queued while the queue is draining also run before the
    /// handle becomes ready. A second resolve is ignored.
    pub fn resolve(&self, mut value: T) {
        loop {
            let queued = match &mut *self.slot.borrow_mut() {
                Slot::Pending(queue) => std::mem::take(queue),
                Slot::Resolved(_) => {
                    log::warn!("ready handle resolved twice, keeping the first value");
                    return;
                }
            };
            if queued.is_empty() {
                break;
            }
            log::debug!("running {} deferred call(s)", queued.len());
            for callback in queued {
                callback(&mut value);
            }
        }
        *self.slot.borrow_mut() = Slot::Resolved(value);
    }

    /// Run `f` now if the value is available, otherwise once it resolves.
    pub fn when_ready(&self, f: impl FnOnce(&mut T) + 'static) {
        let Ok(mut slot) = self.slot.try_borrow_mut() else {
            log::debug!("ready handle busy, dropping re-entrant call");
            return;
        };
        match &mut *slot {
            Slot::Pending(queue) => queue.push(Box::new(f)),
            Slot::Resolved(value) => f(value),
        }
    }

    /// Run `f` on the value if it is available and not already borrowed.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut slot = self.slot.try_borrow_mut().ok()?;
        match &mut *slot {
            Slot::Pending(_) => None,
            Slot::Resolved(value) => Some(f(value)),
        }
    }

    /// Whether [`resolve`](Self::resolve) has completed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(
            self.slot.try_borrow().as_deref(),
            Ok(Slot::Resolved(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queued_calls_run_once_in_order() {
        let handle: Ready<Vec<u32>> = Ready::pending();
        handle.when_ready(|v| v.push(1));
        handle.when_ready(|v| v.push(2));
        assert!(!handle.is_ready());
        assert_eq!(handle.with(|v| v.len()), None);

        handle.resolve(Vec::new());
        assert!(handle.is_ready());
        assert_eq!(handle.with(|v| v.clone()), Some(vec![1, 2]));
    }

    #[test]
    fn calls_after_resolution_run_immediately() {
        let handle = Ready::pending();
        handle.resolve(10_u32);
        handle.when_ready(|v| *v += 5);
        assert_eq!(handle.with(|v| *v), Some(15));
    }

    #[test]
    fn clones_share_the_slot() {
        let handle = Ready::pending();
        let other = handle.clone();
        other.when_ready(|v: &mut String| v.push('!'));
        handle.resolve(String::from("hi"));
        assert_eq!(other.with(|v| v.clone()).as_deref(), Some("hi!"));
    }

    #[test]
    fn calls_queued_while_draining_still_run() {
        let handle: Ready<Vec<u32>> = Ready::pending();
        let inner = handle.clone();
        handle.when_ready(move |v| {
            v.push(1);
            inner.when_ready(|v| v.push(2));
        });
        handle.resolve(Vec::new());
        assert_eq!(handle.with(|v| v.clone()), Some(vec![1, 2]));
    }

    #[test]
    fn second_resolve_is_ignored() {
        let handle = Ready::resolved(1_u8);
        handle.resolve(2);
        assert_eq!(handle.with(|v| *v), Some(1));
    }
}
