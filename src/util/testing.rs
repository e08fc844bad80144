//! Helpers shared by the unit tests of every collection.

use std::cell::Cell;
use std::cmp::Ordering;
use std::rc::Rc;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZeroSizedType;

/// A shared counter that [`Tracked`] values increment when dropped.
#[derive(Debug, Default, Clone)]
pub struct DropCounter(Rc<Cell<usize>>);

impl DropCounter {
    pub fn new() -> DropCounter {
        DropCounter::default()
    }

    /// Creates a value that counts its own drop against this counter.
    pub fn track<T>(&self, value: T) -> Tracked<T> {
        Tracked {
            value,
            drops: self.clone(),
        }
    }

    pub fn drops(&self) -> usize {
        self.0.get()
    }
}

/// A value paired with a [`DropCounter`]. Comparisons only consider the value, so that tracked
/// values can be stored in ordered collections.
#[derive(Debug, Clone)]
pub struct Tracked<T> {
    pub value: T,
    drops: DropCounter,
}

impl<T> Drop for Tracked<T> {
    fn drop(&mut self) {
        self.drops.0.set(self.drops.0.get() + 1);
    }
}

impl<T: PartialEq> PartialEq for Tracked<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for Tracked<T> {}

impl<T: PartialOrd> PartialOrd for Tracked<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<T: Ord> Ord for Tracked<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

/// Asserts that the block panics. With a second argument, also asserts that the panic message
/// contains the provided text, which is usually the message of the error that should be thrown.
macro_rules! assert_panics {
    ($run:block) => {
        assert!(
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $run)).is_err(),
            "assertion failed to panic"
        );
    };
    ($run:block, $expected:expr) => {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $run)) {
            Ok(_) => panic!("assertion failed to panic"),
            Err(payload) => {
                let message = payload
                    .downcast_ref::<String>()
                    .map(String::as_str)
                    .or_else(|| payload.downcast_ref::<&str>().copied())
                    .unwrap_or_default();
                let expected = $expected.to_string();
                assert!(
                    message.contains(expected.as_str()),
                    "panic message {message:?} should contain {expected:?}"
                );
            },
        }
    };
}

pub(crate) use assert_panics;
