//! A guarded slot for a value that may be temporarily absent.
//!
//! This is the synchronisation core of the crate. The [`RotatingWriter`]
//! keeps its file handle in here, so writers racing against a close/reopen
//! cycle either see a complete handle or block until one is put back.
//!
//! [`RotatingWriter`]: crate::RotatingWriter

use parking_lot::{Condvar, Mutex};

/// A thread-safe holder of zero or one `T`.
///
/// Readers can take a snapshot of the current value ([`get`][Holder::get]) or
/// block until a value is present ([`get_when_present`][Holder::get_when_present]).
/// A single absent→present transition releases every blocked reader at once.
#[derive(Debug)]
pub struct Holder<T> {
    slot: Mutex<Option<T>>,
    present: Condvar,
}

impl<T> Holder<T> {
    /// Creates a holder, either empty or with an initial value.
    pub fn new(value: Option<T>) -> Self {
        Holder {
            slot: Mutex::new(value),
            present: Condvar::new(),
        }
    }

    /// Replaces the value, which may be `None`.
    ///
    /// Waiters in [`get_when_present`][Holder::get_when_present] are woken
    /// only on an absent→present transition. Replacing a present value or
    /// emptying the slot wakes nobody, as there is nobody waiting for
    /// presence in the former case and nothing to hand out in the latter.
    pub fn put(&self, value: Option<T>) {
        let mut slot = self.slot.lock();
        let was_absent = slot.is_none();
        let now_present = value.is_some();
        *slot = value;
        if was_absent && now_present {
            self.present.notify_all();
        }
    }

    /// Removes and returns the value, leaving the holder empty.
    pub fn take(&self) -> Option<T> {
        self.slot.lock().take()
    }
}

impl<T: Clone> Holder<T> {
    /// Returns the current value, even if absent. Never blocks.
    pub fn get(&self) -> Option<T> {
        self.slot.lock().clone()
    }

    /// Returns the value, waiting until one is present.
    ///
    /// The predicate is rechecked in a loop, so spurious wakeups and a
    /// value that vanished again before this thread ran are both handled by
    /// going back to sleep.
    pub fn get_when_present(&self) -> T {
        let mut slot = self.slot.lock();
        loop {
            if let Some(value) = slot.as_ref() {
                return value.clone();
            }
            self.present.wait(&mut slot);
        }
    }
}

impl<T> Default for Holder<T> {
    fn default() -> Self {
        Holder::new(None)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use super::*;

    #[test]
    fn get_sees_latest_put() {
        let holder = Holder::new(None::<u32>);
        assert_eq!(None, holder.get());
        holder.put(Some(1));
        assert_eq!(Some(1), holder.get());
        // Present→present replacement, no trip through absent.
        holder.put(Some(2));
        assert_eq!(Some(2), holder.get());
        holder.put(None);
        assert_eq!(None, holder.get());
    }

    #[test]
    fn get_when_present_returns_immediately_if_present() {
        let holder = Holder::new(Some("ready"));
        assert_eq!("ready", holder.get_when_present());
    }

    #[test]
    fn take_empties_the_slot() {
        let holder = Holder::new(Some(42));
        assert_eq!(Some(42), holder.take());
        assert_eq!(None, holder.take());
        assert_eq!(None, holder.get());
    }

    /// All blocked readers are released by a single put and all see its value.
    #[test]
    fn put_releases_all_waiters() {
        const READERS: usize = 8;

        let holder = Arc::new(Holder::new(None::<u32>));
        let readers: Vec<_> = (0..READERS)
            .map(|_| {
                let holder = Arc::clone(&holder);
                thread::spawn(move || holder.get_when_present())
            })
            .collect();

        // Give the readers a chance to actually block on the condvar first,
        // so this exercises the wakeup path and not just the fast path.
        thread::sleep(Duration::from_millis(50));
        holder.put(Some(7));

        for reader in readers {
            assert_eq!(7, reader.join().unwrap());
        }
    }

    /// An empty put must not wake anyone; only the later non-empty one does.
    #[test]
    fn empty_put_leaves_waiters_blocked() {
        let holder = Arc::new(Holder::new(None::<u32>));
        let reader = {
            let holder = Arc::clone(&holder);
            thread::spawn(move || holder.get_when_present())
        };

        thread::sleep(Duration::from_millis(50));
        holder.put(None);
        thread::sleep(Duration::from_millis(50));
        assert!(!reader.is_finished());

        holder.put(Some(9));
        assert_eq!(9, reader.join().unwrap());
    }
}
