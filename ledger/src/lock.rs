//! The execution lock guarding value-moving operations.

use std::cell::Cell;

/// A non-reentrant execution lock.
///
/// The ledger is strictly serialized, so this is not about threads: it
/// exists so that code reached *during* a value-moving operation (a payout
/// sink, a reward recipient callback) cannot nest another ledger operation
/// and observe or mutate mid-operation state. Acquisition fails instead of
/// blocking.
#[derive(Debug, Default)]
pub struct ExecutionLock {
    engaged: Cell<bool>,
}

impl ExecutionLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock, or `None` if an operation already holds it.
    /// The lock releases when the returned guard drops, on every exit path.
    pub fn acquire(&self) -> Option<LockGuard<'_>> {
        if self.engaged.get() {
            return None;
        }
        self.engaged.set(true);
        Some(LockGuard { lock: self })
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged.get()
    }
}

/// Releases the lock on drop.
pub struct LockGuard<'a> {
    lock: &'a ExecutionLock,
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        self.lock.engaged.set(false);
    }
}
