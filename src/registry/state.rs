//! Aggregate snapshot of pending work.

use std::collections::BTreeMap;
use std::fmt;

use crate::waiter::DebugInfo;

/// Everything pending across a registry at one moment.
///
/// Returned by
/// [`WaiterRegistry::get_pending_waiter_state`](super::WaiterRegistry::get_pending_waiter_state).
/// The `Display` output lists each pending item with its label and stack,
/// which makes it a ready-made message for a harness that gives up waiting.
#[derive(Debug, Clone, Default)]
pub struct PendingWaiterState {
    /// Total number of pending items across all waiters.
    pub pending: usize,
    /// Debug info of pending items, keyed by waiter name.
    ///
    /// Only waiters with at least one pending item appear.
    pub waiters: BTreeMap<String, Vec<DebugInfo>>,
}

impl PendingWaiterState {
    /// Returns `true` if nothing is pending.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.pending == 0
    }
}

impl fmt::Display for PendingWaiterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_settled() {
            return write!(f, "no pending waiters");
        }

        write!(f, "{} pending", self.pending)?;
        for (name, items) in &self.waiters {
            write!(f, "\n{name}:")?;
            for info in items {
                write!(f, "\n  - {}", info.label().unwrap_or("<no label>"))?;
                for line in info.stack().lines() {
                    write!(f, "\n      {line}")?;
                }
            }
        }
        Ok(())
    }
}
