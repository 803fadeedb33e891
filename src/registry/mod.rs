//! Process-wide aggregation of waiters
//!
//! The [`WaiterRegistry`] collects waiters so a test harness can check, with
//! one call, whether any async work is still in flight. The free functions
//! in this module operate on the process-wide registry returned by
//! [`WaiterRegistry::global`].
//!
//! # Example
//!
//! ```rust
//! use test_waiters::registry;
//! use test_waiters::waiter::TestWaiter;
//!
//! let waiter = TestWaiter::new("first");
//! waiter.begin_async(1_u32, None);
//!
//! assert!(registry::has_pending_waiters());
//! assert_eq!(registry::get_pending_waiter_state().pending, 1);
//!
//! // Between independent runs
//! registry::reset();
//! assert!(registry::get_waiters().is_empty());
//! ```

mod state;
mod waiter_registry;

use std::sync::Arc;

pub use state::PendingWaiterState;
pub use waiter_registry::WaiterRegistry;

use crate::waiter::Waiter;

/// Adds a waiter to the process-wide registry.
///
/// See [`WaiterRegistry::register`].
pub fn register(waiter: Arc<dyn Waiter>) {
    WaiterRegistry::global().register(waiter);
}

/// Removes a waiter from the process-wide registry.
///
/// See [`WaiterRegistry::unregister`].
pub fn unregister(waiter: &Arc<dyn Waiter>) {
    WaiterRegistry::global().unregister(waiter);
}

/// Returns the waiters in the process-wide registry.
///
/// See [`WaiterRegistry::get_waiters`].
#[must_use]
pub fn get_waiters() -> Vec<Arc<dyn Waiter>> {
    WaiterRegistry::global().get_waiters()
}

/// Returns `true` if any waiter in the process-wide registry is pending.
///
/// See [`WaiterRegistry::has_pending_waiters`].
#[must_use]
pub fn has_pending_waiters() -> bool {
    WaiterRegistry::global().has_pending_waiters()
}

/// Returns a snapshot of pending work in the process-wide registry.
///
/// See [`WaiterRegistry::get_pending_waiter_state`].
#[must_use]
pub fn get_pending_waiter_state() -> PendingWaiterState {
    WaiterRegistry::global().get_pending_waiter_state()
}

/// Clears the process-wide registry.
///
/// See [`WaiterRegistry::reset`].
pub fn reset() {
    WaiterRegistry::global().reset();
}
