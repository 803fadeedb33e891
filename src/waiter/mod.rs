//! Per-category tracking of in-flight async operations
//!
//! A [`TestWaiter`] records items that have begun but not yet finished,
//! along with debug info about where each one began. Waiters register
//! themselves with a [`WaiterRegistry`](crate::registry::WaiterRegistry) so a
//! test harness can ask whether any work is still outstanding.
//!
//! # Example
//!
//! ```rust
//! use test_waiters::waiter::TestWaiter;
//!
//! let waiter = TestWaiter::new("first");
//!
//! waiter.begin_async("request", Some("GET /"));
//! assert!(!waiter.wait_until());
//!
//! waiter.end_async(&"request").unwrap();
//! assert!(waiter.wait_until());
//! # test_waiters::reset();
//! ```

mod debug_info;
mod test_waiter;
mod token;
mod wait_for;

use std::fmt;

pub use debug_info::DebugInfo;
pub use test_waiter::TestWaiter;
pub use token::Token;
pub use wait_for::WaitFor;

/// A source of pending async work that a registry can aggregate.
///
/// [`TestWaiter`] is the standard implementation. Other types can implement
/// this trait and be registered directly with
/// [`WaiterRegistry::register`](crate::registry::WaiterRegistry::register).
pub trait Waiter: Send + Sync {
    /// The waiter's name. Names do not need to be unique.
    fn name(&self) -> &str;

    /// Returns `true` if nothing is pending.
    fn wait_until(&self) -> bool;

    /// Returns debug info for each pending item, oldest first.
    fn debug_info(&self) -> Vec<DebugInfo>;

    /// Returns the number of pending items.
    fn pending_count(&self) -> usize {
        self.debug_info().len()
    }
}

impl fmt::Debug for dyn Waiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Waiter")
            .field("name", &self.name())
            .field("pending", &self.pending_count())
            .finish()
    }
}
