//! # test-waiters
//!
//! > Know when your tests' async work has settled
//!
//! **test-waiters** lets code under test announce "an async operation has
//! started" and "it has finished", and lets a test harness ask at any point
//! whether anything is still outstanding. The harness decides how often to
//! ask and how long to wait; this crate only keeps the books.
//!
//! ## Quick Start
//!
//! ```rust
//! use test_waiters::prelude::*;
//!
//! let waiter = TestWaiter::new("first");
//! let token = Token::new();
//!
//! waiter.begin_async(token, None);
//! assert!(has_pending_waiters());
//!
//! let state = get_pending_waiter_state();
//! assert_eq!(state.pending, 1);
//! assert_eq!(state.waiters["first"][0].label(), None);
//!
//! waiter.end_async(&token)?;
//! assert_eq!(get_pending_waiter_state().pending, 0);
//! # reset();
//! # Ok::<(), test_waiters::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Waiters** - Named trackers of in-flight items with lazy stack capture
//! - **Registry** - One process-wide place to ask "is anything pending?"
//! - **Wait-for futures** - Keep a waiter pending for as long as a future runs
//! - **Tracing** - Enable the `tracing` feature to log registrations and
//!   unmatched ends through the `tracing` crate

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod registry;
pub mod waiter;

/// Prelude for convenient imports
///
/// ```rust
/// use test_waiters::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::registry::{
        get_pending_waiter_state, get_waiters, has_pending_waiters, register, reset, unregister,
        PendingWaiterState, WaiterRegistry,
    };
    pub use crate::waiter::{DebugInfo, TestWaiter, Token, WaitFor, Waiter};
}

// Re-exports
pub use error::{Error, Result};
pub use registry::{
    get_pending_waiter_state, get_waiters, has_pending_waiters, register, reset, unregister,
};
