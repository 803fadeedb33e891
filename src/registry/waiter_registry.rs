//! `WaiterRegistry` implementation.

use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;
#[cfg(feature = "tracing")]
use tracing::debug;

use super::PendingWaiterState;
use crate::waiter::Waiter;

static GLOBAL: LazyLock<Arc<WaiterRegistry>> = LazyLock::new(|| Arc::new(WaiterRegistry::new()));

/// An ordered collection of waiters that can be queried as a whole.
///
/// Waiters are kept in registration order and compared by identity, so two
/// waiters with the same name are still two entries. The registry holds
/// shared handles only; waiters belong to the code that created them.
///
/// Most code uses the process-wide instance from [`WaiterRegistry::global`],
/// usually through the free functions in [`crate::registry`]. Tests of the
/// waiter machinery itself can build isolated instances with
/// [`WaiterRegistry::new`].
///
/// # Thread Safety
///
/// Queries copy the waiter list under the registry lock and then read each
/// waiter under its own lock. The two locks are never held together.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use test_waiters::registry::WaiterRegistry;
/// use test_waiters::waiter::TestWaiter;
///
/// let registry = Arc::new(WaiterRegistry::new());
/// let waiter = TestWaiter::with_registry("first", &registry);
///
/// waiter.begin_async(1_u8, Some("one"));
/// let state = registry.get_pending_waiter_state();
/// assert_eq!(state.pending, 1);
/// assert_eq!(state.waiters["first"][0].label(), Some("one"));
///
/// registry.reset();
/// assert!(registry.is_empty());
/// ```
#[derive(Default)]
pub struct WaiterRegistry {
    waiters: Mutex<Vec<Arc<dyn Waiter>>>,
}

fn same_waiter(a: &Arc<dyn Waiter>, b: &Arc<dyn Waiter>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

impl WaiterRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide registry.
    ///
    /// [`TestWaiter::new`](crate::waiter::TestWaiter::new) registers here.
    #[must_use]
    pub fn global() -> &'static Arc<WaiterRegistry> {
        &GLOBAL
    }

    /// Adds a waiter if it is not already registered.
    pub fn register(&self, waiter: Arc<dyn Waiter>) {
        let mut waiters = self.waiters.lock();
        if waiters.iter().any(|registered| same_waiter(registered, &waiter)) {
            return;
        }

        #[cfg(feature = "tracing")]
        debug!(waiter = waiter.name(), total = waiters.len() + 1, "registered waiter");

        waiters.push(waiter);
    }

    /// Removes a waiter. Does nothing if it is not registered.
    pub fn unregister(&self, waiter: &Arc<dyn Waiter>) {
        let mut waiters = self.waiters.lock();
        let Some(index) = waiters
            .iter()
            .position(|registered| same_waiter(registered, waiter))
        else {
            return;
        };
        let removed = waiters.remove(index);

        #[cfg(feature = "tracing")]
        debug!(waiter = removed.name(), total = waiters.len(), "unregistered waiter");
        #[cfg(not(feature = "tracing"))]
        drop(removed);
    }

    /// Returns `true` if the waiter is registered.
    #[must_use]
    pub fn contains(&self, waiter: &Arc<dyn Waiter>) -> bool {
        self.waiters
            .lock()
            .iter()
            .any(|registered| same_waiter(registered, waiter))
    }

    /// Returns the number of registered waiters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.waiters.lock().len()
    }

    /// Returns `true` if no waiters are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waiters.lock().is_empty()
    }

    /// Returns the registered waiters in registration order.
    #[must_use]
    pub fn get_waiters(&self) -> Vec<Arc<dyn Waiter>> {
        self.waiters.lock().clone()
    }

    /// Returns `true` if any registered waiter has pending items.
    #[must_use]
    pub fn has_pending_waiters(&self) -> bool {
        self.get_waiters().iter().any(|waiter| !waiter.wait_until())
    }

    /// Returns a snapshot of every pending item across all waiters.
    ///
    /// Waiters with nothing pending are left out. Waiters that share a name
    /// are merged under that name, in registration order.
    #[must_use]
    pub fn get_pending_waiter_state(&self) -> PendingWaiterState {
        let mut state = PendingWaiterState::default();
        for waiter in self.get_waiters() {
            let info = waiter.debug_info();
            if info.is_empty() {
                continue;
            }
            state.pending += info.len();
            state
                .waiters
                .entry(waiter.name().to_owned())
                .or_default()
                .extend(info);
        }
        state
    }

    /// Removes every waiter.
    ///
    /// Removed waiters register again on their next use. Their pending
    /// items are not touched.
    pub fn reset(&self) {
        let mut waiters = self.waiters.lock();

        #[cfg(feature = "tracing")]
        debug!(cleared = waiters.len(), "reset waiter registry");

        waiters.clear();
    }
}

impl std::fmt::Debug for WaiterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Waiters are formatted outside the registry lock.
        f.debug_struct("WaiterRegistry")
            .field("waiters", &self.get_waiters())
            .finish()
    }
}
