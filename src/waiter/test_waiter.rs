//! `TestWaiter` implementation.

use std::fmt::{self, Debug};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
#[cfg(feature = "tracing")]
use tracing::{trace, warn};

use super::{DebugInfo, Waiter};
use crate::error::{Error, Result};
use crate::registry::WaiterRegistry;

/// A named tracker of in-flight async operations.
///
/// Each call to [`begin_async`](Self::begin_async) marks an item as pending
/// and must be paired with a later [`end_async`](Self::end_async) for the
/// same item. While any item is pending, the waiter reports that the test
/// harness should keep waiting.
///
/// The waiter registers itself with its registry on the first
/// `begin_async`, or earlier through an explicit [`register`](Self::register).
///
/// # Thread Safety
///
/// `TestWaiter` is a handle. Clones share the same pending items and count
/// as the same waiter in the registry.
///
/// # Example
///
/// ```rust
/// use test_waiters::waiter::TestWaiter;
///
/// let waiter = TestWaiter::new("network");
///
/// waiter.begin_async(1_u32, Some("GET /users"));
/// assert!(test_waiters::has_pending_waiters());
///
/// waiter.end_async(&1).unwrap();
/// assert!(!test_waiters::has_pending_waiters());
/// # test_waiters::reset();
/// ```
pub struct TestWaiter<T> {
    inner: Arc<WaiterInner<T>>,
}

struct WaiterInner<T> {
    name: String,
    registry: Weak<WaiterRegistry>,
    /// Pending items in the order they began
    items: Mutex<Vec<(T, DebugInfo)>>,
}

impl<T> TestWaiter<T>
where
    T: Eq + Debug + Send + 'static,
{
    /// Creates a waiter that reports to the process-wide registry.
    ///
    /// The waiter is not registered until it is first used.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_registry(name, WaiterRegistry::global())
    }

    /// Creates a waiter that reports to the given registry.
    ///
    /// The waiter only keeps a weak reference to the registry. If the
    /// registry is dropped, the waiter keeps tracking items on its own.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use test_waiters::registry::WaiterRegistry;
    /// use test_waiters::waiter::TestWaiter;
    ///
    /// let registry = Arc::new(WaiterRegistry::new());
    /// let waiter = TestWaiter::with_registry("isolated", &registry);
    ///
    /// waiter.begin_async("job", None);
    /// assert!(registry.has_pending_waiters());
    /// assert!(!test_waiters::has_pending_waiters());
    /// ```
    #[must_use]
    pub fn with_registry(name: impl Into<String>, registry: &Arc<WaiterRegistry>) -> Self {
        Self {
            inner: Arc::new(WaiterInner {
                name: name.into(),
                registry: Arc::downgrade(registry),
                items: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Returns the waiter's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns `true` if the waiter is currently in its own registry.
    ///
    /// Only the registry the waiter was created with counts. Adding the
    /// waiter to another registry by hand does not change the answer.
    #[must_use]
    pub fn is_registered(&self) -> bool {
        self.inner
            .registry
            .upgrade()
            .is_some_and(|registry| registry.contains(&self.as_waiter()))
    }

    /// Registers the waiter with its registry.
    ///
    /// Does nothing if the waiter is already registered. Calling this is
    /// optional: [`begin_async`](Self::begin_async) does it for you.
    pub fn register(&self) {
        if let Some(registry) = self.inner.registry.upgrade() {
            registry.register(self.as_waiter());
        }
    }

    /// Removes the waiter from its registry.
    ///
    /// Pending items are kept; they are reported again if the waiter
    /// registers later.
    pub fn unregister(&self) {
        if let Some(registry) = self.inner.registry.upgrade() {
            registry.unregister(&self.as_waiter());
        }
    }

    /// Returns this waiter as a registry entry.
    ///
    /// Every call returns a handle to the same waiter, so the result can be
    /// passed to [`WaiterRegistry::unregister`] or compared against
    /// [`WaiterRegistry::get_waiters`].
    #[must_use]
    pub fn as_waiter(&self) -> Arc<dyn Waiter> {
        self.inner.clone()
    }

    /// Marks `item` as pending.
    ///
    /// Registers the waiter first if needed. The caller's location and
    /// backtrace are captured for [`debug_info`](Self::debug_info).
    ///
    /// Beginning an item that is already pending replaces its debug info
    /// and keeps its position.
    #[track_caller]
    pub fn begin_async(&self, item: T, label: Option<&str>) {
        self.register();

        let info = DebugInfo::capture(label.map(str::to_owned));

        #[cfg(feature = "tracing")]
        trace!(waiter = %self.inner.name, ?item, ?label, "begin_async");

        let mut items = self.inner.items.lock();
        match items.iter_mut().find(|(pending, _)| *pending == item) {
            Some(entry) => entry.1 = info,
            None => items.push((item, info)),
        }
    }

    /// Marks `item` as finished.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnmatchedEnd`] if `item` is not pending. The pending
    /// items are left untouched in that case.
    pub fn end_async(&self, item: &T) -> Result<()> {
        let mut items = self.inner.items.lock();
        let Some(index) = items.iter().position(|(pending, _)| pending == item) else {
            drop(items);

            #[cfg(feature = "tracing")]
            warn!(waiter = %self.inner.name, ?item, "end_async called for an item that is not pending");

            return Err(Error::unmatched_end(&self.inner.name, format!("{item:?}")));
        };
        items.remove(index);

        #[cfg(feature = "tracing")]
        trace!(waiter = %self.inner.name, ?item, "end_async");

        Ok(())
    }

    /// Returns `true` if nothing is pending on this waiter.
    #[must_use]
    pub fn wait_until(&self) -> bool {
        self.inner.wait_until()
    }

    /// Returns the number of pending items.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.inner.pending_count()
    }

    /// Returns a snapshot of the debug info of every pending item.
    ///
    /// Items are listed in the order they began.
    #[must_use]
    pub fn debug_info(&self) -> Vec<DebugInfo> {
        self.inner.debug_info()
    }
}

impl<T> Waiter for WaiterInner<T>
where
    T: Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn wait_until(&self) -> bool {
        self.items.lock().is_empty()
    }

    fn pending_count(&self) -> usize {
        self.items.lock().len()
    }

    fn debug_info(&self) -> Vec<DebugInfo> {
        self.items
            .lock()
            .iter()
            .map(|(_, info)| info.clone())
            .collect()
    }
}

impl<T> Clone for TestWaiter<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Debug for TestWaiter<T>
where
    T: Eq + Debug + Send + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestWaiter")
            .field("name", &self.inner.name)
            .field("registered", &self.is_registered())
            .field("pending", &self.inner.items.lock().len())
            .finish()
    }
}
