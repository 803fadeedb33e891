//! Tests that run whether or not the tracing feature is enabled

use std::sync::Arc;

use test_waiters::registry::WaiterRegistry;
use test_waiters::waiter::TestWaiter;

#[test]
fn test_works_without_subscriber() {
    let registry = Arc::new(WaiterRegistry::new());
    let waiter = TestWaiter::with_registry("quiet", &registry);

    waiter.begin_async("item", None);
    assert!(registry.has_pending_waiters());

    waiter.end_async(&"item").unwrap();
    registry.reset();
    assert!(!registry.has_pending_waiters());
}
