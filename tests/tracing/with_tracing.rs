//! Tests with tracing feature enabled

use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::Mutex;
use test_waiters::registry::WaiterRegistry;
use test_waiters::waiter::TestWaiter;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// One captured event: its level, message and `waiter` field.
#[derive(Debug, Clone, PartialEq)]
struct Captured {
    level: Level,
    message: String,
    waiter: Option<String>,
}

#[derive(Default)]
struct EventVisitor {
    message: String,
    waiter: Option<String>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        match field.name() {
            "message" => self.message = format!("{value:?}"),
            "waiter" => self.waiter = Some(format!("{value:?}")),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_owned(),
            "waiter" => self.waiter = Some(value.to_owned()),
            _ => {}
        }
    }
}

/// Layer that records every event it sees.
#[derive(Clone, Default)]
struct CaptureLayer {
    events: Arc<Mutex<Vec<Captured>>>,
}

impl CaptureLayer {
    fn events(&self) -> Vec<Captured> {
        self.events.lock().clone()
    }

    fn find(&self, message: &str) -> Option<Captured> {
        self.events().into_iter().find(|e| e.message == message)
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        self.events.lock().push(Captured {
            level: *event.metadata().level(),
            message: visitor.message,
            waiter: visitor.waiter,
        });
    }
}

/// Runs `f` with a capturing subscriber installed on this thread.
fn capture(f: impl FnOnce()) -> CaptureLayer {
    let layer = CaptureLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    tracing::subscriber::with_default(subscriber, f);
    layer
}

fn init_subscriber() {
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_tracing_with_subscriber() {
    init_subscriber();

    let registry = Arc::new(WaiterRegistry::new());
    let waiter = TestWaiter::with_registry("traced", &registry);

    waiter.begin_async(1_u32, Some("traced item"));
    waiter.end_async(&1).unwrap();
    waiter.unregister();

    assert!(registry.is_empty());
}

#[test]
fn test_unmatched_end_emits_warning() {
    let registry = Arc::new(WaiterRegistry::new());
    let waiter = TestWaiter::<u32>::with_registry("traced", &registry);

    let layer = capture(|| {
        assert!(waiter.end_async(&9).is_err());
    });

    let event = layer
        .find("end_async called for an item that is not pending")
        .expect("warning event");
    assert_eq!(event.level, Level::WARN);
    assert_eq!(event.waiter.as_deref(), Some("traced"));
}

#[test]
fn test_begin_and_end_emit_trace_events() {
    let registry = Arc::new(WaiterRegistry::new());
    let waiter = TestWaiter::with_registry("traced", &registry);

    let layer = capture(|| {
        waiter.begin_async(1_u32, Some("item"));
        waiter.end_async(&1).unwrap();
    });

    let begin = layer.find("begin_async").expect("begin event");
    let end = layer.find("end_async").expect("end event");
    assert_eq!(begin.level, Level::TRACE);
    assert_eq!(end.level, Level::TRACE);
    assert_eq!(begin.waiter.as_deref(), Some("traced"));
}

#[test]
fn test_registration_and_reset_emit_debug_events() {
    let registry = Arc::new(WaiterRegistry::new());
    let waiter = TestWaiter::<u32>::with_registry("traced", &registry);

    let layer = capture(|| {
        waiter.register();
        waiter.register();
        waiter.unregister();
        waiter.register();
        registry.reset();
    });

    let registered: Vec<_> = layer
        .events()
        .into_iter()
        .filter(|e| e.message == "registered waiter")
        .collect();
    assert_eq!(registered.len(), 2);
    assert!(registered.iter().all(|e| e.level == Level::DEBUG));

    let unregistered = layer.find("unregistered waiter").expect("unregister event");
    assert_eq!(unregistered.waiter.as_deref(), Some("traced"));

    let reset = layer.find("reset waiter registry").expect("reset event");
    assert_eq!(reset.level, Level::DEBUG);
}
