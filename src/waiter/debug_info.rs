//! Debug metadata recorded for each pending item.

use std::backtrace::Backtrace;
use std::fmt;
use std::panic::Location;
use std::sync::{Arc, OnceLock};

/// Debug information about one pending item.
///
/// Records the optional label passed to
/// [`begin_async`](crate::waiter::TestWaiter::begin_async) together with the
/// call stack at that moment. The frames are captured when the item begins,
/// but they are only resolved and rendered the first time [`stack`](Self::stack)
/// is read, so waiters that are never inspected pay only for the capture.
///
/// Cloning is cheap and all clones share the same rendered stack.
#[derive(Clone)]
pub struct DebugInfo {
    label: Option<String>,
    stack: Arc<LazyStack>,
}

struct LazyStack {
    location: &'static Location<'static>,
    backtrace: Backtrace,
    rendered: OnceLock<String>,
}

impl LazyStack {
    fn render(&self) -> &str {
        self.rendered
            .get_or_init(|| format!("at {}\n{}", self.location, self.backtrace))
    }
}

impl DebugInfo {
    /// Captures debug info for the caller's location.
    #[track_caller]
    pub(crate) fn capture(label: Option<String>) -> Self {
        Self {
            label,
            stack: Arc::new(LazyStack {
                location: Location::caller(),
                backtrace: Backtrace::force_capture(),
                rendered: OnceLock::new(),
            }),
        }
    }

    /// Returns the label given when the item began, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the source location that began the item.
    #[must_use]
    pub fn location(&self) -> &'static Location<'static> {
        self.stack.location
    }

    /// Returns the call stack captured when the item began.
    ///
    /// The first line is always the calling location (`at file:line:column`),
    /// followed by the backtrace. Rendering happens once, on first access.
    #[must_use]
    pub fn stack(&self) -> &str {
        self.stack.render()
    }

    #[cfg(test)]
    pub(crate) fn is_stack_rendered(&self) -> bool {
        self.stack.rendered.get().is_some()
    }
}

impl fmt::Debug for DebugInfo {
    // Does not force the stack; use `stack()` for that.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugInfo")
            .field("label", &self.label)
            .field("location", &format_args!("{}", self.stack.location))
            .finish_non_exhaustive()
    }
}
