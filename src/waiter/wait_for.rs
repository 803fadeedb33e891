//! Futures that hold a waiter pending while they run.

use std::future::Future;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

use pin_project_lite::pin_project;

use super::{TestWaiter, Token};

impl TestWaiter<Token> {
    /// Begins a fresh [`Token`] and returns it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use test_waiters::waiter::TestWaiter;
    ///
    /// let waiter = TestWaiter::new("timers");
    /// let token = waiter.begin_token(Some("debounce"));
    ///
    /// assert_eq!(waiter.pending_count(), 1);
    /// waiter.end_async(&token).unwrap();
    /// # test_waiters::reset();
    /// ```
    #[track_caller]
    pub fn begin_token(&self, label: Option<&str>) -> Token {
        let token = Token::new();
        self.begin_async(token, label);
        token
    }

    /// Wraps `future` so the waiter stays pending until it finishes.
    ///
    /// The item begins immediately, not on first poll. It ends when the
    /// future completes, or when the returned [`WaitFor`] is dropped
    /// before completing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use test_waiters::waiter::TestWaiter;
    ///
    /// # futures::executor::block_on(async {
    /// let waiter = TestWaiter::new("loads");
    /// let load = waiter.wait_for(async { 42 }, Some("load config"));
    /// assert!(test_waiters::has_pending_waiters());
    ///
    /// assert_eq!(load.await, 42);
    /// assert!(!test_waiters::has_pending_waiters());
    /// # });
    /// # test_waiters::reset();
    /// ```
    #[track_caller]
    pub fn wait_for<F: Future>(&self, future: F, label: Option<&str>) -> WaitFor<F> {
        let token = self.begin_token(label);
        WaitFor {
            future,
            waiter: self.clone(),
            token: Some(token),
        }
    }
}

pin_project! {
    /// A future that keeps a waiter pending until it completes.
    ///
    /// Created by [`TestWaiter::wait_for`].
    #[must_use = "futures do nothing unless polled"]
    pub struct WaitFor<F> {
        #[pin]
        future: F,
        waiter: TestWaiter<Token>,
        token: Option<Token>,
    }

    impl<F> PinnedDrop for WaitFor<F> {
        fn drop(this: Pin<&mut Self>) {
            let this = this.project();
            if let Some(token) = this.token.take() {
                // The token never leaves this future, so it is still pending.
                let _ = this.waiter.end_async(&token);
            }
        }
    }
}

impl<F> WaitFor<F> {
    /// Returns `true` while the wrapped future has not completed.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.token.is_some()
    }
}

impl<F: Future> Future for WaitFor<F> {
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let output = ready!(this.future.poll(cx));
        if let Some(token) = this.token.take() {
            let _ = this.waiter.end_async(&token);
        }
        Poll::Ready(output)
    }
}
