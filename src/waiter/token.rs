//! Process-unique item identities.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// A unique identity for a pending item.
///
/// Use a `Token` when the async operation has no natural value to track it
/// by. Every call to [`Token::new`] returns a value distinct from all others
/// created in this process.
///
/// # Example
///
/// ```rust
/// use test_waiters::waiter::{TestWaiter, Token};
///
/// let waiter = TestWaiter::new("uploads");
/// let token = Token::new();
///
/// waiter.begin_async(token, Some("upload avatar"));
/// assert!(!waiter.wait_until());
///
/// waiter.end_async(&token).unwrap();
/// assert!(waiter.wait_until());
/// # test_waiters::reset();
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(u64);

impl Default for Token {
    /// Same as [`Token::new`]: every default token is unique.
    fn default() -> Self {
        Self::new()
    }
}

impl Token {
    /// Creates a new unique token.
    #[must_use]
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tokens_are_unique() {
        let tokens: HashSet<Token> = (0..100).map(|_| Token::new()).collect();
        assert_eq!(tokens.len(), 100);
    }

    #[test]
    fn test_default_is_a_fresh_token() {
        let a = Token::default();
        let b = Token::default();
        assert_ne!(a, b);
        assert_ne!(Token::new(), a);
    }

    #[test]
    fn test_token_display() {
        let token = Token::new();
        assert_eq!(token.to_string(), format!("Token({})", token.as_u64()));
    }
}
