//! Push-back token queue.

use std::collections::VecDeque;

/// Work queue of tokens still to be resolved.
///
/// Tokens are consumed from the front. Resolution may rewrite the remaining
/// input by pushing tokens back onto the front: the rest of a short-flag
/// cluster, or the value half of a `--name=value` token.
///
/// # Examples
///
/// ```
/// use argspec_resolver::TokenQueue;
///
/// let mut queue = TokenQueue::new(["-abc", "file"]);
/// let first = queue.pop_front().unwrap();
/// assert_eq!(first, "-abc");
///
/// queue.push_front("-bc");
/// assert_eq!(queue.peek(), Some("-bc"));
/// assert_eq!(queue.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenQueue {
    tokens: VecDeque<String>,
}

impl TokenQueue {
    pub fn new<I>(tokens: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Removes and returns the next token.
    pub fn pop_front(&mut self) -> Option<String> {
        self.tokens.pop_front()
    }

    /// Puts a token back so it is the next one returned.
    pub fn push_front(&mut self, token: impl Into<String>) {
        self.tokens.push_front(token.into());
    }

    pub fn peek(&self) -> Option<&str> {
        self.tokens.front().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
