//! Error values threaded through call dispatch
//!
//! A failed call carries a [`CallError`] with an optional causal link to the
//! error that preceded it, so handlers further up can reconstruct how a
//! failure came to be without any ambient interpreter state.

use std::error::Error;
use std::fmt;

/// An error raised by a wrapped call, with an optional recorded cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallError {
    message: String,
    cause: Option<Box<CallError>>,
}

impl CallError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    /// Record `cause` as the direct cause of this error, replacing any
    /// previously recorded one.
    pub fn caused_by(mut self, cause: CallError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&CallError> {
        self.cause.as_deref()
    }

    /// Iterate over this error followed by its recorded causes, most recent
    /// first.
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CallError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref().map(|c| c as &(dyn Error + 'static))
    }
}

/// Iterator over an error and its causal chain
pub struct Chain<'a> {
    next: Option<&'a CallError>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a CallError;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.cause();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_message_only() {
        let err = CallError::new("bad").caused_by(CallError::new("worse"));
        assert_eq!(err.to_string(), "bad");
    }

    #[test]
    fn test_chain_orders_most_recent_first() {
        let err = CallError::new("outer")
            .caused_by(CallError::new("middle").caused_by(CallError::new("inner")));

        let messages: Vec<&str> = err.chain().map(|e| e.message()).collect();
        assert_eq!(messages, ["outer", "middle", "inner"]);
    }

    #[test]
    fn test_source_walks_to_cause() {
        use std::error::Error;

        let err = CallError::new("outer").caused_by(CallError::new("inner"));
        let source = err.source().expect("cause should be exposed as source");
        assert_eq!(source.to_string(), "inner");
    }
}
