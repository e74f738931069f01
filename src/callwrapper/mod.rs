//! Call dispatch wrapper
//!
//! [`CallWrapper`] decorates a target callable with post-processing of its
//! outcome: a successful return value is routed through a result handler,
//! and a raised error is either propagated unchanged or first shown to an
//! observe-only error handler before being re-raised with its causal chain
//! intact. The wrapper holds no state between calls beyond its three
//! configured callables.

use tracing::{debug, trace};

use crate::errors::CallError;

type Target<A, V> = Box<dyn Fn(A) -> Result<V, CallError> + Send + Sync>;
type ResultHandler<V, R> = Box<dyn Fn(V) -> Result<R, CallError> + Send + Sync>;
type ErrorHandler = Box<dyn Fn(&CallError) -> Result<(), CallError> + Send + Sync>;

/// An invocable adapter around a target callable and its outcome handlers.
///
/// Configured once at construction; every call runs independently through
/// either the success or the failure branch. The error handler, when
/// configured, is called purely for side effects: its return value is
/// discarded and the original error is always re-raised afterwards.
pub struct CallWrapper<A, V, R> {
    target: Target<A, V>,
    result_handler: ResultHandler<V, R>,
    error_handler: Option<ErrorHandler>,
}

impl<A, V, R> CallWrapper<A, V, R> {
    pub fn new<T, H>(target: T, result_handler: H) -> Self
    where
        T: Fn(A) -> Result<V, CallError> + Send + Sync + 'static,
        H: Fn(V) -> Result<R, CallError> + Send + Sync + 'static,
    {
        Self {
            target: Box::new(target),
            result_handler: Box::new(result_handler),
            error_handler: None,
        }
    }

    /// Attach an observe-only error handler.
    ///
    /// The handler sees the target's error before it propagates; its success
    /// payload is discarded, and an error it raises itself propagates in
    /// place of the original with the original recorded as its cause.
    pub fn with_error_handler<E>(mut self, error_handler: E) -> Self
    where
        E: Fn(&CallError) -> Result<(), CallError> + Send + Sync + 'static,
    {
        self.error_handler = Some(Box::new(error_handler));
        self
    }

    pub fn has_error_handler(&self) -> bool {
        self.error_handler.is_some()
    }

    /// Invoke the target with `args` and dispatch its outcome.
    ///
    /// Success: returns whatever the result handler returns, including its
    /// errors unchanged. Failure: re-raises the target's error, after the
    /// error handler (if any) has observed it. This branch never returns
    /// `Ok`.
    pub fn call(&self, args: A) -> Result<R, CallError> {
        match (self.target)(args) {
            Ok(value) => {
                trace!("target returned, dispatching to result handler");
                (self.result_handler)(value)
            }
            Err(err) => match &self.error_handler {
                None => {
                    debug!(error = %err, "target failed, no error handler configured");
                    Err(err)
                }
                Some(handler) => {
                    debug!(error = %err, "target failed, dispatching to error handler");
                    match handler(&err) {
                        // The original error is re-raised as its own recorded
                        // cause, so the chain survives even if the handler
                        // swallowed a nested failure internally.
                        Ok(()) => {
                            let cause = err.clone();
                            Err(err.caused_by(cause))
                        }
                        Err(handler_err) => {
                            debug!(error = %handler_err, "error handler failed");
                            Err(handler_err.caused_by(err))
                        }
                    }
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_skips_error_handler() {
        let wrapper = CallWrapper::new(|x: u32| Ok(x), |r: u32| Ok(r))
            .with_error_handler(|_| panic!("error handler must not run on success"));

        assert_eq!(wrapper.call(7), Ok(7));
    }

    #[test]
    fn test_failure_branch_never_returns_ok() {
        let wrapper = CallWrapper::new(
            |_: ()| -> Result<u32, CallError> { Err(CallError::new("boom")) },
            |r: u32| Ok(r),
        )
        .with_error_handler(|_| Ok(()));

        assert!(wrapper.call(()).is_err());
    }

    #[test]
    fn test_reraised_error_is_its_own_cause() {
        let wrapper = CallWrapper::new(
            |_: ()| -> Result<u32, CallError> { Err(CallError::new("boom")) },
            |r: u32| Ok(r),
        )
        .with_error_handler(|_| Ok(()));

        let err = wrapper.call(()).unwrap_err();
        assert_eq!(err.message(), "boom");
        assert_eq!(err.cause().map(|c| c.message()), Some("boom"));
    }
}
