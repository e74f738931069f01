use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use mapikit::{CallError, CallWrapper};

#[test]
fn test_success_routes_through_result_handler() {
    // target adds one, handler doubles: wrapper(3) == 8
    let wrapper = CallWrapper::new(|x: i64| Ok(x + 1), |r: i64| Ok(r * 2));
    assert_eq!(wrapper.call(3), Ok(8));
}

#[test]
fn test_result_handler_error_propagates_unchanged() {
    let wrapper = CallWrapper::new(
        |x: i64| Ok(x),
        |_: i64| -> Result<i64, CallError> { Err(CallError::new("post-processing failed")) },
    );

    let err = wrapper.call(1).unwrap_err();
    assert_eq!(err.message(), "post-processing failed");
    assert!(err.cause().is_none());
}

#[test]
fn test_error_propagates_without_handler() {
    let wrapper = CallWrapper::new(
        |_: ()| -> Result<i64, CallError> { Err(CallError::new("bad")) },
        |r: i64| Ok(r),
    );
    assert!(!wrapper.has_error_handler());

    let err = wrapper.call(()).unwrap_err();
    assert_eq!(err.message(), "bad");
    assert!(err.cause().is_none(), "unhandled errors must not be rewrapped");
}

#[test]
fn test_error_handler_observes_then_reraises() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&log);

    let wrapper = CallWrapper::new(
        |_: ()| -> Result<i64, CallError> { Err(CallError::new("bad")) },
        |r: i64| Ok(r),
    )
    .with_error_handler(move |e| {
        seen.lock().unwrap().push(e.to_string());
        Ok(())
    });

    let err = wrapper.call(()).unwrap_err();
    assert_eq!(*log.lock().unwrap(), vec!["bad".to_string()]);
    assert_eq!(err.message(), "bad");
    assert_eq!(err.cause().map(|c| c.message()), Some("bad"));
}

#[test]
fn test_error_handler_called_exactly_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let wrapper = CallWrapper::new(
        |_: ()| -> Result<i64, CallError> { Err(CallError::new("bad")) },
        |r: i64| Ok(r),
    )
    .with_error_handler(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    assert!(wrapper.call(()).is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_failing_error_handler_overrides_with_cause() {
    let wrapper = CallWrapper::new(
        |_: ()| -> Result<i64, CallError> { Err(CallError::new("bad")) },
        |r: i64| Ok(r),
    )
    .with_error_handler(|_| Err(CallError::new("handler blew up")));

    let err = wrapper.call(()).unwrap_err();
    assert_eq!(err.message(), "handler blew up");
    assert_eq!(err.cause().map(|c| c.message()), Some("bad"));

    let messages: Vec<&str> = err.chain().map(|e| e.message()).collect();
    assert_eq!(messages, ["handler blew up", "bad"]);
}

#[test]
fn test_arguments_forwarded_verbatim() {
    let received = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&received);

    let wrapper = CallWrapper::new(
        move |args: (i64, String, Vec<u8>)| {
            *sink.lock().unwrap() = Some(args.clone());
            Ok(args.0)
        },
        |r: i64| Ok(r),
    );

    assert_eq!(wrapper.call((42, "subject".to_string(), vec![1, 2, 3])), Ok(42));
    assert_eq!(
        received.lock().unwrap().take(),
        Some((42, "subject".to_string(), vec![1, 2, 3]))
    );
}

#[test]
fn test_invocations_are_independent() {
    // One failing call must not affect the next; the wrapper keeps no state.
    let wrapper = CallWrapper::new(
        |x: i64| {
            if x < 0 {
                Err(CallError::new("negative"))
            } else {
                Ok(x)
            }
        },
        |r: i64| Ok(r + 100),
    )
    .with_error_handler(|_| Ok(()));

    assert!(wrapper.call(-1).is_err());
    assert_eq!(wrapper.call(1), Ok(101));
    assert!(wrapper.call(-5).is_err());
}

#[test]
fn test_wrapper_is_shareable_across_threads() {
    let wrapper = Arc::new(CallWrapper::new(|x: i64| Ok(x * 2), |r: i64| Ok(r)));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let w = Arc::clone(&wrapper);
            std::thread::spawn(move || w.call(i))
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), Ok(i as i64 * 2));
    }
}
