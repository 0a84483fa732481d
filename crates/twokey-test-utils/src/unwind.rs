use std::{any::Any, panic::AssertUnwindSafe};

/// Runs `f`, returning `None` if it panics.
///
/// Used to check that a map is left intact when a comparer panics halfway
/// through an operation.
pub fn catch_panic<T>(f: impl FnOnce() -> T) -> Option<T> {
    match std::panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Some(value),
        Err(payload) => {
            eprintln!("caught panic: {}", panic_message(&*payload));
            None
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg
    } else {
        "(unknown panic payload)"
    }
}
