#[cfg(test)]
use std::any::Any;
#[cfg(test)]
use std::panic::{self, AssertUnwindSafe};

/// Runs `run`, returning the panic message if it panicked and None if it returned normally.
/// Payloads that aren't strings are reported as an empty message.
#[cfg(test)]
pub(crate) fn catch_message<R, F: FnOnce() -> R>(run: F) -> Option<String> {
    let payload: Box<dyn Any + Send> = panic::catch_unwind(AssertUnwindSafe(run)).err()?;
    let message = match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(payload) => payload
            .downcast_ref::<&str>()
            .map(|message| message.to_string())
            .unwrap_or_default(),
    };
    Some(message)
}

/// Asserts that a block panics. With a literal, that literal is the failure message. With
/// `message = expr`, the panic message itself must equal the expression.
#[allow(unused_macros)]
macro_rules! assert_panics {
    ($run:block) => {
        assert_panics!($run, "the block didn't panic")
    };
    ($run:block, message = $expected:expr) => {
        match $crate::v2026::util::panic::catch_message(|| $run) {
            Some(message) => assert_eq!(message, $expected, "the block panicked differently"),
            None => panic!("the block didn't panic"),
        }
    };
    ($run:block, $msg:literal) => {
        assert!($crate::v2026::util::panic::catch_message(|| $run).is_some(), $msg);
    };
}

#[allow(unused_imports)]
pub(crate) use assert_panics;
