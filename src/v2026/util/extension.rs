//! Extension traits on [`Result`] and [`Option`] used throughout the epoch.

use std::error::Error;
use std::hint;

pub(crate) trait ResultExtension<T> {
    /// Unwraps the value, or panics with the [`Display`](std::fmt::Display) text of the error at
    /// the caller's location. This is how ergonomic operations report misuse: the panic message is
    /// exactly what the fallible twin would have returned.
    ///
    /// # Panics
    /// Panics if the [`Result`] is an [`Err`].
    fn throw(self) -> T;
}

impl<T, E: Error> ResultExtension<T> for Result<T, E> {
    #[track_caller]
    fn throw(self) -> T {
        match self {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }
}

pub(crate) trait OptionExtension<T> {
    /// Unwraps a value the caller has already proven to be present. Debug builds check this with
    /// [`unreachable!`], release builds assume it.
    ///
    /// # Safety
    /// The [`Option`] must be [`Some`]. Calling this on [`None`] in a release build is undefined
    /// behavior.
    unsafe fn unreachable(self) -> T;
}

impl<T> OptionExtension<T> for Option<T> {
    #[track_caller]
    unsafe fn unreachable(self) -> T {
        match self {
            Some(value) => value,
            None => {
                debug_assert!(false, "an Option asserted to hold a value was empty");
                // SAFETY: The caller guarantees that the Option is Some.
                unsafe { hint::unreachable_unchecked() }
            },
        }
    }
}
