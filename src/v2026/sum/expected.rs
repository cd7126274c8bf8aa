use std::fmt::{self, Debug, Formatter};

use crate::v2026::sum::Optional;

/// The error half of an [`Expected`], used to construct one in the error state.
///
/// # Examples
/// ```
/// # use epoch_std::v2026::sum::{Expected, Unexpected};
/// let parsed: Expected<u32, &str> = Unexpected("not a number").into();
/// assert!(parsed.has_error());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Unexpected<E>(pub E);

impl<E> Unexpected<E> {
    pub fn into_inner(self) -> E {
        self.0
    }
}

/// Either a value or an error, never both.
///
/// Unlike [`Result`], reading the wrong side is treated as a bug in the caller rather than
/// something to recover from: [`Expected::value`] on an error (or [`Expected::error`] on a value)
/// panics. Test with [`Expected::has_value`] first, or convert into a [`Result`].
///
/// No conversion between `V` and `E` ever happens implicitly. A value is constructed with
/// [`Expected::Value`] and an error with [`Unexpected`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expected<V, E> {
    Value(V),
    Error(E),
}

impl<V, E> Expected<V, E> {
    pub const fn has_value(&self) -> bool {
        matches!(self, Expected::Value(_))
    }

    pub const fn has_error(&self) -> bool {
        matches!(self, Expected::Error(_))
    }

    /// Returns a reference to the value.
    ///
    /// # Panics
    /// Panics if self holds an error.
    #[track_caller]
    pub fn value(&self) -> &V {
        match self {
            Expected::Value(value) => value,
            Expected::Error(_) => wrong_side("value", "an error"),
        }
    }

    /// Returns a mutable reference to the value.
    ///
    /// # Panics
    /// Panics if self holds an error.
    #[track_caller]
    pub fn value_mut(&mut self) -> &mut V {
        match self {
            Expected::Value(value) => value,
            Expected::Error(_) => wrong_side("value", "an error"),
        }
    }

    /// Returns a reference to the error.
    ///
    /// # Panics
    /// Panics if self holds a value.
    #[track_caller]
    pub fn error(&self) -> &E {
        match self {
            Expected::Error(error) => error,
            Expected::Value(_) => wrong_side("error", "a value"),
        }
    }

    /// Returns a mutable reference to the error.
    ///
    /// # Panics
    /// Panics if self holds a value.
    #[track_caller]
    pub fn error_mut(&mut self) -> &mut E {
        match self {
            Expected::Error(error) => error,
            Expected::Value(_) => wrong_side("error", "a value"),
        }
    }

    /// Consumes self, returning the value.
    ///
    /// # Panics
    /// Panics if self holds an error.
    #[track_caller]
    pub fn into_value(self) -> V {
        match self {
            Expected::Value(value) => value,
            Expected::Error(_) => wrong_side("value", "an error"),
        }
    }

    /// Consumes self, returning the error.
    ///
    /// # Panics
    /// Panics if self holds a value.
    #[track_caller]
    pub fn into_error(self) -> E {
        match self {
            Expected::Error(error) => error,
            Expected::Value(_) => wrong_side("error", "a value"),
        }
    }

    /// Returns the value as an [`Optional`], discarding any error.
    pub fn ok(self) -> Optional<V> {
        match self {
            Expected::Value(value) => Optional::Value(value),
            Expected::Error(_) => Optional::Empty,
        }
    }

    pub const fn as_ref(&self) -> Expected<&V, &E> {
        match self {
            Expected::Value(value) => Expected::Value(value),
            Expected::Error(error) => Expected::Error(error),
        }
    }

    pub fn map<U, F: FnOnce(V) -> U>(self, f: F) -> Expected<U, E> {
        match self {
            Expected::Value(value) => Expected::Value(f(value)),
            Expected::Error(error) => Expected::Error(error),
        }
    }

    pub fn map_error<U, F: FnOnce(E) -> U>(self, f: F) -> Expected<V, U> {
        match self {
            Expected::Value(value) => Expected::Value(value),
            Expected::Error(error) => Expected::Error(f(error)),
        }
    }

    pub fn into_result(self) -> Result<V, E> {
        match self {
            Expected::Value(value) => Ok(value),
            Expected::Error(error) => Err(error),
        }
    }
}

#[cold]
#[track_caller]
fn wrong_side(wanted: &str, held: &str) -> ! {
    panic!("Attempted to read the {wanted} of an Expected holding {held}!")
}

impl<V, E> From<Unexpected<E>> for Expected<V, E> {
    fn from(value: Unexpected<E>) -> Self {
        Expected::Error(value.0)
    }
}

impl<V, E> From<Result<V, E>> for Expected<V, E> {
    fn from(value: Result<V, E>) -> Self {
        match value {
            Ok(value) => Expected::Value(value),
            Err(error) => Expected::Error(error),
        }
    }
}

impl<V, E> From<Expected<V, E>> for Result<V, E> {
    fn from(value: Expected<V, E>) -> Self {
        value.into_result()
    }
}

impl<V: Debug, E: Debug> Debug for Expected<V, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Expected::Error(error) => f.debug_tuple("Error").field(error).finish(),
        }
    }
}
