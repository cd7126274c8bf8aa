use std::fmt::{self, Debug, Formatter};
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use crate::v2026::error::EmptyCollection;
use crate::v2026::util::extension::ResultExtension;

/// A value which may be absent.
///
/// For reference and non-null pointer types the representation collapses to a single pointer,
/// with null as the empty state, so `size_of::<Optional<&T>>() == size_of::<&T>()`. Raw pointers
/// are handled through `Optional<NonNull<T>>`, see [`Optional::from_raw`].
///
/// Dereferencing an empty Optional panics with [`EmptyCollection`]. Use [`Optional::get`] to
/// handle absence.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Optional<T> {
    Empty,
    Value(T),
}

use Optional::{Empty, Value};

impl<T> Optional<T> {
    /// Creates an Optional holding `value`.
    pub const fn new(value: T) -> Optional<T> {
        Value(value)
    }

    pub const fn has_value(&self) -> bool {
        matches!(self, Value(_))
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self, Empty)
    }

    /// Returns a reference to the held value, or an error if there is none.
    pub const fn get(&self) -> Result<&T, EmptyCollection> {
        match self {
            Value(value) => Ok(value),
            Empty => Err(EmptyCollection),
        }
    }

    /// Returns a mutable reference to the held value, or an error if there is none.
    pub const fn get_mut(&mut self) -> Result<&mut T, EmptyCollection> {
        match self {
            Value(value) => Ok(value),
            Empty => Err(EmptyCollection),
        }
    }

    /// Consumes self, returning the held value.
    ///
    /// # Panics
    /// Panics if the Optional is empty.
    #[track_caller]
    pub fn unwrap(self) -> T {
        self.into_option().ok_or(EmptyCollection).throw()
    }

    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Value(value) => value,
            Empty => default,
        }
    }

    pub fn unwrap_or_else<F: FnOnce() -> T>(self, f: F) -> T {
        match self {
            Value(value) => value,
            Empty => f(),
        }
    }

    /// Destroys the held value, if any.
    pub fn reset(&mut self) {
        *self = Empty;
    }

    /// Takes the held value out, leaving self empty.
    pub const fn take(&mut self) -> Optional<T> {
        mem::replace(self, Empty)
    }

    /// Stores `value`, returning the previously held Optional.
    pub const fn replace(&mut self, value: T) -> Optional<T> {
        mem::replace(self, Value(value))
    }

    /// Stores `value` and returns a mutable reference to it. Any previous value is destroyed.
    pub fn insert(&mut self, value: T) -> &mut T {
        *self = Value(value);
        match self {
            Value(value) => value,
            Empty => unreachable!(),
        }
    }

    pub const fn as_ref(&self) -> Optional<&T> {
        match self {
            Value(value) => Value(value),
            Empty => Empty,
        }
    }

    pub const fn as_mut(&mut self) -> Optional<&mut T> {
        match self {
            Value(value) => Value(value),
            Empty => Empty,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Optional<U> {
        match self {
            Value(value) => Value(f(value)),
            Empty => Empty,
        }
    }

    pub fn and_then<U, F: FnOnce(T) -> Optional<U>>(self, f: F) -> Optional<U> {
        match self {
            Value(value) => f(value),
            Empty => Empty,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Value(value) => Some(value),
            Empty => None,
        }
    }
}

impl<T: Clone> Optional<&T> {
    pub fn cloned(self) -> Optional<T> {
        self.map(T::clone)
    }
}

impl<T: Copy> Optional<&T> {
    pub fn copied(self) -> Optional<T> {
        self.map(|value| *value)
    }
}

impl<T> Optional<NonNull<T>> {
    /// Wraps a raw pointer, treating null as the empty state.
    ///
    /// # Examples
    /// ```
    /// # use epoch_std::v2026::sum::Optional;
    /// let mut value = 5_u32;
    /// assert!(Optional::from_raw(&mut value as *mut u32).has_value());
    /// assert!(Optional::<std::ptr::NonNull<u32>>::from_raw(std::ptr::null_mut()).is_empty());
    /// ```
    pub fn from_raw(ptr: *mut T) -> Optional<NonNull<T>> {
        NonNull::new(ptr).into()
    }

    /// Returns the held pointer, or null if empty.
    pub fn as_ptr(&self) -> *mut T {
        match self {
            Value(ptr) => ptr.as_ptr(),
            Empty => std::ptr::null_mut(),
        }
    }
}

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Empty
    }
}

impl<T> From<T> for Optional<T> {
    fn from(value: T) -> Self {
        Value(value)
    }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Value(value),
            None => Empty,
        }
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(value: Optional<T>) -> Self {
        value.into_option()
    }
}

impl<T> Deref for Optional<T> {
    type Target = T;

    /// # Panics
    /// Panics if the Optional is empty.
    fn deref(&self) -> &Self::Target {
        self.get().throw()
    }
}

impl<T> DerefMut for Optional<T> {
    /// # Panics
    /// Panics if the Optional is empty.
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.get_mut().throw()
    }
}

impl<T> IntoIterator for Optional<T> {
    type Item = T;

    type IntoIter = std::option::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_option().into_iter()
    }
}

impl<T: Debug> Debug for Optional<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value(value) => f.debug_tuple("Value").field(value).finish(),
            Empty => write!(f, "Empty"),
        }
    }
}
