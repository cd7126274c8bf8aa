use std::fmt::{self, Debug, Formatter};
use std::ops::{Deref, DerefMut};

use crate::v2026::error::EmptyCollection;
use crate::v2026::sum::Optional;
use crate::v2026::util::extension::ResultExtension;

/// An owning pointer to a single heap object, which may be empty. The representation is a single
/// pointer, with null meaning empty.
///
/// Dereferencing an empty UniquePtr panics, [`UniquePtr::get`] is the fallible alternative.
pub struct UniquePtr<T> {
    inner: Option<Box<T>>,
}

impl<T> UniquePtr<T> {
    /// Moves `value` onto the heap.
    pub fn new(value: T) -> UniquePtr<T> {
        UniquePtr {
            inner: Some(Box::new(value)),
        }
    }

    /// Creates an empty UniquePtr without allocating.
    pub const fn empty() -> UniquePtr<T> {
        UniquePtr {
            inner: None,
        }
    }

    pub const fn has_value(&self) -> bool {
        self.inner.is_some()
    }

    pub const fn is_empty(&self) -> bool {
        self.inner.is_none()
    }

    /// Returns a reference to the owned object, or an error if self is empty.
    pub fn get(&self) -> Result<&T, EmptyCollection> {
        self.inner.as_deref().ok_or(EmptyCollection)
    }

    /// Returns a mutable reference to the owned object, or an error if self is empty.
    pub fn get_mut(&mut self) -> Result<&mut T, EmptyCollection> {
        self.inner.as_deref_mut().ok_or(EmptyCollection)
    }

    /// Returns the owned object as an [`Optional`] reference.
    pub fn as_optional(&self) -> Optional<&T> {
        self.inner.as_deref().into()
    }

    /// Destroys the owned object, if any, leaving self empty.
    pub fn reset(&mut self) {
        self.inner = None;
    }

    /// Replaces the owned object with `value`. The previous object is destroyed only after the new
    /// one has been allocated.
    pub fn reset_with(&mut self, value: T) {
        self.inner = Some(Box::new(value));
    }

    /// Gives up ownership of the heap allocation, leaving self empty.
    pub fn release(&mut self) -> Option<Box<T>> {
        self.inner.take()
    }

    /// Moves the owned object off the heap, leaving self empty.
    pub fn take(&mut self) -> Option<T> {
        self.inner.take().map(|boxed| *boxed)
    }
}

impl<T> Default for UniquePtr<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Box<T>> for UniquePtr<T> {
    fn from(value: Box<T>) -> Self {
        UniquePtr {
            inner: Some(value),
        }
    }
}

impl<T> Deref for UniquePtr<T> {
    type Target = T;

    /// # Panics
    /// Panics if the UniquePtr is empty.
    fn deref(&self) -> &Self::Target {
        self.get().throw()
    }
}

impl<T> DerefMut for UniquePtr<T> {
    /// # Panics
    /// Panics if the UniquePtr is empty.
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.get_mut().throw()
    }
}

impl<T: Clone> Clone for UniquePtr<T> {
    fn clone(&self) -> Self {
        UniquePtr {
            inner: self.inner.clone(),
        }
    }
}

impl<T: PartialEq> PartialEq for UniquePtr<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T: Eq> Eq for UniquePtr<T> {}

impl<T: Debug> Debug for UniquePtr<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Some(value) => f.debug_tuple("UniquePtr").field(value).finish(),
            None => write!(f, "UniquePtr(<empty>)"),
        }
    }
}
