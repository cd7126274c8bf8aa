use std::any;

use crate::v2026::error::BadVariantAccess;
use crate::v2026::util::extension::OptionExtension;

/// The largest number of alternatives a single variant may declare.
pub const MAX_ALTERNATIVES: usize = 30;

/// A tagged union over a fixed set of distinct alternative types, declared with [`variant!`].
///
/// Exactly one alternative is live at any time and [`Variant::index`] always names it. Typed
/// access goes through the [`Alternative`] implementation generated for every alternative type, so
/// asking for a type the variant can't hold is a compile error, while asking for one it doesn't
/// currently hold is a [`BadVariantAccess`].
///
/// [`variant!`]: crate::v2026::variant
pub trait Variant: Sized {
    /// The number of declared alternatives.
    const ALTERNATIVES: usize;

    /// Returns the position of the live alternative in the declaration.
    fn index(&self) -> usize;

    /// Returns the type name of the live alternative.
    fn held_type_name(&self) -> &'static str;

    /// Returns true if the live alternative is a `T`.
    fn contains<T>(&self) -> bool
    where
        Self: Alternative<T>,
    {
        self.index() == <Self as Alternative<T>>::INDEX
    }

    /// Returns a reference to the live alternative as a `T`, or an error if it is another type.
    fn get<T>(&self) -> Result<&T, BadVariantAccess>
    where
        Self: Alternative<T>,
    {
        self.as_alt().ok_or_else(|| BadVariantAccess {
            expected: any::type_name::<T>(),
            held: self.held_type_name(),
        })
    }

    /// Returns a mutable reference to the live alternative as a `T`, or an error if it is another
    /// type.
    fn get_mut<T>(&mut self) -> Result<&mut T, BadVariantAccess>
    where
        Self: Alternative<T>,
    {
        let held = self.held_type_name();
        self.as_alt_mut().ok_or(BadVariantAccess {
            expected: any::type_name::<T>(),
            held,
        })
    }

    /// Returns a reference to the live alternative as a `T` without checking the tag.
    ///
    /// # Safety
    /// The caller must ensure that `self.contains::<T>()`.
    unsafe fn get_unchecked<T>(&self) -> &T
    where
        Self: Alternative<T>,
    {
        // SAFETY: The caller guarantees that the live alternative is a T.
        unsafe { self.as_alt().unreachable() }
    }

    /// Destroys the live alternative and replaces it with `value`, returning a reference to the new
    /// contents.
    fn insert<T>(&mut self, value: T) -> &mut T
    where
        Self: Alternative<T>,
    {
        *self = Self::from_alt(value);
        // SAFETY: self has just been replaced with a T alternative.
        unsafe { self.as_alt_mut().unreachable() }
    }

    /// Replaces self with a clone of `other`. The clone is built before the current alternative
    /// is destroyed, so if cloning panics self is left unchanged.
    fn assign_from(&mut self, other: &Self)
    where
        Self: Clone,
    {
        let temp = other.clone();
        *self = temp;
    }
}

/// Typed access to one alternative `T` of a [`Variant`]. Implemented by [`variant!`] for every
/// declared alternative.
///
/// [`variant!`]: crate::v2026::variant
pub trait Alternative<T>: Variant {
    /// The declaration index of `T`.
    const INDEX: usize;

    fn from_alt(value: T) -> Self;

    fn as_alt(&self) -> Option<&T>;

    fn as_alt_mut(&mut self) -> Option<&mut T>;

    /// Moves the alternative out if it is a `T`, or hands self back otherwise.
    fn into_alt(self) -> Result<T, Self>;
}

/// Declares an enum implementing [`Variant`](crate::v2026::sum::Variant) over up to
/// [`MAX_ALTERNATIVES`](crate::v2026::sum::MAX_ALTERNATIVES) alternatives.
///
/// Each alternative is a named tuple variant with a single field, and the field types must be
/// distinct (a repeated type is rejected at compile time by conflicting implementations). The
/// generated type gets [`From`] for every alternative type and a [`Default`] holding the default
/// of the first alternative, which therefore has to implement [`Default`]. Attributes on the enum,
/// such as derives, are passed through.
///
/// # Examples
/// ```
/// # use epoch_std::v2026::variant;
/// # use epoch_std::v2026::sum::Variant;
/// variant! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub enum Scalar {
///         Int(i64),
///         Float(f64),
///     }
/// }
///
/// let mut value = Scalar::default();
/// assert!(value.contains::<i64>());
/// value.insert(2.5_f64);
/// assert_eq!(value.get::<f64>(), Ok(&2.5));
/// assert!(value.get::<i64>().is_err());
/// ```
#[macro_export]
#[doc(hidden)]
macro_rules! __v2026_variant {
    (@default $name:ident, $first:ident($first_ty:ty) $(, $rest:ident($rest_ty:ty))*) => {
        impl ::core::default::Default for $name {
            fn default() -> Self {
                $name::$first(<$first_ty as ::core::default::Default>::default())
            }
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($alt:ident($ty:ty)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $($alt($ty),)+
        }

        const _: () = {
            #[allow(non_camel_case_types, dead_code)]
            enum __Tag {
                $($alt,)+
            }

            const COUNT: usize = [$(__Tag::$alt as usize),+].len();

            assert!(
                COUNT <= $crate::v2026::sum::MAX_ALTERNATIVES,
                "A variant may declare at most MAX_ALTERNATIVES alternatives."
            );

            impl $crate::v2026::sum::Variant for $name {
                const ALTERNATIVES: usize = COUNT;

                fn index(&self) -> usize {
                    match self {
                        $($name::$alt(_) => __Tag::$alt as usize,)+
                    }
                }

                fn held_type_name(&self) -> &'static str {
                    match self {
                        $($name::$alt(_) => ::core::any::type_name::<$ty>(),)+
                    }
                }
            }

            $(
                impl $crate::v2026::sum::Alternative<$ty> for $name {
                    const INDEX: usize = __Tag::$alt as usize;

                    fn from_alt(value: $ty) -> Self {
                        $name::$alt(value)
                    }

                    #[allow(unreachable_patterns)]
                    fn as_alt(&self) -> ::core::option::Option<&$ty> {
                        match self {
                            $name::$alt(value) => ::core::option::Option::Some(value),
                            _ => ::core::option::Option::None,
                        }
                    }

                    #[allow(unreachable_patterns)]
                    fn as_alt_mut(&mut self) -> ::core::option::Option<&mut $ty> {
                        match self {
                            $name::$alt(value) => ::core::option::Option::Some(value),
                            _ => ::core::option::Option::None,
                        }
                    }

                    #[allow(unreachable_patterns)]
                    fn into_alt(self) -> ::core::result::Result<$ty, Self> {
                        match self {
                            $name::$alt(value) => ::core::result::Result::Ok(value),
                            other => ::core::result::Result::Err(other),
                        }
                    }
                }

                impl ::core::convert::From<$ty> for $name {
                    fn from(value: $ty) -> Self {
                        $name::$alt(value)
                    }
                }
            )+

            $crate::__v2026_variant!(@default $name, $($alt($ty)),+);
        };
    };
}
