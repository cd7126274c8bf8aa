//! A from-scratch standard library split into independent epochs.
//!
//! # Epochs
//! Each epoch is a full, frozen copy of the library living under its own module, [`v2025`] and
//! [`v2026`]. The two copies share nothing, not even private helpers, and their APIs are
//! deliberately incompatible. Values cross from one epoch to the other only through raw
//! pointer/length pairs, for example a [`v2025::Bytes`] can be handed to
//! [`v2026::string::U8String::from_raw_parts`] via its `data()` and `size()`.
//!
//! Each epoch sits behind a Cargo feature of the same name. Both are enabled by default and either
//! one compiles without the other.
//!
//! # Error Handling
//! Ergonomic operations (pushing, indexing, dereferencing) panic with the message of a typed error
//! when used incorrectly. Every such operation has a fallible twin returning the error instead.
//! Errors are small structs implementing [`Error`](std::error::Error), composed into an enum per
//! epoch for static dispatch.
//!
//! A broken internal invariant is not an error: it is logged and the process aborts.
//!
//! # Logging
//! Allocation growth, table rehashes, tree rebalancing and sort fallbacks are reported through
//! [`tracing`] at `trace` and `debug` level. The library never installs a subscriber.
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

#[cfg(feature = "v2025")]
pub mod v2025;
#[cfg(feature = "v2026")]
pub mod v2026;
