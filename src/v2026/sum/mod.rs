//! Sum types: [`Optional`] for nullable values, [`Expected`] for a value or an error, and the
//! [`Variant`] machinery behind [`variant!`](crate::v2026::variant).

mod expected;
mod optional;
mod tests;
mod variant;

pub use expected::*;
pub use optional::Optional;
pub use variant::*;
