//! Open-addressed hashing containers: [`HashMap`], the key-only [`HashSet`] and the default
//! [`SimpleHasher`] they hash with.

pub mod hasher;
pub mod map;
pub mod set;

#[doc(inline)]
pub use hasher::{SimpleHashBuilder, SimpleHasher};
#[doc(inline)]
pub use map::HashMap;
#[doc(inline)]
pub use set::HashSet;
