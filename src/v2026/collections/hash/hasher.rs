//! The default hash algorithm of the hashing containers.
//!
//! Any [`Hash`](std::hash::Hash) type can be fed into a [`SimpleHasher`]. Integers and pointers
//! arrive as their raw native-endian bytes through the default [`Hasher`] methods, so every value
//! is reduced to a stream of bytes.

use std::hash::{BuildHasher, Hasher};

const MULTIPLIER: u64 = 13;

/// A multiply-xor hash, `state = 13 * state ^ byte` for every byte written.
///
/// This is not a cryptographic hash and it makes no attempt to resist collisions on its own; the
/// maps mix a per-instance salt into every key instead.
///
/// # Examples
/// ```
/// # use epoch_std::v2026::collections::hash::SimpleHasher;
/// use std::hash::Hasher;
///
/// let mut hasher = SimpleHasher::default();
/// hasher.write(&[1, 2]);
/// assert_eq!(hasher.finish(), (1 * 13) ^ 2);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimpleHasher {
    state: u64,
}

impl Hasher for SimpleHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.state = self.state.wrapping_mul(MULTIPLIER) ^ u64::from(*byte);
        }
    }
}

/// Builds a fresh [`SimpleHasher`] for every key.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimpleHashBuilder;

impl BuildHasher for SimpleHashBuilder {
    type Hasher = SimpleHasher;

    fn build_hasher(&self) -> Self::Hasher {
        SimpleHasher::default()
    }
}

#[cfg(test)]
mod tests {
    use std::hash::{BuildHasher, Hasher};

    use super::*;

    #[test]
    fn test_multiply_xor() {
        let mut hasher = SimpleHasher::default();
        assert_eq!(hasher.finish(), 0, "An empty stream should hash to zero.");

        hasher.write(&[3, 7, 255]);
        let expected = ((3_u64 * 13) ^ 7).wrapping_mul(13) ^ 255;
        assert_eq!(hasher.finish(), expected);
    }

    #[test]
    fn test_integers_feed_raw_bytes() {
        let builder = SimpleHashBuilder;
        let mut by_bytes = builder.build_hasher();
        by_bytes.write(&0xdead_beef_u32.to_ne_bytes());
        assert_eq!(
            builder.hash_one(0xdead_beef_u32),
            by_bytes.finish(),
            "Hashing an integer should be the same as writing its native bytes."
        );
    }
}
