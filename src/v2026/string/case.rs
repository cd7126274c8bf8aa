use std::iter::FusedIterator;

use super::tables::{LOWERCASE_MULTI, LOWERCASE_SINGLE, UPPERCASE_MULTI, UPPERCASE_SINGLE};
use crate::v2026::algorithm::lower_bound_by;

/// The case mapping of a single code point: between one and three code points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseMapping {
    chars: [char; 3],
    len: usize,
    pos: usize,
}

impl CaseMapping {
    const fn one(codepoint: char) -> CaseMapping {
        CaseMapping {
            chars: [codepoint, '\0', '\0'],
            len: 1,
            pos: 0,
        }
    }

    /// Unused trailing slots of a table entry are NUL.
    fn from_entry(chars: [char; 3]) -> CaseMapping {
        CaseMapping {
            chars,
            len: chars.iter().take_while(|c| **c != '\0').count(),
            pos: 0,
        }
    }

    /// Returns the code points not yet yielded.
    pub fn as_slice(&self) -> &[char] {
        &self.chars[self.pos..self.len]
    }
}

impl Iterator for CaseMapping {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos == self.len {
            return None;
        }
        self.pos += 1;
        Some(self.chars[self.pos - 1])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len - self.pos, Some(self.len - self.pos))
    }
}

impl ExactSizeIterator for CaseMapping {}

impl FusedIterator for CaseMapping {}

/// Maps `codepoint` to upper case. Code points without an upper case form map to themselves.
///
/// # Examples
/// ```
/// # use epoch_std::v2026::string::case::uppercase;
/// assert_eq!(uppercase('ä').as_slice(), &['Ä']);
/// assert_eq!(uppercase('ß').as_slice(), &['S', 'S']);
/// assert_eq!(uppercase('7').as_slice(), &['7']);
/// ```
pub fn uppercase(codepoint: char) -> CaseMapping {
    if codepoint.is_ascii() {
        return CaseMapping::one(codepoint.to_ascii_uppercase());
    }
    map_case(codepoint, &UPPERCASE_MULTI, &UPPERCASE_SINGLE)
}

/// Maps `codepoint` to lower case. Code points without a lower case form map to themselves.
pub fn lowercase(codepoint: char) -> CaseMapping {
    if codepoint.is_ascii() {
        return CaseMapping::one(codepoint.to_ascii_lowercase());
    }
    map_case(codepoint, &LOWERCASE_MULTI, &LOWERCASE_SINGLE)
}

/// One-to-many mappings take precedence over single ones.
fn map_case(codepoint: char, multi: &[(char, [char; 3])], single: &[(char, char)]) -> CaseMapping {
    let pos = lower_bound_by(multi, &codepoint, |entry, key| entry.0 < *key);
    if let Some((from, to)) = multi.get(pos) {
        if *from == codepoint {
            return CaseMapping::from_entry(*to);
        }
    }
    let pos = lower_bound_by(single, &codepoint, |entry, key| entry.0 < *key);
    match single.get(pos) {
        Some((from, to)) if *from == codepoint => CaseMapping::one(*to),
        _ => CaseMapping::one(codepoint),
    }
}
