//! Strings: the NUL-terminated byte string [`CString`], the validated UTF-8 string [`U8String`]
//! with its borrowed [`U8StringView`], and the code point machinery underneath them.
//!
//! # Validation
//! UTF-8 is validated strictly: overlong encodings, surrogates and values beyond U+10FFFF are all
//! rejected, so a [`U8String`] can always be read as a [`str`]. See [`utf8::validate`].
//!
//! # Casing
//! [`case::uppercase`] and [`case::lowercase`] map one code point to between one and three code
//! points, using tables generated from the Unicode database by `tools/gen_case_tables.py`.

pub mod case;
mod cstring;
mod tables;
mod tests;
mod u8string;
pub mod utf8;
mod view;

pub use cstring::*;
pub use u8string::*;
pub use view::*;
