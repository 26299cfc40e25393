//! Unicode utilities for grapheme handling.

mod grapheme;

pub use grapheme::{last_grapheme_char_len, last_grapheme_start};
