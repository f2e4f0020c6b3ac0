//! Utility functions

pub mod format;
pub mod natural_sort;
pub mod text;

pub use format::{format_float, format_percent, format_seconds, round_to};
pub use natural_sort::{natural_key, NaturalChunk};
pub use text::decode_text;
