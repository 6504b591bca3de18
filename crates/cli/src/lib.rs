//! font-extract CLI library.

pub mod cli;
pub mod config;
pub mod locate;
pub mod pipeline;
pub mod rewrite;
pub mod scan;

// Re-export from extracted crates for convenience
pub use font_extract_subsetter::{ICON_LAYOUT_FEATURES, Subsetter, glyph_count};
