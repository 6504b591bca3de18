//! Code-point font subsetting wrapper around hb-subset with builder pattern.
//!
//! This crate provides a high-level interface for subsetting a font down to an
//! explicit set of Unicode code points using HarfBuzz's hb-subset library. It
//! operates purely on byte slices with no file I/O dependencies.
//!
//! # Example
//!
//! ```no_run
//! use font_extract_subsetter::Subsetter;
//!
//! let font_data: &[u8] = &[];
//! let subset = Subsetter::new()
//!     .with_code_points([0xE88A, 0xE5C4])
//!     .subset(font_data);
//! ```

use anyhow::{Context, Result, bail};
use hb_subset::{Blob, FontFace, SubsetInput, Tag};
use read_fonts::{FontRef, TableProvider};

/// Layout features to retain during subsetting.
///
/// Icon fonts resolve ligature names to glyphs through `liga` and compose
/// marks through `ccmp`; everything else can be dropped.
pub const ICON_LAYOUT_FEATURES: &[&[u8; 4]] = &[b"ccmp", b"liga"];

/// Font subsetter with builder pattern.
///
/// Provides a flexible way to configure font subsetting options before
/// performing the subset operation.
#[derive(Default)]
pub struct Subsetter {
    code_points: Vec<u32>,
    retain_glyph_names: bool,
    layout_features: Vec<[u8; 4]>,
}

impl Subsetter {
    /// Creates a new subsetter with default settings.
    ///
    /// Default settings use the standard [`ICON_LAYOUT_FEATURES`] and do not
    /// retain glyph names.
    pub fn new() -> Self {
        Self {
            layout_features: ICON_LAYOUT_FEATURES.iter().map(|f| **f).collect(),
            ..Default::default()
        }
    }

    /// Adds Unicode code points to include in the subset.
    pub fn with_code_points(mut self, code_points: impl IntoIterator<Item = u32>) -> Self {
        self.code_points.extend(code_points);
        self
    }

    /// Sets whether to retain glyph names in the subset.
    ///
    /// Glyph names can be useful for debugging but increase file size.
    pub fn retain_glyph_names(mut self, retain: bool) -> Self {
        self.retain_glyph_names = retain;
        self
    }

    /// Sets the layout features to retain in the subset.
    ///
    /// Replaces any previously configured layout features.
    pub fn with_layout_features(
        mut self,
        features: impl IntoIterator<Item = [u8; 4]>,
    ) -> Self {
        self.layout_features = features.into_iter().collect();
        self
    }

    /// Subsets the font data and returns the result.
    ///
    /// # Arguments
    ///
    /// * `data` - The raw font file data
    ///
    /// # Returns
    ///
    /// The subset font data as a byte vector, or an error if the code point
    /// set is empty or subsetting fails.
    pub fn subset(&self, data: &[u8]) -> Result<Vec<u8>> {
        if self.code_points.is_empty() {
            bail!("No code points to subset");
        }

        let mut input = SubsetInput::new()?;

        if self.retain_glyph_names {
            input.flags().retain_glyph_names();
        }

        {
            let mut feature_set = input.layout_feature_tag_set();
            for tag in &self.layout_features {
                feature_set.insert(Tag::new(tag));
            }
        }

        {
            let mut unicode_set = input.unicode_set();
            for cp in &self.code_points {
                if let Some(c) = char::from_u32(*cp) {
                    unicode_set.insert(c);
                }
            }
        }

        let font = FontFace::new(Blob::from_bytes(data)?)?;
        let subset_font = input.subset_font(&font)?;
        Ok(subset_font.underlying_blob().to_vec())
    }
}

/// Returns the number of glyphs in a font.
///
/// # Arguments
///
/// * `data` - The raw font file data
pub fn glyph_count(data: &[u8]) -> Result<u16> {
    let font = FontRef::new(data).context("Failed to parse font")?;
    let maxp = font.maxp().context("Failed to read maxp table")?;
    Ok(maxp.num_glyphs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_layout_features_count() {
        assert_eq!(ICON_LAYOUT_FEATURES.len(), 2);
    }

    #[test]
    fn test_builder_chain() {
        let subsetter = Subsetter::new()
            .with_code_points([0xE88A, 0xE5C4])
            .retain_glyph_names(true)
            .with_layout_features([*b"kern", *b"liga"]);

        assert!(subsetter.retain_glyph_names);
        assert_eq!(subsetter.code_points.len(), 2);
        assert_eq!(subsetter.layout_features.len(), 2);
    }

    #[test]
    fn test_defaults_drop_glyph_names() {
        let subsetter = Subsetter::new();
        assert!(!subsetter.retain_glyph_names);
        assert_eq!(subsetter.layout_features.len(), ICON_LAYOUT_FEATURES.len());
    }

    #[test]
    fn test_empty_code_points_is_error() {
        let result = Subsetter::new().subset(&[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_glyph_count_rejects_garbage() {
        assert!(glyph_count(b"not a font").is_err());
    }
}
