//! WOFF2 container codec for font byte streams.
//!
//! HarfBuzz subsetting operates on raw sfnt data, while the fonts this
//! pipeline consumes and produces are WOFF2. [`decompress`] unpacks a font
//! container into an sfnt stream and [`compress`] wraps an sfnt back into a
//! WOFF2 file.
//!
//! # Example
//!
//! ```no_run
//! let font_data: &[u8] = &[];
//! let sfnt = font_extract_woff2::decompress(font_data);
//! let woff2 = font_extract_woff2::compress(font_data);
//! ```

use allsorts::{binary::read::ReadScope, font_data::FontData, tables::FontTableProvider};

mod error;
mod sfnt;
mod woff2;

pub use error::{Error, Result};

use crate::sfnt::{Sfnt, Table};

/// Unpacks font data (WOFF2, WOFF, or plain sfnt) into a raw sfnt byte
/// stream with a rebuilt table directory and checksums.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let font_data = ReadScope::new(data).read::<FontData>()?;
    let provider = font_data.table_provider(0)?;
    let tags = provider.table_tags().ok_or(Error::NoTables)?;

    let mut tables = Vec::with_capacity(tags.len());
    for tag in tags {
        let data = provider.read_table_data(tag)?;
        tables.push(Table { tag: tag.to_be_bytes(), data: data.into_owned() });
    }
    if tables.is_empty() {
        return Err(Error::NoTables);
    }
    Ok(Sfnt::new(tables).build())
}

/// Wraps a raw sfnt byte stream into a WOFF2 container.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let sfnt = Sfnt::parse(data)?;
    woff2::encode(&sfnt)
}

#[cfg(test)]
mod tests {
    use read_fonts::FontRef;

    use super::*;

    fn assert_same_tables(original: &Sfnt, rebuilt: &Sfnt) {
        assert_eq!(original.tables.len(), rebuilt.tables.len());
        for table in &original.tables {
            let restored = rebuilt
                .tables
                .iter()
                .find(|t| t.tag == table.tag)
                .unwrap_or_else(|| panic!("missing table {:?}", table.tag));
            if &table.tag == b"head" {
                // checksumAdjustment is recomputed when the sfnt is rebuilt.
                assert_eq!(table.data[..8], restored.data[..8]);
                assert_eq!(table.data[12..], restored.data[12..]);
            } else {
                assert_eq!(table.data, restored.data, "table {:?} changed", table.tag);
            }
        }
    }

    #[test]
    fn test_roundtrip_synthetic_font() {
        let sfnt = Sfnt::new(vec![
            Table { tag: *b"cmap", data: vec![0, 0, 0, 1, 0, 3] },
            Table { tag: *b"maxp", data: vec![0; 32] },
            Table { tag: *b"DSIG", data: vec![7; 9] },
        ]);
        let original = sfnt.build();

        let woff2 = compress(&original).unwrap();
        assert_eq!(&woff2[0..4], b"wOF2");

        let rebuilt = decompress(&woff2).unwrap();
        assert_same_tables(&Sfnt::parse(&original).unwrap(), &Sfnt::parse(&rebuilt).unwrap());
    }

    #[test]
    fn test_roundtrip_real_font() {
        let original = font_test_data::CMAP12_FONT1;
        let woff2 = compress(original).unwrap();
        let rebuilt = decompress(&woff2).unwrap();

        assert_same_tables(&Sfnt::parse(original).unwrap(), &Sfnt::parse(&rebuilt).unwrap());
        assert!(FontRef::new(&rebuilt).is_ok());
    }

    #[test]
    fn test_decompress_passes_through_plain_sfnt() {
        let rebuilt = decompress(font_test_data::CMAP12_FONT1).unwrap();
        assert!(FontRef::new(&rebuilt).is_ok());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(decompress(b"definitely not a font").is_err());
        assert!(compress(b"definitely not a font").is_err());
        assert!(decompress(&[]).is_err());
    }
}
