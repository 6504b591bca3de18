//! Raw sfnt table streams: parsing and serialization.

use std::iter::repeat_n;

use crate::error::{Error, Result};

/// TrueType-flavoured sfnt version.
pub(crate) const SFNT_VERSION_TRUETYPE: u32 = 0x0001_0000;
/// CFF-flavoured sfnt version (`OTTO`).
pub(crate) const SFNT_VERSION_CFF: u32 = u32::from_be_bytes(*b"OTTO");

/// Offset of `checksumAdjustment` within the `head` table.
const HEAD_CHECKSUM_OFFSET: usize = 8;
/// The whole-font checksum target mandated by the sfnt format.
const CHECKSUM_MAGIC: u32 = 0xB1B0_AFBA;

const HEADER_LEN: usize = 12;
const RECORD_LEN: usize = 16;

/// A single font table: tag plus raw contents.
#[derive(Debug, Clone)]
pub(crate) struct Table {
    pub(crate) tag: [u8; 4],
    pub(crate) data: Vec<u8>,
}

/// An sfnt font reduced to its flavor and a flat list of tables.
#[derive(Debug, Clone)]
pub(crate) struct Sfnt {
    pub(crate) flavor: u32,
    pub(crate) tables: Vec<Table>,
}

impl Sfnt {
    /// Builds an `Sfnt` from bare tables, inferring the flavor from the
    /// presence of a CFF outline table.
    pub(crate) fn new(tables: Vec<Table>) -> Self {
        let has_cff = tables
            .iter()
            .any(|table| &table.tag == b"CFF " || &table.tag == b"CFF2");
        let flavor = if has_cff { SFNT_VERSION_CFF } else { SFNT_VERSION_TRUETYPE };
        Self { flavor, tables }
    }

    /// Parses an sfnt header and table directory, copying out each table.
    pub(crate) fn parse(data: &[u8]) -> Result<Self> {
        let mut header = data;
        let flavor = read_u32(&mut header)?;
        if flavor != SFNT_VERSION_TRUETYPE && flavor != SFNT_VERSION_CFF {
            return Err(Error::UnsupportedVersion(flavor));
        }
        let table_count = read_u16(&mut header)?;
        skip(&mut header, 6)?; // searchRange, entrySelector, rangeShift

        let mut tables = Vec::with_capacity(usize::from(table_count));
        for _ in 0..table_count {
            let tag = read_u32(&mut header)?;
            skip(&mut header, 4)?; // checksum
            let offset = read_u32(&mut header)? as usize;
            let length = read_u32(&mut header)? as usize;
            let bytes = data.get(offset..offset + length).ok_or(Error::Truncated)?;
            tables.push(Table { tag: tag.to_be_bytes(), data: bytes.to_vec() });
        }
        if tables.is_empty() {
            return Err(Error::NoTables);
        }
        Ok(Self { flavor, tables })
    }

    /// Serializes the tables back into an sfnt byte stream: header, tag-sorted
    /// directory, 4-byte-aligned table data, freshly computed checksums, and a
    /// repatched `head.checksumAdjustment`.
    pub(crate) fn build(&self) -> Vec<u8> {
        let mut order: Vec<usize> = (0..self.tables.len()).collect();
        order.sort_unstable_by_key(|&i| self.tables[i].tag);

        let table_count = self.tables.len() as u16;
        let data_offset = HEADER_LEN + self.tables.len() * RECORD_LEN;
        let total_len = data_offset
            + self.tables.iter().map(|t| aligned_len(t.data.len())).sum::<usize>();

        let mut buffer = Vec::with_capacity(total_len);
        write_u32(&mut buffer, self.flavor);
        write_u16(&mut buffer, table_count);
        let entry_selector = table_count.ilog2() as u16;
        let search_range = 1 << (4 + entry_selector);
        write_u16(&mut buffer, search_range);
        write_u16(&mut buffer, entry_selector);
        write_u16(&mut buffer, 16 * table_count - search_range);

        let mut head_offset = None;
        let mut offset = data_offset;
        for &i in &order {
            let table = &self.tables[i];
            if &table.tag == b"head" {
                head_offset = Some(offset);
            }
            buffer.extend_from_slice(&table.tag);
            write_u32(&mut buffer, table_checksum(table));
            write_u32(&mut buffer, offset as u32);
            write_u32(&mut buffer, table.data.len() as u32);
            offset += aligned_len(table.data.len());
        }

        for &i in &order {
            let data = &self.tables[i].data;
            buffer.extend_from_slice(data);
            buffer.extend(repeat_n(0u8, aligned_len(data.len()) - data.len()));
        }

        // The adjustment is defined over the whole font with the field zeroed.
        if let Some(head_offset) = head_offset {
            let field = head_offset + HEAD_CHECKSUM_OFFSET;
            if field + 4 <= buffer.len() {
                buffer[field..field + 4].copy_from_slice(&[0; 4]);
                let adjustment = CHECKSUM_MAGIC.wrapping_sub(checksum(&buffer));
                buffer[field..field + 4].copy_from_slice(&adjustment.to_be_bytes());
            }
        }
        buffer
    }
}

/// Standard sfnt checksum: wrapping sum of big-endian u32 words, with the
/// trailing partial word zero-padded.
pub(crate) fn checksum(data: &[u8]) -> u32 {
    let mut sum = 0u32;
    for chunk in data.chunks(4) {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum = sum.wrapping_add(u32::from_be_bytes(word));
    }
    sum
}

/// Table checksum for the directory; `head` is summed with its
/// `checksumAdjustment` field zeroed.
fn table_checksum(table: &Table) -> u32 {
    if &table.tag == b"head" && table.data.len() >= HEAD_CHECKSUM_OFFSET + 4 {
        let mut data = table.data.clone();
        data[HEAD_CHECKSUM_OFFSET..HEAD_CHECKSUM_OFFSET + 4].copy_from_slice(&[0; 4]);
        checksum(&data)
    } else {
        checksum(&table.data)
    }
}

pub(crate) fn aligned_len(len: usize) -> usize {
    len.div_ceil(4) * 4
}

pub(crate) fn write_u16(buffer: &mut Vec<u8>, value: u16) {
    buffer.extend_from_slice(&value.to_be_bytes());
}

pub(crate) fn write_u32(buffer: &mut Vec<u8>, value: u32) {
    buffer.extend_from_slice(&value.to_be_bytes());
}

fn read_u16(bytes: &mut &[u8]) -> Result<u16> {
    let [a, b, rest @ ..] = bytes else {
        return Err(Error::Truncated);
    };
    *bytes = rest;
    Ok(u16::from_be_bytes([*a, *b]))
}

fn read_u32(bytes: &mut &[u8]) -> Result<u32> {
    let [a, b, c, d, rest @ ..] = bytes else {
        return Err(Error::Truncated);
    };
    *bytes = rest;
    Ok(u32::from_be_bytes([*a, *b, *c, *d]))
}

fn skip(bytes: &mut &[u8], n: usize) -> Result<()> {
    if bytes.len() < n {
        return Err(Error::Truncated);
    }
    *bytes = &bytes[n..];
    Ok(())
}
