//! WOFF2 container serialization.

use std::iter::repeat_n;

use brotli::enc::BrotliEncoderParams;

use crate::{
    error::Result,
    sfnt::{Sfnt, aligned_len, write_u16, write_u32},
};

/// `wOF2` signature.
const SIGNATURE: u32 = 0x774F_4632;
const HEADER_LEN: usize = 48;
/// Transform version 3 for `glyf`/`loca`: table stored untransformed.
const NULL_TRANSFORM: u8 = 0b1100_0000;

/// Known table tags, indexed by their table directory flag value. Anything
/// else is written with flag 63 followed by the explicit tag.
const KNOWN_TAGS: &[[u8; 4]; 63] = &[
    *b"cmap", *b"head", *b"hhea", *b"hmtx", *b"maxp", *b"name", *b"OS/2", *b"post", *b"cvt ",
    *b"fpgm", *b"glyf", *b"loca", *b"prep", *b"CFF ", *b"VORG", *b"EBDT", *b"EBLC", *b"gasp",
    *b"hdmx", *b"kern", *b"LTSH", *b"PCLT", *b"VDMX", *b"vhea", *b"vmtx", *b"BASE", *b"GDEF",
    *b"GPOS", *b"GSUB", *b"EBSC", *b"JSTF", *b"MATH", *b"CBDT", *b"CBLC", *b"COLR", *b"CPAL",
    *b"SVG ", *b"sbix", *b"acnt", *b"avar", *b"bdat", *b"bloc", *b"bsln", *b"cvar", *b"fdsc",
    *b"feat", *b"fmtx", *b"fvar", *b"gvar", *b"hsty", *b"just", *b"lcar", *b"mort", *b"morx",
    *b"opbd", *b"prop", *b"trak", *b"Zapf", *b"Silf", *b"Glat", *b"Gloc", *b"Feat", *b"Sill",
];

/// Serializes an sfnt into a WOFF2 container: header, table directory, and a
/// single Brotli stream of the unpadded table data in directory order.
pub(crate) fn encode(sfnt: &Sfnt) -> Result<Vec<u8>> {
    // loca must immediately follow glyf in the directory.
    let mut order: Vec<usize> = (0..sfnt.tables.len()).collect();
    let glyf = order.iter().position(|&i| &sfnt.tables[i].tag == b"glyf");
    let loca = order.iter().position(|&i| &sfnt.tables[i].tag == b"loca");
    if let (Some(glyf_pos), Some(loca_pos)) = (glyf, loca) {
        let loca_idx = order.remove(loca_pos);
        let glyf_pos = if loca_pos < glyf_pos { glyf_pos - 1 } else { glyf_pos };
        order.insert(glyf_pos + 1, loca_idx);
    }

    let mut directory = Vec::new();
    for &i in &order {
        let table = &sfnt.tables[i];
        let flags = match &table.tag {
            b"glyf" => 10 | NULL_TRANSFORM,
            b"loca" => 11 | NULL_TRANSFORM,
            tag => KNOWN_TAGS.iter().position(|known| known == tag).map_or(63, |index| index as u8),
        };
        directory.push(flags);
        if flags == 63 {
            directory.extend_from_slice(&table.tag);
        }
        write_uint_base128(&mut directory, table.data.len() as u32);
    }

    let mut stream = Vec::new();
    for &i in &order {
        stream.extend_from_slice(&sfnt.tables[i].data);
    }
    let mut compressed = Vec::new();
    brotli::BrotliCompress(&mut &stream[..], &mut compressed, &BrotliEncoderParams::default())?;

    let total_sfnt_size = 12
        + 16 * sfnt.tables.len()
        + sfnt.tables.iter().map(|t| aligned_len(t.data.len())).sum::<usize>();
    let mut file_len = HEADER_LEN + directory.len() + compressed.len();
    if file_len % 4 != 0 {
        file_len += 4 - file_len % 4;
    }

    let mut buffer = Vec::with_capacity(file_len);
    write_u32(&mut buffer, SIGNATURE);
    write_u32(&mut buffer, sfnt.flavor);
    write_u32(&mut buffer, file_len as u32);
    write_u16(&mut buffer, sfnt.tables.len() as u16);
    write_u16(&mut buffer, 0); // reserved
    write_u32(&mut buffer, total_sfnt_size as u32);
    write_u32(&mut buffer, compressed.len() as u32);
    write_u32(&mut buffer, 0); // WOFF version
    write_u32(&mut buffer, 0); // metadata offset
    write_u32(&mut buffer, 0); // metadata length
    write_u32(&mut buffer, 0); // original metadata length
    write_u32(&mut buffer, 0); // private block offset
    write_u32(&mut buffer, 0); // private block length

    buffer.extend_from_slice(&directory);
    buffer.extend(compressed);
    if buffer.len() % 4 != 0 {
        buffer.extend(repeat_n(0u8, 4 - buffer.len() % 4));
    }
    Ok(buffer)
}

fn write_uint_base128(buffer: &mut Vec<u8>, value: u32) {
    if value >= 1 << 28 {
        buffer.push(0x80 | (value >> 28) as u8);
    }
    if value >= 1 << 21 {
        buffer.push(0x80 | (value >> 21) as u8);
    }
    if value >= 1 << 14 {
        buffer.push(0x80 | (value >> 14) as u8);
    }
    if value >= 1 << 7 {
        buffer.push(0x80 | (value >> 7) as u8);
    }
    buffer.push((value & 127) as u8);
}
