//! Scan, subset, and stamp in one pass.

use std::{
    fs::{read, write},
    path::Path,
};

use anyhow::{Context, Result};
use chrono::Utc;
use font_extract_subsetter::{Subsetter, glyph_count};
use log::info;

use crate::{
    config::{REWRITE_RULES, SCAN_TARGETS, SOURCE_FONT, SUBSET_FONT},
    locate::find_source_root,
    rewrite::cache_bust,
    scan::{collect_references, to_code_points},
};

/// Runs the whole pipeline from the current working directory.
pub fn run() -> Result<()> {
    let source_root = find_source_root()?;
    info!("Source root: {}", source_root.display());
    run_from(&source_root)
}

/// Scans the tree under `source_root` for icon references, subsets the
/// icon font down to them, and stamps the files that load it.
///
/// The subset font is only written once subsetting succeeds, and the
/// stamping pass only runs once the subset font is on disk.
pub fn run_from(source_root: &Path) -> Result<()> {
    let references = collect_references(source_root, SCAN_TARGETS)?;
    println!("Generating font file for {} glyphs", references.len());

    let code_points = to_code_points(&references)?;

    let input = source_root.join(SOURCE_FONT);
    let output = source_root.join(SUBSET_FONT);

    let data = read(&input).with_context(|| format!("Failed to read {}", input.display()))?;
    let sfnt = font_extract_woff2::decompress(&data)
        .with_context(|| format!("Failed to decode {}", input.display()))?;

    let subset = Subsetter::new().with_code_points(code_points).subset(&sfnt)?;

    let packed =
        font_extract_woff2::compress(&subset).context("Failed to encode subset font")?;
    write(&output, &packed).with_context(|| format!("Failed to write {}", output.display()))?;

    let glyphs_kept = glyph_count(&subset)?;
    let input_size = data.len() as f64 / 1024.0;
    let output_size = packed.len() as f64 / 1024.0;
    info!(
        "Subset {} -> {} ({input_size:.1} KB -> {output_size:.1} KB, {glyphs_kept} glyphs kept)",
        input.file_name().unwrap_or_default().to_string_lossy(),
        output.file_name().unwrap_or_default().to_string_lossy(),
    );

    cache_bust(source_root, REWRITE_RULES, Utc::now().timestamp())
}
