//! Icon reference scanning.

use std::{collections::BTreeSet, fs::read_to_string, path::Path};

use anyhow::{Context, Result};
use regex::Regex;

use crate::config::ScanTarget;

/// Collects the hex code points referenced by the target files.
///
/// Entries are the raw capture text, so `e88a` and `E88A` stay distinct
/// here even though they name the same glyph; [`to_code_points`] collapses
/// them. A file that yields no matches contributes nothing, but a missing
/// file is an error.
pub fn collect_references(source_root: &Path, targets: &[ScanTarget]) -> Result<BTreeSet<String>> {
    let mut references = BTreeSet::new();
    for target in targets {
        scan_file(source_root, target, &mut references)?;
    }
    Ok(references)
}

fn scan_file(
    source_root: &Path,
    target: &ScanTarget,
    references: &mut BTreeSet<String>,
) -> Result<()> {
    let path = source_root.join(target.path);
    let text =
        read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let pattern = Regex::new(target.pattern)
        .with_context(|| format!("Invalid scan pattern {:?}", target.pattern))?;

    for captures in pattern.captures_iter(&text) {
        if let Some(code_point) = captures.get(1) {
            references.insert(code_point.as_str().to_string());
        }
    }
    Ok(())
}

/// Parses raw hex references into numeric code points.
pub fn to_code_points(references: &BTreeSet<String>) -> Result<BTreeSet<u32>> {
    references
        .iter()
        .map(|hex| {
            u32::from_str_radix(hex, 16).with_context(|| format!("Invalid code point {hex:?}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs::{create_dir_all, write};

    use tempfile::TempDir;

    use super::*;
    use crate::config::SCAN_TARGETS;

    fn write_sources(root: &Path, symbols: &str, index: &str) {
        create_dir_all(root.join("common")).unwrap();
        create_dir_all(root.join("static")).unwrap();
        write(root.join("common/symbols.ts"), symbols).unwrap();
        write(root.join("static/index.html"), index).unwrap();
    }

    #[test]
    fn test_collects_from_both_sources() {
        let temp = TempDir::new().unwrap();
        write_sources(
            temp.path(),
            r"export const GEAR = '\u{e88a}';",
            "<span>&#xe5c4;</span>",
        );

        let references = collect_references(temp.path(), SCAN_TARGETS).unwrap();
        assert_eq!(references.len(), 2);
        assert!(references.contains("e88a"));
        assert!(references.contains("e5c4"));
    }

    #[test]
    fn test_duplicates_collapse() {
        let temp = TempDir::new().unwrap();
        write_sources(
            temp.path(),
            "const A = '\\u{e88a}';\nconst B = '\\u{e88a}';",
            "<span>&#xe88a;</span>",
        );

        let references = collect_references(temp.path(), SCAN_TARGETS).unwrap();
        assert_eq!(references.len(), 1);
    }

    #[test]
    fn test_case_variants_stay_distinct() {
        let temp = TempDir::new().unwrap();
        write_sources(
            temp.path(),
            "const A = '\\u{e88a}';\nconst B = '\\u{E88A}';",
            "<span>&#xe88a;</span>",
        );

        // Three spellings, two raw entries
        let references = collect_references(temp.path(), SCAN_TARGETS).unwrap();
        assert_eq!(references, BTreeSet::from(["E88A".to_string(), "e88a".to_string()]));

        // All of them name the same glyph
        let code_points = to_code_points(&references).unwrap();
        assert_eq!(code_points, BTreeSet::from([0xE88A]));
    }

    #[test]
    fn test_no_matches_is_empty_not_error() {
        let temp = TempDir::new().unwrap();
        write_sources(temp.path(), "export const NOTHING = 1;", "<p>plain</p>");

        let references = collect_references(temp.path(), SCAN_TARGETS).unwrap();
        assert!(references.is_empty());
    }

    #[test]
    fn test_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        create_dir_all(temp.path().join("common")).unwrap();
        write(temp.path().join("common/symbols.ts"), "").unwrap();

        let err = collect_references(temp.path(), SCAN_TARGETS).unwrap_err();
        assert!(err.to_string().contains("index.html"));
    }

    #[test]
    fn test_to_code_points_parses_hex() {
        let references =
            BTreeSet::from(["e88a".to_string(), "E88A".to_string(), "e5c4".to_string()]);

        let code_points = to_code_points(&references).unwrap();
        assert_eq!(code_points, BTreeSet::from([0xE5C4, 0xE88A]));
    }

    #[test]
    fn test_to_code_points_rejects_overlong_hex() {
        let references = BTreeSet::from(["ffffffffff".to_string()]);
        assert!(to_code_points(&references).is_err());
    }
}
