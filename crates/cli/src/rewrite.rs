//! Cache-busting rewrites for files that load the subset font.

use std::{
    fs::{read_to_string, write},
    path::Path,
};

use anyhow::{Context, Result};
use regex::Regex;

use crate::config::RewriteRule;

/// Stamps every asset reference the rules describe with a `?timestamp`
/// query string.
///
/// All rules share the one timestamp so a single run stamps every file
/// identically. A file with no matching reference is rewritten unchanged.
/// The first failure aborts the pass; files already rewritten keep their
/// new stamp.
pub fn cache_bust(source_root: &Path, rules: &[RewriteRule], timestamp: i64) -> Result<()> {
    for rule in rules {
        let path = source_root.join(rule.path);
        apply_rule(&path, rule, timestamp)?;
        println!("Updated {}", path.display());
    }
    Ok(())
}

fn apply_rule(path: &Path, rule: &RewriteRule, timestamp: i64) -> Result<()> {
    let text =
        read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let pattern = Regex::new(rule.find)
        .with_context(|| format!("Invalid rewrite pattern {:?}", rule.find))?;

    let rewritten = pattern.replace_all(&text, format!("${{1}}?{timestamp}"));
    write(path, rewritten.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
