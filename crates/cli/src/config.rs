//! Configuration constants for the font-extract pipeline.

/// Directory name that marks the project source root.
pub const SOURCE_ROOT_MARKER: &str = "src";

/// Icon font shipped with the site, relative to the source root.
pub const SOURCE_FONT: &str = "static/material-icons-outlined.woff2";

/// Subset font written by the pipeline, relative to the source root.
pub const SUBSET_FONT: &str = "static/subset.woff2";

/// A file scanned for icon references.
pub struct ScanTarget {
    /// Path relative to the source root.
    pub path: &'static str,
    /// Pattern whose first capture group is a hex code point.
    pub pattern: &'static str,
}

/// Files that reference icons by code point.
pub const SCAN_TARGETS: &[ScanTarget] = &[
    ScanTarget {
        path: "common/symbols.ts",
        pattern: r"\\u\{([0-9A-Fa-f]+)\}",
    },
    ScanTarget {
        path: "static/index.html",
        pattern: r"&#x([0-9A-Fa-f]+);",
    },
];

/// A cache-busting substitution applied after the subset font is written.
pub struct RewriteRule {
    /// Path relative to the source root.
    pub path: &'static str,
    /// Pattern whose first capture group is the asset reference to re-stamp.
    pub find: &'static str,
}

/// Files whose asset references get a fresh timestamp query string.
pub const REWRITE_RULES: &[RewriteRule] = &[
    RewriteRule {
        path: "static/style.css",
        find: r"(url\(subset\.woff2)[^)]*",
    },
    RewriteRule {
        path: "static/index.html",
        find: r#"(href="style\.css)[^"]*"#,
    },
];
