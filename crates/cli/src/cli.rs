//! CLI definition and dispatch.

use anyhow::Result;
use clap::Parser;

use crate::pipeline;

/// The tool takes no arguments; everything it needs is located relative
/// to the enclosing `src` directory.
#[derive(Parser)]
#[command(name = "font-extract")]
#[command(about = "Subset the icon font to the glyphs the site references")]
pub struct Cli {}

impl Cli {
    pub fn run(self) -> Result<()> {
        pipeline::run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_without_arguments() {
        assert!(Cli::try_parse_from(["font-extract"]).is_ok());
    }

    #[test]
    fn test_rejects_stray_arguments() {
        assert!(Cli::try_parse_from(["font-extract", "extra"]).is_err());
    }
}
