//! Command-line configuration for the `tiff-metadata` tool.
//!
//! Every subcommand reads a JSON metadata dump (see [`crate::dump`]).
//!
//! # Environment Variables
//!
//! - `TIFF_METADATA_BYTE_ORDER` - Target byte order for `rewrite`
//!   (`little` or `big`, default: the dump's own order)
//! - `RUST_LOG` - Overrides the log filter

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::format::tiff::ByteOrder;

// =============================================================================
// CLI Arguments
// =============================================================================

/// tiff-metadata - Inspect and rewrite TIFF/EXIF directory metadata.
#[derive(Parser, Debug, Clone)]
#[command(name = "tiff-metadata")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List every directory and field with its decoded value.
    Inspect(InspectConfig),

    /// Resolve one tag across directories and print its value.
    Lookup(LookupConfig),

    /// Print the GPS position.
    Gps(InspectConfig),

    /// Build the output set and write it as JSON.
    Rewrite(RewriteConfig),
}

#[derive(Args, Debug, Clone)]
pub struct InspectConfig {
    /// Metadata dump (JSON).
    pub dump: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct LookupConfig {
    /// Metadata dump (JSON).
    pub dump: PathBuf,

    /// Tag ID, decimal or 0x-prefixed hex.
    #[arg(short, long, value_parser = parse_tag)]
    pub tag: u16,

    /// Only search directories of the tag's declared type.
    #[arg(long, default_value_t = false)]
    pub exact: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RewriteConfig {
    /// Metadata dump (JSON).
    pub dump: PathBuf,

    /// Target byte order: little or big. Defaults to the dump's byte order.
    #[arg(short, long, env = "TIFF_METADATA_BYTE_ORDER")]
    pub byte_order: Option<ByteOrder>,

    /// Write to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl RewriteConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.dump.as_os_str().is_empty() {
            return Err("Dump path is required".to_string());
        }

        if let Some(ref output) = self.output {
            if output == &self.dump {
                return Err(format!(
                    "Output {} would overwrite the input dump",
                    output.display()
                ));
            }
        }

        Ok(())
    }
}

/// Parse a tag ID given as decimal (`271`) or hex (`0x010F`).
pub fn parse_tag(value: &str) -> Result<u16, String> {
    let value = value.trim();
    let parsed = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => value.parse::<u16>(),
    };
    parsed.map_err(|e| format!("Invalid tag '{}': {}", value, e))
}

// =============================================================================
// Tests
// =============================================================================
