//! tiff-metadata - inspect and rewrite TIFF/EXIF directory metadata.
//!
//! Reads a JSON metadata dump, resolves tags, derives GPS positions and
//! builds clean output sets.

use clap::Parser;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tiff_metadata::{
    config::{Cli, Command, InspectConfig, LookupConfig, RewriteConfig},
    dump::{MetadataDump, OutputSetDump},
    error::DumpError,
    metadata::{build_output_set, TiffMetadata},
    TagRegistry,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Inspect(config) => run_inspect(config),
        Command::Lookup(config) => run_lookup(config),
        Command::Gps(config) => run_gps(config),
        Command::Rewrite(config) => run_rewrite(config),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "tiff_metadata=debug"
    } else {
        "tiff_metadata=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_metadata(path: &Path) -> Result<TiffMetadata, DumpError> {
    let dump = MetadataDump::load(path)?;
    let metadata = dump.into_metadata(Arc::new(TagRegistry::standard()))?;
    debug!(
        path = %path.display(),
        directories = metadata.directories().len(),
        byte_order = %metadata.byte_order(),
        "loaded metadata dump"
    );
    Ok(metadata)
}

// =============================================================================
// Inspect Command
// =============================================================================

fn run_inspect(config: InspectConfig) -> Result<ExitCode, DumpError> {
    let metadata = load_metadata(&config.dump)?;

    println!("Byte order: {}", metadata.byte_order());
    for directory in metadata.directories() {
        println!();
        println!("{}", directory);
        for field in directory.fields() {
            let info = metadata
                .registry()
                .resolve(directory.directory_type(), field.tag());
            println!(
                "  {} [{} x{}]: {}",
                info,
                field.field_type(),
                field.count(),
                field.value_description(&info)
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}

// =============================================================================
// Lookup Command
// =============================================================================

fn run_lookup(config: LookupConfig) -> Result<ExitCode, DumpError> {
    let metadata = load_metadata(&config.dump)?;

    let definitions = metadata.registry().lookup(config.tag);
    let candidates = if definitions.is_empty() {
        vec![tiff_metadata::TagInfo::unknown(config.tag)]
    } else {
        definitions.to_vec()
    };

    let mut found = false;
    for info in &candidates {
        match metadata.find_field(info, config.exact) {
            Some(field) => {
                found = true;
                println!(
                    "{} [{}]: {}",
                    info,
                    info.directory.directory_type(),
                    field.value_description(info)
                );
            }
            None => info!("{} not found", info),
        }
    }

    Ok(if found {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

// =============================================================================
// GPS Command
// =============================================================================

fn run_gps(config: InspectConfig) -> Result<ExitCode, DumpError> {
    let metadata = load_metadata(&config.dump)?;

    let Some(gps) = metadata.gps()? else {
        info!("No GPS information in {}", config.dump.display());
        return Ok(ExitCode::FAILURE);
    };

    println!("{}", gps);
    println!("Latitude:  {:.6}", gps.to_decimal_latitude()?);
    println!("Longitude: {:.6}", gps.to_decimal_longitude()?);
    Ok(ExitCode::SUCCESS)
}

// =============================================================================
// Rewrite Command
// =============================================================================

fn run_rewrite(config: RewriteConfig) -> Result<ExitCode, DumpError> {
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return Ok(ExitCode::FAILURE);
    }

    let metadata = load_metadata(&config.dump)?;
    let byte_order = config.byte_order.unwrap_or(metadata.byte_order());
    let set = build_output_set(&metadata, byte_order)?;
    let json = OutputSetDump::from(&set).to_json_pretty()?;

    match config.output {
        Some(ref path) => {
            fs::write(path, json)?;
            info!(
                "Wrote {} directories ({}) to {}",
                set.directories().len(),
                byte_order,
                path.display()
            );
        }
        None => println!("{}", json),
    }

    Ok(ExitCode::SUCCESS)
}
