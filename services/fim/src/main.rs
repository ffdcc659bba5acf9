//! Composite FIM command-line tool.
//!
//! Reads a control table of `(reach_id, flow, boundary_condition)` rows,
//! resolves each row to a tile in a FIM library and composites the tiles
//! into one VRT, GTiff or COG with GDAL.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use fim_common::{FimError, OutputFormat};
use gdal_tools::{GdalCli, GdalConfig, SystemToolAvailability};
use mosaic::{FimPipeline, FimRequest, MosaicOutput};
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

const LAYOUT_HELP: &str = "\
Library layout:
  <library>/
    <reach_id>/
      domain.tif                       used with --with-domain
      z_<boundary_condition>/          '.' replaced by '_', e.g. z_53_5, z_nd
        f_<flow>.tif

The control file is a CSV with a header row followed by rows of
reach_id,flow,boundary_condition. Extra columns are ignored.

Library roots starting with /vsi (e.g. /vsis3/bucket/library) are passed to
GDAL as virtual filesystem paths. GTiff and COG outputs should be local paths.

Environment:
  FIM_LIBRARY          default for --lib
  GDALBUILDVRT_BIN     gdalbuildvrt program to run
  GDAL_TRANSLATE_BIN   gdal_translate program to run

Examples:
  fim --lib /data/library -c controls.csv -o fim.vrt
  fim --lib /vsis3/fim/library -c controls.csv --fmt COG -o fim.tif --with-domain";

#[derive(Parser, Debug)]
#[command(name = "fim")]
#[command(about = "Create a composite FIM from a control table and a FIM library")]
#[command(after_long_help = LAYOUT_HELP)]
struct Args {
    /// Root of the FIM library, local path or /vsi path
    #[arg(long = "lib", env = "FIM_LIBRARY")]
    library: String,

    /// Control table CSV
    #[arg(short, long)]
    controls: PathBuf,

    /// Output format: VRT, GTiff or COG
    #[arg(long, default_value = "VRT")]
    fmt: String,

    /// Output file path
    #[arg(short, long)]
    output: String,

    /// Composite each reach's domain.tif beneath the FIM tiles
    #[arg(long)]
    with_domain: bool,

    /// Deprecated, has no effect
    #[arg(long = "type")]
    fim_type: Option<String>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn parse_level(name: &str) -> Level {
    match name.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn init_tracing(args: &Args) -> Result<()> {
    let builder = FmtSubscriber::builder()
        .with_max_level(parse_level(&args.log_level))
        .with_target(true)
        .with_writer(std::io::stderr);

    if args.log_json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

/// Error kind for log fields; failures outside the pipeline are "cli".
fn error_kind(err: &anyhow::Error) -> &'static str {
    err.downcast_ref::<FimError>()
        .map(FimError::kind)
        .unwrap_or("cli")
}

fn run(args: &Args) -> Result<MosaicOutput> {
    if let Some(fim_type) = &args.fim_type {
        warn!(fim_type = %fim_type, "--type is deprecated and ignored");
    }

    let format = OutputFormat::from_name(&args.fmt)?;
    let config = GdalConfig::from_env();
    info!(
        buildvrt = %config.buildvrt_bin,
        translate = %config.translate_bin,
        "GDAL tools"
    );

    let request = FimRequest {
        library: args.library.clone(),
        controls: args.controls.clone(),
        output: args.output.clone(),
        format,
        with_domain: args.with_domain,
    };

    FimPipeline::new(GdalCli::new(config), SystemToolAvailability)
        .run(&request)
        .with_context(|| format!("failed to create composite FIM at {}", args.output))
}

fn main() -> ExitCode {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    if let Err(e) = init_tracing(&args) {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(output) => {
            println!("Composite FIM created at {}", output.path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(kind = error_kind(&e), error = %format!("{:#}", e), "Composite FIM failed");
            ExitCode::FAILURE
        }
    }
}
