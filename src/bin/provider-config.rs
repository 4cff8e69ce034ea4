use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use provider_config::{
    config::DecoderConfig,
    registry::{Platform, ProviderSourceCoordinate},
    Block, BlockDecoder, Diagnostics, Error, RequirementDecoder,
};
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to decoder config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a provider source string to its registry coordinate
    Source {
        source: String,

        /// Provider name; defaults to the last source segment
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        os: Option<String>,

        #[arg(long)]
        arch: Option<String>,
    },
    /// Decode a provider block given as JSON
    Provider { block: PathBuf },
    /// Decode a required_providers block given as JSON
    Requirements { block: PathBuf },
}

fn load_config(path: Option<&Path>) -> Result<DecoderConfig, Error> {
    let config = match path {
        Some(path) => DecoderConfig::from_file(path)?,
        None => DecoderConfig::default(),
    };
    info!("config loaded.");
    debug!("config: {:?}", config);
    Ok(config)
}

fn read_block(path: &Path) -> Result<Block, Error> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::internal(format!("Failed to read block file {}: {}", path.display(), e)))?;
    debug!("Parsing block file: {:?}", path);
    Ok(serde_json::from_str(&content)?)
}

fn report(diagnostics: &Diagnostics) {
    for diagnostic in diagnostics {
        eprintln!("{}", diagnostic);
    }
}

/// Returns whether the command completed without error diagnostics.
fn run(cli: &Cli) -> Result<bool, Error> {
    let config = load_config(cli.config.as_deref())?;

    match &cli.command {
        Command::Source {
            source,
            name,
            os,
            arch,
        } => {
            let configured = config.platform.resolve();
            let platform = Platform::new(
                os.clone().unwrap_or(configured.os),
                arch.clone().unwrap_or(configured.arch),
            );
            let coordinate = match name {
                Some(name) => ProviderSourceCoordinate::with_platform(name, source, &platform),
                None => ProviderSourceCoordinate::from_source(source, &platform),
            };
            let host = coordinate.svc_host()?;
            let output = json!({
                "coordinate": coordinate,
                "registry_id": coordinate.registry_id(),
                "host": host,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(true)
        }
        Command::Provider { block } => {
            let block = read_block(block)?;
            let decoded = BlockDecoder::default().decode(&block);
            report(&decoded.diagnostics);
            let provider = &decoded.value;
            let output = json!({
                "provider_config": provider.addr().to_string(),
                "unique_key": provider.module_unique_key(),
                "alias": provider.alias,
                "version": provider.version,
                "diagnostics": decoded.diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(!decoded.diagnostics.has_errors())
        }
        Command::Requirements { block } => {
            let block = read_block(block)?;
            let decoded = RequirementDecoder::from_config(&config).decode(&block);
            report(&decoded.diagnostics);
            let platform = config.platform.resolve();
            let requirements: Vec<_> = decoded
                .value
                .iter()
                .filter(|r| !r.is_placeholder())
                .map(|r| {
                    json!({
                        "requirement": r,
                        "coordinate": r.coordinate(&platform),
                    })
                })
                .collect();
            let output = json!({
                "requirements": requirements,
                "diagnostics": decoded.diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(!decoded.diagnostics.has_errors())
        }
    }
}

/// Exit status for a finished command: 1 on a hard error or any error
/// diagnostic.
fn exit_code(outcome: &Result<bool, Error>) -> i32 {
    match outcome {
        Ok(true) => 0,
        Ok(false) | Err(_) => 1,
    }
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let outcome = run(&cli);
    if let Err(e) = &outcome {
        eprintln!("Error: {}", e);
    }
    std::process::exit(exit_code(&outcome));
}
