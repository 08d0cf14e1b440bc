mod config;
mod logging;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use htmlfaker_core::{Error as CoreError, PartialConfiguration, config_json_schema};
use htmlfaker_generate::{HtmlFaker, LoremTextSource, RandomSource};
use thiserror::Error;
use uuid::Uuid;

use config::{FlagOverrides, defaults_toml, load_overrides};
use logging::init_logging;

#[derive(Debug, Error)]
enum CliError {
    #[error("generation error: {0}")]
    Core(#[from] CoreError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid TOML configuration: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("failed to encode TOML: {0}")]
    TomlEncode(#[from] toml::ser::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(name = "htmlfaker", version, about = "Random HTML fragment generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate an HTML fragment.
    Generate(GenerateArgs),
    /// Print the JSON Schema of the configuration file.
    Schema,
    /// Print the default configuration as TOML.
    Defaults,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Configuration file (.toml or .json).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// Number of body units.
    #[arg(long)]
    paragraphs: Option<u32>,
    /// Number of lead paragraphs.
    #[arg(long)]
    lead: Option<u32>,
    /// Write the fragment here instead of stdout.
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
    /// Print the generation report as JSON to stderr.
    #[arg(long, default_value_t = false)]
    report: bool,
    /// Append JSON log lines to this file.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Schema => {
            let schema = config_json_schema();
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(())
        }
        Command::Defaults => {
            print!("{}", defaults_toml()?);
            Ok(())
        }
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let GenerateArgs {
        config,
        seed,
        paragraphs,
        lead,
        out,
        report,
        log_file,
    } = args;

    init_logging(log_file.as_deref())?;

    let run_id = Uuid::new_v4().to_string();
    tracing::info!(event = "run_started", run_id = %run_id, seed = ?seed);
    let timer = Instant::now();

    let mut overrides = match &config {
        Some(path) => {
            let overrides = load_overrides(path)?;
            tracing::info!(event = "config_loaded", path = %path.display());
            overrides
        }
        None => PartialConfiguration::default(),
    };
    FlagOverrides { paragraphs, lead }.apply(&mut overrides);

    let mut faker = match seed {
        Some(seed) => HtmlFaker::seeded(seed),
        None => HtmlFaker::new(LoremTextSource::from_entropy(), RandomSource::from_entropy()),
    };
    let document = faker.generate_with_report(&overrides)?;
    tracing::info!(
        event = "fragment_generated",
        units = document.report.units(),
        bytes = document.html.len()
    );

    match &out {
        Some(path) => {
            std::fs::write(path, &document.html)?;
            tracing::info!(event = "fragment_written", path = %path.display());
        }
        None => println!("{}", document.html),
    }

    if report {
        eprintln!("{}", serde_json::to_string_pretty(&document.report)?);
    }

    let duration_ms = timer.elapsed().as_millis();
    tracing::info!(event = "run_finished", status = "success", duration_ms = duration_ms);

    Ok(())
}
