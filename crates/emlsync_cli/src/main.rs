//! Command-line entry point over `emlsync_core`.
//!
//! # Responsibility
//! - Read one fragment file, parse it, validate it, and print either the
//!   parsed model (JSON) or the re-synchronized fragment (XML).
//! - Own every filesystem touch; the core never reads files.
//!
//! # Invariants
//! - Validation messages go to stderr; stdout only carries the rendering.
//! - The exit code is non-zero when the model is invalid.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use emlsync_core::{
    default_log_level, init_logging, ChangeNotifier, ErrorSet, GeoCoverage, NonNumericDomain,
    ParsedDomains, Party, ValidationEvent,
};
use log::info;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "emlsync")]
#[command(about = "Parse, validate and re-synchronize EML metadata fragments")]
struct Cli {
    /// Directory for rotated log files; logging stays off without it
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Measurement scale with its non-numeric domains
    Domain(FragmentArgs),
    /// Geographic coverage with a bounding box
    Coverage(FragmentArgs),
    /// Creator, contact or other party record
    Party(FragmentArgs),
    /// Print the core version
    Version,
}

#[derive(Args)]
struct FragmentArgs {
    /// XML file holding exactly one fragment
    file: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Xml,
}

/// Rendered output plus the validation result of one fragment.
struct Outcome {
    rendered: String,
    event: ValidationEvent,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    if let Some(log_dir) = &cli.log_dir {
        start_logging(log_dir, cli.log_level.as_deref())?;
    }

    let outcome = match &cli.command {
        Command::Domain(args) => run_domain(args)?,
        Command::Coverage(args) => run_coverage(args)?,
        Command::Party(args) => run_party(args)?,
        Command::Version => {
            println!("emlsync_core version={}", emlsync_core::core_version());
            return Ok(ExitCode::SUCCESS);
        }
    };

    println!("{}", outcome.rendered);
    match outcome.event {
        ValidationEvent::Invalid(errors) => {
            report_errors(&errors);
            Ok(ExitCode::FAILURE)
        }
        ValidationEvent::BecameValid | ValidationEvent::StillValid => Ok(ExitCode::SUCCESS),
    }
}

fn start_logging(log_dir: &Path, level: Option<&str>) -> Result<()> {
    let log_dir = if log_dir.is_absolute() {
        log_dir.to_path_buf()
    } else {
        std::env::current_dir()
            .context("failed to resolve the working directory")?
            .join(log_dir)
    };
    let level = level.unwrap_or_else(|| default_log_level());
    init_logging(level, &log_dir.to_string_lossy())
        .with_context(|| format!("failed to initialize logging in {}", log_dir.display()))?;
    info!("event=cli_start module=cli status=ok");
    Ok(())
}

fn read_fragment(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn run_domain(args: &FragmentArgs) -> Result<Outcome> {
    let input = read_fragment(&args.file)?;
    let mut domain = NonNumericDomain::from_xml_str(&input, ChangeNotifier::detached())
        .with_context(|| format!("{} is not a measurement scale fragment", args.file.display()))?;
    let event = domain.validate();

    let rendered = match args.format {
        OutputFormat::Json => {
            let parsed = ParsedDomains {
                measurement_scale: domain.measurement_scale(),
                domains: domain.domains().to_vec(),
            };
            serde_json::to_string_pretty(&parsed).context("failed to encode domains as json")?
        }
        OutputFormat::Xml => domain
            .commit()
            .context("failed to synchronize domains")?
            .to_pretty_xml_string()
            .context("failed to write domain xml")?,
    };
    Ok(Outcome { rendered, event })
}

fn run_coverage(args: &FragmentArgs) -> Result<Outcome> {
    let input = read_fragment(&args.file)?;
    let mut coverage = GeoCoverage::from_xml_str(&input, ChangeNotifier::detached())
        .with_context(|| format!("{} is not a geographic coverage fragment", args.file.display()))?;
    let event = coverage.validate();

    let rendered = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(coverage.bounding_box())
            .context("failed to encode coverage as json")?,
        OutputFormat::Xml => coverage
            .commit()
            .context("failed to synchronize coverage")?
            .to_pretty_xml_string()
            .context("failed to write coverage xml")?,
    };
    Ok(Outcome { rendered, event })
}

fn run_party(args: &FragmentArgs) -> Result<Outcome> {
    let input = read_fragment(&args.file)?;
    let mut party = Party::from_xml_str(&input, ChangeNotifier::detached())
        .with_context(|| format!("{} is not a party fragment", args.file.display()))?;
    let event = party.validate();

    let rendered = match args.format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(party.record()).context("failed to encode party as json")?
        }
        OutputFormat::Xml => party
            .commit()
            .context("failed to synchronize party")?
            .to_pretty_xml_string()
            .context("failed to write party xml")?,
    };
    Ok(Outcome { rendered, event })
}

fn report_errors(errors: &ErrorSet) {
    for error in errors.iter() {
        eprintln!("invalid {}: {}", error.field, error.message);
    }
}
