//! Main CLI application

use crate::cli::commands::{inspect_capsule, new_capsule, NewArgs};
use crate::cli::output::render_capsule;
use crate::config::{load_settings, OutputFormat, Settings};
use crate::error::{CapsuleError, Result};
use crate::model::{SystemClock, UnknownKeys};
use clap::error::ErrorKind;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Product name shown in the version banner
pub const PRODUCT_NAME: &str = "Obsidian Capsule";

/// Environment variable holding the default log filter
pub const LOG_ENV: &str = "CAPSULE_LOG";

/// Top-level long options that consume the following argument
const VALUE_OPTIONS: &[&str] = &["--config"];

/// Top-level short options that take a value
const VALUE_SHORTS: &[char] = &['c'];

/// Version banner, e.g. `Obsidian Capsule CLI v0.1.0`
pub fn version_string() -> String {
    format!("{} CLI v{}", PRODUCT_NAME, crate::VERSION)
}

/// Build the clap command
pub fn build_command() -> Command {
    Command::new("capsule")
        .about("Obsidian Capsule Delivery System - AI-powered content generation")
        .long_about(
            "Obsidian Capsule Delivery System\n\n\
             AI-powered content generation and distribution for Obsidian knowledge bases.",
        )
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .long("version")
                .help("Show version and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Path to a capsule.yml settings file")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only log errors")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Increase log verbosity (repeat for more)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("new")
                .about("Print a newly constructed capsule")
                .arg(Arg::new("capsule_id").value_name("CAPSULE_ID").required(true))
                .arg(Arg::new("name").value_name("NAME").required(true))
                .arg(Arg::new("capsule_version").value_name("VERSION").required(true))
                .arg(Arg::new("domain_type").value_name("DOMAIN_TYPE").required(true))
                .arg(
                    Arg::new("description")
                        .long("description")
                        .value_name("TEXT")
                        .help("Capsule description"),
                )
                .arg(
                    Arg::new("author")
                        .long("author")
                        .value_name("NAME")
                        .help("Capsule author"),
                )
                .arg(format_arg()),
        )
        .subcommand(
            Command::new("inspect")
                .about("Check a capsule file and print it with defaults filled in")
                .arg(
                    Arg::new("file")
                        .value_name("FILE")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("allow_unknown")
                        .long("allow-unknown")
                        .help("Ignore keys that are not capsule fields")
                        .action(ArgAction::SetTrue),
                )
                .arg(format_arg()),
        )
}

fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .value_name("FORMAT")
        .help("Output format (defaults to the settings file, then json)")
        .value_parser(OutputFormat::NAMES)
}

/// Whether `--version`/`-v` appears among the top-level arguments.
///
/// Scanning stops at `--` or the first positional (the subcommand), so the
/// flag is honoured before clap validates anything else. Short flags may be
/// clustered (`-qv`).
fn wants_version(args: &[OsString]) -> bool {
    let mut iter = args.iter().skip(1).map(|a| a.to_string_lossy());

    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--version" => return true,
            "--" => return false,
            a if VALUE_OPTIONS.contains(&a) => {
                iter.next();
            }
            a if a.starts_with("--") => {}
            a if a.starts_with('-') && a.len() > 1 => match short_cluster(&a[1..]) {
                ShortCluster::Version => return true,
                ShortCluster::TakesNext => {
                    iter.next();
                }
                ShortCluster::Flags => {}
            },
            _ => return false,
        }
    }

    false
}

enum ShortCluster {
    /// `v` appears before any value-taking flag
    Version,
    /// Ends in a value-taking flag whose value is the next argument
    TakesNext,
    Flags,
}

fn short_cluster(cluster: &str) -> ShortCluster {
    for (i, c) in cluster.char_indices() {
        if c == 'v' {
            return ShortCluster::Version;
        }
        if VALUE_SHORTS.contains(&c) {
            // The rest of the cluster is the value, if any
            return if i + c.len_utf8() == cluster.len() {
                ShortCluster::TakesNext
            } else {
                ShortCluster::Flags
            };
        }
    }
    ShortCluster::Flags
}

/// Parse arguments, sending help to stdout and usage errors back as `Validation`
fn parse_args(args: Vec<OsString>) -> Result<ArgMatches> {
    build_command().try_get_matches_from(args).map_err(|e| match e.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => e.exit(),
        _ => CapsuleError::Validation(
            e.to_string()
                .trim_start_matches("error: ")
                .trim_end()
                .to_string(),
        ),
    })
}

/// Log filter from `--quiet`/`--verbose`, falling back to `CAPSULE_LOG`, then `warn`
fn log_filter(matches: &ArgMatches) -> EnvFilter {
    if matches.get_flag("quiet") {
        return EnvFilter::new("error");
    }

    match matches.get_count("verbose") {
        0 => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

fn init_tracing(matches: &ArgMatches) {
    // A subscriber may already be installed when running in-process
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(matches))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Output format from the subcommand's `--format`, else the settings
fn output_format(matches: &ArgMatches, settings: &Settings) -> Result<OutputFormat> {
    match matches.get_one::<String>("format") {
        Some(name) => name.parse().map_err(CapsuleError::Validation),
        None => Ok(settings.format),
    }
}

fn required(matches: &ArgMatches, id: &str) -> String {
    matches.get_one::<String>(id).cloned().unwrap_or_default()
}

/// Run the CLI with the given arguments (the first being the program name)
pub fn run_from<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    if wants_version(&args) {
        println!("{}", version_string());
        return Ok(());
    }

    let matches = parse_args(args)?;
    init_tracing(&matches);

    // Catches `-v` forms the pre-scan does not recognise
    if matches.get_flag("version") {
        println!("{}", version_string());
        return Ok(());
    }

    let (name, sub_matches) = match matches.subcommand() {
        Some(sub) => sub,
        None => {
            tracing::debug!("no command given");
            return Ok(());
        }
    };

    let settings = load_settings(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    tracing::debug!(command = name, ?settings, "running command");

    let capsule = match name {
        "new" => {
            let args = NewArgs {
                capsule_id: required(sub_matches, "capsule_id"),
                name: required(sub_matches, "name"),
                version: required(sub_matches, "capsule_version"),
                domain_type: required(sub_matches, "domain_type"),
                description: sub_matches.get_one::<String>("description").cloned(),
                author: sub_matches.get_one::<String>("author").cloned(),
            };
            new_capsule(&args, &SystemClock)?
        }
        "inspect" => {
            let path = sub_matches
                .get_one::<PathBuf>("file")
                .cloned()
                .unwrap_or_default();
            let policy = if sub_matches.get_flag("allow_unknown") {
                UnknownKeys::Ignore
            } else {
                settings.unknown_keys
            };
            inspect_capsule(&path, policy, &SystemClock)?
        }
        other => unreachable!("unregistered subcommand '{}'", other),
    };

    let format = output_format(sub_matches, &settings)?;
    println!("{}", render_capsule(&capsule, format)?);

    Ok(())
}

/// Run the CLI application with the process arguments
pub fn run() -> Result<()> {
    run_from(std::env::args_os())
}
