//! # patloc
//!
//! A CLI for counting lines of code with configurable, pattern-based
//! line categories.
//!
//! ## Overview
//!
//! patloc is built on top of patloclib. It loads an ordered list of
//! category rules (or uses the built-in C-style rules), classifies every
//! line of a file or directory tree, and prints the totals.
//!
//! ## Usage
//!
//! ```bash
//! # Count the current directory with the built-in rules
//! patloc
//!
//! # Count one file with custom rules
//! patloc src/Main.java --config rules.json
//!
//! # Per-file breakdown, largest first, as JSON
//! patloc src --by-file --sort total --output json
//!
//! # Only C sources, skipping vendored code and hidden directories
//! patloc . --include "**/*.c" --exclude "**/vendor/**" --skip-hidden
//!
//! # Print the built-in rules as a starting point for a config file
//! patloc --dump-rules > rules.json
//! ```

mod render;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use patloclib::{count_path, Aggregation, CountOptions, FilterConfig, OrderBy, RulesConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use render::{render_count, OutputFormat};

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("patloc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Pattern-driven lines of code counter")
        .arg(
            Arg::new("path")
                .help("File or directory to analyze (defaults to current directory)")
                .default_value("."),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("JSON file with category rules (defaults to built-in C-style rules)"),
        )
        .arg(
            Arg::new("include")
                .short('i')
                .long("include")
                .action(ArgAction::Append)
                .help("Include files matching glob pattern"),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .action(ArgAction::Append)
                .help("Exclude files matching glob pattern"),
        )
        .arg(
            Arg::new("skip-hidden")
                .long("skip-hidden")
                .action(ArgAction::SetTrue)
                .help("Skip hidden directories while walking"),
        )
        .arg(
            Arg::new("by-file")
                .short('f')
                .long("by-file")
                .action(ArgAction::SetTrue)
                .help("Show breakdown by file"),
        )
        .arg(
            Arg::new("sort")
                .short('s')
                .long("sort")
                .value_parser(["path", "total", "code"])
                .default_value("path")
                .help("Order of the per-file breakdown"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["table", "json"])
                .default_value("table")
                .help("Output format"),
        )
        .arg(
            Arg::new("dump-rules")
                .long("dump-rules")
                .action(ArgAction::SetTrue)
                .help("Print the built-in rules as JSON and exit"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log every file and directory visited"),
        )
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Build filter config from matches
fn build_filter(matches: &ArgMatches) -> anyhow::Result<FilterConfig> {
    let mut filter = FilterConfig::new().skip_hidden(matches.get_flag("skip-hidden"));

    if let Some(includes) = matches.get_many::<String>("include") {
        for pattern in includes {
            filter = filter.include(pattern)?;
        }
    }

    if let Some(excludes) = matches.get_many::<String>("exclude") {
        for pattern in excludes {
            filter = filter.exclude(pattern)?;
        }
    }

    Ok(filter)
}

fn load_rules(config: Option<&String>) -> anyhow::Result<RulesConfig> {
    match config {
        Some(path) => {
            debug!(config = %path, "loading rules");
            Ok(RulesConfig::from_path(path)?)
        }
        None => Ok(RulesConfig::c_style()),
    }
}

/// Handler for the count (default) command
fn count_handler(matches: &ArgMatches) -> anyhow::Result<String> {
    if matches.get_flag("dump-rules") {
        let mut json = RulesConfig::c_style().to_json_pretty()?;
        json.push('\n');
        return Ok(json);
    }

    let path = matches
        .get_one::<String>("path")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let rules = load_rules(matches.get_one::<String>("config"))?
        .compile()
        .context("failed to compile rules")?;
    let filter = build_filter(matches)?;

    let by_file = matches.get_flag("by-file");
    let aggregation = if by_file {
        Aggregation::ByFile
    } else {
        Aggregation::Total
    };
    let order_by: OrderBy = matches
        .get_one::<String>("sort")
        .map(|s| s.parse::<OrderBy>())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or_default();

    let options = CountOptions::new()
        .filter(filter)
        .aggregation(aggregation)
        .order_by(order_by);

    let result = count_path(&path, &rules, &options)?;

    let format = matches
        .get_one::<String>("output")
        .map(|s| OutputFormat::from_arg(s))
        .unwrap_or(OutputFormat::Table);
    let base_path = base_dir(&path);

    Ok(render_count(&result, by_file, &base_path, format)?)
}

/// Directory that per-file paths are shown relative to.
fn base_dir(path: &Path) -> PathBuf {
    let dir = if path.is_file() {
        path.parent().unwrap_or(path)
    } else {
        path
    };
    dir.to_path_buf()
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_tracing(matches.get_flag("verbose"));

    match count_handler(&matches) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
