//! # resultprint
//!
//! Print a fetched result set as aligned, colorized columns.
//!
//! ## Overview
//!
//! resultprint reads a JSON result document (the columns and rows a query or
//! statistics fetch produced) and prints it through resultprintlib's
//! `TabularResultFormatter`. Fetching the data is someone else's job; pipe a
//! document in or point at a file.
//!
//! ## Usage
//!
//! ```bash
//! # Print a result document
//! resultprint orders.json
//!
//! # Read from stdin, rename columns, pipe-separated with padding
//! cat orders.json | resultprint --map order_id=id --map ship_city=city \
//!     --separator pipe --padding 4
//!
//! # Reuse a saved formatter configuration, overriding the date format
//! resultprint covid19.json --config covid.json --date-format long-time
//!
//! # Emit the rendered table as JSON
//! resultprint orders.json --output json
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Arg, ArgAction, ArgMatches, Command};
use resultprintlib::{
    ColumnSeparator, DateFormat, DisplayNameMap, FormatterConfig, ResultDocument,
    TabularResultFormatter,
};
use tracing::{debug, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod render;

use render::{ColorChoice, OutputMode};

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("resultprint")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Print query results as aligned, colorized columns")
        .arg(
            Arg::new("input")
                .help("Result document to print ('-' reads stdin)")
                .default_value("-"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Load formatter configuration from a JSON file"),
        )
        .arg(
            Arg::new("names")
                .short('n')
                .long("names")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("JSON object mapping column names to display labels"),
        )
        .arg(
            Arg::new("map")
                .short('m')
                .long("map")
                .value_name("FROM=TO")
                .action(ArgAction::Append)
                .help("Display a column under another name (can be specified multiple times)"),
        )
        .arg(
            Arg::new("padding")
                .short('p')
                .long("padding")
                .value_parser(clap::value_parser!(usize))
                .help("Extra spaces after every column"),
        )
        .arg(
            Arg::new("separator")
                .short('s')
                .long("separator")
                .value_parser(["space", "pipe"])
                .help("Column separator"),
        )
        .arg(
            Arg::new("date-format")
                .short('d')
                .long("date-format")
                .value_parser(["short", "long", "long-time"])
                .help("Date pattern: MM/DD/YY, MM/DD/YYYY or MM/DD/YYYY @ HH:MM"),
        )
        .arg(
            Arg::new("group-integers")
                .short('g')
                .long("group-integers")
                .action(ArgAction::SetTrue)
                .help("Group integer digits with thousands separators"),
        )
        .arg(
            Arg::new("capitalize")
                .long("capitalize")
                .action(ArgAction::SetTrue)
                .help("Capitalize all-uppercase text values"),
        )
        .arg(
            Arg::new("header-style")
                .long("header-style")
                .value_name("STYLE")
                .help("Header style, e.g. 'green' or 'cyan.bold'"),
        )
        .arg(
            Arg::new("row-style")
                .long("row-style")
                .value_name("STYLE")
                .help("Data row style, e.g. 'yellow'"),
        )
        .arg(
            Arg::new("color")
                .long("color")
                .value_parser(["auto", "always", "never"])
                .default_value("auto")
                .help("When to use terminal colors"),
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
            Arg::new("count")
                .short('c')
                .long("count")
                .action(ArgAction::SetTrue)
                .help("Print the number of rows before the table"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .default_value("warn")
                .help("Log level when RUST_LOG is not set"),
        )
}

fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

/// Parse a `FROM=TO` column mapping
fn parse_mapping(spec: &str) -> Result<(String, String), anyhow::Error> {
    match spec.split_once('=') {
        Some((from, to)) if !from.is_empty() => Ok((from.to_string(), to.to_string())),
        _ => bail!("Invalid column mapping '{}'. Use 'from=to'", spec),
    }
}

/// Build the formatter configuration: defaults, then the config file, then flags
fn build_config(matches: &ArgMatches) -> Result<FormatterConfig, anyhow::Error> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config '{}'", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("invalid config '{}'", path.display()))?
        }
        None => FormatterConfig::default(),
    };

    if let Some(path) = matches.get_one::<PathBuf>("names") {
        config.display_names.merge(DisplayNameMap::from_path(path)?);
    }

    if let Some(mappings) = matches.get_many::<String>("map") {
        for spec in mappings {
            let (from, to) = parse_mapping(spec)?;
            config.display_names.insert(from, to);
        }
    }

    if let Some(&padding) = matches.get_one::<usize>("padding") {
        config.extra_padding = padding;
    }

    if let Some(separator) = matches.get_one::<String>("separator") {
        config.separator = separator
            .parse::<ColumnSeparator>()
            .map_err(anyhow::Error::msg)?;
    }

    if let Some(date_format) = matches.get_one::<String>("date-format") {
        config.date_format = date_format
            .parse::<DateFormat>()
            .map_err(anyhow::Error::msg)?;
    }

    if matches.get_flag("group-integers") {
        config.group_integers = true;
    }

    if matches.get_flag("capitalize") {
        config.capitalize_uppercase = true;
    }

    if let Some(style) = matches.get_one::<String>("header-style") {
        config.header_style = style.as_str().into();
    }

    if let Some(style) = matches.get_one::<String>("row-style") {
        config.row_style = style.as_str().into();
    }

    Ok(config)
}

/// Load the result document from a file or stdin
fn load_document(input: &str) -> Result<ResultDocument, anyhow::Error> {
    let doc = if input == "-" {
        ResultDocument::from_reader(std::io::stdin().lock())
            .context("failed to read result document from stdin")?
    } else {
        ResultDocument::from_path(input)?
    };
    Ok(doc)
}

fn run(matches: &ArgMatches) -> Result<(), anyhow::Error> {
    let color = matches
        .get_one::<String>("color")
        .map(|s| s.parse::<ColorChoice>())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or(ColorChoice::Auto);
    color.apply();

    let output_mode = matches
        .get_one::<String>("output")
        .map(|s| s.parse::<OutputMode>())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or(OutputMode::Table);

    let config = build_config(matches)?;
    let input = matches
        .get_one::<String>("input")
        .map(|s| s.as_str())
        .unwrap_or("-");
    let (schema, rows) = load_document(input)?.into_parts();
    debug!(
        input,
        columns = schema.len(),
        rows = rows.len(),
        "loaded result document"
    );

    let formatter = TabularResultFormatter::new(config);
    let table = formatter.render(&schema, &rows)?;
    if !table.fallbacks.is_empty() {
        warn!(
            count = table.fallbacks.len(),
            "some values did not match their column type and were printed as text"
        );
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match output_mode {
        OutputMode::Json => render::write_json(&mut out, &table)?,
        OutputMode::Table => {
            if matches.get_flag("count") {
                writeln!(out, "There are {} rows to output.", table.rows.len())?;
            }
            render::write_table(&mut out, &table)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();

    let level = matches
        .get_one::<String>("log-level")
        .map(|s| s.as_str())
        .unwrap_or("warn");
    setup_logging(level);

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
