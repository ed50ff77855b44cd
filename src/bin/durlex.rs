//! Command-line interface for durlex
//! Inspect the compiled alias tables and try the recognizers and parser on ad-hoc input.
//!
//! Usage:
//!   durlex classify `<input>` [--table `<name>`]   - Classify the longest alias at the start of input
//!   durlex parse `<expression>` [--relative]       - Parse a duration or relative expression
//!   durlex tables [--table `<name>`]               - Dump compiled match tables in lookup order
//!
//! Global options:
//!   --config `<file>`     Layer a TOML configuration file over the defaults
//!   --format text|json  Override the configured output format

use clap::{Arg, ArgAction, ArgMatches, Command};
use durlex::config::{LoadError, Loaded, Loader, OutputFormat};
use durlex::direction::{direction_table, sign_table, DIRECTIONS, SIGNS};
use durlex::recognizer::MatchTable;
use durlex::units::{unit_table, UNITS};
use durlex::{
    build_match_table, compile_with, parse_duration, parse_relative, AliasTable, Classify,
    CompileError, NoMatch, Recognizer, Representation, Token,
};
use serde::Serialize;
use std::fmt::Debug;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let table_arg = Arg::new("table")
        .long("table")
        .short('t')
        .help("Alias table: units, directions, signs or a configured table name");

    let matches = Command::new("durlex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect longest-match alias recognizers for duration expressions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Path to a TOML configuration file"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .global(true)
                .value_parser(["text", "json"])
                .help("Output format (overrides the configuration)"),
        )
        .subcommand(
            Command::new("classify")
                .about("Classify the longest alias at the start of the input")
                .arg(
                    Arg::new("input")
                        .help("Input to classify")
                        .required(true)
                        .index(1),
                )
                .arg(table_arg.clone().default_value("units")),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse a duration expression")
                .arg(
                    Arg::new("expression")
                        .help("Expression such as '1h 30m' or '5 minutes ago'")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("relative")
                        .long("relative")
                        .short('r')
                        .help("Require a direction (sign or 'ago' / 'later')")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("tables")
                .about("Dump compiled match tables in lookup order")
                .arg(table_arg),
        )
        .get_matches();

    let loaded = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    match matches.subcommand() {
        Some(("classify", classify_matches)) => {
            let input = classify_matches.get_one::<String>("input").unwrap();
            let table = classify_matches.get_one::<String>("table").unwrap();
            handle_classify_command(&loaded, table, input);
        }
        Some(("parse", parse_matches)) => {
            let expression = parse_matches.get_one::<String>("expression").unwrap();
            handle_parse_command(&loaded, expression, parse_matches.get_flag("relative"));
        }
        Some(("tables", tables_matches)) => {
            let table = tables_matches.get_one::<String>("table");
            handle_tables_command(&loaded, table.map(String::as_str));
        }
        _ => unreachable!(),
    }
}

/// Load configuration and compile the configured tables, so a bad table stops every command.
fn load_config(matches: &ArgMatches) -> Result<Loaded, LoadError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    loader.load()
}

#[derive(Serialize)]
struct ClassifyReport<'a> {
    table: &'a str,
    token: String,
    consumed: usize,
    remaining: &'a str,
}

/// Handle the classify command
fn handle_classify_command(loaded: &Loaded, table: &str, input: &str) {
    let result = classify_named(loaded, table, input.as_bytes()).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let (token, consumed) = match result {
        Some(Ok(found)) => found,
        Some(Err(NoMatch)) => {
            eprintln!("No match: {:?} does not start with an alias of `{}`", input, table);
            std::process::exit(1);
        }
        None => {
            eprintln!("Error: unknown table `{}`", table);
            std::process::exit(1);
        }
    };

    // Aliases are whole UTF-8 characters, so the split lands on a boundary.
    let report = ClassifyReport {
        table,
        token,
        consumed,
        remaining: &input[consumed..],
    };

    match loaded.config.output.format {
        OutputFormat::Text => {
            println!("{}\t{}", report.token, report.consumed);
            if !report.remaining.is_empty() {
                println!("remaining: {:?}", report.remaining);
            }
        }
        OutputFormat::Json => print_json(&report),
    }
}

/// Classify `input` with the named table in the configured representation.
///
/// `None` means there is no such table.
fn classify_named(
    loaded: &Loaded,
    name: &str,
    input: &[u8],
) -> Result<Option<Result<(String, usize), NoMatch>>, CompileError> {
    let representation = loaded.config.recognizer.representation;
    let result = match name {
        "units" => Some(classify_builtin(&*UNITS, unit_table, representation, input)?),
        "directions" => Some(classify_builtin(
            &*DIRECTIONS,
            direction_table,
            representation,
            input,
        )?),
        "signs" => Some(classify_builtin(&*SIGNS, sign_table, representation, input)?),
        _ => loaded
            .table(name)
            .map(|recognizer| describe(recognizer.classify(input))),
    };
    Ok(result)
}

/// Use the shared recognizer when it already has the wanted representation.
fn classify_builtin<T: Token>(
    shared: &Recognizer<T>,
    table: impl FnOnce() -> AliasTable<T>,
    representation: Representation,
    input: &[u8],
) -> Result<Result<(String, usize), NoMatch>, CompileError> {
    if shared.representation() == representation {
        return Ok(describe(shared.classify(input)));
    }
    Ok(describe(compile_with(&table(), representation)?.classify(input)))
}

fn describe<T: Debug>(result: Result<(T, usize), NoMatch>) -> Result<(String, usize), NoMatch> {
    result.map(|(token, consumed)| (format!("{:?}", token), consumed))
}

#[derive(Serialize)]
struct DurationReport {
    duration: Duration,
}

/// Handle the parse command
///
/// Parsing always goes through the shared built-in recognizers.
fn handle_parse_command(loaded: &Loaded, expression: &str, relative: bool) {
    let format = loaded.config.output.format;
    if relative {
        let parsed = parse_relative(expression).unwrap_or_else(|e| exit_parse_error(e));
        match format {
            OutputFormat::Text => println!("{} {:?}", parsed.direction, parsed.duration),
            OutputFormat::Json => print_json(&parsed),
        }
    } else {
        let duration = parse_duration(expression).unwrap_or_else(|e| exit_parse_error(e));
        match format {
            OutputFormat::Text => println!("{:?}", duration),
            OutputFormat::Json => print_json(&DurationReport { duration }),
        }
    }
}

fn exit_parse_error(e: durlex::ParseError) -> ! {
    eprintln!("Parse error: {}", e);
    std::process::exit(1);
}

#[derive(Serialize)]
struct TableDump {
    table: String,
    entries: Vec<EntryDump>,
}

#[derive(Serialize)]
struct EntryDump {
    alias: String,
    bytes: String,
    length: usize,
    token: String,
}

impl TableDump {
    fn from_table<T: Debug>(table: &MatchTable<T>) -> Self {
        Self {
            table: table.name().to_string(),
            entries: table
                .entries()
                .iter()
                .map(|entry| EntryDump {
                    alias: entry.alias().to_string(),
                    bytes: entry.bytes().to_string(),
                    length: entry.bytes().len(),
                    token: format!("{:?}", entry.token()),
                })
                .collect(),
        }
    }
}

/// Handle the tables command
fn handle_tables_command(loaded: &Loaded, only: Option<&str>) {
    let dumps = collect_dumps(loaded).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let selected: Vec<&TableDump> = dumps
        .iter()
        .filter(|dump| only.map_or(true, |name| dump.table == name))
        .collect();

    if selected.is_empty() {
        if let Some(name) = only {
            eprintln!("Error: unknown table `{}`", name);
            std::process::exit(1);
        }
    }

    match loaded.config.output.format {
        OutputFormat::Text => {
            for dump in selected {
                println!("{} ({} aliases)", dump.table, dump.entries.len());
                for entry in &dump.entries {
                    println!("  {:>3}  {:<16} {}", entry.length, entry.bytes, entry.token);
                }
            }
        }
        OutputFormat::Json => print_json(&selected),
    }
}

/// Match tables keep the lookup order that a trie flattens away, so dumps rebuild them.
fn collect_dumps(loaded: &Loaded) -> Result<Vec<TableDump>, CompileError> {
    let mut dumps = vec![
        TableDump::from_table(&build_match_table(&unit_table())?),
        TableDump::from_table(&build_match_table(&direction_table())?),
        TableDump::from_table(&build_match_table(&sign_table())?),
    ];
    for table in &loaded.config.tables {
        dumps.push(TableDump::from_table(&build_match_table(table)?));
    }
    Ok(dumps)
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            std::process::exit(1);
        }
    }
}
