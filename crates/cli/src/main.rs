//! Inspector CLI for the `arglet` argv classifier.
//!
//! Tokens before the first `--` configure the tool; everything after it is
//! the subject argv to classify. The tool's own options are parsed with the
//! library itself against a built-in definitions table.

use anyhow::{Context, Result};
use arglet::scan::{self, ParsedArg};
use arglet::table::Definition;
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt};

struct Options {
    json: bool,
    quiet: bool,
    help: bool,
    min: usize,
    max: usize,
    defs: Vec<Definition>,
}

impl Options {
    fn from_argv(argv: &[String]) -> Result<Self> {
        let table = own_definitions();
        let entries = scan::parse(argv, 0, 0, Some(table.as_slice()))?;

        let mut opts = Options {
            json: false,
            quiet: false,
            help: false,
            min: 0,
            max: usize::MAX,
            defs: Vec::new(),
        };

        for entry in &entries {
            let Some(name) = entry.name() else { continue };
            match name {
                "--json" => opts.json = true,
                "-q" => opts.quiet = true,
                "--help" => opts.help = true,
                "--min" => opts.min = count_value(entry, "--min")?,
                "--max" => opts.max = count_value(entry, "--max")?,
                "--flag" => opts
                    .defs
                    .push(Definition::flag(required_value(entry, "--flag")?)),
                "--option" => opts
                    .defs
                    .push(Definition::value_flag(required_value(entry, "--option")?)),
                _ => {}
            }
        }

        Ok(opts)
    }
}

fn own_definitions() -> Vec<Definition> {
    vec![
        Definition::flag("--json"),
        Definition::flag("-q"),
        Definition::flag("--help"),
        Definition::value_flag("--min"),
        Definition::value_flag("--max"),
        Definition::value_flag("--flag"),
        Definition::value_flag("--option"),
    ]
}

fn required_value<'a>(entry: &ParsedArg<'a>, name: &str) -> Result<&'a str> {
    entry
        .value()
        .with_context(|| format!("{name} expects a value"))
}

fn count_value(entry: &ParsedArg<'_>, name: &str) -> Result<usize> {
    let raw = required_value(entry, name)?;
    raw.parse()
        .with_context(|| format!("{name} expects a number, got `{raw}`"))
}

fn main() -> Result<()> {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();
    run(&args)
}

fn run(args: &[String]) -> Result<()> {
    let (own, subject) = split_at_separator(args);
    let opts = Options::from_argv(own).context("bad tool options (see --help)")?;

    if opts.help {
        print!("{}", usage());
        return Ok(());
    }

    tracing::debug!(tokens = subject.len(), "classifying subject argv");

    // The scanner always skips argv[0]; give the subject a synthetic one.
    let mut argv = Vec::with_capacity(subject.len() + 1);
    argv.push("argv".to_string());
    argv.extend(subject.iter().cloned());

    let defs = (!opts.defs.is_empty()).then_some(opts.defs.as_slice());
    let entries = scan::parse(&argv, opts.min, opts.max, defs)?;

    if opts.quiet {
        return Ok(());
    }
    if opts.json {
        print_json(&entries)?;
    } else {
        print_text(&entries);
    }

    Ok(())
}

/// Split argv at the first `--` separator: tool options on the left, the
/// subject argv on the right.
fn split_at_separator(args: &[String]) -> (&[String], &[String]) {
    match args.iter().position(|a| a == "--") {
        Some(sep) => (&args[..sep], &args[sep + 1..]),
        None => (args, &args[args.len()..]),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct EntryReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    flag: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<&'a str>,
    positional: bool,
}

fn print_json(entries: &[ParsedArg<'_>]) -> Result<()> {
    let report: Vec<EntryReport<'_>> = entries
        .iter()
        .map(|entry| EntryReport {
            flag: entry.name(),
            value: entry.value(),
            positional: entry.is_positional(),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_text(entries: &[ParsedArg<'_>]) {
    for entry in entries {
        match (entry.name(), entry.value()) {
            (Some(name), Some(value)) => println!("flag {name} = {value}"),
            (Some(name), None) => println!("flag {name}"),
            (None, Some(value)) => println!("positional {value}"),
            (None, None) => {}
        }
    }
}

fn usage() -> String {
    let mut out = String::new();
    out.push_str("arglet - classify an argv against a flag table\n");
    out.push_str("\nUsage: arglet [OPTIONS] -- <ARGV>...\n");
    out.push_str("\nOptions:\n");
    out.push_str("  --flag <NAME>    declare NAME as a boolean flag\n");
    out.push_str("  --option <NAME>  declare NAME as a value-taking flag\n");
    out.push_str("  --min <N>        require at least N positional arguments\n");
    out.push_str("  --max <N>        allow at most N positional arguments\n");
    out.push_str("  --json           print entries as JSON\n");
    out.push_str("  -q               exit status only, no output\n");
    out.push_str("  --help           show this help\n");
    out.push_str("\nExamples:\n");
    out.push_str("  arglet --flag -a --option -n -- -an5 input.txt\n");
    out.push_str("  arglet --json --option --out -- --out report.json\n");
    out
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
