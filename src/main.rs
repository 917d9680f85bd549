//! Gridlet - a minimal spreadsheet driven from the command line

mod error;
mod script;

use std::env;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use gridlet_core::{Config, Document, storage};
use tracing_subscriber::EnvFilter;

use crate::error::CliError;
use crate::script::Edit;

fn print_usage() {
    eprintln!("Usage: gridlet [OPTIONS] [SCRIPT]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [SCRIPT]                  Edit script, one `<REF> <TEXT>` per line (- for stdin)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --set <REF=TEXT>      Apply an edit after the script (can be repeated)");
    eprintln!("  -o, --output <FILE>       Export rendered values (.csv, otherwise markdown)");
    eprintln!("  --recompute               Refresh cached formula values before output");
    eprintln!("  --config <FILE>           Read settings from FILE");
    eprintln!("  --no-config               Ignore the user config file");
    eprintln!("  -h, --help                Print help");
    eprintln!();
    eprintln!("Set GRIDLET_LOG (e.g. GRIDLET_LOG=debug) to control log output.");
}

#[derive(Debug, Default)]
struct Options {
    script: Option<PathBuf>,
    sets: Vec<Edit>,
    output: Option<PathBuf>,
    recompute: bool,
    config_file: Option<PathBuf>,
    no_config: bool,
}

/// Returns `Ok(None)` when help was requested.
fn parse_args(args: &[String]) -> std::result::Result<Option<Options>, CliError> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| CliError::MissingValue(name.to_string()))
        };
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "-s" | "--set" => options.sets.push(Edit::from_assignment(&value("--set")?)?),
            "-o" | "--output" => options.output = Some(PathBuf::from(value("--output")?)),
            "--config" => options.config_file = Some(PathBuf::from(value("--config")?)),
            "--no-config" => options.no_config = true,
            "--recompute" => options.recompute = true,
            "-" if options.script.is_none() => options.script = Some(PathBuf::from("-")),
            other if other.starts_with('-') => {
                return Err(CliError::UnknownOption(other.to_string()));
            }
            other => {
                if options.script.is_some() {
                    return Err(CliError::UnexpectedArgument(other.to_string()));
                }
                options.script = Some(PathBuf::from(other));
            }
        }
    }
    Ok(Some(options))
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("GRIDLET_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(options: &Options) -> Result<Config> {
    if let Some(path) = &options.config_file {
        return Ok(Config::load(path)?);
    }
    if options.no_config {
        return Ok(Config::default());
    }
    Ok(Config::discover()?)
}

fn read_script(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("reading script {}", p.display())),
        Some(_) => read_stdin(),
        // Don't block waiting on an interactive terminal.
        None if !std::io::stdin().is_terminal() => read_stdin(),
        None => Ok(String::new()),
    }
}

fn read_stdin() -> Result<String> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .map_err(CliError::from)
        .context("reading script from stdin")?;
    Ok(content)
}

/// Apply all edits; returns false if any of them was rejected.
fn run(options: Options) -> Result<bool> {
    let config = load_config(&options)?;
    let mut doc = Document::with_config(&config);

    let mut edits = script::parse_script(&read_script(options.script.as_deref())?);
    edits.extend(options.sets);
    tracing::debug!(count = edits.len(), "applying edits");

    let mut all_applied = true;
    for edit in &edits {
        if let Err(e) = doc.apply_edit_at(&edit.reference, &edit.text) {
            eprintln!("{}: {}: {}", edit.source, edit.reference, e);
            all_applied = false;
        }
    }

    if options.recompute {
        for (cell_ref, e) in doc.recompute_all() {
            eprintln!("recompute: {}: {}", cell_ref, e);
        }
    }

    let marker = config.display.error_marker.as_str();
    match &options.output {
        Some(path) => {
            let is_csv = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            if is_csv {
                storage::write_csv(path, &doc, marker)?;
            } else {
                storage::write_markdown(path, &doc, marker)?;
            }
            eprintln!("Exported to {}", path.display());
        }
        None => {
            for cell in doc.render_all() {
                println!("{}\t{}", cell.cell_ref, cell.display_or(marker));
            }
        }
    }

    Ok(all_applied)
}

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            return ExitCode::from(2);
        }
    };

    match run(options) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args_collects_options() {
        let options = parse_args(&args(&[
            "edits.txt",
            "-s",
            "A1=3",
            "--set",
            "B1==A1",
            "-o",
            "out.csv",
            "--recompute",
            "--no-config",
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(options.script, Some(PathBuf::from("edits.txt")));
        assert_eq!(options.sets.len(), 2);
        assert_eq!(options.sets[1].text, "=A1");
        assert_eq!(options.output, Some(PathBuf::from("out.csv")));
        assert!(options.recompute);
        assert!(options.no_config);
    }

    #[test]
    fn test_parse_args_help() {
        assert!(parse_args(&args(&["-h"])).unwrap().is_none());
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(matches!(
            parse_args(&args(&["--bogus"])),
            Err(CliError::UnknownOption(_))
        ));
        assert!(matches!(
            parse_args(&args(&["-o"])),
            Err(CliError::MissingValue(_))
        ));
        assert!(matches!(
            parse_args(&args(&["a.txt", "b.txt"])),
            Err(CliError::UnexpectedArgument(_))
        ));
        assert!(matches!(
            parse_args(&args(&["--set", "A1"])),
            Err(CliError::InvalidAssignment(_))
        ));
    }
}
