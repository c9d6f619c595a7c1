//! Command-line options. With no arguments the stock input file is traced.

use std::env;
use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct CliOptions {
    pub input: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub verbose: bool,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(&args)
}

pub fn parse_args_from(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions::default();

    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --input (expected a CSV path)")?;
                if opts.input.replace(PathBuf::from(path)).is_some() {
                    return Err("--input provided more than once".to_string());
                }
            }
            "--config" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --config (expected a TOML path)")?;
                if opts.config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--verbose" | "-v" => opts.verbose = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    Ok(opts)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("soc-trace: battery state-of-charge trace from a power time series");
    eprintln!();
    eprintln!("Usage: soc-trace [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --input <path>    CSV file with Time and Power columns");
    eprintln!("                    (default: power_over_time.csv)");
    eprintln!("  --config <path>   Load battery and trace settings from TOML");
    eprintln!("  --verbose, -v     Log each SOC step to stderr");
    eprintln!("  --help, -h        Show this help message");
}
