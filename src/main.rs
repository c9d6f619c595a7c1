//! soc-trace entry point: CLI wiring, config loading, and logging setup.

use std::io;
use std::path::Path;
use std::process;

use tracing::Level;

use soc_trace::calculator::PowerCalculator;
use soc_trace::cli::{parse_args, print_usage};
use soc_trace::config::TraceConfig;

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> TraceConfig {
    let config = match path {
        Some(path) => TraceConfig::from_toml_file(path).unwrap_or_else(|e| {
            eprintln!("{e}");
            process::exit(1);
        }),
        None => TraceConfig::default(),
    };

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    config
}

fn main() {
    let cli = parse_args().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        print_usage();
        process::exit(1);
    });
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref());
    let engine = config.build_engine().unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });
    let input = cli.input.unwrap_or_else(|| config.trace.input.clone());

    // Trace failures are reported on stdout and still exit 0.
    let calculator = PowerCalculator::new(engine);
    let mut out = io::stdout().lock();
    if let Err(e) = calculator.calculate(&input, &mut out) {
        eprintln!("error: failed to write output: {e}");
        process::exit(1);
    }
}
