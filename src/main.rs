//! CLI entry point for greedy best-neighbourhood texture synthesis

use clap::Parser;
use std::process::ExitCode;
use texture_critter::SynthesisError;
use texture_critter::io::cli::{Cli, FileProcessor};
use texture_critter::io::logging::{init_logging, log_spec};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _logger = match init_logging(log_spec(cli.log_level.as_deref(), cli.quiet)) {
        Ok(handle) => handle,
        Err(e) => {
            report_without_logger(&e);
            return ExitCode::FAILURE;
        }
    };

    let mut processor = FileProcessor::new(cli);
    match processor.process() {
        Ok(outcome) if outcome.cancelled => {
            log::warn!(
                "Wrote partial result: {} of {} pixels synthesized",
                outcome.synthesized,
                outcome.total
            );
            ExitCode::SUCCESS
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

// No logger to report through
#[allow(clippy::print_stderr)]
fn report_without_logger(error: &SynthesisError) {
    eprintln!("{error}");
}
