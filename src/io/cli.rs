//! Command-line interface for expanding or refining a single texture

use crate::algorithm::cancel::CancellationToken;
use crate::algorithm::executor::{
    NoProgress, SynthesisConfig, SynthesisOutcome, TextureExpander,
};
use crate::io::configuration::{DEFAULT_RADIUS, DEFAULT_SCALE_FACTOR, OUTPUT_SUFFIX};
use crate::io::error::Result;
use crate::io::image::{decode_file, encode_file};
use crate::io::progress::ProgressManager;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "texture-critter")]
#[command(
    author,
    version,
    about = "Grow or refine a texture by greedy best-neighbourhood pixel matching"
)]
/// Command-line arguments for the texture expansion tool
pub struct Cli {
    /// Source texture to copy pixels from
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Destination file (defaults to `<input>_expanded.<ext>`)
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Refine this image instead of growing a blank canvas
    #[arg(short, long, value_name = "FILE")]
    pub target: Option<PathBuf>,

    /// Neighbourhood radius in pixels
    #[arg(short, long, default_value_t = DEFAULT_RADIUS)]
    pub radius: u32,

    /// Canvas size as a multiple of the source size (generative mode only)
    #[arg(short, long, default_value_t = DEFAULT_SCALE_FACTOR)]
    pub scale: usize,

    /// Worker threads for the source search (defaults to logical CPUs)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Stop after this many seconds and write the partial result
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log level or specification (overridden by `RUST_LOG`)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Engine configuration derived from the arguments
    pub fn synthesis_config(&self) -> SynthesisConfig {
        SynthesisConfig {
            radius: self.radius,
            threads: self.threads.unwrap_or_else(num_cpus::get),
        }
    }

    /// Cancellation token honouring `--timeout`
    pub fn cancellation_token(&self) -> CancellationToken {
        self.timeout.map_or_else(CancellationToken::new, |secs| {
            CancellationToken::with_timeout(Duration::from_secs(secs))
        })
    }

    /// Output path, explicit or derived from the input
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| Self::default_output_path(&self.input))
    }

    /// `<stem>_expanded.<ext>` beside the input
    pub fn default_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = input_path.extension().map_or_else(
            || format!("{}{OUTPUT_SUFFIX}", stem.to_string_lossy()),
            |extension| {
                format!(
                    "{}{OUTPUT_SUFFIX}.{}",
                    stem.to_string_lossy(),
                    extension.to_string_lossy()
                )
            },
        );

        input_path.parent().map_or_else(
            || PathBuf::from(&output_name),
            |parent| parent.join(&output_name),
        )
    }
}

/// Orchestrates decode, synthesis and encode for one invocation
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Decode inputs, run synthesis and write the result
    ///
    /// A run stopped by `--timeout` still writes its partial grid.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The source or target image cannot be decoded
    /// - Parameters are out of range
    /// - The result cannot be encoded or written
    pub fn process(&mut self) -> Result<SynthesisOutcome> {
        let start_time = Instant::now();
        let output_path = self.cli.output_path();
        let config = self.cli.synthesis_config();

        let source = decode_file(&self.cli.input)?;
        log::info!(
            "Loaded source '{}' ({}x{}, {:?})",
            self.cli.input.display(),
            source.width(),
            source.height(),
            source.mode()
        );

        let mut expander = match &self.cli.target {
            Some(target_path) => {
                let target = decode_file(target_path)?;
                log::info!(
                    "Refining target '{}' ({}x{})",
                    target_path.display(),
                    target.width(),
                    target.height()
                );
                TextureExpander::targeted(source, target, config)?
            }
            None => TextureExpander::generative(source, self.cli.scale, config)?,
        };

        let cancel = self.cli.cancellation_token();
        let outcome = match self.progress_manager.as_mut() {
            Some(pm) => {
                pm.start(&self.cli.input, expander.total());
                let outcome = expander.run(&cancel, pm)?;
                pm.finish(&outcome);
                outcome
            }
            None => expander.run(&cancel, &mut NoProgress)?,
        };

        encode_file(expander.target(), &output_path)?;
        log::info!(
            "Wrote '{}' in {:.2?}",
            output_path.display(),
            start_time.elapsed()
        );

        Ok(outcome)
    }
}
