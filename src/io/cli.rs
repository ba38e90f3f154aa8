//! Command-line interface for batch overlapping generation from PNG samples

use crate::algorithm::{overlapping::OverlappingWfc, selection::RandomSelector};
use crate::io::configuration::{
    DEFAULT_ATTEMPTS, DEFAULT_OUTPUT_HEIGHT, DEFAULT_OUTPUT_WIDTH, DEFAULT_PATTERN_SIZE,
    DEFAULT_SYMMETRY, OUTPUT_SUFFIX, OverlappingConfig,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{export_grid_as_png, load_png_grid};
use crate::io::progress::ProgressManager;
use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "wavetile")]
#[command(
    author,
    version,
    about = "Generate images locally similar to PNG samples using wave function collapse"
)]
/// Command-line arguments for the generation tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for reproducible generation (drawn from system entropy if omitted)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Output width in pixels
    #[arg(short = 'w', long, default_value_t = DEFAULT_OUTPUT_WIDTH)]
    pub width: usize,

    /// Output height in pixels
    #[arg(short = 'H', long, default_value_t = DEFAULT_OUTPUT_HEIGHT)]
    pub height: usize,

    /// Side length of extracted patterns
    #[arg(short = 'N', long, default_value_t = DEFAULT_PATTERN_SIZE)]
    pub pattern_size: usize,

    /// Number of orientation variants per pattern (1-8)
    #[arg(short = 'y', long, default_value_t = DEFAULT_SYMMETRY)]
    pub symmetry: usize,

    /// Treat the sample as bounded instead of wrapping at its edges
    #[arg(long)]
    pub bounded_input: bool,

    /// Make the output wrap around its edges
    #[arg(short, long)]
    pub periodic_output: bool,

    /// Pin the sample's bottom-center pattern along the bottom row
    #[arg(short, long)]
    pub ground: bool,

    /// Attempts per file; attempt k reseeds with seed + k
    #[arg(short, long, default_value_t = DEFAULT_ATTEMPTS)]
    pub attempts: usize,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Generator configuration for a given seed
    pub const fn overlapping_config(&self, seed: u64) -> OverlappingConfig {
        OverlappingConfig {
            pattern_size: self.pattern_size,
            periodic_input: !self.bounded_input,
            periodic_output: self.periodic_output,
            ground: self.ground,
            symmetry: self.symmetry,
            out_width: self.width,
            out_height: self.height,
            seed: Some(seed),
        }
    }
}

/// Orchestrates batch processing of PNG files with progress tracking
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

    /// Process files according to CLI arguments
    ///
    /// Returns the number of files for which every attempt contradicted.
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, loading, configuration or
    /// export fails
    pub fn process(&mut self) -> Result<usize> {
        self.cli.overlapping_config(0).validate()?;
        if self.cli.attempts == 0 {
            return Err(invalid_parameter(
                "attempts",
                &self.cli.attempts,
                &"must be at least 1",
            ));
        }

        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(0);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let mut failures = 0;
        for (index, file) in files.iter().enumerate() {
            if !self.process_file(file, index)? {
                failures += 1;
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(failures)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if self.cli.target.extension().and_then(|s| s.to_str()) == Some("png") {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_parameter(
                    "target",
                    &self.cli.target.display(),
                    &"target file must be a PNG image",
                ))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if path.extension().and_then(|s| s.to_str()) == Some("png")
                    && !is_output_file(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &self.cli.target.display(),
                &"target must be a PNG file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = output_path_for(input_path);
        if output_path.exists() {
            tracing::info!(input = %input_path.display(), "skipping, output exists");
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<bool> {
        let start_time = Instant::now();
        let output_path = output_path_for(input_path);

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, self.cli.attempts);
        }

        let sample = load_png_grid(input_path)?;
        let base_seed = self.cli.seed.unwrap_or_else(RandomSelector::random_seed);
        let mut generator = OverlappingWfc::new(&sample, self.cli.overlapping_config(base_seed))?;
        tracing::info!(
            input = %input_path.display(),
            patterns = generator.catalog().len(),
            seed = base_seed,
            "loaded sample"
        );

        for attempt in 0..self.cli.attempts {
            if let Some(ref mut pm) = self.progress_manager {
                pm.update_attempt(index, attempt + 1);
            }
            if attempt > 0 {
                generator.reset(base_seed.wrapping_add(attempt as u64))?;
            }

            match generator.run() {
                Ok(grid) => {
                    export_grid_as_png(&grid, &output_path)?;
                    tracing::info!(
                        output = %output_path.display(),
                        seed = generator.seed(),
                        attempt = attempt + 1,
                        elapsed_ms = start_time.elapsed().as_millis(),
                        "generated"
                    );
                    if let Some(ref mut pm) = self.progress_manager {
                        pm.complete_file(index, true);
                    }
                    return Ok(true);
                }
                Err(err) if err.is_contradiction() => {
                    tracing::debug!(attempt = attempt + 1, seed = generator.seed(), %err, "retrying");
                }
                Err(err) => return Err(err),
            }
        }

        tracing::warn!(
            input = %input_path.display(),
            attempts = self.cli.attempts,
            "every attempt ended in a contradiction"
        );
        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, false);
        }
        Ok(false)
    }
}

/// Output path `<stem>_result.<ext>` next to the input
pub fn output_path_for(input_path: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let extension = input_path.extension().unwrap_or_default();
    let output_name = format!(
        "{}{}.{}",
        stem.to_string_lossy(),
        OUTPUT_SUFFIX,
        extension.to_string_lossy()
    );

    if let Some(parent) = input_path.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}

/// Whether a file looks like a previous run's output
pub fn is_output_file(path: &Path) -> bool {
    path.file_stem()
        .is_some_and(|stem| stem.to_string_lossy().ends_with(OUTPUT_SUFFIX))
}
