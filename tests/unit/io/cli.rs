//! Tests for command-line parsing and batch file processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use ndarray::Array2;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use wavetile::io::cli::{Cli, FileProcessor, is_output_file, output_path_for};
    use wavetile::io::configuration::{
        DEFAULT_ATTEMPTS, DEFAULT_OUTPUT_HEIGHT, DEFAULT_OUTPUT_WIDTH, DEFAULT_PATTERN_SIZE,
        DEFAULT_SYMMETRY,
    };
    use wavetile::io::image::{export_grid_as_png, load_png_grid};

    const BLACK: [u8; 4] = [0, 0, 0, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];

    fn write_checkerboard(path: &Path) {
        let grid = Array2::from_shape_fn((4, 4), |(r, c)| if (r + c) % 2 == 0 { BLACK } else { WHITE });
        export_grid_as_png(&grid, path).expect("sample written");
    }

    // Tests CLI parsing with only the required target argument
    // Verified by changing default values
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "sample.png"]);

        assert_eq!(cli.target, PathBuf::from("sample.png"));
        assert_eq!(cli.seed, None);
        assert_eq!(cli.width, DEFAULT_OUTPUT_WIDTH);
        assert_eq!(cli.height, DEFAULT_OUTPUT_HEIGHT);
        assert_eq!(cli.pattern_size, DEFAULT_PATTERN_SIZE);
        assert_eq!(cli.symmetry, DEFAULT_SYMMETRY);
        assert_eq!(cli.attempts, DEFAULT_ATTEMPTS);
        assert!(!cli.bounded_input && !cli.periodic_output && !cli.ground);
        assert_eq!(cli.verbose, 0);
    }

    // Tests short flags for every option
    // Verified by changing short flag definitions
    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "program", "dir", "-s", "9", "-w", "20", "-H", "10", "-N", "2", "-y", "4", "-p", "-g",
            "-a", "3", "-q", "-n", "-vv",
        ]);

        assert_eq!(cli.seed, Some(9));
        assert_eq!((cli.width, cli.height), (20, 10));
        assert_eq!((cli.pattern_size, cli.symmetry), (2, 4));
        assert!(cli.periodic_output && cli.ground);
        assert_eq!(cli.attempts, 3);
        assert!(!cli.should_show_progress());
        assert!(!cli.skip_existing());
        assert_eq!(cli.verbose, 2);
    }

    // Tests conversion of flags into a generator configuration
    // Verified by passing bounded_input through without inversion
    #[test]
    fn test_overlapping_config() {
        let cli = Cli::parse_from(["program", "sample.png", "--bounded-input", "-N", "2"]);
        let config = cli.overlapping_config(77);

        assert!(!config.periodic_input);
        assert_eq!(config.pattern_size, 2);
        assert_eq!(config.seed, Some(77));
        assert_eq!(config.out_width, DEFAULT_OUTPUT_WIDTH);
    }

    // Tests output naming next to the input
    // Verified by dropping the suffix
    #[test]
    fn test_output_paths() {
        let output = output_path_for(Path::new("samples/flowers.png"));
        assert_eq!(output, PathBuf::from("samples/flowers_result.png"));
        assert!(is_output_file(&output));
        assert!(!is_output_file(Path::new("samples/flowers.png")));
    }

    // Tests a full run over a directory, skipping previous outputs
    // Verified by collecting files ending in _result
    #[test]
    fn test_process_directory() {
        let dir = TempDir::new().expect("temp dir");
        let sample = dir.path().join("board.png");
        write_checkerboard(&sample);

        let target = dir.path().to_string_lossy().into_owned();
        let args = ["program", target.as_str(), "-s", "4", "-w", "6", "-H", "5", "-N", "2", "-q"];
        let mut processor = FileProcessor::new(Cli::parse_from(args));
        assert_eq!(processor.process().expect("processing succeeds"), 0);

        let output = load_png_grid(&dir.path().join("board_result.png")).expect("output written");
        assert_eq!(output.dim(), (5, 6));
        assert!(output.iter().all(|&pixel| pixel == BLACK || pixel == WHITE));

        let mut again = FileProcessor::new(Cli::parse_from(args));
        assert_eq!(again.process().expect("existing output skipped"), 0);
    }

    // Tests rejection of targets that are neither PNG files nor directories
    // Verified by accepting any existing file
    #[test]
    fn test_invalid_targets() {
        let dir = TempDir::new().expect("temp dir");
        let text = dir.path().join("notes.txt");
        std::fs::write(&text, "not an image").expect("file written");

        let text_arg = text.to_string_lossy().into_owned();
        let mut processor = FileProcessor::new(Cli::parse_from(["program", text_arg.as_str(), "-q"]));
        assert!(processor.process().is_err());

        let missing = dir.path().join("missing");
        let missing_arg = missing.to_string_lossy().into_owned();
        let mut processor =
            FileProcessor::new(Cli::parse_from(["program", missing_arg.as_str(), "-q"]));
        assert!(processor.process().is_err());
    }

    // Tests that zero attempts is a parameter error
    // Verified by removing the attempts check
    #[test]
    fn test_zero_attempts() {
        let dir = TempDir::new().expect("temp dir");
        let target = dir.path().to_string_lossy().into_owned();
        let mut processor =
            FileProcessor::new(Cli::parse_from(["program", target.as_str(), "-a", "0", "-q"]));
        assert!(processor.process().is_err());
    }
}
