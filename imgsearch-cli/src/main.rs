use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use imgsearch::io::load_rgb_image;
use imgsearch::{
    Algorithm, Executor, ImageSearchError, Match, PixelGrid, ResultSet, SearchConfig, Searcher,
};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Find every position where a small image occurs inside a large one"
)]
struct Cli {
    /// Image to search in.
    large: PathBuf,
    /// Image to search for.
    small: PathBuf,
    /// Number of worker threads (positive integer).
    #[arg(allow_negative_numbers = true)]
    threads: String,
    /// Matching algorithm: `exact` or `euclidian`.
    algorithm: String,
    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write the report to a file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// How band workers are scheduled.
    #[arg(long, value_enum, default_value_t = ExecutorArg::Threads)]
    executor: ExecutorArg,
    /// Enable tracing output on stderr.
    #[arg(long)]
    trace: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ExecutorArg {
    Threads,
    Rayon,
}

impl From<ExecutorArg> for Executor {
    fn from(value: ExecutorArg) -> Self {
        match value {
            ExecutorArg::Threads => Executor::Threads,
            ExecutorArg::Rayon => Executor::Rayon,
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("Usage: imgsearch <image1> <image2> <nThreads> <algorithm>")]
    Usage,
    #[error("Invalid number of threads.")]
    InvalidThreads,
    #[error("Invalid algorithm. Use 'exact' or 'euclidian'.")]
    InvalidAlgorithm,
    #[error("Big picture does not exist.")]
    LargeMissing,
    #[error("Small picture does not exist.")]
    SmallMissing,
    #[error("Error loading images.")]
    Load,
    #[error(transparent)]
    Search(#[from] ImageSearchError),
    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write report: {0}")]
    Output(#[from] io::Error),
}

#[derive(Debug, Serialize)]
struct MatchRecord {
    row: usize,
    col: usize,
}

impl From<&Match> for MatchRecord {
    fn from(value: &Match) -> Self {
        Self {
            row: value.row,
            col: value.col,
        }
    }
}

#[derive(Debug, Serialize)]
struct Report {
    algorithm: &'static str,
    threads: usize,
    count: usize,
    matches: Vec<MatchRecord>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(_) => {
            println!("{}", CliError::Usage);
            return ExitCode::FAILURE;
        }
    };

    if cli.trace {
        if let Err(err) = init_tracing() {
            eprintln!("tracing disabled: {err}");
        }
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::from_default_env().add_directive("imgsearch=debug".parse()?);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init()?;
    Ok(())
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let threads = parse_threads(&cli.threads)?;
    let algorithm = parse_algorithm(&cli.algorithm)?;

    if !cli.large.is_file() {
        return Err(CliError::LargeMissing);
    }
    if !cli.small.is_file() {
        return Err(CliError::SmallMissing);
    }

    let large = load(&cli.large)?;
    let small = load(&cli.small)?;

    let searcher = Searcher::new().with_config(SearchConfig {
        algorithm,
        threads,
        executor: cli.executor.into(),
        ..SearchConfig::default()
    });
    let matches = searcher.find_all(&large, &small)?;

    let text = match cli.format {
        OutputFormat::Text => render_text(&matches),
        OutputFormat::Json => render_json(&matches, algorithm, threads)?,
    };
    match &cli.output {
        Some(path) => fs::write(path, text)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Accepts a positive 32-bit signed integer.
fn parse_threads(raw: &str) -> Result<usize, CliError> {
    match raw.parse::<i32>() {
        Ok(n) if n >= 1 => usize::try_from(n).map_err(|_| CliError::InvalidThreads),
        _ => Err(CliError::InvalidThreads),
    }
}

fn parse_algorithm(raw: &str) -> Result<Algorithm, CliError> {
    raw.parse::<Algorithm>().map_err(|_| CliError::InvalidAlgorithm)
}

fn load(path: &Path) -> Result<PixelGrid, CliError> {
    load_rgb_image(path).map_err(|err| {
        tracing::error!(path = %path.display(), error = %err, "failed to decode image");
        CliError::Load
    })
}

fn render_text(matches: &ResultSet) -> String {
    if matches.is_empty() {
        return "No matches found.\n".to_string();
    }
    let mut out = String::new();
    for m in matches {
        out.push_str(&m.to_string());
        out.push('\n');
    }
    out
}

fn render_json(
    matches: &ResultSet,
    algorithm: Algorithm,
    threads: usize,
) -> Result<String, CliError> {
    let report = Report {
        algorithm: algorithm.as_str(),
        threads,
        count: matches.len(),
        matches: matches.iter().map(MatchRecord::from).collect(),
    };
    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_count_must_be_positive_integer() {
        assert_eq!(parse_threads("4").unwrap(), 4);
        assert_eq!(parse_threads("2147483647").unwrap(), 2_147_483_647);
        for raw in ["0", "-2", "two", "", "1.5", "2147483648", "18446744073709551615"] {
            assert!(matches!(parse_threads(raw), Err(CliError::InvalidThreads)));
        }
    }

    #[test]
    fn algorithm_tags() {
        assert_eq!(parse_algorithm("exact").unwrap(), Algorithm::Exact);
        assert_eq!(parse_algorithm("euclidian").unwrap(), Algorithm::Euclidean);
        assert!(matches!(parse_algorithm("EXACT"), Err(CliError::InvalidAlgorithm)));
    }

    #[test]
    fn error_messages_are_distinct() {
        let messages = [
            CliError::Usage.to_string(),
            CliError::InvalidThreads.to_string(),
            CliError::InvalidAlgorithm.to_string(),
            CliError::LargeMissing.to_string(),
            CliError::SmallMissing.to_string(),
            CliError::Load.to_string(),
        ];
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(messages[1], "Invalid number of threads.");
    }

    #[test]
    fn parses_positionals_and_flags() {
        let cli = Cli::try_parse_from([
            "imgsearch",
            "big.png",
            "small.png",
            "-3",
            "exact",
            "--format",
            "json",
            "--executor",
            "rayon",
        ])
        .unwrap();
        assert_eq!(cli.threads, "-3");
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.executor, ExecutorArg::Rayon);
        assert!(matches!(run(&cli), Err(CliError::InvalidThreads)));

        assert!(Cli::try_parse_from(["imgsearch", "big.png", "small.png", "2"]).is_err());
    }

    #[test]
    fn missing_files_are_reported_in_order() {
        let cli = Cli::try_parse_from([
            "imgsearch",
            "/nonexistent/big.png",
            "/nonexistent/small.png",
            "2",
            "exact",
        ])
        .unwrap();
        assert!(matches!(run(&cli), Err(CliError::LargeMissing)));
    }

    fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
        let path =
            std::env::temp_dir().join(format!("imgsearch-cli-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    fn cli_for(large: &Path, small: &Path) -> Cli {
        Cli::try_parse_from([
            "imgsearch",
            large.to_str().unwrap(),
            small.to_str().unwrap(),
            "2",
            "exact",
        ])
        .unwrap()
    }

    #[test]
    fn missing_small_file_is_reported_after_large_exists() {
        let large = temp_file("present-large.png", b"not inspected");
        let small = std::env::temp_dir().join("imgsearch-cli-definitely-missing.png");
        let result = run(&cli_for(&large, &small));
        let _ = fs::remove_file(&large);
        assert!(matches!(result, Err(CliError::SmallMissing)));
    }

    #[test]
    fn undecodable_images_report_load_error() {
        let large = temp_file("garbage-large.png", b"definitely not a png");
        let small = temp_file("garbage-small.png", b"nor is this");
        let result = run(&cli_for(&large, &small));
        let _ = fs::remove_file(&large);
        let _ = fs::remove_file(&small);
        assert!(matches!(result, Err(CliError::Load)));
        assert_eq!(CliError::Load.to_string(), "Error loading images.");
    }

    #[test]
    fn text_report_lists_row_col_lines() {
        let empty = ResultSet::default();
        assert_eq!(render_text(&empty), "No matches found.\n");

        let set = ResultSet::merge(vec![vec![Match { row: 1, col: 2 }, Match { row: 3, col: 0 }]]);
        assert_eq!(render_text(&set), "1,2\n3,0\n");
    }

    #[test]
    fn json_report_carries_count_and_matches() {
        let set = ResultSet::merge(vec![vec![Match { row: 1, col: 1 }]]);
        let json = render_json(&set, Algorithm::Exact, 2).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["algorithm"], "exact");
        assert_eq!(value["threads"], 2);
        assert_eq!(value["count"], 1);
        assert_eq!(value["matches"][0]["row"], 1);
        assert_eq!(value["matches"][0]["col"], 1);
    }
}
