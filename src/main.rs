use std::{fs::read_to_string, path::{Path, PathBuf}, process, time::Instant};

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, level_filters::LevelFilter};

use tokenizer::{
    display_error,
    lexer::lexer::{tokenize_with, MatchPolicy},
    logging::{init_logging, LogFormat},
};

#[derive(Parser, Debug)]
#[command(name = "tokenizer", about = "Tokenize source files", version)]
struct Cli {
    /// Log verbosity on stderr
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    log_level: LogLevel,

    /// Log layout on stderr
    #[arg(long, value_enum, default_value_t = Format::Compact, global = true)]
    log_format: Format,

    /// Pick the longest matching rule instead of the first one
    #[arg(long, global = true)]
    longest_match: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one token per line
    Tokenize {
        /// Source file to read
        file: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Pretty,
    Compact,
}

impl From<Format> for LogFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Pretty => LogFormat::Pretty,
            Format::Compact => LogFormat::Compact,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level.into(), cli.log_format.into());

    let policy = if cli.longest_match { MatchPolicy::LongestMatch } else { MatchPolicy::FirstMatch };

    match cli.command {
        Command::Tokenize { file } => process::exit(run_tokenize(&file, policy)),
    }
}

fn run_tokenize(file: &Path, policy: MatchPolicy) -> i32 {
    let file_contents = match read_to_string(file) {
        Ok(contents) => contents,
        Err(err) => {
            eprintln!("Unable to read the file: {}", err);
            return 1;
        }
    };

    let start = Instant::now();

    match tokenize_with(&file_contents, policy) {
        Ok(tokens) => {
            info!(target: "tokenizer", count = tokens.len(), elapsed = ?start.elapsed(), "tokenized {}", file.display());
            for token in &tokens {
                token.debug();
            }
            0
        }
        Err(error) => {
            display_error(&error, file, &file_contents);
            1
        }
    }
}
