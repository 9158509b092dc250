//! Logging initialisation for the command-line front end.
//!
//! Lexer events are emitted under the `tokenizer::lexer` target; everything
//! else uses the crate default. Output always goes to stderr so token dumps on
//! stdout stay clean.

use std::io;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

pub const LEXER_TARGET: &str = "tokenizer::lexer";

/// Log output format
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line, human oriented
    Pretty,
    #[default]
    Compact,
}

/// Filter used by [`init_logging`]: `level` for the lexer and the rest of the
/// crate, nothing from dependencies.
pub fn targets(level: LevelFilter) -> Targets {
    Targets::new()
        .with_target("tokenizer", level)
        .with_target(LEXER_TARGET, level)
}

/// Installs the global subscriber. Calling it twice is a no-op.
pub fn init_logging(level: LevelFilter, format: LogFormat) {
    let layer = match format {
        LogFormat::Pretty => fmt::layer().pretty().with_writer(io::stderr).with_filter(targets(level)).boxed(),
        LogFormat::Compact => fmt::layer().compact().with_writer(io::stderr).with_filter(targets(level)).boxed(),
    };

    let _ = tracing_subscriber::registry().with(layer).try_init();
}
