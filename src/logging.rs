//! File logging for the game.
//!
//! The terminal is busy drawing the board, so log records go to a file. A
//! panic hook puts the terminal back into a usable state before the panic
//! message is logged.

use std::io::stderr;
use std::ops::Deref;
use std::panic;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use crossterm::{execute, terminal::LeaveAlternateScreen};
use log::LevelFilter;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

pub const DEFAULT_LOG_FILE: &str = "/tmp/tui_snake.log";

const PATTERN: &str = "{l} {d(%H:%M:%S.%3f)} {f}:{L} {m}{n}";

pub fn setup(log_file: &Path, debug: bool) -> Result<()> {
    panic::set_hook(Box::new(|panic_info| {
        // Best effort, the screen may already be gone
        let _ = crossterm::terminal::disable_raw_mode();
        let mut err = stderr();
        let _ = execute!(err, LeaveAlternateScreen);

        let (filename, line) = panic_info
            .location()
            .map(|loc| (loc.file(), loc.line()))
            .unwrap_or(("<unknown>", 0));

        let cause = panic_info
            .payload()
            .downcast_ref::<String>()
            .map(String::deref);

        let cause = cause.unwrap_or_else(|| {
            panic_info
                .payload()
                .downcast_ref::<&str>()
                .copied()
                .unwrap_or("<cause unknown>")
        });

        log::error!("A panic occurred at {}:{}: {}", filename, line, cause);
        eprintln!("tui_snake panicked at {}:{}: {}", filename, line, cause);
    }));

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    let config = Config::builder()
        .appender(Appender::builder().build("file-appender", Box::new(file_appender)))
        .build(
            Root::builder()
                .appender("file-appender")
                .build(level_filter(debug)),
        )
        .map_err(|err| anyhow!("Invalid logging config: {err}"))?;

    log4rs::init_config(config).map_err(|err| anyhow!("Failed to install logger: {err}"))?;
    Ok(())
}

fn level_filter(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}
