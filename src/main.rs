use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use notavi::config::Config;
use notavi::editor::Editor;
use notavi::input::keybindings::HELP_MESSAGE;
use notavi::input::KeySource;
use notavi::services::terminal::{self, TerminalGuard, TerminalOutput};
use notavi::services::tracing_setup;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// A small terminal text editor
#[derive(Parser, Debug)]
#[command(name = "notavi")]
#[command(version)]
struct Cli {
    /// File to open; it is created on the first save if it does not exist
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file for editor diagnostics
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> AnyhowResult<()> {
    let cli = Cli::parse();

    let log_file = cli.log_file.clone().unwrap_or_else(Config::default_log_file);
    tracing_setup::init_or_skip(&log_file);
    tracing::info!("Editor starting");

    // An explicitly requested config must load; the default one is optional
    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load_or_default(Config::default_path().as_deref()),
    };
    tracing::debug!("Using {:?}", config);

    let guard = TerminalGuard::enter().context("Failed to put the terminal into raw mode")?;
    let result = real_main(cli.file, config);
    drop(guard);

    if let Err(e) = &result {
        tracing::error!("Editor failed: {:#}", e);
    } else {
        tracing::info!("Editor exited");
    }
    result
}

fn real_main(file: Option<PathBuf>, config: Config) -> AnyhowResult<()> {
    let (cols, rows) = terminal::window_size().context("Failed to get the terminal size")?;
    tracing::info!("Terminal is {}x{}", cols, rows);

    let timeout = config.input_timeout();
    let mut keys = key_source(&config)?;
    let mut editor = Editor::new(config, cols, rows);

    if let Some(path) = &file {
        editor
            .open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
    }
    editor.set_status_message(HELP_MESSAGE);

    let mut output = TerminalOutput::stdout()?;
    run_event_loop(&mut editor, keys.as_mut(), &mut output, (cols, rows), timeout)
}

/// Draw, wait for a key, apply it; until the editor asks to quit
///
/// A read that times out still redraws, so expired status messages disappear
/// and resizes are picked up.
fn run_event_loop(
    editor: &mut Editor,
    keys: &mut dyn KeySource,
    output: &mut TerminalOutput,
    mut size: (u16, u16),
    timeout: Duration,
) -> AnyhowResult<()> {
    loop {
        if let Ok(current) = crossterm::terminal::size() {
            if current != size && current.0 > 0 && current.1 > 0 {
                tracing::debug!("Terminal resized to {}x{}", current.0, current.1);
                editor.resize(current.0, current.1);
                size = current;
            }
        }

        let frame = editor.render(Instant::now())?;
        output.write_frame(&frame).context("Failed to write frame")?;

        if let Some(key) = keys.next_key(timeout).context("Failed to read input")? {
            editor.handle_key(key);
        }

        if editor.should_quit() {
            return Ok(());
        }
    }
}

#[cfg(unix)]
fn key_source(config: &Config) -> io::Result<Box<dyn KeySource>> {
    use notavi::input::KeyDecoder;
    let input = terminal::TtyInput::stdin()?;
    Ok(Box::new(
        KeyDecoder::new(input).with_sequence_timeout(config.input_timeout()),
    ))
}

#[cfg(not(unix))]
fn key_source(_config: &Config) -> io::Result<Box<dyn KeySource>> {
    Ok(Box::new(terminal::CrosstermKeys))
}
