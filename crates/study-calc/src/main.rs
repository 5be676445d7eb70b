//! `study-calc` command-line entry point

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::panic))]

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use study_calc::config::{CalculatorConfig, ConfigError};
use study_calc::core::{CalcError, Token};
use study_calc::display::{Controller, RecordingSink, Snapshot};
use study_calc::keypad::Keypad;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "study-calc", version, about = "Scientific keypad calculator")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Press buttons by label and print the final display
    Eval {
        /// Button labels, e.g. `3 + 4 =` or `1 6 √`
        #[arg(required = true, allow_hyphen_values = true)]
        labels: Vec<String>,

        /// Print the final snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the keypad layout
    Keys,

    /// Interactive terminal calculator
    Tui,
}

/// Errors surfaced by the binary
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("button '{label}': {source}")]
    Token {
        label: String,
        #[source]
        source: CalcError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("built without the `tui` feature")]
    TuiUnavailable,
}

fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    }
}

/// Installs the subscriber; `quiet` discards logs unless a file is given
fn init_tracing(verbose: bool, log_file: Option<&Path>, quiet: bool) -> Result<(), CliError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_ansi(false);

    match log_file {
        Some(path) => builder.with_writer(Mutex::new(File::create(path)?)).init(),
        None if quiet => builder.with_writer(std::io::sink).init(),
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<CalculatorConfig, CliError> {
    match path {
        Some(path) => Ok(CalculatorConfig::load(path)?),
        None => Ok(CalculatorConfig::default()),
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();

    let quiet = matches!(cli.command, Commands::Tui);
    init_tracing(cli.verbose, cli.log_file.as_deref(), quiet)?;

    let config = load_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Eval { labels, json } => cmd_eval(config, labels, *json),
        Commands::Keys => {
            cmd_keys();
            Ok(())
        }
        Commands::Tui => cmd_tui(config),
    }
}

#[cfg(feature = "tui")]
fn cmd_tui(config: CalculatorConfig) -> Result<(), CliError> {
    tui_mode::run(config)
}

#[cfg(not(feature = "tui"))]
fn cmd_tui(_config: CalculatorConfig) -> Result<(), CliError> {
    Err(CliError::TuiUnavailable)
}

fn eval_labels(config: CalculatorConfig, labels: &[String]) -> Result<Snapshot, CliError> {
    let mut controller = Controller::with_config(config, RecordingSink::new());
    for label in labels {
        let token: Token = label.parse().map_err(|source| CliError::Token {
            label: label.clone(),
            source,
        })?;
        controller.dispatch(token);
    }
    Ok(Snapshot::of(controller.calculator()))
}

fn cmd_eval(config: CalculatorConfig, labels: &[String], json: bool) -> Result<(), CliError> {
    let snapshot = eval_labels(config, labels)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        if !snapshot.expression.is_empty() {
            println!("{}", snapshot.expression);
        }
        println!("{}", snapshot.display);
        if let Some(memory) = &snapshot.memory {
            println!("{memory}");
        }
    }
    Ok(())
}

fn cmd_keys() {
    let keypad = Keypad::new();
    let (rows, _) = keypad.dimensions();
    for row in 0..rows {
        let line: Vec<String> = keypad
            .row(row)
            .map(|b| format!("{:<14}", format!("{} [{}]", b.label, b.token.category())))
            .collect();
        println!("{}", line.join("").trim_end());
    }
}

#[cfg(feature = "tui")]
mod tui_mode {
    use std::io::{self, Write};

    use crossterm::{
        event::{
            self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
            MouseEventKind,
        },
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use ratatui::{backend::Backend, backend::CrosstermBackend, layout::Rect, Terminal};
    use study_calc::config::CalculatorConfig;
    use study_calc::tui::{keypad_area, render, CalculatorApp, InputHandler};

    use super::CliError;

    pub(super) fn run(config: CalculatorConfig) -> Result<(), CliError> {
        enable_raw_mode()?;
        let mut terminal = start(io::stdout(), &mut io::stdout())?;

        let result = event_loop(&mut terminal, CalculatorApp::with_config(config));

        restore(terminal.backend_mut())?;
        terminal.show_cursor()?;

        result
    }

    /// Sets up the screen on `out`, restoring through `fallback` on failure
    fn start<W: Write>(
        out: W,
        fallback: &mut impl Write,
    ) -> Result<Terminal<CrosstermBackend<W>>, CliError> {
        setup(out).map_err(|err| {
            // The setup error is the one reported
            let _ = restore(fallback);
            err
        })
    }

    /// Enters the alternate screen with mouse capture; raw mode must be on
    fn setup<W: Write>(mut out: W) -> Result<Terminal<CrosstermBackend<W>>, CliError> {
        execute!(out, EnterAlternateScreen, EnableMouseCapture)?;
        Ok(Terminal::new(CrosstermBackend::new(out))?)
    }

    fn restore<W: Write>(out: &mut W) -> Result<(), CliError> {
        disable_raw_mode()?;
        execute!(out, LeaveAlternateScreen, DisableMouseCapture)?;
        Ok(())
    }

    fn event_loop<B: Backend>(
        terminal: &mut Terminal<B>,
        mut app: CalculatorApp,
    ) -> Result<(), CliError> {
        let input = InputHandler::new();
        tracing::debug!("terminal calculator started");

        while !app.should_quit() {
            terminal.draw(|f| render(&app, f))?;

            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.apply(input.handle_key(key));
                }
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    let size = terminal.size()?;
                    let area = keypad_area(Rect::new(0, 0, size.width, size.height), app.show_help());
                    app.click(area, mouse.column, mouse.row);
                }
                _ => {}
            }
        }
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        struct BrokenPipe;

        impl Write for BrokenPipe {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::ErrorKind::BrokenPipe.into())
            }

            fn flush(&mut self) -> io::Result<()> {
                Err(io::ErrorKind::BrokenPipe.into())
            }
        }

        #[test]
        fn test_failed_setup_restores_screen() {
            let mut fallback = Vec::new();
            let result = start(BrokenPipe, &mut fallback);
            assert!(matches!(result, Err(CliError::Io(_))));

            let written = String::from_utf8(fallback).unwrap();
            assert!(written.contains("\x1b[?1049l"));
            assert!(written.contains("\x1b[?1000l"));
        }

        #[test]
        fn test_restore_leaves_alternate_screen() {
            let mut out = Vec::new();
            restore(&mut out).unwrap();
            assert!(String::from_utf8(out).unwrap().contains("\x1b[?1049l"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_cli_parses_eval() {
        let cli = Cli::try_parse_from(["study-calc", "--verbose", "eval", "3", "-", "4", "="])
            .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Eval { labels, json } => {
                assert_eq!(labels, vec!["3", "-", "4", "="]);
                assert!(!json);
            }
            _ => panic!("expected eval"),
        }
    }

    #[test]
    fn test_cli_eval_requires_labels() {
        assert!(Cli::try_parse_from(["study-calc", "eval"]).is_err());
    }

    #[test]
    fn test_eval_labels() {
        let snap = eval_labels(CalculatorConfig::default(), &labels("3 + 4 × 2 =")).unwrap();
        assert_eq!(snap.display, "14");
        assert_eq!(snap.expression, "7 × 2 = 14");
    }

    #[test]
    fn test_eval_bad_label() {
        let err = eval_labels(CalculatorConfig::default(), &labels("3 + bogus")).unwrap_err();
        assert!(err.to_string().starts_with("button 'bogus'"));
    }

    #[test]
    fn test_load_config_default_and_file() {
        assert_eq!(load_config(None).unwrap(), CalculatorConfig::default());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calc.yaml");
        std::fs::write(&path, "error_marker: Error\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.error_marker, "Error");

        let missing = dir.path().join("missing.yaml");
        assert!(matches!(
            load_config(Some(&missing)),
            Err(CliError::Config(_))
        ));
    }
}
