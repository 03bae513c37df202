//! fitsprep - Reorganize FITS imaging sessions for Siril
//!
//! This is the CLI application: it merges configuration, runs the
//! reorganization engine on a blocking worker while rendering its events,
//! and maps the outcome to an exit code.

mod cli;
mod display;
mod error;
mod events;
mod logging;

use crate::cli::Cli;
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::events::EventHandler;
use clap::Parser;
use fitsprep_config::{constants, Config};
use fitsprep_events::EventReceiver;
use fitsprep_ops::{reorganize, ReorgContext, ReorgContextBuilder, Session};
use fitsprep_types::{ColorChoice, OutputFormat, ReorgReport, RunStatus, TransferMode};
use std::path::PathBuf;
use std::process;
use tokio::select;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Usage errors exit with 1 like every other abort; help and version exit 0
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            process::exit(RunStatus::Aborted.exit_code());
        }
    };
    let json_mode = cli.global.json;

    // Initialize tracing with JSON awareness
    init_tracing(json_mode, cli.global.debug);

    let code = match run(cli).await {
        Ok(status) => status.exit_code(),
        Err(e) => {
            error!("Application error: {}", e);
            if json_mode {
                let body = serde_json::json!({
                    "status": RunStatus::Aborted,
                    "error": e.failure(),
                });
                println!("{body:#}");
            } else {
                eprintln!("Error: {e}");
            }
            RunStatus::Aborted.exit_code()
        }
    };
    process::exit(code);
}

/// Main application logic
async fn run(cli: Cli) -> Result<RunStatus, CliError> {
    info!("Starting fitsprep v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration with proper precedence:
    // 1. Start with file config (or defaults)
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;

    // 2. Merge environment variables
    config.merge_env()?;

    // 3. Apply CLI flags (highest precedence)
    apply_cli_config(&mut config, &cli)?;
    config.validate()?;

    let renderer = OutputRenderer::new(config.general.default_output, config.general.color);
    let mut event_handler = EventHandler::new(
        stderr_colors(config.general.color),
        renderer.is_json(),
        cli.global.debug,
    );

    let mode = if cli.move_files {
        TransferMode::Move
    } else {
        TransferMode::Copy
    };
    let mut session = Session::new(cli.directory, cli.lights_dir).with_mode(mode);
    if let Some(name) = cli.session_name {
        session = session.with_session_name(name);
    }

    // Create event channel
    let (event_sender, event_receiver) = fitsprep_events::channel();
    let ctx = ReorgContextBuilder::new()
        .with_config(config)
        .with_event_sender(event_sender)
        .build();

    let report = execute_with_events(ctx, session, event_receiver, &mut event_handler).await?;

    renderer.render_report(&report)?;

    info!(status = ?report.status(), "Reorganization finished");
    Ok(report.status())
}

/// Run the blocking engine on a worker thread while draining its events
async fn execute_with_events(
    ctx: ReorgContext,
    session: Session,
    mut event_receiver: EventReceiver,
    event_handler: &mut EventHandler,
) -> Result<ReorgReport, CliError> {
    let mut task = tokio::task::spawn_blocking(move || reorganize(&ctx, &session));
    let mut channel_open = true;

    loop {
        select! {
            // Engine finished
            result = &mut task => {
                // Drain any remaining events
                while let Ok(event) = event_receiver.try_recv() {
                    event_handler.handle_event(event);
                }
                let report = result.map_err(|e| CliError::Task(e.to_string()))??;
                return Ok(report);
            }

            // Event received
            event = event_receiver.recv(), if channel_open => {
                match event {
                    Some(event) => event_handler.handle_event(event),
                    None => channel_open = false,
                }
            }
        }
    }
}

/// Apply CLI flags on top of file and environment configuration
fn apply_cli_config(config: &mut Config, cli: &Cli) -> Result<(), CliError> {
    if let Some(color) = cli.global.color {
        config.general.color = color;
    }
    if cli.global.json {
        config.general.default_output = OutputFormat::Json;
    }
    if cli.no_validate {
        config.validation.enabled = false;
    }
    if cli.strict {
        config.validation.strict = true;
    }
    if cli.flat_layout {
        config.layout.staged = false;
    }

    if let Some(name) = &cli.session_name {
        let single_component = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(std::path::MAIN_SEPARATOR)
            && !name.contains('/');
        if !single_component {
            return Err(CliError::InvalidArguments(format!(
                "--session-name must be a single directory name, got {name:?}"
            )));
        }
    }

    Ok(())
}

/// Directory for `--debug` log files
fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(constants::CONFIG_DIR_NAME)
        .join("logs")
}

fn init_tracing(json_mode: bool, debug_enabled_flag: bool) {
    let debug_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new("info,fitsprep=debug,fitsprep_ops=debug")
        })
    };

    if debug_enabled_flag {
        // Debug mode: structured JSON logs to file
        let log_dir = log_dir();
        if let Err(e) = std::fs::create_dir_all(&log_dir) {
            if !json_mode {
                eprintln!("Warning: Failed to create log directory: {e}");
            }
        }

        let log_file = log_dir.join(format!(
            "fitsprep-{}.log",
            chrono::Utc::now().format("%Y%m%d-%H%M%S")
        ));

        match std::fs::File::create(&log_file) {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(file)
                    .with_env_filter(debug_filter())
                    .init();
                if !json_mode {
                    eprintln!("Debug logging enabled: {}", log_file.display());
                }
                return;
            }
            Err(e) => {
                if !json_mode {
                    eprintln!("Warning: Failed to create log file: {e}");
                }
            }
        }
    }

    if json_mode {
        // JSON mode: suppress console logging to keep stdout parseable
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else {
        // Normal mode: minimal logging to stderr
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();
    }
}

/// Color support of the progress stream (stderr)
fn stderr_colors(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => console::Term::stderr().features().colors_supported(),
    }
}
