//! Event handling and progress display

use console::{Style, Term};
use fitsprep_events::{AppEvent, GeneralEvent, ReorgEvent, RunPhase};
use fitsprep_types::FrameMetadata;

use crate::logging::log_event_with_tracing;

/// Prints progress to stderr while a run is in flight
pub struct EventHandler {
    term: Term,
    colors_enabled: bool,
    /// Suppress console progress (JSON output owns stdout, stderr stays quiet)
    quiet: bool,
    /// Show per-frame lines and debug messages
    verbose: bool,
}

impl EventHandler {
    pub fn new(colors_enabled: bool, quiet: bool, verbose: bool) -> Self {
        Self {
            term: Term::stderr(),
            colors_enabled,
            quiet,
            verbose,
        }
    }

    /// Handle incoming event
    pub fn handle_event(&mut self, event: AppEvent) {
        log_event_with_tracing(&event);
        if self.quiet {
            return;
        }

        match event {
            AppEvent::Reorg(event) => self.handle_reorg_event(event),
            AppEvent::General(event) => self.handle_general_event(event),
        }
    }

    fn handle_reorg_event(&self, event: ReorgEvent) {
        match event {
            ReorgEvent::RunStarted {
                session_root,
                destination_root,
                mode,
                validate,
            } => {
                self.show_status(&format!(
                    "Reorganizing {} -> {} ({mode}{})",
                    session_root.display(),
                    destination_root.display(),
                    if validate { ", validating" } else { "" }
                ));
            }
            ReorgEvent::PhaseStarted { phase } => {
                if phase != RunPhase::Done {
                    self.show_phase(&phase.to_string());
                }
            }
            ReorgEvent::BaselineEstablished { source, metadata } => {
                self.show_status(&format!(
                    "Baseline {} ({})",
                    source.display(),
                    describe(&metadata)
                ));
            }
            ReorgEvent::FrameTransferred {
                category,
                source,
                destination,
                renamed,
            } => {
                if self.verbose {
                    let suffix = if renamed { " (renamed)" } else { "" };
                    self.show_status(&format!(
                        "[{category}] {} -> {}{suffix}",
                        source.display(),
                        destination.display()
                    ));
                }
            }
            ReorgEvent::FrameSkipped {
                category,
                source,
                reason,
            } => {
                self.show_warning(&format!("[{category}] skipped {}: {reason}", source.display()));
            }
            ReorgEvent::FrameFailed {
                category,
                source,
                failure,
            } => {
                self.show_error(&format!("[{category}] {}: {}", source.display(), failure.message));
                if let Some(hint) = failure.hint {
                    self.show_error(&format!("  Hint: {hint}"));
                }
            }
            ReorgEvent::SourceMissing { category, path } => {
                if self.verbose {
                    self.show_status(&format!("[{category}] no frames at {}", path.display()));
                }
            }
            ReorgEvent::DirectoryProvisioned {
                path,
                removed_entries,
            } => {
                if self.verbose || removed_entries > 0 {
                    self.show_status(&format!(
                        "Prepared {} (removed {removed_entries} entries)",
                        path.display()
                    ));
                }
            }
            ReorgEvent::RunCompleted { .. } => {}
        }
    }

    fn handle_general_event(&self, event: GeneralEvent) {
        match event {
            GeneralEvent::Warning { message, context } => match context {
                Some(context) => self.show_warning(&format!("{message} ({context})")),
                None => self.show_warning(&message),
            },
            GeneralEvent::OperationStarted { .. }
            | GeneralEvent::OperationCompleted { .. }
            | GeneralEvent::OperationFailed { .. } => {}
        }
    }

    fn show_phase(&self, phase: &str) {
        self.write(&format!("==> {phase}"), &Style::new().bold().cyan());
    }

    fn show_status(&self, message: &str) {
        self.write(message, &Style::new());
    }

    fn show_warning(&self, message: &str) {
        self.write(&format!("warning: {message}"), &Style::new().yellow());
    }

    fn show_error(&self, message: &str) {
        self.write(&format!("error: {message}"), &Style::new().red());
    }

    fn write(&self, message: &str, style: &Style) {
        let line = if self.colors_enabled {
            style.apply_to(message).to_string()
        } else {
            message.to_string()
        };
        let _ = self.term.write_line(&line);
    }
}

fn describe(metadata: &FrameMetadata) -> String {
    let dims = match (metadata.width, metadata.height) {
        (Some(w), Some(h)) => format!("{w}x{h}"),
        _ => "unknown size".to_string(),
    };
    match metadata.exposure {
        Some(exposure) => format!("{dims}, {exposure}s"),
        None => format!("{dims}, no exposure"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_formats_known_and_missing_fields() {
        let full = FrameMetadata {
            exposure: Some(30.0),
            gain: Some(120.0),
            width: Some(4144),
            height: Some(2822),
        };
        assert_eq!(describe(&full), "4144x2822, 30s");
        assert_eq!(describe(&FrameMetadata::default()), "unknown size, no exposure");
    }
}
