//! Structured logging integration for events
//!
//! Every event the engine emits is mirrored into `tracing` with structured
//! fields, so a `--debug` log file holds the full per-frame history of a run.

use fitsprep_events::{AppEvent, GeneralEvent, ReorgEvent};
use tracing::{debug, error, info, trace, warn};

/// Log an `AppEvent` at its level with structured fields
pub fn log_event_with_tracing(event: &AppEvent) {
    let level = event.log_level();
    let target = event.log_target();

    match event {
        AppEvent::Reorg(reorg_event) => match reorg_event {
            ReorgEvent::RunStarted {
                session_root,
                destination_root,
                mode,
                validate,
            } => {
                info!(
                    domain = target,
                    session_root = %session_root.display(),
                    destination_root = %destination_root.display(),
                    mode = %mode,
                    validate = validate,
                    "Reorganization started"
                );
            }
            ReorgEvent::PhaseStarted { phase } => {
                info!(domain = target, phase = %phase, "Phase started");
            }
            ReorgEvent::BaselineEstablished { source, metadata } => {
                info!(
                    domain = target,
                    source = %source.display(),
                    exposure = ?metadata.exposure,
                    gain = ?metadata.gain,
                    width = ?metadata.width,
                    height = ?metadata.height,
                    "Baseline established"
                );
            }
            ReorgEvent::DirectoryProvisioned {
                path,
                removed_entries,
            } => {
                debug!(
                    domain = target,
                    path = %path.display(),
                    removed_entries = removed_entries,
                    "Directory provisioned"
                );
            }
            ReorgEvent::SourceMissing { category, path } => {
                debug!(
                    domain = target,
                    category = %category,
                    path = %path.display(),
                    "Source directory missing"
                );
            }
            ReorgEvent::FrameTransferred {
                category,
                source,
                destination,
                renamed,
            } => {
                debug!(
                    domain = target,
                    category = %category,
                    source = %source.display(),
                    destination = %destination.display(),
                    renamed = renamed,
                    "Frame transferred"
                );
            }
            ReorgEvent::FrameSkipped {
                category,
                source,
                reason,
            } => {
                warn!(
                    domain = target,
                    category = %category,
                    source = %source.display(),
                    reason = %reason,
                    "Frame skipped"
                );
            }
            ReorgEvent::FrameFailed {
                category,
                source,
                failure,
            } => {
                error!(
                    domain = target,
                    category = %category,
                    source = %source.display(),
                    retryable = failure.retryable,
                    code = ?failure.code,
                    message = %failure.message,
                    hint = ?failure.hint,
                    "Frame transfer failed"
                );
            }
            ReorgEvent::RunCompleted {
                destination_root,
                transferred,
                skipped,
                failed,
                duration_ms,
            } => {
                info!(
                    domain = target,
                    destination_root = %destination_root.display(),
                    transferred = transferred,
                    skipped = skipped,
                    failed = failed,
                    duration_ms = duration_ms,
                    "Reorganization completed"
                );
            }
        },

        AppEvent::General(general_event) => match general_event {
            GeneralEvent::Warning { message, context } => {
                warn!(domain = target, message = %message, context = ?context, "Warning");
            }
            GeneralEvent::OperationFailed { operation, error } => {
                error!(domain = target, operation = %operation, error = %error, "Operation failed");
            }
            _ => match level {
                tracing::Level::ERROR => error!(domain = target, event = ?general_event, "General event"),
                tracing::Level::WARN => warn!(domain = target, event = ?general_event, "General event"),
                tracing::Level::INFO => info!(domain = target, event = ?general_event, "General event"),
                tracing::Level::DEBUG => debug!(domain = target, event = ?general_event, "General event"),
                tracing::Level::TRACE => trace!(domain = target, event = ?general_event, "General event"),
            },
        },
    }
}
