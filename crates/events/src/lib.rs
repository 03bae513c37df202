#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Event system for fitsprep
//!
//! Library crates never print. The reorganization engine reports phases and
//! per-frame outcomes as typed events over a channel; the CLI renders them
//! and mirrors them into `tracing`.

pub mod events;
pub use events::{AppEvent, FailureContext, GeneralEvent, ReorgEvent, RunPhase};

use fitsprep_types::{FrameCategory, SkipReason};
use std::path::Path;
use tokio::sync::mpsc::UnboundedSender;

/// Type alias for event sender using the `AppEvent` system
pub type EventSender = UnboundedSender<AppEvent>;

/// Type alias for event receiver using the `AppEvent` system
pub type EventReceiver = tokio::sync::mpsc::UnboundedReceiver<AppEvent>;

/// Create a new event channel with the `AppEvent` system
#[must_use]
pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// The unified trait for emitting events throughout fitsprep
///
/// This trait provides a single, consistent API for emitting events regardless of
/// whether you have a raw `EventSender` or a struct that contains one.
pub trait EventEmitter {
    /// Get the event sender for this emitter
    fn event_sender(&self) -> Option<&EventSender>;

    /// Emit an event through this emitter
    fn emit(&self, event: AppEvent) {
        if let Some(sender) = self.event_sender() {
            // Ignore send errors - if receiver is dropped, we just continue
            let _ = sender.send(event);
        }
    }

    /// Emit a warning event with context
    fn emit_warning_with_context(&self, message: impl Into<String>, context: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::warning_with_context(
            message, context,
        )));
    }

    /// Emit an operation started event
    fn emit_operation_started(&self, operation: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::OperationStarted {
            operation: operation.into(),
        }));
    }

    /// Emit an operation completed event
    fn emit_operation_completed(&self, operation: impl Into<String>, success: bool) {
        self.emit(AppEvent::General(GeneralEvent::OperationCompleted {
            operation: operation.into(),
            success,
        }));
    }

    /// Emit an operation failed event
    fn emit_operation_failed(&self, operation: impl Into<String>, error: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::OperationFailed {
            operation: operation.into(),
            error: error.into(),
        }));
    }

    /// Emit a phase transition
    fn emit_phase(&self, phase: RunPhase) {
        self.emit(AppEvent::Reorg(ReorgEvent::PhaseStarted { phase }));
    }

    /// Emit a successful transfer
    fn emit_frame_transferred(
        &self,
        category: FrameCategory,
        source: &Path,
        destination: &Path,
        renamed: bool,
    ) {
        self.emit(AppEvent::Reorg(ReorgEvent::FrameTransferred {
            category,
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            renamed,
        }));
    }

    /// Emit a skipped frame
    fn emit_frame_skipped(&self, category: FrameCategory, source: &Path, reason: SkipReason) {
        self.emit(AppEvent::Reorg(ReorgEvent::FrameSkipped {
            category,
            source: source.to_path_buf(),
            reason,
        }));
    }

    /// Emit a failed transfer
    fn emit_frame_failed(&self, category: FrameCategory, source: &Path, failure: FailureContext) {
        self.emit(AppEvent::Reorg(ReorgEvent::FrameFailed {
            category,
            source: source.to_path_buf(),
            failure,
        }));
    }
}

/// Implementation of `EventEmitter` for the raw `EventSender`
/// This allows `EventSender` to be used directly where `EventEmitter` is expected
impl EventEmitter for EventSender {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(self)
    }
}
