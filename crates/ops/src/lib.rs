#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Session reorganization for fitsprep
//!
//! This crate ties the leaves together: the classifier walks a session
//! tree, the validator compares calibration frames against the baseline
//! light frame, and the engine provisions the destination and transfers
//! every frame while reporting progress as events.

mod classifier;
mod context;
mod engine;
mod session;
mod validator;

pub use classifier::{find_frames, is_camera_dir, is_excluded_light, FrameClassifier};
pub use context::{ReorgContext, ReorgContextBuilder};
pub use engine::ReorganizationEngine;
pub use session::Session;
pub use validator::MetadataValidator;

use fitsprep_errors::Error;
use fitsprep_types::ReorgReport;

/// Reorganize one session with the given context
///
/// # Errors
///
/// Returns an error when the run aborts: missing session root, missing
/// lights directory in strict or validating mode, no baseline while
/// validating, or a provisioning failure. Per-frame failures are recorded
/// in the report instead.
pub fn reorganize(ctx: &ReorgContext, session: &Session) -> Result<ReorgReport, Error> {
    ReorganizationEngine::new(ctx).run(session)
}
