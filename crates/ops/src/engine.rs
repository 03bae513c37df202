//! Reorganization engine

use crate::classifier::FrameClassifier;
use crate::context::ReorgContext;
use crate::session::{normalize, Session};
use crate::validator::MetadataValidator;
use chrono::Utc;
use fitsprep_errors::{Error, ReorgError};
use fitsprep_events::{AppEvent, EventEmitter, FailureContext, ReorgEvent, RunPhase};
use fitsprep_platform::{provision, transfer, unique_path};
use fitsprep_types::{
    Baseline, CandidateFrame, FrameCategory, FrameOutcome, FrameRecord, ReorgReport, SkipReason,
    TransferMode,
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use uuid::Uuid;

const OPERATION: &str = "reorganize";

/// Drives one run through its phases
///
/// Phases only move forward: preflight, baseline (validating runs only),
/// provisioning, lights, calibration, done. Everything that can abort the
/// run is checked before the destination is touched, except provisioning
/// itself.
pub struct ReorganizationEngine<'a> {
    ctx: &'a ReorgContext,
}

/// Values fixed during preflight
struct Plan {
    session_name: String,
    destination_root: PathBuf,
    lights_root: PathBuf,
    lights_present: bool,
    mode: TransferMode,
    validate: bool,
    classifier: FrameClassifier,
    warnings: Vec<String>,
}

impl<'a> ReorganizationEngine<'a> {
    #[must_use]
    pub fn new(ctx: &'a ReorgContext) -> Self {
        Self { ctx }
    }

    /// Run the session to completion
    ///
    /// # Errors
    ///
    /// Returns an error when the run aborts; see [`crate::reorganize`].
    pub fn run(&self, session: &Session) -> Result<ReorgReport, Error> {
        self.ctx.emit_operation_started(OPERATION);
        match self.run_phases(session) {
            Ok(report) => {
                self.ctx.emit_operation_completed(OPERATION, report.totals().failed == 0);
                Ok(report)
            }
            Err(err) => {
                self.ctx.emit_operation_failed(OPERATION, err.to_string());
                Err(err)
            }
        }
    }

    fn run_phases(&self, session: &Session) -> Result<ReorgReport, Error> {
        let start = Instant::now();
        let started_at = Utc::now();

        self.ctx.emit_phase(RunPhase::Preflight);
        let plan = self.preflight(session)?;

        let baseline = if plan.validate {
            self.ctx.emit_phase(RunPhase::EstablishingBaseline);
            Some(self.establish_baseline(&plan)?)
        } else {
            None
        };

        self.ctx.emit_phase(RunPhase::Provisioning);
        self.provision(&plan)?;

        let mut frames = Vec::new();

        self.ctx.emit_phase(RunPhase::ProcessingLights);
        if plan.lights_present {
            let dest_dir = self.category_dir(&plan, FrameCategory::Light);
            for frame in plan.classifier.lights(&plan.lights_root) {
                frames.push(self.transfer_frame(&frame, &dest_dir, plan.mode));
            }
        }

        self.ctx.emit_phase(RunPhase::ProcessingCalibration);
        self.process_calibration(session, &plan, baseline.as_ref(), &mut frames);

        self.ctx.emit_phase(RunPhase::Done);
        let report = ReorgReport {
            run_id: Uuid::new_v4(),
            started_at,
            session_name: plan.session_name,
            destination_root: plan.destination_root,
            mode: plan.mode,
            validated: plan.validate,
            baseline,
            frames,
            warnings: plan.warnings,
            duration_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        };

        let totals = report.totals();
        self.ctx.emit(AppEvent::Reorg(ReorgEvent::RunCompleted {
            destination_root: report.destination_root.clone(),
            transferred: totals.transferred,
            skipped: totals.skipped,
            failed: totals.failed,
            duration_ms: report.duration_ms,
        }));
        Ok(report)
    }

    fn preflight(&self, session: &Session) -> Result<Plan, Error> {
        let fs = &*self.ctx.fs;
        let config = &self.ctx.config;

        let root = normalize(&session.root);
        if !fs.is_dir(&root) {
            return Err(ReorgError::SessionRootMissing {
                path: session.root.display().to_string(),
            }
            .into());
        }

        let session_name = session.resolved_name()?;
        let destination_root = normalize(&config.layout.destination_root(&root, &session_name));
        let lights_root = session.lights_root();
        let validate = config.validation.enabled;

        self.ctx.emit(AppEvent::Reorg(ReorgEvent::RunStarted {
            session_root: root.clone(),
            destination_root: destination_root.clone(),
            mode: session.mode,
            validate,
        }));

        let mut warnings = Vec::new();
        let lights_present = fs.is_dir(&lights_root);
        if !lights_present {
            if validate || config.validation.strict {
                return Err(ReorgError::LightsDirMissing {
                    path: lights_root.display().to_string(),
                }
                .into());
            }
            let message = format!(
                "lights directory {} not found, continuing with calibration frames",
                lights_root.display()
            );
            tracing::warn!(path = %lights_root.display(), "lights directory not found");
            self.ctx.emit_warning_with_context(
                "lights directory not found, continuing with calibration frames",
                lights_root.display().to_string(),
            );
            warnings.push(message);
        }

        let category_dirs: Vec<PathBuf> = config
            .layout
            .dir_names()
            .iter()
            .map(|name| destination_root.join(name))
            .collect();

        if lights_present {
            if let Some(dir) = category_dirs
                .iter()
                .find(|dir| lights_root.starts_with(dir))
            {
                return Err(ReorgError::SourceOverlapsDestination {
                    path: lights_root.display().to_string(),
                    destination: dir.display().to_string(),
                }
                .into());
            }
        }

        let mut pruned = category_dirs;
        pruned.push(root.join(&config.source.calibration_root));
        if config.layout.staged {
            pruned.push(root.join(&config.layout.staging_dir));
        }
        let classifier = FrameClassifier::new(&config.source.extension).with_pruned(pruned);

        Ok(Plan {
            session_name,
            destination_root,
            lights_root,
            lights_present,
            mode: session.mode,
            validate,
            classifier,
            warnings,
        })
    }

    fn establish_baseline(&self, plan: &Plan) -> Result<Baseline, Error> {
        let validator = MetadataValidator::new(&*self.ctx.reader);
        let baseline = validator
            .establish_baseline(plan.classifier.lights(&plan.lights_root))
            .ok_or_else(|| ReorgError::NoBaseline {
                path: plan.lights_root.display().to_string(),
            })?;

        tracing::info!(
            source = %baseline.source.display(),
            exposure = ?baseline.metadata.exposure,
            width = ?baseline.metadata.width,
            height = ?baseline.metadata.height,
            "baseline established"
        );
        self.ctx.emit(AppEvent::Reorg(ReorgEvent::BaselineEstablished {
            source: baseline.source.clone(),
            metadata: baseline.metadata,
        }));
        Ok(baseline)
    }

    fn provision(&self, plan: &Plan) -> Result<(), Error> {
        let names = self.ctx.config.layout.dir_names();
        for dir in provision(&*self.ctx.fs, &plan.destination_root, &names)? {
            self.ctx.emit(AppEvent::Reorg(ReorgEvent::DirectoryProvisioned {
                path: dir.path,
                removed_entries: dir.removed_entries,
            }));
        }
        Ok(())
    }

    fn process_calibration(
        &self,
        session: &Session,
        plan: &Plan,
        baseline: Option<&Baseline>,
        frames: &mut Vec<FrameRecord>,
    ) {
        let source = &self.ctx.config.source;
        let calibration_root = normalize(&session.root).join(&source.calibration_root);
        if !self.ctx.fs.is_dir(&calibration_root) {
            tracing::debug!(path = %calibration_root.display(), "no calibration directory");
        }

        let validator = MetadataValidator::new(&*self.ctx.reader);
        for category in FrameCategory::CALIBRATION {
            let Some(dir_name) = source.category_dir(category) else {
                continue;
            };
            let source_dir = calibration_root.join(dir_name);
            if !self.ctx.fs.is_dir(&source_dir) {
                tracing::debug!(
                    category = %category,
                    path = %source_dir.display(),
                    "no source directory"
                );
                self.ctx.emit(AppEvent::Reorg(ReorgEvent::SourceMissing {
                    category,
                    path: source_dir,
                }));
                continue;
            }

            let dest_dir = self.category_dir(plan, category);
            for frame in plan.classifier.calibration(&source_dir, category) {
                if let Some(baseline) = baseline {
                    if let Some(reason) = Self::rejection(&validator, &frame, baseline) {
                        tracing::debug!(
                            category = %category,
                            path = %frame.path.display(),
                            reason = %reason,
                            "skipping frame"
                        );
                        self.ctx.emit_frame_skipped(category, &frame.path, reason.clone());
                        frames.push(FrameRecord {
                            source: frame.path,
                            category,
                            outcome: FrameOutcome::Skipped { reason },
                        });
                        continue;
                    }
                }
                frames.push(self.transfer_frame(&frame, &dest_dir, plan.mode));
            }
        }
    }

    /// Why a calibration frame may not be used, if it may not
    fn rejection(
        validator: &MetadataValidator<'_>,
        frame: &CandidateFrame,
        baseline: &Baseline,
    ) -> Option<SkipReason> {
        match validator.read(&frame.path) {
            Err(err) => Some(SkipReason::UnreadableMetadata {
                message: err.to_string(),
            }),
            Ok(metadata) => {
                let verdict =
                    MetadataValidator::check(&metadata, &baseline.metadata, frame.category);
                (!verdict.is_compatible()).then_some(SkipReason::Incompatible { verdict })
            }
        }
    }

    fn transfer_frame(
        &self,
        frame: &CandidateFrame,
        dest_dir: &Path,
        mode: TransferMode,
    ) -> FrameRecord {
        let fs = &*self.ctx.fs;
        let requested = dest_dir.join(&frame.file_name);
        let destination = unique_path(fs, &requested);
        let renamed = destination != requested;

        let outcome = match transfer(fs, &frame.path, &destination, mode) {
            Ok(()) => {
                self.ctx
                    .emit_frame_transferred(frame.category, &frame.path, &destination, renamed);
                FrameOutcome::Transferred {
                    destination,
                    renamed,
                }
            }
            Err(err) => {
                let err = ReorgError::TransferFailed {
                    source_path: frame.path.display().to_string(),
                    destination: destination.display().to_string(),
                    message: err.to_string(),
                };
                tracing::warn!(
                    category = %frame.category,
                    path = %frame.path.display(),
                    error = %err,
                    "transfer failed"
                );
                self.ctx.emit_frame_failed(
                    frame.category,
                    &frame.path,
                    FailureContext::from_error(&err),
                );
                FrameOutcome::Failed {
                    error: err.to_string(),
                }
            }
        };

        FrameRecord {
            source: frame.path.clone(),
            category: frame.category,
            outcome,
        }
    }

    fn category_dir(&self, plan: &Plan, category: FrameCategory) -> PathBuf {
        plan.destination_root
            .join(self.ctx.config.layout.dir_name(category))
    }
}
