//! Integration tests for types

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use fitsprep_types::*;
    use std::path::PathBuf;

    fn report_with(frames: Vec<FrameRecord>) -> ReorgReport {
        ReorgReport {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            session_name: "m31".into(),
            destination_root: PathBuf::from("/data/m31/siril-ready/m31"),
            mode: TransferMode::Copy,
            validated: true,
            baseline: None,
            frames,
            warnings: Vec::new(),
            duration_ms: 0,
        }
    }

    fn transferred(category: FrameCategory, renamed: bool) -> FrameRecord {
        FrameRecord {
            source: PathBuf::from("src.fits"),
            category,
            outcome: FrameOutcome::Transferred {
                destination: PathBuf::from("dst.fits"),
                renamed,
            },
        }
    }

    #[test]
    fn test_candidate_frame_file_name() {
        let frame = CandidateFrame::new("/data/lights/a.fits", FrameCategory::Light).unwrap();
        assert_eq!(frame.file_name.as_os_str(), std::ffi::OsStr::new("a.fits"));
        assert!(CandidateFrame::new("/", FrameCategory::Light).is_none());
    }

    #[test]
    fn test_report_summary_and_status() {
        let report = report_with(vec![
            transferred(FrameCategory::Light, false),
            transferred(FrameCategory::Light, true),
            FrameRecord {
                source: PathBuf::from("d.fits"),
                category: FrameCategory::Dark,
                outcome: FrameOutcome::Skipped {
                    reason: SkipReason::Incompatible {
                        verdict: Compatibility::ExposureMismatch {
                            expected: 5.0,
                            found: 10.0,
                        },
                    },
                },
            },
        ]);

        let lights = report.summary(FrameCategory::Light);
        assert_eq!(lights.transferred, 2);
        assert_eq!(lights.renamed, 1);
        assert_eq!(report.summary(FrameCategory::Dark).skipped, 1);
        assert_eq!(report.status(), RunStatus::PartiallyCompleted);
        assert_eq!(report.status().exit_code(), 2);
    }

    #[test]
    fn test_clean_report_succeeds() {
        let report = report_with(vec![transferred(FrameCategory::Bias, false)]);
        assert_eq!(report.status(), RunStatus::Succeeded);
        assert_eq!(report.status().exit_code(), 0);
    }

    #[test]
    fn test_failed_transfer_marks_partial() {
        let report = report_with(vec![FrameRecord {
            source: PathBuf::from("f.fits"),
            category: FrameCategory::Flat,
            outcome: FrameOutcome::Failed {
                error: "disk full".into(),
            },
        }]);
        assert_eq!(report.status(), RunStatus::PartiallyCompleted);
        assert_eq!(report.status().exit_code(), 2);
        assert_eq!(RunStatus::Aborted.exit_code(), 1);
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&FrameCategory::Bias).unwrap();
        assert_eq!(json, r#""bias""#);
        assert!(FrameCategory::Dark.is_calibration());
        assert!(!FrameCategory::Light.is_calibration());
    }

    #[test]
    fn test_compatibility_display() {
        let verdict = Compatibility::DimensionMismatch {
            expected: (4144, 2822),
            found: (2072, 1411),
        };
        assert_eq!(
            verdict.to_string(),
            "dimensions 2072x1411 do not match baseline 4144x2822"
        );
        assert!(!verdict.is_compatible());
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Tty);
        assert_eq!(ColorChoice::default(), ColorChoice::Auto);
    }
}
