//! Output rendering and formatting

use comfy_table::{
    presets::{ASCII_FULL, UTF8_FULL},
    Attribute, Cell, CellAlignment, Color, ContentArrangement, Table,
};
use console::{Style, Term};
use fitsprep_types::{
    CategorySummary, ColorChoice, FrameCategory, FrameOutcome, OutputFormat, ReorgReport,
    RunStatus,
};
use std::io;

/// Output renderer for CLI results
#[derive(Clone)]
pub struct OutputRenderer {
    /// Output format (`--json` forces JSON)
    format: OutputFormat,
    /// Color configuration
    color_choice: ColorChoice,
    /// Terminal instance
    term: Term,
}

impl OutputRenderer {
    /// Create new output renderer
    pub fn new(format: OutputFormat, color_choice: ColorChoice) -> Self {
        Self {
            format,
            color_choice,
            term: Term::stdout(),
        }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Whether colored output should be produced
    pub fn supports_color(&self) -> bool {
        match self.color_choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                self.format == OutputFormat::Tty && self.term.features().colors_supported()
            }
        }
    }

    /// Render the run report
    pub fn render_report(&self, report: &ReorgReport) -> io::Result<()> {
        if self.is_json() {
            let mut value = serde_json::to_value(report).map_err(io::Error::other)?;
            if let Some(fields) = value.as_object_mut() {
                fields.insert(
                    "status".to_string(),
                    serde_json::to_value(report.status()).map_err(io::Error::other)?,
                );
            }
            let json = serde_json::to_string_pretty(&value).map_err(io::Error::other)?;
            println!("{json}");
            return Ok(());
        }

        println!("{}", self.summary_table(report));
        println!();

        let failures: Vec<_> = report
            .frames
            .iter()
            .filter_map(|record| match &record.outcome {
                FrameOutcome::Failed { error } => Some((record, error)),
                _ => None,
            })
            .collect();
        if !failures.is_empty() {
            println!("Failed transfers:");
            for (record, error) in failures {
                println!("  [{}] {}: {error}", record.category, record.source.display());
            }
            println!();
        }

        for warning in &report.warnings {
            println!("{}", self.styled(&format!("Warning: {warning}"), &Style::new().yellow()));
        }

        if let Some(baseline) = &report.baseline {
            println!("Baseline:    {}", baseline.source.display());
        }
        println!("Destination: {}", report.destination_root.display());
        println!("Duration:    {} ms", report.duration_ms);
        println!("{}", self.status_line(report.status()));
        Ok(())
    }

    fn summary_table(&self, report: &ReorgReport) -> Table {
        let mut table = Table::new();
        table
            .load_preset(if self.format == OutputFormat::Plain {
                ASCII_FULL
            } else {
                UTF8_FULL
            })
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("Category").add_attribute(Attribute::Bold),
            Cell::new("Transferred").add_attribute(Attribute::Bold),
            Cell::new("Renamed").add_attribute(Attribute::Bold),
            Cell::new("Skipped").add_attribute(Attribute::Bold),
            Cell::new("Failed").add_attribute(Attribute::Bold),
        ]);

        for category in FrameCategory::ALL {
            table.add_row(self.summary_row(category.as_str(), report.summary(category)));
        }
        table.add_row(self.summary_row("total", report.totals()));
        table
    }

    fn summary_row(&self, label: &str, summary: CategorySummary) -> Vec<Cell> {
        let count = |n: usize| Cell::new(n).set_alignment(CellAlignment::Right);
        let mut failed = count(summary.failed);
        let mut skipped = count(summary.skipped);
        if self.supports_color() {
            if summary.failed > 0 {
                failed = failed.fg(Color::Red);
            }
            if summary.skipped > 0 {
                skipped = skipped.fg(Color::Yellow);
            }
        }
        vec![
            Cell::new(label),
            count(summary.transferred),
            count(summary.renamed),
            skipped,
            failed,
        ]
    }

    fn status_line(&self, status: RunStatus) -> String {
        match status {
            RunStatus::Succeeded => self.styled("[OK] Reorganization complete", &Style::new().green()),
            RunStatus::PartiallyCompleted => self.styled(
                "[WARN] Reorganization completed with skipped or failed frames",
                &Style::new().yellow(),
            ),
            RunStatus::Aborted => self.styled("[ERROR] Reorganization aborted", &Style::new().red()),
        }
    }

    fn styled(&self, text: &str, style: &Style) -> String {
        if self.supports_color() {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }
}
