//! The spreadsheet enrichment pipeline.
//!
//! Loads every sheet, pre-scans for plausible registration numbers (progress
//! total only), then walks sheets and rows in order: invalid rows are
//! skipped, everything else is resolved against the API and written into the
//! "MOT Due" column. A fixed pause follows each resolution — the upstream
//! API tolerates only a gentle call rate, so the pacing is a hard constraint
//! rather than politeness. The annotated workbook is written to a new,
//! timestamped file; the input is never touched.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::time::sleep;

use crate::error::MotCheckError;
use crate::resolver::StatusResolver;
use crate::ui::RunProgress;
use crate::validator::is_plausible_registration;
use crate::workbook::WorkbookModel;

/// Canonical name of the column the pipeline fills.
pub const MOT_DUE_COLUMN: &str = "MOT Due";

/// Counters and output location for a completed run.
#[derive(Debug)]
pub struct RunReport {
    pub output_path: PathBuf,
    pub sheet_count: usize,
    /// Rows that passed the pre-scan, i.e. the progress total.
    pub candidate_count: usize,
    /// Rows actually resolved and written.
    pub processed_count: usize,
}

/// Drives one enrichment run over a workbook file.
pub struct EnrichmentPipeline<R> {
    resolver: R,
    pace: Duration,
}

impl<R: StatusResolver> EnrichmentPipeline<R> {
    pub fn new(resolver: R, pace: Duration) -> Self {
        Self { resolver, pace }
    }

    pub async fn run(&self, input: &Path) -> Result<RunReport, MotCheckError> {
        if !input.exists() {
            return Err(MotCheckError::InputMissing(input.to_path_buf()));
        }

        let mut workbook = WorkbookModel::load(input)?;

        // Counting pass ahead of processing, so the progress total is known
        // before the first API call.
        let candidate_count: usize = workbook
            .sheets
            .iter()
            .filter(|sheet| !sheet.is_empty())
            .map(|sheet| {
                sheet
                    .rows
                    .iter()
                    .filter(|row| row.first().is_some_and(|v| is_plausible_registration(v)))
                    .count()
            })
            .sum();

        let progress = RunProgress::start(candidate_count);
        let mut processed_count = 0;

        for sheet in &mut workbook.sheets {
            progress.sheet(&sheet.name);
            if sheet.is_empty() {
                continue;
            }

            let mot_col = sheet.ensure_column(MOT_DUE_COLUMN);
            let mut sheet_processed = 0;

            for row in &mut sheet.rows {
                // First column holds the registration number by convention.
                let registration = row.first().cloned().unwrap_or_default();
                if !is_plausible_registration(&registration) {
                    continue;
                }

                let status = self.resolver.resolve(&registration).await;
                row[mot_col] = status.to_string();

                sheet_processed += 1;
                processed_count += 1;
                progress.vehicle(&registration, &status);

                if !self.pace.is_zero() {
                    sleep(self.pace).await;
                }
            }

            progress.sheet_done(&sheet.name, sheet_processed);
        }

        let output_path = derive_output_path(input, Local::now());
        workbook.save(&output_path)?;
        progress.finish();

        Ok(RunReport {
            output_path,
            sheet_count: workbook.sheets.len(),
            candidate_count,
            processed_count,
        })
    }
}

/// Sibling output filename with a run timestamp, so repeated runs never
/// overwrite each other or the input:
/// `fleet.xlsx` → `fleet_MOT_Updated_20260830_141503.xlsx`.
fn derive_output_path(input: &Path, at: DateTime<Local>) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("workbook");
    let ext = input
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("xlsx");
    let name = format!("{stem}_MOT_Updated_{}.{ext}", at.format("%Y%m%d_%H%M%S"));
    input.with_file_name(name)
}
