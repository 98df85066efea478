//! Terminal output for an enrichment run — progress bar and styled lines.
//!
//! Uses `indicatif` for the progress bar over the pre-scanned vehicle count
//! and `console` for coloring: green for resolved dates, yellow for
//! vehicle-level answers like "Vehicle not found", red for call failures.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::resolver::MotStatus;

/// Visual progress for one run across all sheets.
pub struct RunProgress {
    pb: ProgressBar,
    green: Style,
    red: Style,
    yellow: Style,
}

impl RunProgress {
    /// Start a bar sized to the number of plausible registrations found in
    /// the pre-scan.
    pub fn start(total_vehicles: usize) -> Self {
        let pb = ProgressBar::new(total_vehicles as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40.cyan/blue} {pos}/{len} {msg}")
                .expect("invalid template"),
        );

        Self {
            pb,
            green: Style::new().green(),
            red: Style::new().red(),
            yellow: Style::new().yellow(),
        }
    }

    pub fn sheet(&self, name: &str) {
        self.pb.println(format!("Processing sheet: {name}"));
    }

    /// Record one resolved vehicle and advance the bar.
    pub fn vehicle(&self, registration: &str, status: &MotStatus) {
        let rendered = status.to_string();
        let styled = if status.is_failure() {
            self.red.apply_to(rendered)
        } else if matches!(status, MotStatus::Expiry(_) | MotStatus::Due(_)) {
            self.green.apply_to(rendered)
        } else {
            self.yellow.apply_to(rendered)
        };
        self.pb.println(format!("  {registration} => {styled}"));
        self.pb.set_message(registration.to_string());
        self.pb.inc(1);
    }

    pub fn sheet_done(&self, name: &str, processed: usize) {
        self.pb
            .println(format!("Completed sheet {name}: {processed} vehicles"));
    }

    /// Clear the bar; the caller prints the run summary.
    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}
