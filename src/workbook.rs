//! In-memory workbook model with string-only cells.
//!
//! Loading coerces every cell to a string so registration numbers survive
//! intact — numeric auto-coercion would strip leading zeros and mangle
//! mixed-format plates. The first row of each sheet is the header; sheet
//! names are trimmed on load. Saving always produces a fresh xlsx file.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};

use crate::error::MotCheckError;

/// One sheet: a header of named columns plus rows of string cells.
/// Row width always equals the header width.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    /// A sheet with no rows or no columns is carried through untouched.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.rows.is_empty()
    }

    /// Index of the column whose trimmed name case-insensitively equals
    /// `name`, appending a new empty column when absent. Never creates a
    /// duplicate on repeated calls.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self
            .columns
            .iter()
            .position(|col| col.trim().eq_ignore_ascii_case(name))
        {
            return idx;
        }
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(String::new());
        }
        self.columns.len() - 1
    }
}

/// Ordered collection of sheets loaded from one spreadsheet file.
#[derive(Debug, Clone, Default)]
pub struct WorkbookModel {
    pub sheets: Vec<Sheet>,
}

impl WorkbookModel {
    /// Load every sheet of the file, preserving sheet order and treating
    /// every cell as a string.
    pub fn load(path: &Path) -> Result<Self, MotCheckError> {
        let mut workbook = open_workbook_auto(path)?;
        let sheet_names = workbook.sheet_names().to_owned();

        let mut sheets = Vec::with_capacity(sheet_names.len());
        for name in sheet_names {
            let range = workbook.worksheet_range(&name)?;
            let mut row_iter = range.rows();

            let columns: Vec<String> = row_iter
                .next()
                .map(|header| header.iter().map(cell_to_string).collect())
                .unwrap_or_default();

            let mut rows = Vec::new();
            for row in row_iter {
                let mut values: Vec<String> = row.iter().map(cell_to_string).collect();
                values.resize(columns.len(), String::new());
                rows.push(values);
            }

            sheets.push(Sheet {
                name: name.trim().to_string(),
                columns,
                rows,
            });
        }

        Ok(Self { sheets })
    }

    /// Write all sheets to a new xlsx file at `path`.
    pub fn save(&self, path: &Path) -> Result<(), MotCheckError> {
        let mut workbook = rust_xlsxwriter::Workbook::new();

        for sheet in &self.sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(&sheet.name)?;

            for (col, name) in sheet.columns.iter().enumerate() {
                worksheet.write_string(0, col as u16, name)?;
            }
            for (r, row) in sheet.rows.iter().enumerate() {
                for (c, value) in row.iter().enumerate() {
                    if !value.is_empty() {
                        worksheet.write_string((r + 1) as u32, c as u16, value)?;
                    }
                }
            }
        }

        workbook.save(path)?;
        Ok(())
    }
}

/// Coerce any cell to its string form. Integral floats drop the trailing
/// `.0` Excel stores them with, so "123" stays "123".
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn fleet_sheet() -> Sheet {
        Sheet {
            name: "Fleet".into(),
            columns: vec!["Registration".into(), "Owner".into()],
            rows: vec![
                vec!["AB12CDE".into(), "Depot A".into()],
                vec!["007".into(), "Depot B".into()],
            ],
        }
    }

    #[test]
    fn ensure_column_appends_and_pads_rows() {
        let mut sheet = fleet_sheet();
        let idx = sheet.ensure_column("MOT Due");

        assert_eq!(idx, 2);
        assert_eq!(sheet.columns, vec!["Registration", "Owner", "MOT Due"]);
        assert!(sheet.rows.iter().all(|row| row.len() == 3));
        assert!(sheet.rows.iter().all(|row| row[2].is_empty()));
    }

    #[test]
    fn ensure_column_matches_case_insensitively() {
        let mut sheet = fleet_sheet();
        sheet.columns.push(" mot due ".into());
        for row in &mut sheet.rows {
            row.push(String::new());
        }

        let idx = sheet.ensure_column("MOT Due");
        assert_eq!(idx, 2);
        assert_eq!(sheet.columns.len(), 3);

        // Repeated detection never duplicates the column.
        sheet.ensure_column("MOT Due");
        assert_eq!(sheet.columns.len(), 3);
    }

    #[test]
    fn empty_sheet_detection() {
        let empty = Sheet::default();
        assert!(empty.is_empty());

        let header_only = Sheet {
            name: "Archive".into(),
            columns: vec!["Registration".into()],
            rows: Vec::new(),
        };
        assert!(header_only.is_empty());
        assert!(!fleet_sheet().is_empty());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fleet.xlsx");

        let model = WorkbookModel {
            sheets: vec![
                fleet_sheet(),
                Sheet {
                    name: "Archive".into(),
                    ..Default::default()
                },
            ],
        };
        model.save(&path).unwrap();

        let loaded = WorkbookModel::load(&path).unwrap();
        assert_eq!(loaded.sheets.len(), 2);
        assert_eq!(loaded.sheets[0].name, "Fleet");
        assert_eq!(loaded.sheets[0].columns, vec!["Registration", "Owner"]);
        assert_eq!(loaded.sheets[0].rows[0][0], "AB12CDE");
        // Leading-zero-style values survive as strings.
        assert_eq!(loaded.sheets[0].rows[1][0], "007");
        assert_eq!(loaded.sheets[1].name, "Archive");
        assert!(loaded.sheets[1].is_empty());
    }

    #[test]
    fn numeric_cells_load_without_decimal_suffix() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("numbers.xlsx");

        let mut workbook = rust_xlsxwriter::Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, "Registration").unwrap();
        worksheet.write_number(1, 0, 1234.0).unwrap();
        worksheet.write_number(2, 0, 12.5).unwrap();
        workbook.save(&path).unwrap();

        let loaded = WorkbookModel::load(&path).unwrap();
        assert_eq!(loaded.sheets[0].rows[0][0], "1234");
        assert_eq!(loaded.sheets[0].rows[1][0], "12.5");
    }

    #[test]
    fn cell_coercion_covers_scalar_variants() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String("AB12 CDE".into())), "AB12 CDE");
        assert_eq!(cell_to_string(&Data::Float(42.0)), "42");
        assert_eq!(cell_to_string(&Data::Int(-7)), "-7");
        assert_eq!(cell_to_string(&Data::Bool(true)), "true");
    }
}
