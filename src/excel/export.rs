use chrono::{DateTime, TimeZone};
use std::error::Error;
use std::io::Cursor;

use crate::models::{CutoffTable, PreferenceRecord, PREFERENCE_COLUMNS};

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Download name for an export produced at `now`.
pub fn export_filename<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("college_preferences_{}.xlsx", now.format("%Y%m%d_%H%M%S"))
}

fn finish(book: &umya_spreadsheet::Spreadsheet) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut cursor = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(book, &mut cursor)
        .map_err(|e| format!("failed to write xlsx: {:?}", e))?;
    Ok(cursor.into_inner())
}

/// Workbook with a single "Preferences" sheet holding the generated list.
pub fn preferences_workbook(records: &[PreferenceRecord]) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book
        .get_sheet_by_name_mut("Sheet1")
        .ok_or("new workbook has no default sheet")?;
    sheet.set_name("Preferences");

    for (c, title) in PREFERENCE_COLUMNS.iter().enumerate() {
        sheet.get_cell_mut((c as u32 + 1, 1)).set_value_string(*title);
    }

    for (i, rec) in records.iter().enumerate() {
        let row = i as u32 + 2;
        sheet.get_cell_mut((1, row)).set_value_number(rec.preference as f64);
        sheet.get_cell_mut((2, row)).set_value_string(rec.institute.as_str());
        sheet.get_cell_mut((3, row)).set_value_string(rec.college_type.as_str());
        sheet.get_cell_mut((4, row)).set_value_string(rec.location.as_str());
        sheet.get_cell_mut((5, row)).set_value_string(rec.branch.as_str());
        sheet.get_cell_mut((6, row)).set_value_number(rec.opening_rank as f64);
        sheet.get_cell_mut((7, row)).set_value_number(rec.closing_rank as f64);
        sheet.get_cell_mut((8, row)).set_value_number(rec.probability);
        sheet.get_cell_mut((9, row)).set_value_string(rec.chances.label());
    }

    finish(&book)
}

/// Workbook mirroring the whole cutoff table, rank columns coerced to numbers.
pub fn table_workbook(table: &CutoffTable) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book
        .get_sheet_by_name_mut("Sheet1")
        .ok_or("new workbook has no default sheet")?;

    for (c, title) in table.headers.iter().enumerate() {
        sheet.get_cell_mut((c as u32 + 1, 1)).set_value_string(title.as_str());
    }

    for (i, (row, rec)) in table.rows.iter().zip(table.records.iter()).enumerate() {
        let r = i as u32 + 2;
        for (c, value) in row.iter().enumerate() {
            let col = c as u32 + 1;
            if table.rank_columns.first() == Some(&c) {
                sheet.get_cell_mut((col, r)).set_value_number(rec.opening_rank as f64);
            } else if table.rank_columns.get(1) == Some(&c) {
                sheet.get_cell_mut((col, r)).set_value_number(rec.closing_rank as f64);
            } else if !value.is_empty() {
                sheet.get_cell_mut((col, r)).set_value_string(value.as_str());
            }
        }
    }

    finish(&book)
}
