//! Reading the cutoff table and writing Excel exports.
//!
//! Submodules:
//! - `io`: low level cell/CSV helpers
//! - `cache`: process-wide cache of parsed tables, invalidated on file change
//! - `export`: xlsx builders for `/download_excel`

mod io;

pub mod cache;

pub mod export;

pub use cache::cached_cutoffs;
pub use export::{export_filename, preferences_workbook, table_workbook, XLSX_MIME};
pub use io::{normalize_header, parse_rank};

use crate::models::{CutoffRecord, CutoffTable, MISSING_RANK};
use std::collections::BTreeSet;
use std::error::Error;
use std::path::Path;

/// Columns every cutoff file must carry.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "Institute",
    "College Type",
    "Location",
    "Academic Program Name",
    "Category",
    "Opening Rank",
    "Closing Rank",
    "Round",
];

/// Loads a cutoff table from `.csv` or a spreadsheet workbook.
pub fn load_cutoffs<P: AsRef<Path>>(path: P) -> Result<CutoffTable, Box<dyn Error>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(format!("data file not found: {}", path.display()).into());
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let rows = match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => io::read_first_sheet(path)?,
        _ => io::read_csv(path)?,
    };

    table_from_rows(rows)
}

/// Builds a `CutoffTable` from raw rows whose first row is the header.
pub fn table_from_rows(mut rows: Vec<Vec<String>>) -> Result<CutoffTable, Box<dyn Error>> {
    if rows.is_empty() {
        return Err("cutoff file is empty".into());
    }
    let headers: Vec<String> = rows
        .remove(0)
        .into_iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();
    let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();

    let mut idx = [0usize; 8];
    for (slot, name) in idx.iter_mut().zip(REQUIRED_COLUMNS.iter()) {
        let want = normalize_header(name);
        *slot = normalized
            .iter()
            .position(|h| *h == want)
            .ok_or_else(|| format!("missing column '{}'", name))?;
    }
    let [i_inst, i_type, i_loc, i_prog, i_cat, i_open, i_close, i_round] = idx;

    let cell = |row: &Vec<String>, i: usize| row.get(i).map(|s| s.trim().to_string()).unwrap_or_default();

    let mut records = Vec::with_capacity(rows.len());
    let mut kept_rows = Vec::with_capacity(rows.len());
    let mut coerced = 0usize;
    for row in rows.into_iter() {
        if row.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        let opening = parse_rank(&cell(&row, i_open));
        let closing = parse_rank(&cell(&row, i_close));
        if opening.is_none() || closing.is_none() {
            coerced += 1;
        }
        records.push(CutoffRecord {
            institute: cell(&row, i_inst),
            college_type: cell(&row, i_type),
            location: cell(&row, i_loc),
            program: cell(&row, i_prog),
            category: cell(&row, i_cat),
            opening_rank: opening.unwrap_or(MISSING_RANK),
            closing_rank: closing.unwrap_or(MISSING_RANK),
            round: cell(&row, i_round),
        });
        kept_rows.push(row);
    }

    if coerced > 0 {
        tracing::warn!(rows = coerced, "non-numeric ranks replaced with {}", MISSING_RANK);
    }

    Ok(CutoffTable {
        headers,
        rows: kept_rows,
        records,
        rank_columns: vec![i_open, i_close],
    })
}

/// Distinct program names, trimmed and sorted.
pub fn unique_branches(table: &CutoffTable) -> Vec<String> {
    let set: BTreeSet<String> = table
        .records
        .iter()
        .map(|r| r.program.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();
    set.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn columns_found_in_any_order() {
        let rows = vec![
            row(&["Round", "Quota", "Opening Rank", "Closing Rank", "Category", "Academic Program Name", "Location", "College Type", "Institute"]),
            row(&["1", "AI", "10", "50", "OPEN", "Mechanical Engineering", "Delhi", "IIT", "IIT Delhi"]),
        ];
        let table = table_from_rows(rows).unwrap();
        assert_eq!(table.len(), 1);
        let r = &table.records[0];
        assert_eq!(r.institute, "IIT Delhi");
        assert_eq!(r.opening_rank, 10);
        assert_eq!(r.closing_rank, 50);
        assert_eq!(table.rank_columns, vec![2, 3]);
        assert_eq!(table.headers[1], "Quota");
    }

    #[test]
    fn missing_column_is_reported() {
        let rows = vec![row(&["Institute", "College Type"])];
        let err = table_from_rows(rows).unwrap_err();
        assert!(err.to_string().contains("Location"));
    }

    #[test]
    fn bad_ranks_become_sentinel_and_blank_rows_skip() {
        let rows = vec![
            row(&["Institute", "College Type", "Location", "Academic Program Name", "Category", "Opening Rank", "Closing Rank", "Round"]),
            row(&["NIT A", "NIT", "X", "Civil", "OPEN", "12P", "", "2"]),
            row(&["", "", "", "", "", "", "", ""]),
        ];
        let table = table_from_rows(rows).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records[0].opening_rank, MISSING_RANK);
        assert_eq!(table.records[0].closing_rank, MISSING_RANK);
    }

    #[test]
    fn branches_are_unique_and_sorted() {
        let rows = vec![
            row(&["Institute", "College Type", "Location", "Academic Program Name", "Category", "Opening Rank", "Closing Rank", "Round"]),
            row(&["A", "NIT", "X", "Physics", "OPEN", "1", "2", "1"]),
            row(&["B", "NIT", "X", " Chemistry ", "OPEN", "1", "2", "1"]),
            row(&["C", "NIT", "X", "Physics", "OPEN", "1", "2", "1"]),
        ];
        let table = table_from_rows(rows).unwrap();
        assert_eq!(unique_branches(&table), vec!["Chemistry", "Physics"]);
    }
}
