use calamine::{open_workbook_auto, Data, Reader};
use std::error::Error;
use std::path::Path;

/// Converts a calamine cell to text. Whole floats lose their `.0` so that a
/// round stored as `1.0` compares equal to `"1"`; error cells read as blank
/// and so fall back to the missing-rank sentinel.
pub fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::Float(f) if f.is_finite() && f.fract() == 0.0 => (*f as i64).to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(d) => d.to_string(),
        Data::Empty | Data::Error(_) => String::new(),
    }
}

/// Lowercases a header and drops whitespace and any BOM, so
/// `"Opening Rank"`, `"opening rank"` and `"OpeningRank"` all match.
pub fn normalize_header(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{feff}')
        .collect()
}

/// Coerces a rank cell to a whole rank, `None` if it is not numeric.
pub fn parse_rank(s: &str) -> Option<u64> {
    let t = s.trim().replace(',', "");
    let f = t.parse::<f64>().ok()?;
    if f.is_finite() && f >= 0.0 {
        Some(f.trunc() as u64)
    } else {
        None
    }
}

/// Reads the first sheet of a workbook as rows of strings. The first row is
/// the header row.
pub fn read_first_sheet<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<String>>, Box<dyn Error>> {
    let mut workbook = open_workbook_auto(path)?;
    let names = workbook.sheet_names().to_owned();
    let first = match names.first() {
        Some(n) => n.clone(),
        None => return Ok(Vec::new()),
    };

    let range = workbook.worksheet_range(&first)?;
    let rows = range
        .rows()
        .map(|r| r.iter().map(cell_to_string).collect())
        .collect();
    Ok(rows)
}

/// Reads a CSV file as rows of strings, header row included. Short rows are
/// allowed.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<String>>, Box<dyn Error>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(|f| f.trim().to_string()).collect());
    }
    Ok(rows)
}
