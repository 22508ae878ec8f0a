use crate::models::{CutoffRecord, PreferenceQuery};

/// True when a dropdown value means "no filter".
fn is_all(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("all")
}

fn same(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

pub fn matches_category(record: &CutoffRecord, category: &str) -> bool {
    is_all(category) || same(&record.category, category)
}

pub fn matches_college_type(record: &CutoffRecord, college_type: &str) -> bool {
    is_all(college_type) || same(&record.college_type, college_type)
}

pub fn matches_branch(record: &CutoffRecord, branch: &str) -> bool {
    is_all(branch) || same(&record.program, branch)
}

pub fn matches_round(record: &CutoffRecord, round_no: &str) -> bool {
    record.round.trim() == round_no.trim()
}

/// All four query filters combined.
pub fn matches_query(record: &CutoffRecord, query: &PreferenceQuery) -> bool {
    matches_category(record, &query.category)
        && matches_college_type(record, &query.college_type)
        && matches_branch(record, &query.preferred_branch)
        && matches_round(record, &query.round_no)
}

/// Up to `limit` branch names closest to `wanted` (Jaro-Winkler), best first.
/// Empty when `wanted` is "All" or an exact (case-insensitive) match exists.
pub fn suggest_branches(branches: &[String], wanted: &str, limit: usize) -> Vec<String> {
    if is_all(wanted) || branches.iter().any(|b| same(b, wanted)) {
        return Vec::new();
    }
    let needle = wanted.trim().to_lowercase();
    let mut scored: Vec<(f64, &String)> = branches
        .iter()
        .map(|b| (strsim::jaro_winkler(&needle, &b.to_lowercase()), b))
        .filter(|(score, _)| *score >= 0.6)
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().take(limit).map(|(_, b)| b.clone()).collect()
}
