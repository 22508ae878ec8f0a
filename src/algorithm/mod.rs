//! Preference-list generation over a loaded cutoff table.

pub mod filters;
pub mod probability;

pub use probability::admission_probability;

use crate::error::AppError;
use crate::excel::unique_branches;
use crate::models::{Chance, CutoffTable, PreferenceQuery, PreferenceRecord};

const MAX_SUGGESTIONS: usize = 5;

/// Validated rank from a query, or `InvalidRank`.
pub fn validated_rank(query: &PreferenceQuery) -> Result<f64, AppError> {
    match query.jee_rank {
        Some(r) if r.is_finite() && r > 0.0 => Ok(r),
        _ => Err(AppError::InvalidRank),
    }
}

/// Filters the table by the query, scores every match and returns the rows
/// whose probability reaches `min_prob`, best first and numbered from 1.
pub fn generate_preferences(
    table: &CutoffTable,
    query: &PreferenceQuery,
) -> Result<Vec<PreferenceRecord>, AppError> {
    let rank = validated_rank(query)?;
    let min_prob = query.min_prob.unwrap_or(0.0);

    let matching: Vec<_> = table
        .records
        .iter()
        .filter(|r| filters::matches_query(r, query))
        .collect();

    if matching.is_empty() {
        let suggestions = filters::suggest_branches(
            &unique_branches(table),
            &query.preferred_branch,
            MAX_SUGGESTIONS,
        );
        return Err(AppError::NoMatches { suggestions });
    }

    let mut scored: Vec<PreferenceRecord> = matching
        .into_iter()
        .filter_map(|r| {
            let p = admission_probability(rank, r.opening_rank as f64, r.closing_rank as f64);
            if p < min_prob {
                return None;
            }
            Some(PreferenceRecord {
                preference: 0,
                institute: r.institute.clone(),
                college_type: r.college_type.clone(),
                location: r.location.clone(),
                branch: r.program.clone(),
                opening_rank: r.opening_rank,
                closing_rank: r.closing_rank,
                probability: p,
                chances: Chance::from_probability(p),
            })
        })
        .collect();

    // Stable: equal probabilities keep table order.
    scored.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (i, rec) in scored.iter_mut().enumerate() {
        rec.preference = i + 1;
    }

    Ok(scored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CutoffRecord;

    fn rec(inst: &str, ty: &str, prog: &str, cat: &str, open: u64, close: u64, round: &str) -> CutoffRecord {
        CutoffRecord {
            institute: inst.into(),
            college_type: ty.into(),
            location: "X".into(),
            program: prog.into(),
            category: cat.into(),
            opening_rank: open,
            closing_rank: close,
            round: round.into(),
        }
    }

    fn table() -> CutoffTable {
        CutoffTable {
            records: vec![
                rec("NIT A", "NIT", "Civil Engineering", "OPEN", 5000, 9000, "1"),
                rec("NIT B", "NIT", "Computer Science and Engineering", "OPEN", 500, 1500, "1"),
                rec("IIT C", "IIT", "Civil Engineering", "OPEN", 3000, 6000, "1"),
                rec("NIT D", "NIT", "Civil Engineering", "SC", 100, 400, "1"),
                rec("NIT E", "NIT", "Civil Engineering", "OPEN", 5000, 9000, "2"),
            ],
            ..Default::default()
        }
    }

    fn query(rank: f64) -> PreferenceQuery {
        PreferenceQuery {
            jee_rank: Some(rank),
            category: "OPEN".into(),
            ..Default::default()
        }
    }

    #[test]
    fn rejects_non_positive_rank() {
        let mut q = query(0.0);
        assert!(matches!(generate_preferences(&table(), &q), Err(AppError::InvalidRank)));
        q.jee_rank = None;
        assert!(matches!(generate_preferences(&table(), &q), Err(AppError::InvalidRank)));
        q.jee_rank = Some(-5.0);
        assert!(matches!(generate_preferences(&table(), &q), Err(AppError::InvalidRank)));
    }

    #[test]
    fn sorted_descending_and_numbered() {
        let prefs = generate_preferences(&table(), &query(4000.0)).unwrap();
        // round 1, OPEN: NIT A, NIT B, IIT C
        assert_eq!(prefs.len(), 3);
        for (i, p) in prefs.iter().enumerate() {
            assert_eq!(p.preference, i + 1);
        }
        for w in prefs.windows(2) {
            assert!(w[0].probability >= w[1].probability);
        }
        assert_eq!(prefs[0].institute, "NIT A");
        assert_eq!(prefs.last().unwrap().institute, "NIT B");
    }

    #[test]
    fn equal_probabilities_keep_table_order() {
        let table = CutoffTable {
            records: vec![
                rec("NIT Zeta", "NIT", "Civil Engineering", "OPEN", 2000, 6000, "1"),
                rec("NIT Alpha", "NIT", "Civil Engineering", "OPEN", 2000, 6000, "1"),
                rec("NIT Mid", "NIT", "Civil Engineering", "OPEN", 2000, 6000, "1"),
            ],
            ..Default::default()
        };
        let prefs = generate_preferences(&table, &query(4000.0)).unwrap();
        let order: Vec<&str> = prefs.iter().map(|p| p.institute.as_str()).collect();
        assert_eq!(order, ["NIT Zeta", "NIT Alpha", "NIT Mid"]);
        assert_eq!(prefs[0].probability, prefs[2].probability);
    }

    #[test]
    fn min_prob_filters_but_may_leave_empty_list() {
        let mut q = query(4000.0);
        q.min_prob = Some(99.5);
        let prefs = generate_preferences(&table(), &q).unwrap();
        assert!(prefs.iter().all(|p| p.probability >= 99.5));
        q.min_prob = Some(101.0);
        assert!(generate_preferences(&table(), &q).unwrap().is_empty());
    }

    #[test]
    fn college_type_and_branch_filters() {
        let mut q = query(4000.0);
        q.college_type = "iit".into();
        let prefs = generate_preferences(&table(), &q).unwrap();
        assert_eq!(prefs.len(), 1);
        assert_eq!(prefs[0].institute, "IIT C");

        q.college_type = "ALL".into();
        q.preferred_branch = "computer science and engineering".into();
        let prefs = generate_preferences(&table(), &q).unwrap();
        assert_eq!(prefs.len(), 1);
        assert_eq!(prefs[0].institute, "NIT B");
    }

    #[test]
    fn no_rows_yields_not_found_with_suggestions() {
        let mut q = query(4000.0);
        q.preferred_branch = "Civil Engg".into();
        match generate_preferences(&table(), &q) {
            Err(AppError::NoMatches { suggestions }) => {
                assert_eq!(suggestions.first().map(String::as_str), Some("Civil Engineering"));
            }
            other => panic!("unexpected {:?}", other),
        }

        let mut q = query(4000.0);
        q.round_no = "6".into();
        match generate_preferences(&table(), &q) {
            Err(AppError::NoMatches { suggestions }) => assert!(suggestions.is_empty()),
            other => panic!("unexpected {:?}", other),
        }
    }
}
