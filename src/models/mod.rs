// Core data structures shared by loaders, the preference engine and the API.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Rank used when a cutoff cell is blank or not a number (e.g. "123P").
pub const MISSING_RANK: u64 = 9_999_999;

/// One row of the cutoff table, with the columns the engine works on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CutoffRecord {
    pub institute: String,
    pub college_type: String,
    pub location: String,
    pub program: String,
    pub category: String,
    pub opening_rank: u64,
    pub closing_rank: u64,
    pub round: String,
}

/// Parsed cutoff table. `headers`/`rows` keep every original column so the
/// full-table export can reproduce the source file.
#[derive(Debug, Clone, Default)]
pub struct CutoffTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub records: Vec<CutoffRecord>,
    /// Indices into `headers` of the opening/closing rank columns.
    pub rank_columns: Vec<usize>,
}

impl CutoffTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Request body of `POST /generate_preferences`.
///
/// ```json
/// {
///   "jee_rank": 15000,
///   "category": "OPEN",
///   "college_type": "NIT",
///   "preferred_branch": "All",
///   "round_no": "6",
///   "min_prob": 30
/// }
/// ```
///
/// `round_no` may be a string or a number; `min_probability` is accepted in
/// place of `min_prob`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceQuery {
    #[serde(default, deserialize_with = "lenient_number")]
    pub jee_rank: Option<f64>,
    #[serde(default = "default_all", deserialize_with = "string_or_all")]
    pub category: String,
    #[serde(default = "default_all", deserialize_with = "string_or_all")]
    pub college_type: String,
    #[serde(default = "default_all", deserialize_with = "string_or_all")]
    pub preferred_branch: String,
    #[serde(default = "default_round", deserialize_with = "round_string")]
    pub round_no: String,
    #[serde(default, alias = "min_probability", deserialize_with = "lenient_number")]
    pub min_prob: Option<f64>,
}

impl Default for PreferenceQuery {
    fn default() -> Self {
        PreferenceQuery {
            jee_rank: None,
            category: default_all(),
            college_type: default_all(),
            preferred_branch: default_all(),
            round_no: default_round(),
            min_prob: None,
        }
    }
}

fn default_all() -> String {
    "All".to_string()
}

fn default_round() -> String {
    "1".to_string()
}

/// Accepts a JSON number or a numeric string; anything else, `NaN` and
/// infinities included, becomes `None`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    let n = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(n.filter(|f| f.is_finite()))
}

fn string_or_all<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<String>::deserialize(deserializer)?;
    Ok(match v {
        Some(s) if !s.trim().is_empty() => s.trim().to_string(),
        _ => default_all(),
    })
}

fn round_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(match v {
        Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i.to_string(),
            None => n.as_f64().map(format_round).unwrap_or_else(default_round),
        },
        _ => default_round(),
    })
}

/// Renders a round number the way it appears in the data: `2.0` -> "2".
pub fn format_round(f: f64) -> String {
    if f.fract() == 0.0 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

/// Qualitative label attached to each probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Chance {
    #[serde(rename = "Very High Chance")]
    VeryHigh,
    #[serde(rename = "High Chance")]
    High,
    #[serde(rename = "Moderate Chance")]
    Moderate,
    #[serde(rename = "Low Chance")]
    Low,
    #[serde(rename = "Very Low Chance")]
    VeryLow,
    #[serde(rename = "No Chance")]
    NoChance,
}

impl Chance {
    pub fn from_probability(p: f64) -> Chance {
        if p >= 95.0 {
            Chance::VeryHigh
        } else if p >= 80.0 {
            Chance::High
        } else if p >= 60.0 {
            Chance::Moderate
        } else if p >= 40.0 {
            Chance::Low
        } else if p > 0.0 {
            Chance::VeryLow
        } else {
            Chance::NoChance
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Chance::VeryHigh => "Very High Chance",
            Chance::High => "High Chance",
            Chance::Moderate => "Moderate Chance",
            Chance::Low => "Low Chance",
            Chance::VeryLow => "Very Low Chance",
            Chance::NoChance => "No Chance",
        }
    }
}

/// One line of the generated preference list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreferenceRecord {
    #[serde(rename = "Preference")]
    pub preference: usize,
    #[serde(rename = "Institute")]
    pub institute: String,
    #[serde(rename = "College Type")]
    pub college_type: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Branch")]
    pub branch: String,
    #[serde(rename = "Opening Rank")]
    pub opening_rank: u64,
    #[serde(rename = "Closing Rank")]
    pub closing_rank: u64,
    #[serde(rename = "Admission Probability (%)")]
    pub probability: f64,
    #[serde(rename = "Admission Chances")]
    pub chances: Chance,
}

/// Column titles of the preference list, in output order.
pub const PREFERENCE_COLUMNS: [&str; 9] = [
    "Preference",
    "Institute",
    "College Type",
    "Location",
    "Branch",
    "Opening Rank",
    "Closing Rank",
    "Admission Probability (%)",
    "Admission Chances",
];

/// One bar of the probability histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_accepts_numeric_round_and_alias() {
        let q: PreferenceQuery = serde_json::from_str(
            r#"{"jee_rank": 1200, "round_no": 3, "min_probability": 40}"#,
        )
        .unwrap();
        assert_eq!(q.jee_rank, Some(1200.0));
        assert_eq!(q.round_no, "3");
        assert_eq!(q.min_prob, Some(40.0));
        assert_eq!(q.category, "All");
        assert_eq!(q.preferred_branch, "All");
    }

    #[test]
    fn query_tolerates_nulls_and_strings() {
        let q: PreferenceQuery = serde_json::from_str(
            r#"{"jee_rank": "850", "category": null, "college_type": "", "round_no": null, "min_prob": "x"}"#,
        )
        .unwrap();
        assert_eq!(q.jee_rank, Some(850.0));
        assert_eq!(q.category, "All");
        assert_eq!(q.college_type, "All");
        assert_eq!(q.round_no, "1");
        assert_eq!(q.min_prob, None);
    }

    #[test]
    fn non_finite_numbers_are_dropped() {
        let q: PreferenceQuery =
            serde_json::from_str(r#"{"jee_rank": "inf", "min_prob": "NaN"}"#).unwrap();
        assert_eq!(q.jee_rank, None);
        assert_eq!(q.min_prob, None);
    }

    #[test]
    fn chance_thresholds() {
        assert_eq!(Chance::from_probability(95.0), Chance::VeryHigh);
        assert_eq!(Chance::from_probability(94.99), Chance::High);
        assert_eq!(Chance::from_probability(60.0), Chance::Moderate);
        assert_eq!(Chance::from_probability(40.0), Chance::Low);
        assert_eq!(Chance::from_probability(0.01), Chance::VeryLow);
        assert_eq!(Chance::from_probability(0.0), Chance::NoChance);
        assert_eq!(Chance::High.label(), "High Chance");
    }

    #[test]
    fn preference_record_uses_column_names() {
        let rec = PreferenceRecord {
            preference: 1,
            institute: "NIT Trichy".into(),
            college_type: "NIT".into(),
            location: "Tiruchirappalli".into(),
            branch: "Computer Science and Engineering".into(),
            opening_rank: 100,
            closing_rank: 900,
            probability: 97.5,
            chances: Chance::VeryHigh,
        };
        let v = serde_json::to_value(&rec).unwrap();
        for col in PREFERENCE_COLUMNS {
            assert!(v.get(col).is_some(), "missing column {}", col);
        }
        assert_eq!(v["Admission Chances"], "Very High Chance");
    }
}
