use std::collections::HashMap;

use serde_json::{json, Value};

use crate::error::AppError;
use crate::models::PreferenceQuery;

/// Dropdown choices offered by the page.
pub const CATEGORIES: [&str; 10] = [
    "All", "OPEN", "OBC-NCL", "OBC-NCL (PwD)", "EWS", "EWS (PwD)", "SC", "SC (PwD)", "ST", "ST (PwD)",
];
pub const COLLEGE_TYPES: [&str; 5] = ["ALL", "IIT", "NIT", "IIIT", "GFTI"];
pub const ROUNDS: [&str; 6] = ["1", "2", "3", "4", "5", "6"];
pub const DEFAULT_MIN_PROB: f64 = 30.0;

/// Label for the rank input: IIT seats use the JEE Advanced rank, the rest
/// the JEE Main rank.
pub fn rank_label(college_type: &str) -> &'static str {
    if college_type.trim().eq_ignore_ascii_case("IIT") {
        "Enter your JEE Advanced Rank (OPEN-CRL, Others-Category Rank)"
    } else {
        "Enter your JEE Main Rank (OPEN-CRL, Others-Category Rank)"
    }
}

pub fn parse_json_input(json_str: &str) -> Result<PreferenceQuery, serde_json::Error> {
    serde_json::from_str::<PreferenceQuery>(json_str)
}

/// Builds a query from URL parameters, as sent to `GET /download_excel`.
/// Returns `None` when no query parameter was given at all.
pub fn query_from_params(params: &HashMap<String, String>) -> Result<Option<PreferenceQuery>, AppError> {
    const KEYS: [&str; 7] = [
        "jee_rank",
        "category",
        "college_type",
        "preferred_branch",
        "round_no",
        "min_prob",
        "min_probability",
    ];
    if !KEYS.iter().any(|k| params.contains_key(*k)) {
        return Ok(None);
    }

    // Reuse the JSON deserializer so both entry points agree on defaults.
    let mut obj = serde_json::Map::new();
    for key in KEYS {
        if key == "min_probability" && params.contains_key("min_prob") {
            continue;
        }
        if let Some(v) = params.get(key) {
            obj.insert(key.to_string(), Value::String(v.clone()));
        }
    }
    serde_json::from_value(Value::Object(obj))
        .map(Some)
        .map_err(|e| AppError::InvalidRequest(format!("invalid query parameters: {}", e)))
}

/// Payload of `GET /options`.
pub fn options_json(branches: &[String]) -> Value {
    json!({
        "categories": CATEGORIES,
        "college_types": COLLEGE_TYPES,
        "rounds": ROUNDS,
        "branches": branches,
        "default_min_prob": DEFAULT_MIN_PROB,
        "rank_labels": {
            "IIT": rank_label("IIT"),
            "default": rank_label("ALL"),
        }
    })
}
