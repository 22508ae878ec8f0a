use josaa_predictor::api_json::*;
use std::collections::HashMap;

#[test]
fn test_parse_json_page_body() {
    let json_data = r#"
    {
        "jee_rank": 8421,
        "category": "EWS",
        "college_type": "IIIT",
        "preferred_branch": "All",
        "round_no": "2",
        "min_prob": 45
    }
    "#;

    let q = parse_json_input(json_data).expect("page body should parse");
    assert_eq!(q.jee_rank, Some(8421.0));
    assert_eq!(q.category, "EWS");
    assert_eq!(q.college_type, "IIIT");
    assert_eq!(q.preferred_branch, "All");
    assert_eq!(q.round_no, "2");
    assert_eq!(q.min_prob, Some(45.0));
}

#[test]
fn test_parse_json_fastapi_body() {
    let json_data = r#"
    {
        "jee_rank": 1200,
        "category": "OPEN",
        "college_type": "IIT",
        "preferred_branch": "Civil Engineering (4 Years)",
        "round_no": "6",
        "min_probability": 20.5
    }
    "#;

    let q = parse_json_input(json_data).expect("FastAPI body should parse");
    assert_eq!(q.min_prob, Some(20.5));
    assert_eq!(q.round_no, "6");
}

#[test]
fn test_parse_json_minimal_body_uses_defaults() {
    let q = parse_json_input(r#"{"jee_rank": 77}"#).unwrap();
    assert_eq!(q.category, "All");
    assert_eq!(q.college_type, "All");
    assert_eq!(q.preferred_branch, "All");
    assert_eq!(q.round_no, "1");
    assert_eq!(q.min_prob, None);
}

#[test]
fn test_query_params_prefer_min_prob_over_alias() {
    let mut p = HashMap::new();
    p.insert("jee_rank".to_string(), "900".to_string());
    p.insert("min_prob".to_string(), "10".to_string());
    p.insert("min_probability".to_string(), "90".to_string());
    let q = query_from_params(&p)
        .expect("params parse")
        .expect("query present");
    assert_eq!(q.min_prob, Some(10.0));
}

#[test]
fn test_options_payload() {
    let branches = vec!["Civil Engineering".to_string()];
    let v = options_json(&branches);
    assert_eq!(v["categories"].as_array().unwrap().len(), CATEGORIES.len());
    assert_eq!(v["branches"][0], "Civil Engineering");
    assert!(v["rank_labels"]["IIT"].as_str().unwrap().contains("Advanced"));
}
