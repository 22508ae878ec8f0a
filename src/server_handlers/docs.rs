use actix_web::{HttpResponse, Responder};
use serde_json::json;

use crate::api_json::{CATEGORIES, COLLEGE_TYPES, ROUNDS};
use crate::models::PreferenceQuery;

pub async fn help_handler() -> impl Responder {
    let example = PreferenceQuery {
        jee_rank: Some(15000.0),
        category: "OPEN".to_string(),
        college_type: "NIT".to_string(),
        preferred_branch: "Computer Science and Engineering".to_string(),
        round_no: "6".to_string(),
        min_prob: Some(30.0),
    };

    let help = json!({
        "description": "JOSAA preference list generator. POST /generate_preferences scores every program matching the filters against your rank and returns them ordered by admission probability.",
        "post_example": example,
        "download_example_query": "/download_excel?jee_rank=15000&category=OPEN&college_type=NIT&preferred_branch=All&round_no=6&min_prob=30",
        "note": "Use your JEE Advanced rank for IITs and your JEE Main rank otherwise (CRL for OPEN, category rank for other categories). 'All' disables a filter. /download_excel without parameters exports the full cutoff table.",
        "categories": CATEGORIES,
        "college_types": COLLEGE_TYPES,
        "rounds": ROUNDS,
        "disclaimer": "Probabilities are estimates from the previous year's cutoffs and are not official JOSAA figures."
    });

    HttpResponse::Ok().json(help)
}
