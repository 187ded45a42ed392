use actix_web::{web, HttpResponse, Responder};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::services::itinerary_repair_service::{repair_itinerary, RepairError};
use crate::services::openai_service::{GenerationError, TextGeneration};
use crate::services::prompt_service::{build_system_prompt, build_user_payload};
use crate::services::trip_service::normalize_trip_request;

/*
    /api/itinerary
*/
pub async fn generate(
    data: web::Data<Arc<dyn TextGeneration>>,
    input: web::Json<Value>,
) -> impl Responder {
    // Validation happens before the model is asked anything; a rejected
    // request never costs an upstream call.
    let plan = match normalize_trip_request(&input) {
        Ok(plan) => plan,
        Err(err) => return HttpResponse::BadRequest().json(json!({ "error": err.to_string() })),
    };

    let system_prompt = build_system_prompt(&plan);
    let user_payload = build_user_payload(&plan);

    let raw = match data.generate(&system_prompt, &user_payload).await {
        Ok(raw) => raw,
        Err(GenerationError::EmptyResponse) => {
            return HttpResponse::InternalServerError()
                .json(json!({ "error": "No response from model" }));
        }
        Err(err) => {
            eprintln!("Itinerary generation failed: {}", err);
            return HttpResponse::InternalServerError()
                .json(json!({ "error": "Server error generating itinerary" }));
        }
    };

    match repair_itinerary(&raw, &plan.destination, &plan.date_labels) {
        Ok(itinerary) => HttpResponse::Ok().json(itinerary),
        Err(RepairError::InvalidJson { raw }) => HttpResponse::InternalServerError()
            .json(json!({ "error": "Model returned invalid JSON", "raw": raw })),
    }
}
