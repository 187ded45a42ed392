use serde_json::{json, Value};

use crate::models::trip::TripPlan;

const ITINERARY_SHAPE: &str = r#"{
  "destination": string,
  "summary": { "vibe": string, "tips": string[], "estTotalCost": number },
  "days": Array<{
    "day": number,
    "dateLabel": string,
    "blocks": Array<{
      "timeOfDay": "Morning" | "Afternoon" | "Evening",
      "title": string,
      "description": string,
      "estCost": number,
      "mapQuery": string
    }>
  }>
}"#;

/// Renders the system instruction constraining the model to the exact day
/// count and date labels computed from the request.
pub fn build_system_prompt(plan: &TripPlan) -> String {
    let labels = serde_json::to_string(&plan.date_labels).unwrap_or_default();

    [
        "You are an expert travel planner.".to_string(),
        "Return ONLY valid JSON (no markdown, no extra text).".to_string(),
        "The JSON must match EXACTLY this shape:".to_string(),
        ITINERARY_SHAPE.to_string(),
        "Rules:".to_string(),
        format!("- There must be exactly {} days.", plan.days_count),
        format!("- Use these dateLabel values exactly: {}.", labels),
        "- Each day must have exactly 3 blocks: Morning, Afternoon, Evening (in that order)."
            .to_string(),
        "- Titles should be short; descriptions 1-2 sentences.".to_string(),
        "- Make mapQuery specific for Google Maps (place + city + neighborhood/landmark)."
            .to_string(),
        "- Keep activities feasible and safe.".to_string(),
    ]
    .join("\n")
}

/// The user-role payload sent alongside the instruction.
pub fn build_user_payload(plan: &TripPlan) -> Value {
    json!({
        "destination": plan.destination,
        "startDate": plan.start_date,
        "endDate": plan.end_date,
        "daysCount": plan.days_count,
        "dateLabels": plan.date_labels,
        "travelers": plan.travelers,
        "budget": plan.budget,
        "interests": plan.interests,
    })
}
