use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// One activity slot within a day. The model is asked for Morning, Afternoon
/// and Evening in that order, but `time_of_day` is kept as plain text because
/// upstream output is untrusted and we deliberately do not validate it.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TimeBlock {
    #[serde(rename = "timeOfDay", default)]
    pub time_of_day: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "estCost", default)]
    pub est_cost: f64,
    #[serde(rename = "mapQuery", default)]
    pub map_query: String,
}

impl TimeBlock {
    /// Google Maps search link for this block. Pure string construction;
    /// no request is ever made against it server-side.
    pub fn map_link(&self) -> String {
        let query: String = form_urlencoded::byte_serialize(self.map_query.as_bytes()).collect();
        format!("https://www.google.com/maps/search/?api=1&query={}", query)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ItineraryDay {
    #[serde(default)]
    pub day: u32,
    #[serde(rename = "dateLabel", default)]
    pub date_label: String,
    #[serde(default)]
    pub blocks: Vec<TimeBlock>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ItinerarySummary {
    #[serde(default)]
    pub vibe: String,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(rename = "estTotalCost", default)]
    pub est_total_cost: f64,
}

/// The structured multi-day plan returned to the caller. Every field defaults
/// on deserialize: a model response missing `days` or `summary` parses to the
/// empty shape and is repaired (or propagated short) downstream.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Itinerary {
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub summary: ItinerarySummary,
    #[serde(default)]
    pub days: Vec<ItineraryDay>,
}
