/// Normalized trip parameters, produced by the trip service from the raw
/// request body. Lives only for the duration of one request.
#[derive(Debug, Clone)]
pub struct TripPlan {
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub travelers: u32,
    pub budget: Option<f64>,
    pub interests: Vec<String>,
    pub days_count: usize,
    pub date_labels: Vec<String>,
}
