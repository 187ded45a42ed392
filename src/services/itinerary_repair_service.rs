use std::error::Error;
use std::fmt;

use crate::models::itinerary::Itinerary;

const MAX_BLOCKS_PER_DAY: usize = 3;

#[derive(Debug)]
pub enum RepairError {
    /// The model text was not parseable JSON. Carries the raw offending text
    /// so the caller can echo it back for diagnosis.
    InvalidJson { raw: String },
}

impl fmt::Display for RepairError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepairError::InvalidJson { .. } => write!(f, "Model returned invalid JSON"),
        }
    }
}

impl Error for RepairError {}

/// Parses raw model output and force-corrects the fields the model cannot be
/// trusted with: the destination echo, day numbering, date labels, and list
/// lengths. Everything else (block contents, ordering, costs) passes through
/// unvalidated. Days are truncated to the label count but never padded; a
/// short response stays short.
pub fn repair_itinerary(
    raw: &str,
    destination: &str,
    date_labels: &[String],
) -> Result<Itinerary, RepairError> {
    let mut itinerary: Itinerary = serde_json::from_str(raw).map_err(|_| {
        RepairError::InvalidJson {
            raw: raw.to_string(),
        }
    })?;

    itinerary.destination = destination.to_string();
    itinerary.days.truncate(date_labels.len());
    for (idx, day) in itinerary.days.iter_mut().enumerate() {
        day.day = idx as u32 + 1;
        day.date_label = date_labels[idx].clone();
        day.blocks.truncate(MAX_BLOCKS_PER_DAY);
    }

    Ok(itinerary)
}
