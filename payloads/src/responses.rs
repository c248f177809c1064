use crate::Plant;
use serde::{Deserialize, Deserializer, Serialize};

/// Response of `GET /api/plants`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantList {
    /// An empty table may be encoded as `null`. Rows that fail to decode
    /// are logged and left out so the rest of the table still shows.
    #[serde(default, deserialize_with = "decodable_rows")]
    pub plants: Vec<Plant>,
}

fn decodable_rows<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<Plant>, D::Error> {
    let rows = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?
        .unwrap_or_default();
    Ok(rows
        .into_iter()
        .filter_map(|row| match Plant::deserialize(&row) {
            Ok(plant) => Some(plant),
            Err(e) => {
                tracing::warn!(%row, "Skipping undecodable plant: {e}");
                None
            }
        })
        .collect())
}

/// Response of the create and update endpoints.
///
/// The API wraps the plant as `{ "plant": ... }`, but older deployments
/// return the bare record, so both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlantEnvelope {
    Wrapped { plant: Plant },
    Bare(Plant),
}

impl PlantEnvelope {
    pub fn into_plant(self) -> Plant {
        match self {
            PlantEnvelope::Wrapped { plant } | PlantEnvelope::Bare(plant) => {
                plant
            }
        }
    }
}

/// Error body returned by the API alongside a non-success status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub error: String,
}
