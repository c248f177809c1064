pub mod api_client;
pub mod requests;
pub mod responses;

pub use api_client::{APIClient, ClientError};

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Server-assigned plant identifier.
///
/// Some API deployments use numeric ids and others use strings, so both JSON
/// forms are accepted. The id is only ever used to build URLs, so it is kept
/// as its textual form.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct PlantId(pub String);

impl<'de> Deserialize<'de> for PlantId {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => PlantId(n.to_string()),
            Raw::Text(s) => PlantId(s),
        })
    }
}

impl From<&str> for PlantId {
    fn from(id: &str) -> Self {
        PlantId(id.to_string())
    }
}

/// Where a plant is kept. The declaration order is the order of the options
/// in the location select control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Desk,
    Balcony,
    Entrance,
    Hallway,
    Kitchen,
}

impl Location {
    pub const ALL: [Location; 5] = [
        Location::Desk,
        Location::Balcony,
        Location::Entrance,
        Location::Hallway,
        Location::Kitchen,
    ];

    /// The code stored by the API.
    pub fn code(&self) -> &'static str {
        match self {
            Location::Desk => "desk",
            Location::Balcony => "balcony",
            Location::Entrance => "entrance",
            Location::Hallway => "hallway",
            Location::Kitchen => "kitchen",
        }
    }

    /// The label shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            Location::Desk => "デスク",
            Location::Balcony => "ベランダ",
            Location::Entrance => "玄関",
            Location::Hallway => "廊下",
            Location::Kitchen => "キッチン",
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown location code '{0}'")]
pub struct UnknownLocation(pub String);

impl FromStr for Location {
    type Err = UnknownLocation;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Location::ALL
            .into_iter()
            .find(|location| location.code() == code)
            .ok_or_else(|| UnknownLocation(code.to_string()))
    }
}

/// Display label for a stored location code.
///
/// Codes outside the known set are shown as-is rather than treated as an
/// error, since the server does not constrain the field.
pub fn location_label(code: &str) -> &str {
    match code.parse::<Location>() {
        Ok(location) => location.label(),
        Err(_) => code,
    }
}

/// A plant as returned by the API.
///
/// Field names differ between API deployments (`name` vs `plantName`,
/// `description` vs `notes`), so all of them are accepted here and callers use
/// the accessor methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPlant")]
pub struct Plant {
    pub id: PlantId,
    pub name: String,
    pub species: String,
    pub purchase_date: Option<Date>,
    /// Raw location code. Not parsed, so that unknown codes still display.
    pub location: String,
    pub description: String,
    pub notes: String,
    pub image_type: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

/// Wire form of [`Plant`], before the name fields are merged.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPlant {
    id: PlantId,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    plant_name: Option<String>,
    #[serde(default)]
    species: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    purchase_date: Option<Date>,
    #[serde(default)]
    location: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    notes: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    image_type: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    image_url: Option<String>,
    #[serde(default)]
    created_at: Option<Timestamp>,
    #[serde(default)]
    updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("plant {0} has neither `name` nor `plantName`")]
pub struct MissingPlantName(pub PlantId);

impl TryFrom<RawPlant> for Plant {
    type Error = MissingPlantName;

    fn try_from(raw: RawPlant) -> Result<Self, Self::Error> {
        // `name` wins when a record carries both, unless it is blank
        let name = match (raw.name, raw.plant_name) {
            (Some(name), _) if !name.is_empty() => name,
            (_, Some(plant_name)) => plant_name,
            (Some(name), None) => name,
            (None, None) => return Err(MissingPlantName(raw.id)),
        };
        Ok(Plant {
            id: raw.id,
            name,
            species: raw.species,
            purchase_date: raw.purchase_date,
            location: raw.location,
            description: raw.description,
            notes: raw.notes,
            image_type: raw.image_type,
            image_url: raw.image_url,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        })
    }
}

impl Plant {
    /// Free-text notes, preferring `description` over `notes`.
    pub fn notes(&self) -> &str {
        if self.description.is_empty() {
            &self.notes
        } else {
            &self.description
        }
    }

    pub fn has_image(&self) -> bool {
        self.image_type.is_some() || self.image_url.is_some()
    }

    pub fn location_label(&self) -> &str {
        location_label(&self.location)
    }
}

/// Treat missing, null and blank strings as `None`.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => {
            value.parse().map(Some).map_err(serde::de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_labels_fall_back_to_the_raw_code() {
        assert_eq!(location_label("desk"), "デスク");
        assert_eq!(location_label("kitchen"), "キッチン");
        assert_eq!(location_label("unknown-code"), "unknown-code");
        assert_eq!(location_label(""), "");
    }

    #[test]
    fn locations_keep_select_order() {
        let codes: Vec<_> = Location::ALL.iter().map(|l| l.code()).collect();
        assert_eq!(
            codes,
            ["desk", "balcony", "entrance", "hallway", "kitchen"]
        );
        assert_eq!("hallway".parse::<Location>(), Ok(Location::Hallway));
        assert_eq!(
            "attic".parse::<Location>(),
            Err(UnknownLocation("attic".into()))
        );
    }

    #[test]
    fn decodes_plant_with_numeric_id_and_server_fields() {
        let json = r#"{
            "id": 7,
            "name": "Monstera",
            "species": "Deliciosa",
            "description": "water weekly",
            "location": "desk",
            "notes": "",
            "purchaseDate": "2024-01-01",
            "imageUrl": "",
            "createdAt": "2024-01-02T03:04:05.123456+09:00",
            "updatedAt": "2024-01-02T03:04:05Z",
            "deletedAt": null
        }"#;
        let plant: Plant = serde_json::from_str(json).unwrap();
        assert_eq!(plant.id, PlantId("7".into()));
        assert_eq!(plant.purchase_date, Some(jiff::civil::date(2024, 1, 1)));
        assert_eq!(plant.notes(), "water weekly");
        assert_eq!(plant.location_label(), "デスク");
        assert!(!plant.has_image());
        assert!(plant.created_at.is_some());
    }

    #[test]
    fn decodes_plant_with_alternate_field_names() {
        let json = r#"{
            "id": "1",
            "plantName": "Pachira",
            "species": "Aquatica",
            "purchaseDate": "",
            "location": "entrance",
            "notes": "bright spot",
            "imageType": "image/png"
        }"#;
        let plant: Plant = serde_json::from_str(json).unwrap();
        assert_eq!(plant.id.to_string(), "1");
        assert_eq!(plant.name, "Pachira");
        assert_eq!(plant.purchase_date, None);
        assert_eq!(plant.notes(), "bright spot");
        assert!(plant.has_image());
    }

    #[test]
    fn record_with_both_name_fields_decodes() {
        let json = r#"{"id": 2, "name": "Fern", "plantName": "Old fern"}"#;
        let plant: Plant = serde_json::from_str(json).unwrap();
        assert_eq!(plant.name, "Fern");

        let json = r#"{"id": 2, "name": "", "plantName": "Old fern"}"#;
        let plant: Plant = serde_json::from_str(json).unwrap();
        assert_eq!(plant.name, "Old fern");

        let err = serde_json::from_str::<Plant>(r#"{"id": 2}"#).unwrap_err();
        assert!(err.to_string().contains("neither `name` nor `plantName`"));
    }

    #[test]
    fn rejects_malformed_purchase_date() {
        let json = r#"{"id": 1, "name": "Fern", "purchaseDate": "tomorrow"}"#;
        assert!(serde_json::from_str::<Plant>(json).is_err());
    }
}
