//! A backend that keeps plants in memory, for running the view without the
//! plant API.

use payloads::{
    ClientError, Plant, PlantId,
    requests::{ImageUpload, PlantDetails},
};
use reqwest::StatusCode;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use crate::{PlantBackend, TimeSource, image::data_url};

/// In-memory plant list. Clones share the same list.
#[derive(Debug, Clone)]
pub struct LocalBackend {
    plants: Arc<Mutex<Vec<Plant>>>,
    time_source: TimeSource,
}

impl LocalBackend {
    pub fn new(time_source: TimeSource) -> Self {
        Self {
            plants: Arc::new(Mutex::new(Vec::new())),
            time_source,
        }
    }

    fn plants(&self) -> MutexGuard<'_, Vec<Plant>> {
        self.plants.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn not_found(id: &PlantId) -> ClientError {
    ClientError::APIError(StatusCode::NOT_FOUND, format!("Plant {id} not found"))
}

fn apply_details(plant: &mut Plant, details: &PlantDetails) {
    plant.name = details.name.clone();
    plant.species = details.species.clone();
    plant.description = details.description.clone();
    plant.location = details.location.code().to_string();
    plant.purchase_date = Some(details.purchase_date);
}

impl PlantBackend for LocalBackend {
    async fn list_plants(&self) -> Result<Vec<Plant>, ClientError> {
        Ok(self.plants().clone())
    }

    async fn create_plant(
        &self,
        details: &PlantDetails,
    ) -> Result<Plant, ClientError> {
        let now = self.time_source.now();
        let mut plant = Plant {
            id: PlantId(Uuid::new_v4().to_string()),
            name: String::new(),
            species: String::new(),
            purchase_date: None,
            location: String::new(),
            description: String::new(),
            notes: String::new(),
            image_type: None,
            image_url: None,
            created_at: Some(now),
            updated_at: Some(now),
        };
        apply_details(&mut plant, details);
        tracing::debug!(id = %plant.id, "created local plant");
        self.plants().push(plant.clone());
        Ok(plant)
    }

    async fn update_plant(
        &self,
        id: &PlantId,
        details: &PlantDetails,
    ) -> Result<Plant, ClientError> {
        let mut plants = self.plants();
        let plant = plants
            .iter_mut()
            .find(|plant| &plant.id == id)
            .ok_or_else(|| not_found(id))?;
        apply_details(plant, details);
        plant.updated_at = Some(self.time_source.now());
        Ok(plant.clone())
    }

    async fn delete_plant(&self, id: &PlantId) -> Result<(), ClientError> {
        let mut plants = self.plants();
        let before = plants.len();
        plants.retain(|plant| &plant.id != id);
        if plants.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn upload_plant_image(
        &self,
        id: &PlantId,
        image: &ImageUpload,
    ) -> Result<(), ClientError> {
        let mut plants = self.plants();
        let plant = plants
            .iter_mut()
            .find(|plant| &plant.id == id)
            .ok_or_else(|| not_found(id))?;
        plant.image_type = Some(image.content_type().to_string());
        plant.image_url = Some(data_url(image.content_type(), &image.data));
        plant.updated_at = Some(self.time_source.now());
        Ok(())
    }

    fn plant_image_url(&self, plant: &Plant) -> Option<String> {
        plant.image_url.clone()
    }
}
