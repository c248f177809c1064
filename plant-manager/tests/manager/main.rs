mod images;
mod local;
mod remote;

use payloads::{
    APIClient, ClientError, Plant, PlantId,
    requests::{ImageUpload, PlantDetails},
};
use plant_manager::{
    Features, FormField, LocalBackend, PlantBackend, PlantManager, TimeSource,
};
use reqwest::StatusCode;
use std::cell::Cell;
use test_helpers::{TestApp, spawn_app};

fn time_source() -> TimeSource {
    TimeSource::mock(test_helpers::FAKE_NOW.parse().unwrap())
}

/// A manager talking to a fresh fake API, with the plant list loaded.
async fn manager_with_app(
    features: Features,
) -> anyhow::Result<(TestApp, PlantManager<APIClient>)> {
    let app = spawn_app().await;
    let mut manager =
        PlantManager::new(app.client.clone(), features, time_source());
    manager.load_plants().await?;
    Ok((app, manager))
}

/// Local storage that refuses images and stops listing after the first
/// create or delete.
struct ListFailsAfterWrite {
    inner: LocalBackend,
    written: Cell<bool>,
}

impl ListFailsAfterWrite {
    fn new() -> Self {
        Self {
            inner: LocalBackend::new(time_source()),
            written: Cell::new(false),
        }
    }
}

impl PlantBackend for ListFailsAfterWrite {
    async fn list_plants(&self) -> Result<Vec<Plant>, ClientError> {
        if self.written.get() {
            return Err(ClientError::APIError(
                StatusCode::SERVICE_UNAVAILABLE,
                "down".into(),
            ));
        }
        self.inner.list_plants().await
    }

    async fn create_plant(
        &self,
        details: &PlantDetails,
    ) -> Result<Plant, ClientError> {
        let plant = self.inner.create_plant(details).await?;
        self.written.set(true);
        Ok(plant)
    }

    async fn update_plant(
        &self,
        id: &PlantId,
        details: &PlantDetails,
    ) -> Result<Plant, ClientError> {
        self.inner.update_plant(id, details).await
    }

    async fn delete_plant(&self, id: &PlantId) -> Result<(), ClientError> {
        self.inner.delete_plant(id).await?;
        self.written.set(true);
        Ok(())
    }

    async fn upload_plant_image(
        &self,
        _id: &PlantId,
        _image: &ImageUpload,
    ) -> Result<(), ClientError> {
        Err(ClientError::APIError(
            StatusCode::BAD_REQUEST,
            "Image file missing from form".into(),
        ))
    }

    fn plant_image_url(&self, plant: &Plant) -> Option<String> {
        self.inner.plant_image_url(plant)
    }
}

/// Type the details into the form the way a user would.
fn fill_form<B: plant_manager::PlantBackend>(
    manager: &mut PlantManager<B>,
    details: &PlantDetails,
) {
    manager.set_field(FormField::Name, details.name.as_str());
    manager.set_field(FormField::Species, details.species.as_str());
    manager.set_field(FormField::Location, details.location.code());
    manager
        .set_field(FormField::PurchaseDate, details.purchase_date.to_string());
    manager.set_field(FormField::Notes, details.description.as_str());
}

#[tokio::test]
async fn initial_load_shows_existing_plants() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_plant(&test_helpers::monstera_details());
    app.seed_plant(&test_helpers::pachira_details());

    let mut manager =
        PlantManager::new(app.client.clone(), Features::BASIC, time_source());
    let plants = manager.load_plants().await?;

    let names: Vec<_> = plants.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Monstera", "Pachira"]);
    assert_eq!(plants[1].location_label(), "玄関");
    Ok(())
}
