use payloads::{
    APIClient, ClientError, Plant, PlantId,
    requests::{ImageUpload, PlantDetails},
};

use crate::{Features, Persistence, TimeSource, local::LocalBackend};

/// Storage the view reads and writes plants through.
///
/// Futures returned here are not required to be `Send`, since the view runs
/// on the browser's single-threaded event loop.
#[allow(async_fn_in_trait)]
pub trait PlantBackend {
    async fn list_plants(&self) -> Result<Vec<Plant>, ClientError>;

    async fn create_plant(
        &self,
        details: &PlantDetails,
    ) -> Result<Plant, ClientError>;

    async fn update_plant(
        &self,
        id: &PlantId,
        details: &PlantDetails,
    ) -> Result<Plant, ClientError>;

    async fn delete_plant(&self, id: &PlantId) -> Result<(), ClientError>;

    async fn upload_plant_image(
        &self,
        id: &PlantId,
        image: &ImageUpload,
    ) -> Result<(), ClientError>;

    /// URL to display the plant's image from, if it has one.
    fn plant_image_url(&self, plant: &Plant) -> Option<String>;
}

impl PlantBackend for APIClient {
    async fn list_plants(&self) -> Result<Vec<Plant>, ClientError> {
        APIClient::list_plants(self).await
    }

    async fn create_plant(
        &self,
        details: &PlantDetails,
    ) -> Result<Plant, ClientError> {
        APIClient::create_plant(self, details).await
    }

    async fn update_plant(
        &self,
        id: &PlantId,
        details: &PlantDetails,
    ) -> Result<Plant, ClientError> {
        APIClient::update_plant(self, id, details).await
    }

    async fn delete_plant(&self, id: &PlantId) -> Result<(), ClientError> {
        APIClient::delete_plant(self, id).await
    }

    async fn upload_plant_image(
        &self,
        id: &PlantId,
        image: &ImageUpload,
    ) -> Result<(), ClientError> {
        APIClient::upload_plant_image(self, id, image).await
    }

    fn plant_image_url(&self, plant: &Plant) -> Option<String> {
        if !plant.has_image() {
            return None;
        }
        let url = APIClient::plant_image_url(self, &plant.id);
        // the image URL never changes, so bust the browser cache on re-upload
        Some(match plant.updated_at {
            Some(updated_at) => {
                format!("{url}?v={}", updated_at.as_millisecond())
            }
            None => url,
        })
    }
}

/// The backend selected by `Features::persistence`.
#[derive(Debug, Clone)]
pub enum Backend {
    Remote(APIClient),
    Local(LocalBackend),
}

impl Backend {
    pub fn from_features(
        features: Features,
        address: &str,
        time_source: TimeSource,
    ) -> Self {
        match features.persistence {
            Persistence::Remote => Backend::Remote(APIClient::new(address)),
            Persistence::Local => Backend::Local(LocalBackend::new(time_source)),
        }
    }
}

impl PlantBackend for Backend {
    async fn list_plants(&self) -> Result<Vec<Plant>, ClientError> {
        match self {
            Backend::Remote(client) => PlantBackend::list_plants(client).await,
            Backend::Local(local) => local.list_plants().await,
        }
    }

    async fn create_plant(
        &self,
        details: &PlantDetails,
    ) -> Result<Plant, ClientError> {
        match self {
            Backend::Remote(client) => {
                PlantBackend::create_plant(client, details).await
            }
            Backend::Local(local) => local.create_plant(details).await,
        }
    }

    async fn update_plant(
        &self,
        id: &PlantId,
        details: &PlantDetails,
    ) -> Result<Plant, ClientError> {
        match self {
            Backend::Remote(client) => {
                PlantBackend::update_plant(client, id, details).await
            }
            Backend::Local(local) => local.update_plant(id, details).await,
        }
    }

    async fn delete_plant(&self, id: &PlantId) -> Result<(), ClientError> {
        match self {
            Backend::Remote(client) => {
                PlantBackend::delete_plant(client, id).await
            }
            Backend::Local(local) => local.delete_plant(id).await,
        }
    }

    async fn upload_plant_image(
        &self,
        id: &PlantId,
        image: &ImageUpload,
    ) -> Result<(), ClientError> {
        match self {
            Backend::Remote(client) => {
                PlantBackend::upload_plant_image(client, id, image).await
            }
            Backend::Local(local) => local.upload_plant_image(id, image).await,
        }
    }

    fn plant_image_url(&self, plant: &Plant) -> Option<String> {
        match self {
            Backend::Remote(client) => {
                PlantBackend::plant_image_url(client, plant)
            }
            Backend::Local(local) => local.plant_image_url(plant),
        }
    }
}
