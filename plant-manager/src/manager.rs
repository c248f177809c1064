use jiff::civil::Date;
use payloads::{ClientError, Plant, PlantId, requests::ImageUpload};

use crate::{
    Features, FormError, FormField, FormState, PendingImage, PlantBackend,
    TimeSource,
};

/// Everything the plant manager view renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// The last successfully loaded list, replaced wholesale on reload.
    pub plants: Vec<Plant>,
    pub form: FormState,
    /// Set while the form edits an existing plant rather than creating one.
    pub editing_id: Option<PlantId>,
    pub pending_image: Option<PendingImage>,
}

impl ViewState {
    pub fn new(today: Date) -> Self {
        Self {
            plants: Vec::new(),
            form: FormState::new(today),
            editing_id: None,
            pending_image: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
    #[error(transparent)]
    Invalid(#[from] FormError),
    #[error("植物一覧の取得に失敗しました: {0}")]
    Load(#[source] ClientError),
    #[error("植物の保存に失敗しました: {0}")]
    Save(#[source] ClientError),
    #[error("植物の削除に失敗しました: {0}")]
    Delete(#[source] ClientError),
    /// The plant itself was saved; only the image is missing.
    #[error("画像のアップロードに失敗しました: {source}")]
    ImageUpload {
        plant_id: PlantId,
        #[source]
        source: ClientError,
    },
    #[error("画像の添付は無効になっています")]
    ImagesDisabled,
}

/// Controller for the plant form and table.
///
/// Owns the view state and mutates it only through the operations below.
/// Network operations log their failures and return them; state is left as
/// it was before the failing call, except where noted.
pub struct PlantManager<B> {
    backend: B,
    features: Features,
    time_source: TimeSource,
    state: ViewState,
}

impl<B: PlantBackend> PlantManager<B> {
    pub fn new(backend: B, features: Features, time_source: TimeSource) -> Self {
        let state = ViewState::new(time_source.today());
        Self::with_state(backend, features, time_source, state)
    }

    /// Resume from a state snapshot, e.g. one held by the UI store.
    pub fn with_state(
        backend: B,
        features: Features,
        time_source: TimeSource,
        state: ViewState,
    ) -> Self {
        Self {
            backend,
            features,
            time_source,
            state,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn into_state(self) -> ViewState {
        self.state
    }

    /// Replace the list with the backend's current one.
    #[tracing::instrument(skip(self))]
    pub async fn load_plants(&mut self) -> Result<&[Plant], ManagerError> {
        match self.backend.list_plants().await {
            Ok(plants) => {
                tracing::debug!(count = plants.len(), "loaded plants");
                self.state.plants = plants;
                Ok(&self.state.plants)
            }
            Err(e) => {
                tracing::error!("Error fetching plants: {e}");
                Err(ManagerError::Load(e))
            }
        }
    }

    /// Create or update the plant in the form, upload the pending image, then
    /// reset the form and reload the list.
    ///
    /// Invalid forms are rejected before anything is sent. If saving fails the
    /// form is kept so the user can retry. If only the image upload fails the
    /// plant stays saved, the form is still reset, and the upload error is
    /// returned after the reload, even when the reload fails too.
    #[tracing::instrument(skip(self), fields(editing = ?self.state.editing_id))]
    pub async fn submit(&mut self) -> Result<Plant, ManagerError> {
        let details = self.state.form.validate().inspect_err(|e| {
            tracing::warn!("Rejected plant form: {e}");
        })?;

        let saved = match &self.state.editing_id {
            Some(id) => self.backend.update_plant(id, &details).await,
            None => self.backend.create_plant(&details).await,
        };
        let saved = saved.map_err(|e| {
            tracing::error!("Error saving plant: {e}");
            ManagerError::Save(e)
        })?;

        let upload = match &self.state.pending_image {
            Some(pending) if self.features.images => Some(
                self.backend
                    .upload_plant_image(&saved.id, &pending.upload)
                    .await,
            ),
            _ => None,
        };

        self.reset_form();
        // load_plants logs its own failure
        let reload = self.load_plants().await.map(|_| ());

        // The selection is gone by now, so this must reach the caller
        if let Some(Err(e)) = upload {
            tracing::error!("Error uploading image: {e}");
            return Err(ManagerError::ImageUpload {
                plant_id: saved.id,
                source: e,
            });
        }
        reload?;
        Ok(saved)
    }

    /// Delete a plant and reload the list.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&mut self, id: &PlantId) -> Result<(), ManagerError> {
        self.backend.delete_plant(id).await.map_err(|e| {
            tracing::error!("Error deleting plant: {e}");
            ManagerError::Delete(e)
        })?;

        if self.state.editing_id.as_ref() == Some(id) {
            self.cancel_edit();
        }
        self.load_plants().await?;
        Ok(())
    }

    /// Load a plant into the form and mark it as the update target.
    pub fn begin_edit(&mut self, plant: &Plant) {
        self.state.form = FormState::from_plant(plant, self.time_source.today());
        self.state.editing_id = Some(plant.id.clone());
    }

    /// Leave edit mode, discarding the form contents.
    pub fn cancel_edit(&mut self) {
        self.reset_form();
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.state.form.set(field, value);
    }

    /// Keep an image to upload on the next submit, replacing any earlier
    /// selection.
    pub fn select_image(
        &mut self,
        upload: ImageUpload,
    ) -> Result<&PendingImage, ManagerError> {
        if !self.features.images {
            return Err(ManagerError::ImagesDisabled);
        }
        tracing::debug!(
            file = %upload.file_name,
            bytes = upload.data.len(),
            "selected image"
        );
        Ok(self.state.pending_image.insert(PendingImage::new(upload)))
    }

    pub fn clear_image(&mut self) {
        self.state.pending_image = None;
    }

    pub fn image_url(&self, plant: &Plant) -> Option<String> {
        self.features.image_url(&self.backend, plant)
    }

    fn reset_form(&mut self) {
        self.state.form = FormState::new(self.time_source.today());
        self.state.editing_id = None;
        self.state.pending_image = None;
    }
}
