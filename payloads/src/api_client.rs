use crate::{Plant, PlantId, requests, responses};
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde::Serialize;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for interfacing with the plant API.
#[derive(Debug, Clone)]
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

/// Helper methods for http actions
impl APIClient {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into().trim_end_matches('/').to_string(),
            inner_client: reqwest::Client::new(),
        }
    }

    fn format_url(&self, path: &str) -> String {
        format!("{}/api/{path}", &self.address)
    }

    async fn empty_get(&self, path: &str) -> ReqwestResult {
        self.inner_client.get(self.format_url(path)).send().await
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        self.inner_client
            .post(self.format_url(path))
            .json(body)
            .send()
            .await
    }

    async fn put(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        self.inner_client
            .put(self.format_url(path))
            .json(body)
            .send()
            .await
    }

    async fn delete(&self, path: &str) -> ReqwestResult {
        self.inner_client.delete(self.format_url(path)).send().await
    }

    async fn post_multipart(&self, path: &str, form: Form) -> ReqwestResult {
        self.inner_client
            .post(self.format_url(path))
            .multipart(form)
            .send()
            .await
    }
}

/// Methods on the plant API
impl APIClient {
    pub async fn list_plants(&self) -> Result<Vec<Plant>, ClientError> {
        let response = self.empty_get("plants").await?;
        let list: responses::PlantList = ok_body(response).await?;
        Ok(list.plants)
    }

    /// Fetch a single plant. Not used by the view, which always reloads the
    /// full list.
    pub async fn get_plant(&self, id: &PlantId) -> Result<Plant, ClientError> {
        let response = self.empty_get(&format!("plants/{id}")).await?;
        let envelope: responses::PlantEnvelope = ok_body(response).await?;
        Ok(envelope.into_plant())
    }

    pub async fn create_plant(
        &self,
        details: &requests::PlantDetails,
    ) -> Result<Plant, ClientError> {
        let response = self.post("plants", details).await?;
        let envelope: responses::PlantEnvelope = ok_body(response).await?;
        Ok(envelope.into_plant())
    }

    pub async fn update_plant(
        &self,
        id: &PlantId,
        details: &requests::PlantDetails,
    ) -> Result<Plant, ClientError> {
        let response = self.put(&format!("plants/{id}"), details).await?;
        let envelope: responses::PlantEnvelope = ok_body(response).await?;
        Ok(envelope.into_plant())
    }

    pub async fn delete_plant(&self, id: &PlantId) -> Result<(), ClientError> {
        let response = self.delete(&format!("plants/{id}")).await?;
        ok_empty(response).await
    }

    /// Attach an image to a plant, replacing any previous one.
    pub async fn upload_plant_image(
        &self,
        id: &PlantId,
        image: &requests::ImageUpload,
    ) -> Result<(), ClientError> {
        let part = Part::bytes(image.data.clone())
            .file_name(image.file_name.clone())
            .mime_str(image.content_type())?;
        let form = Form::new().part("image", part);
        let response =
            self.post_multipart(&format!("plants/{id}/image"), form).await?;
        ok_empty(response).await
    }

    /// Fetches the raw image bytes. Primarily for tests.
    /// For displaying images in the UI, use `plant_image_url()` instead.
    pub async fn get_plant_image(
        &self,
        id: &PlantId,
    ) -> Result<Vec<u8>, ClientError> {
        let response = self.empty_get(&format!("plants/{id}/image")).await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// Returns the URL for fetching raw image bytes.
    /// Use this for `<img src>` attributes in the UI.
    pub fn plant_image_url(&self, id: &PlantId) -> String {
        self.format_url(&format!("plants/{id}/image"))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing the server's message.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
}

impl ClientError {
    /// The response status, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::APIError(status, _) => Some(*status),
            ClientError::Network(e) => e.status(),
        }
    }
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    Ok(response.json::<T>().await?)
}

/// Check that an empty response is OK, returning a ClientError if not.
pub async fn ok_empty(response: reqwest::Response) -> Result<(), ClientError> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    Ok(())
}

/// Build an APIError from a failed response, preferring the `error` field of
/// a JSON body over the raw text.
async fn api_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => return e.into(),
    };
    ClientError::APIError(status, error_message(status, &body))
}

fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(message) = serde_json::from_str::<responses::ErrorMessage>(body)
    {
        return message.error;
    }
    if body.trim().is_empty() {
        return status.canonical_reason().unwrap_or("Unknown error").into();
    }
    body.to_string()
}
