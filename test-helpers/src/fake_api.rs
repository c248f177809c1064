//! In-memory stand-in for the plant API, speaking the same JSON shapes.

use actix_web::{
    HttpRequest, HttpResponse, ResponseError, delete, dev::HttpServiceFactory,
    get, http::StatusCode, http::header, post, put, web,
};
use payloads::{Plant, PlantId, requests::PlantDetails};
use serde_json::json;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::telemetry::log_error;

/// A request as seen by the fake, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredImage {
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug)]
struct StoredPlant {
    plant: Plant,
    image: Option<StoredImage>,
}

#[derive(Debug)]
struct Inner {
    next_id: u64,
    plants: Vec<StoredPlant>,
    requests: Vec<RecordedRequest>,
    available: bool,
}

/// Shared state of one fake API instance.
#[derive(Debug)]
pub struct FakeStore {
    inner: Mutex<Inner>,
    /// Timestamp given to every created or updated plant.
    now: jiff::Timestamp,
}

impl FakeStore {
    pub fn new(now: jiff::Timestamp) -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                plants: Vec::new(),
                requests: Vec::new(),
                available: true,
            }),
            now,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// While unavailable, every endpoint answers 503 and changes nothing.
    pub fn set_available(&self, available: bool) {
        self.lock().available = available;
    }

    pub fn plants(&self) -> Vec<Plant> {
        self.lock().plants.iter().map(|p| p.plant.clone()).collect()
    }

    pub fn image(&self, id: &PlantId) -> Option<StoredImage> {
        self.lock()
            .plants
            .iter()
            .find(|p| &p.plant.id == id)
            .and_then(|p| p.image.clone())
    }

    /// Insert a plant directly, bypassing the HTTP layer and request log.
    pub fn insert(&self, details: &PlantDetails) -> Plant {
        let mut inner = self.lock();
        let id = PlantId(inner.next_id.to_string());
        inner.next_id += 1;
        let plant = Plant {
            id,
            name: details.name.clone(),
            species: details.species.clone(),
            purchase_date: Some(details.purchase_date),
            location: details.location.code().to_string(),
            description: details.description.clone(),
            notes: String::new(),
            image_type: None,
            image_url: None,
            created_at: Some(self.now),
            updated_at: Some(self.now),
        };
        inner.plants.push(StoredPlant {
            plant: plant.clone(),
            image: None,
        });
        plant
    }

    /// Record the request and fail if the API is switched off.
    fn accept(
        &self,
        req: &HttpRequest,
    ) -> Result<MutexGuard<'_, Inner>, FakeApiError> {
        let mut inner = self.lock();
        inner.requests.push(RecordedRequest {
            method: req.method().to_string(),
            path: req.path().to_string(),
        });
        if !inner.available {
            return Err(FakeApiError::Unavailable);
        }
        Ok(inner)
    }
}

impl Inner {
    fn find_mut(&mut self, id: &str) -> Result<&mut StoredPlant, FakeApiError> {
        self.plants
            .iter_mut()
            .find(|p| p.plant.id.0 == id)
            .ok_or(FakeApiError::NotFound)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FakeApiError {
    #[error("Plant not found")]
    NotFound,
    #[error("Image not found")]
    NoImage,
    #[error("Image file missing from form")]
    MissingImage,
    #[error("Service unavailable")]
    Unavailable,
}

impl ResponseError for FakeApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            FakeApiError::NotFound | FakeApiError::NoImage => {
                StatusCode::NOT_FOUND
            }
            FakeApiError::MissingImage => StatusCode::BAD_REQUEST,
            FakeApiError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(json!({ "error": self.to_string() }))
    }
}

pub fn api_services() -> impl HttpServiceFactory {
    web::scope("/api")
        .service(list_plants)
        .service(create_plant)
        .service(get_plant)
        .service(update_plant)
        .service(delete_plant)
        .service(upload_plant_image)
        .service(get_plant_image)
}

#[get("/plants")]
async fn list_plants(
    req: HttpRequest,
    store: web::Data<FakeStore>,
) -> Result<HttpResponse, FakeApiError> {
    let inner = store.accept(&req)?;
    let plants: Vec<&Plant> = inner.plants.iter().map(|p| &p.plant).collect();
    Ok(HttpResponse::Ok().json(json!({ "plants": plants })))
}

#[post("/plants")]
async fn create_plant(
    req: HttpRequest,
    details: web::Json<PlantDetails>,
    store: web::Data<FakeStore>,
) -> Result<HttpResponse, FakeApiError> {
    drop(store.accept(&req)?);
    let plant = store.insert(&details);
    Ok(HttpResponse::Created().json(json!({ "plant": plant })))
}

/// Answers with the bare record, like the older deployments do.
#[get("/plants/{id}")]
async fn get_plant(
    req: HttpRequest,
    id: web::Path<String>,
    store: web::Data<FakeStore>,
) -> Result<HttpResponse, FakeApiError> {
    let mut inner = store.accept(&req)?;
    let stored = inner.find_mut(&id)?;
    Ok(HttpResponse::Ok().json(&stored.plant))
}

#[put("/plants/{id}")]
async fn update_plant(
    req: HttpRequest,
    id: web::Path<String>,
    details: web::Json<PlantDetails>,
    store: web::Data<FakeStore>,
) -> Result<HttpResponse, FakeApiError> {
    let now = store.now;
    let mut inner = store.accept(&req)?;
    let stored = inner.find_mut(&id)?;
    let plant = &mut stored.plant;
    plant.name = details.name.clone();
    plant.species = details.species.clone();
    plant.description = details.description.clone();
    plant.location = details.location.code().to_string();
    plant.purchase_date = Some(details.purchase_date);
    plant.updated_at = Some(now);
    Ok(HttpResponse::Ok().json(json!({ "plant": plant })))
}

#[delete("/plants/{id}")]
async fn delete_plant(
    req: HttpRequest,
    id: web::Path<String>,
    store: web::Data<FakeStore>,
) -> Result<HttpResponse, FakeApiError> {
    let mut inner = store.accept(&req)?;
    let before = inner.plants.len();
    inner.plants.retain(|p| p.plant.id.0 != *id);
    if inner.plants.len() == before {
        return Err(FakeApiError::NotFound);
    }
    Ok(HttpResponse::Ok()
        .json(json!({ "message": "Plant deleted successfully" })))
}

#[post("/plants/{id}/image")]
async fn upload_plant_image(
    req: HttpRequest,
    id: web::Path<String>,
    body: web::Bytes,
    store: web::Data<FakeStore>,
) -> Result<HttpResponse, FakeApiError> {
    let mut inner = store.accept(&req)?;
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let image = match multipart_field(content_type, &body, "image") {
        Some(image) if !image.data.is_empty() => image,
        _ => {
            log_error(FakeApiError::MissingImage);
            return Err(FakeApiError::MissingImage);
        }
    };

    let stored = inner.find_mut(&id)?;
    stored.plant.image_type = Some(image.content_type.clone());
    stored.image = Some(image);
    Ok(HttpResponse::Ok().json(json!({
        "message": "Image uploaded",
        "plant": {
            "id": stored.plant.id,
            "name": stored.plant.name,
            "imageType": stored.plant.image_type,
        },
    })))
}

#[get("/plants/{id}/image")]
async fn get_plant_image(
    req: HttpRequest,
    id: web::Path<String>,
    store: web::Data<FakeStore>,
) -> Result<HttpResponse, FakeApiError> {
    let mut inner = store.accept(&req)?;
    let image = inner
        .find_mut(&id)?
        .image
        .clone()
        .ok_or(FakeApiError::NoImage)?;
    Ok(HttpResponse::Ok()
        .content_type(image.content_type)
        .body(image.data))
}

/// Pull one file field out of a `multipart/form-data` body.
///
/// Only as much of the format as the plant client produces is handled: one
/// `Content-Disposition` and an optional `Content-Type` per part.
fn multipart_field(
    content_type: &str,
    body: &[u8],
    field: &str,
) -> Option<StoredImage> {
    let boundary = content_type
        .split(';')
        .find_map(|param| param.trim().strip_prefix("boundary="))?
        .trim_matches('"');
    let delimiter = format!("--{boundary}");
    let delimiter = delimiter.as_bytes();
    let field_marker = format!("name=\"{field}\"");

    let mut rest = body;
    while let Some(start) = find(rest, delimiter) {
        rest = &rest[start + delimiter.len()..];
        if rest.starts_with(b"--") {
            break;
        }
        let header_end = find(rest, b"\r\n\r\n")?;
        let headers = std::str::from_utf8(&rest[..header_end]).ok()?;
        let content = &rest[header_end + 4..];
        let end = find(content, delimiter)?;
        if !headers.contains(&field_marker) {
            continue;
        }

        let data = &content[..end];
        let data = data.strip_suffix(b"\r\n").unwrap_or(data);
        let part_type = headers
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-type"))
            .map(|(_, value)| value.trim().to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());
        return Some(StoredImage {
            content_type: part_type,
            data: data.to_vec(),
        });
    }
    None
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
