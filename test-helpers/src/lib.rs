pub mod fake_api;
pub mod telemetry;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use fake_api::{FakeStore, RecordedRequest, StoredImage};
use jiff::civil::date;
use payloads::{
    Location, Plant, PlantId,
    requests::{ImageUpload, PlantDetails},
};
use reqwest::StatusCode;
use std::net::TcpListener;
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;

/// Timestamp the fake API stamps onto every record it writes.
pub const FAKE_NOW: &str = "2025-01-01T12:00:00Z";

pub struct TestApp {
    pub port: u16,
    pub client: payloads::APIClient,
    pub store: web::Data<FakeStore>,
}

impl TestApp {
    /// Every request the fake has received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.store.requests()
    }

    /// Switch the fake into (or out of) answering 503 to everything.
    pub fn set_available(&self, available: bool) {
        self.store.set_available(available);
    }

    /// Put a plant straight into the fake's store without a request.
    pub fn seed_plant(&self, details: &PlantDetails) -> Plant {
        self.store.insert(details)
    }

    pub fn plants(&self) -> Vec<Plant> {
        self.store.plants()
    }

    pub fn image(&self, id: &PlantId) -> Option<StoredImage> {
        self.store.image(id)
    }
}

/// Start the fake plant API on the given port (0 for an OS-assigned one).
pub async fn spawn_app_on_port(port: u16) -> TestApp {
    let subscriber = telemetry::get_subscriber("error".into());
    let _ = LogTracer::init();
    let _ = subscriber.try_init();

    let store = web::Data::new(FakeStore::new(FAKE_NOW.parse().unwrap()));

    // OS assigns the port if binding to 0
    let listener = TcpListener::bind(format!("127.0.0.1:{port}")).unwrap();
    let port = listener.local_addr().unwrap().port();
    let app_store = store.clone();
    let server = HttpServer::new(move || {
        // The UI is served from a different origin during development
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();
        App::new()
            .wrap(cors)
            .service(fake_api::api_services())
            .app_data(app_store.clone())
    })
    .workers(1)
    .listen(listener)
    .unwrap()
    .run();
    tokio::spawn(server);

    TestApp {
        port,
        client: payloads::APIClient::new(format!("http://127.0.0.1:{port}")),
        store,
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_on_port(0).await
}

/// Assert that the result of an API action results in a specific status code.
pub fn assert_status_code<T>(
    result: Result<T, payloads::ClientError>,
    expected: StatusCode,
) {
    match result {
        Err(payloads::ClientError::APIError(code, _)) => {
            assert_eq!(code, expected)
        }
        _ => panic!("Expected APIError"),
    };
}

pub fn monstera_details() -> PlantDetails {
    PlantDetails {
        name: "Monstera".into(),
        species: "Monstera deliciosa".into(),
        description: "South window, water weekly".into(),
        location: Location::Desk,
        purchase_date: date(2024, 1, 1),
    }
}

pub fn pachira_details() -> PlantDetails {
    PlantDetails {
        name: "Pachira".into(),
        species: "Pachira glabra".into(),
        description: String::new(),
        location: Location::Entrance,
        purchase_date: date(2023, 6, 15),
    }
}

pub fn pothos_details() -> PlantDetails {
    PlantDetails {
        name: "Pothos".into(),
        species: "Epipremnum aureum".into(),
        description: "Hanging basket".into(),
        location: Location::Hallway,
        purchase_date: date(2024, 11, 3),
    }
}

/// A one pixel green PNG standing in for a photo of a leaf.
pub fn leaf_png() -> ImageUpload {
    ImageUpload {
        file_name: "leaf.png".into(),
        mime_type: "image/png".into(),
        data: LEAF_PNG.to_vec(),
    }
}

const LEAF_PNG: [u8; 69] = [
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d,
    0x49, 0x48, 0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01,
    0x08, 0x02, 0x00, 0x00, 0x00, 0x90, 0x77, 0x53, 0xde, 0x00, 0x00, 0x00,
    0x0c, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0xd0, 0xeb, 0x0e, 0x07,
    0x00, 0x01, 0xfb, 0x01, 0x11, 0x74, 0x26, 0x14, 0xe9, 0x00, 0x00, 0x00,
    0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

#[tokio::test]
async fn fake_api_answers_plant_list() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_plant(&monstera_details());

    let plants = app.client.list_plants().await?;
    assert_eq!(plants.len(), 1);
    assert_eq!(plants[0].id, PlantId::from("1"));
    assert_eq!(plants[0].location_label(), "デスク");

    assert_status_code(
        app.client.get_plant(&PlantId::from("42")).await,
        StatusCode::NOT_FOUND,
    );
    Ok(())
}
