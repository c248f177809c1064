//! Development server for the plant manager UI.
//!
//! Starts the in-memory plant API on a fixed port and fills it with a few
//! plants, so the UI can be run against something without the real API.
//!
//! Usage: cargo run -p dev-server

use anyhow::Result;
use tracing::info;

const PORT: u16 = 8080;

#[tokio::main]
async fn main() -> Result<()> {
    let app = test_helpers::spawn_app_on_port(PORT).await;

    for details in [
        test_helpers::monstera_details(),
        test_helpers::pachira_details(),
        test_helpers::pothos_details(),
    ] {
        let plant = app.seed_plant(&details);
        app.client
            .upload_plant_image(&plant.id, &test_helpers::leaf_png())
            .await?;
    }

    // The test subscriber only shows errors, so announce on stdout too
    let address = format!("http://127.0.0.1:{}", app.port);
    info!(%address, "plant API running");
    println!("Plant API: {address}");
    println!("UI:        cd ui && BACKEND_URL={address} trunk serve");
    for plant in app.client.list_plants().await? {
        println!(
            "  #{} {} ({})",
            plant.id,
            plant.name,
            payloads::location_label(&plant.location)
        );
    }
    println!("Press Ctrl+C to shut down");

    tokio::signal::ctrl_c().await?;
    Ok(())
}
