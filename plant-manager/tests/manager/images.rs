use payloads::requests::ImageUpload;
use plant_manager::{
    Features, LocalBackend, ManagerError, PlantBackend, PlantManager,
    Persistence,
};
use reqwest::StatusCode;
use test_helpers::{leaf_png, monstera_details, pachira_details};

use crate::{
    ListFailsAfterWrite, fill_form, manager_with_app, time_source,
};

#[tokio::test]
async fn image_is_uploaded_to_the_saved_plant() -> anyhow::Result<()> {
    let (app, mut manager) = manager_with_app(Features::IMAGES).await?;
    app.seed_plant(&pachira_details());

    fill_form(&mut manager, &monstera_details());
    let preview = manager.select_image(leaf_png())?.preview_url.clone();
    assert!(preview.starts_with("data:image/png;base64,"));
    let created = manager.submit().await?;

    assert_eq!(created.id.0, "2");
    let stored = app.image(&created.id).expect("image stored");
    assert_eq!(stored.content_type, "image/png");
    assert_eq!(stored.data, leaf_png().data);
    assert!(manager.state().pending_image.is_none());

    let fetched = app.client.get_plant_image(&created.id).await?;
    assert_eq!(fetched, leaf_png().data);

    let listed = &manager.state().plants[1];
    assert_eq!(listed.image_type.as_deref(), Some("image/png"));
    let url = manager.image_url(listed).expect("plant has an image");
    assert!(url.starts_with(&format!(
        "http://127.0.0.1:{}/api/plants/2/image?v=",
        app.port
    )));
    assert_eq!(manager.image_url(&manager.state().plants[0]), None);
    Ok(())
}

#[tokio::test]
async fn editing_uploads_to_the_edited_plant() -> anyhow::Result<()> {
    let (app, mut manager) = manager_with_app(Features::FULL).await?;
    let first = app.seed_plant(&monstera_details());
    let second = app.seed_plant(&pachira_details());
    manager.load_plants().await?;

    manager.begin_edit(&first);
    manager.select_image(leaf_png())?;
    manager.submit().await?;

    assert!(app.image(&first.id).is_some());
    assert!(app.image(&second.id).is_none());
    Ok(())
}

#[tokio::test]
async fn replacing_and_clearing_the_selection() -> anyhow::Result<()> {
    let (app, mut manager) = manager_with_app(Features::IMAGES).await?;

    manager.select_image(leaf_png())?;
    let jpeg = ImageUpload {
        file_name: "leaf.jpg".into(),
        mime_type: "image/jpeg".into(),
        data: vec![0xff, 0xd8, 0xff],
    };
    manager.select_image(jpeg.clone())?;
    assert_eq!(
        manager.state().pending_image.as_ref().map(|p| &p.upload),
        Some(&jpeg)
    );

    manager.clear_image();
    fill_form(&mut manager, &monstera_details());
    let created = manager.submit().await?;
    assert!(app.image(&created.id).is_none());
    assert!(app.requests().iter().all(|r| !r.path.ends_with("/image")));
    Ok(())
}

#[tokio::test]
async fn failed_upload_keeps_the_saved_plant() -> anyhow::Result<()> {
    let (app, mut manager) = manager_with_app(Features::IMAGES).await?;
    fill_form(&mut manager, &monstera_details());
    // The API refuses empty files
    manager.select_image(ImageUpload {
        file_name: String::new(),
        mime_type: String::new(),
        data: Vec::new(),
    })?;

    let result = manager.submit().await;

    match result {
        Err(ManagerError::ImageUpload { plant_id, source }) => {
            assert_eq!(app.plants()[0].id, plant_id);
            assert_eq!(source.status(), Some(StatusCode::BAD_REQUEST));
        }
        other => panic!("expected image upload error, got {other:?}"),
    }
    assert_eq!(manager.state().plants.len(), 1);
    assert_eq!(manager.state().form.name, "");
    assert!(manager.state().pending_image.is_none());
    Ok(())
}

#[tokio::test]
async fn failed_upload_is_reported_even_when_reload_fails()
-> anyhow::Result<()> {
    let mut manager = PlantManager::new(
        ListFailsAfterWrite::new(),
        Features::FULL,
        time_source(),
    );
    manager.load_plants().await?;

    fill_form(&mut manager, &monstera_details());
    manager.select_image(leaf_png())?;
    let result = manager.submit().await;

    match result {
        Err(ManagerError::ImageUpload { source, .. }) => {
            assert_eq!(source.status(), Some(StatusCode::BAD_REQUEST));
        }
        other => panic!("expected image upload error, got {other:?}"),
    }
    assert!(manager.state().pending_image.is_none());
    assert!(!manager.state().is_editing());
    Ok(())
}

#[tokio::test]
async fn images_disabled_refuses_selection() -> anyhow::Result<()> {
    let (app, mut manager) = manager_with_app(Features::BASIC).await?;
    let plant = app.seed_plant(&monstera_details());
    app.client.upload_plant_image(&plant.id, &leaf_png()).await?;
    manager.load_plants().await?;

    assert!(matches!(
        manager.select_image(leaf_png()),
        Err(ManagerError::ImagesDisabled)
    ));
    assert!(manager.state().pending_image.is_none());
    assert_eq!(manager.image_url(&manager.state().plants[0]), None);
    Ok(())
}

#[tokio::test]
async fn local_images_are_inline() -> anyhow::Result<()> {
    let features = Features {
        persistence: Persistence::Local,
        images: true,
        theme_toggle: false,
    };
    let backend = LocalBackend::new(time_source());
    let mut manager =
        PlantManager::new(backend.clone(), features, time_source());

    fill_form(&mut manager, &monstera_details());
    manager.select_image(leaf_png())?;
    let created = manager.submit().await?;

    let plants = backend.list_plants().await?;
    let stored = &plants[0];
    assert_eq!(stored.id, created.id);
    let url = manager.image_url(stored).expect("plant has an image");
    assert!(url.starts_with("data:image/png;base64,"));
    Ok(())
}
