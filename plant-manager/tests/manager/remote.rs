use payloads::{Location, PlantId};
use plant_manager::{
    Features, FormError, FormField, ManagerError, PlantManager,
};
use reqwest::StatusCode;
use test_helpers::{monstera_details, pachira_details};

use crate::{fill_form, manager_with_app, time_source};

#[tokio::test]
async fn incomplete_form_sends_nothing() -> anyhow::Result<()> {
    let (app, mut manager) = manager_with_app(Features::BASIC).await?;
    let requests_before = app.requests().len();

    manager.set_field(FormField::Name, "Monstera");
    let result = manager.submit().await;

    assert!(matches!(
        result,
        Err(ManagerError::Invalid(FormError::MissingLocation))
    ));
    assert_eq!(app.requests().len(), requests_before);
    assert_eq!(manager.state().form.name, "Monstera");
    Ok(())
}

#[tokio::test]
async fn blank_name_is_rejected() -> anyhow::Result<()> {
    let (app, mut manager) = manager_with_app(Features::BASIC).await?;

    manager.set_field(FormField::Name, "   ");
    manager.set_field(FormField::Location, "desk");
    let result = manager.submit().await;

    assert!(matches!(
        result,
        Err(ManagerError::Invalid(FormError::MissingName))
    ));
    assert!(app.plants().is_empty());
    Ok(())
}

#[tokio::test]
async fn create_resets_form_and_reloads() -> anyhow::Result<()> {
    let (app, mut manager) = manager_with_app(Features::BASIC).await?;

    fill_form(&mut manager, &monstera_details());
    let created = manager.submit().await?;

    assert_eq!(created.name, "Monstera");
    assert_eq!(created.location, "desk");
    let state = manager.state();
    assert_eq!(state.plants, app.plants());
    assert_eq!(state.plants.len(), 1);
    assert!(!state.is_editing());
    assert_eq!(state.form.name, "");
    assert_eq!(state.form.location, "");
    assert_eq!(
        state.form.purchase_date,
        time_source().today().to_string()
    );

    let methods: Vec<_> = app
        .requests()
        .into_iter()
        .map(|r| format!("{} {}", r.method, r.path))
        .collect();
    assert_eq!(
        methods,
        ["GET /api/plants", "POST /api/plants", "GET /api/plants"]
    );
    Ok(())
}

#[tokio::test]
async fn edit_then_cancel_makes_no_requests() -> anyhow::Result<()> {
    let (app, mut manager) = manager_with_app(Features::BASIC).await?;
    let plant = app.seed_plant(&pachira_details());
    manager.load_plants().await?;
    let requests_before = app.requests().len();

    manager.begin_edit(&plant);
    let state = manager.state();
    assert_eq!(state.editing_id, Some(plant.id.clone()));
    assert_eq!(state.form.name, "Pachira");
    assert_eq!(state.form.location, "entrance");
    assert_eq!(state.form.purchase_date, "2023-06-15");

    manager.cancel_edit();
    assert!(!manager.state().is_editing());
    assert_eq!(manager.state().form.name, "");
    assert_eq!(app.requests().len(), requests_before);
    Ok(())
}

#[tokio::test]
async fn create_edit_delete_round() -> anyhow::Result<()> {
    let (app, mut manager) = manager_with_app(Features::BASIC).await?;

    fill_form(&mut manager, &monstera_details());
    let created = manager.submit().await?;

    manager.begin_edit(&created);
    manager.set_field(FormField::Location, Location::Kitchen.code());
    let updated = manager.submit().await?;
    assert_eq!(updated.id, created.id);
    assert_eq!(manager.state().plants.len(), 1);
    assert_eq!(manager.state().plants[0].location_label(), "キッチン");
    assert!(!manager.state().is_editing());

    manager.delete(&created.id).await?;
    assert!(manager.state().plants.is_empty());
    assert!(app.plants().is_empty());
    Ok(())
}

#[tokio::test]
async fn deleting_edited_plant_leaves_edit_mode() -> anyhow::Result<()> {
    let (app, mut manager) = manager_with_app(Features::BASIC).await?;
    let plant = app.seed_plant(&monstera_details());
    manager.load_plants().await?;

    manager.begin_edit(&plant);
    manager.delete(&plant.id).await?;

    assert!(!manager.state().is_editing());
    assert_eq!(manager.state().form.name, "");
    Ok(())
}

#[tokio::test]
async fn deleting_unknown_plant_keeps_list() -> anyhow::Result<()> {
    let (app, mut manager) = manager_with_app(Features::BASIC).await?;
    app.seed_plant(&monstera_details());
    manager.load_plants().await?;

    let result = manager.delete(&PlantId::from("999")).await;

    match result {
        Err(ManagerError::Delete(e)) => {
            assert_eq!(e.status(), Some(StatusCode::NOT_FOUND))
        }
        other => panic!("expected delete error, got {other:?}"),
    }
    assert_eq!(manager.state().plants.len(), 1);
    Ok(())
}

#[tokio::test]
async fn failed_save_keeps_form() -> anyhow::Result<()> {
    let (app, mut manager) = manager_with_app(Features::BASIC).await?;
    fill_form(&mut manager, &monstera_details());
    app.set_available(false);

    let result = manager.submit().await;

    assert!(matches!(result, Err(ManagerError::Save(_))));
    assert_eq!(manager.state().form.name, "Monstera");
    assert_eq!(manager.state().form.location, "desk");

    app.set_available(true);
    manager.submit().await?;
    assert_eq!(app.plants().len(), 1);
    Ok(())
}

#[tokio::test]
async fn failed_load_keeps_previous_list() -> anyhow::Result<()> {
    let (app, mut manager) = manager_with_app(Features::BASIC).await?;
    app.seed_plant(&monstera_details());
    manager.load_plants().await?;
    app.set_available(false);

    let result = manager.load_plants().await;

    match result {
        Err(ManagerError::Load(e)) => {
            assert_eq!(e.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
            assert_eq!(e.to_string(), "Service unavailable");
        }
        other => panic!("expected load error, got {other:?}"),
    }
    assert_eq!(manager.state().plants.len(), 1);
    Ok(())
}

#[tokio::test]
async fn unreachable_api_is_a_network_error() -> anyhow::Result<()> {
    // Nothing listens on port 9 on the test machines
    let client = payloads::APIClient::new("http://127.0.0.1:9");
    let mut manager = PlantManager::new(client, Features::BASIC, time_source());

    let result = manager.load_plants().await;

    match result {
        Err(ManagerError::Load(e)) => assert_eq!(e.status(), None),
        other => panic!("expected load error, got {other:?}"),
    }
    Ok(())
}
