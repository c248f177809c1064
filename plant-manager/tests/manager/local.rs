use plant_manager::{
    Backend, Features, LocalBackend, ManagerError, PlantBackend, PlantManager,
    location_label,
};
use test_helpers::{monstera_details, pachira_details};

use crate::{ListFailsAfterWrite, fill_form, time_source};

#[tokio::test]
async fn local_backend_generates_ids() -> anyhow::Result<()> {
    let time_source = time_source();
    let backend = LocalBackend::new(time_source.clone());
    let mut manager =
        PlantManager::new(backend, Features::LOCAL, time_source.clone());

    fill_form(&mut manager, &monstera_details());
    let first = manager.submit().await?;
    fill_form(&mut manager, &pachira_details());
    let second = manager.submit().await?;

    assert_ne!(first.id, second.id);
    assert_eq!(first.created_at, Some(time_source.now()));
    let names: Vec<_> =
        manager.state().plants.iter().map(|p| p.name.clone()).collect();
    assert_eq!(names, ["Monstera", "Pachira"]);
    Ok(())
}

#[tokio::test]
async fn local_edit_and_delete() -> anyhow::Result<()> {
    let time_source = time_source();
    let backend = Backend::from_features(
        Features::LOCAL,
        plant_manager::DEFAULT_API_ADDRESS,
        time_source.clone(),
    );
    assert!(matches!(backend, Backend::Local(_)));
    let mut manager =
        PlantManager::new(backend, Features::LOCAL, time_source.clone());

    fill_form(&mut manager, &monstera_details());
    let created = manager.submit().await?;

    time_source.advance(jiff::Span::new().hours(1));
    manager.begin_edit(&created);
    manager.set_field(plant_manager::FormField::Location, "balcony");
    let updated = manager.submit().await?;
    assert_eq!(location_label(&updated.location), "ベランダ");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    manager.delete(&created.id).await?;
    assert!(manager.state().plants.is_empty());
    assert!(manager.delete(&created.id).await.is_err());
    Ok(())
}

#[tokio::test]
async fn clones_share_the_list() -> anyhow::Result<()> {
    let backend = LocalBackend::new(time_source());
    let mut writer =
        PlantManager::new(backend.clone(), Features::LOCAL, time_source());
    let mut reader = PlantManager::new(backend, Features::LOCAL, time_source());

    fill_form(&mut writer, &monstera_details());
    writer.submit().await?;

    assert_eq!(reader.load_plants().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn delete_then_failed_reload_still_leaves_edit_mode()
-> anyhow::Result<()> {
    let backend = ListFailsAfterWrite::new();
    let plant = backend.inner.create_plant(&monstera_details()).await?;
    let mut manager =
        PlantManager::new(backend, Features::LOCAL, time_source());
    manager.load_plants().await?;

    manager.begin_edit(&plant);
    let result = manager.delete(&plant.id).await;

    assert!(matches!(result, Err(ManagerError::Load(_))));
    assert!(!manager.state().is_editing());
    assert_eq!(manager.state().plants.len(), 1);
    Ok(())
}
