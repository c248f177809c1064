use payloads::{Plant, PlantId, requests::ImageUpload};
use plant_manager::{
    Backend, Features, FormField, ManagerError, PlantManager, TimeSource,
    ViewState,
};
use std::rc::Rc;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::{State, contexts::toast::use_toast, get_backend, get_features};

/// A controller resumed from a snapshot of the stored view.
fn manager(view: ViewState) -> PlantManager<Backend> {
    PlantManager::with_state(
        get_backend(),
        get_features(),
        TimeSource::new(),
        view,
    )
}

/// Run a synchronous operation against the current view and store the result.
fn apply<R>(
    dispatch: &Dispatch<State>,
    op: impl FnOnce(&mut PlantManager<Backend>) -> R,
) -> R {
    let mut manager = manager(dispatch.get().view.clone());
    let result = op(&mut manager);
    let view = manager.into_state();
    dispatch.reduce_mut(|state| state.view = view);
    result
}

/// Plant manager state plus the operations the view can trigger.
///
/// Requests are not cancelled or ordered: whichever finishes last writes the
/// list it saw.
#[derive(Clone, PartialEq)]
pub struct PlantManagerHandle {
    pub state: Rc<State>,
    pub features: Features,
    pub refresh: Callback<()>,
    pub submit: Callback<()>,
    pub delete: Callback<PlantId>,
    pub begin_edit: Callback<Plant>,
    pub cancel_edit: Callback<()>,
    pub set_field: Callback<(FormField, String)>,
    pub select_image: Callback<ImageUpload>,
    pub clear_image: Callback<()>,
}

#[hook]
pub fn use_plant_manager() -> PlantManagerHandle {
    let (state, dispatch) = use_store::<State>();
    let toast = use_toast();

    let refresh = {
        let dispatch = dispatch.clone();
        let toast = toast.clone();
        Callback::from(move |()| {
            let dispatch = dispatch.clone();
            let toast = toast.clone();
            let view = dispatch.get().view.clone();
            dispatch.reduce_mut(|state| state.is_loading = true);

            yew::platform::spawn_local(async move {
                let mut manager = manager(view);
                let result = manager.load_plants().await.map(|_| ());
                let plants = manager.into_state().plants;
                dispatch.reduce_mut(|state| {
                    state.is_loading = false;
                    state.view.plants = plants;
                });
                if let Err(e) = result {
                    toast.error(e.to_string());
                }
            });
        })
    };

    let submit = {
        let dispatch = dispatch.clone();
        let toast = toast.clone();
        Callback::from(move |()| {
            let dispatch = dispatch.clone();
            let toast = toast.clone();
            let view = dispatch.get().view.clone();
            let editing = view.is_editing();
            dispatch.reduce_mut(|state| state.is_saving = true);

            yew::platform::spawn_local(async move {
                let mut manager = manager(view);
                let result = manager.submit().await;
                // On these errors nothing was saved and the form stays as typed
                let unsaved = matches!(
                    result,
                    Err(ManagerError::Invalid(_) | ManagerError::Save(_))
                );
                let view = manager.into_state();
                dispatch.reduce_mut(|state| {
                    state.is_saving = false;
                    if !unsaved {
                        state.view = view;
                    }
                });

                match result {
                    Ok(plant) if editing => {
                        toast.success(format!("「{}」を更新しました", plant.name))
                    }
                    Ok(plant) => {
                        toast.success(format!("「{}」を登録しました", plant.name))
                    }
                    Err(e) => toast.error(e.to_string()),
                }
            });
        })
    };

    let delete = {
        let dispatch = dispatch.clone();
        let toast = toast.clone();
        Callback::from(move |id: PlantId| {
            let dispatch = dispatch.clone();
            let toast = toast.clone();
            let view = dispatch.get().view.clone();

            yew::platform::spawn_local(async move {
                let mut manager = manager(view);
                let result = manager.delete(&id).await;
                let plants = manager.into_state().plants;
                dispatch.reduce_mut(|state| state.view.plants = plants);

                // A failed reload still means the plant is gone
                let deleted = !matches!(result, Err(ManagerError::Delete(_)));
                if deleted {
                    // The form may have moved on while the request ran
                    apply(&dispatch, |manager| {
                        if manager.state().editing_id.as_ref() == Some(&id) {
                            manager.cancel_edit();
                        }
                    });
                }

                match result {
                    Ok(()) => toast.success("植物を削除しました"),
                    Err(e) => toast.error(e.to_string()),
                }
            });
        })
    };

    let begin_edit = {
        let dispatch = dispatch.clone();
        Callback::from(move |plant: Plant| {
            apply(&dispatch, |manager| manager.begin_edit(&plant));
        })
    };

    let cancel_edit = {
        let dispatch = dispatch.clone();
        Callback::from(move |()| apply(&dispatch, PlantManager::cancel_edit))
    };

    let set_field = {
        let dispatch = dispatch.clone();
        Callback::from(move |(field, value): (FormField, String)| {
            apply(&dispatch, |manager| manager.set_field(field, value));
        })
    };

    let select_image = {
        let dispatch = dispatch.clone();
        let toast = toast.clone();
        Callback::from(move |upload: ImageUpload| {
            let result = apply(&dispatch, |manager| {
                manager.select_image(upload).map(|_| ())
            });
            if let Err(e) = result {
                toast.error(e.to_string());
            }
        })
    };

    let clear_image = {
        let dispatch = dispatch.clone();
        Callback::from(move |()| apply(&dispatch, PlantManager::clear_image))
    };

    PlantManagerHandle {
        state,
        features: get_features(),
        refresh,
        submit,
        delete,
        begin_edit,
        cancel_edit,
        set_field,
        select_image,
        clear_image,
    }
}
