use yew::prelude::*;

use crate::{
    components::{PlantForm, PlantRow, PlantTable},
    get_backend,
    hooks::use_plant_manager,
    theme::ThemeToggle,
};

#[function_component]
pub fn PlantManagerPage() -> Html {
    let handle = use_plant_manager();
    let features = handle.features;

    {
        let refresh = handle.refresh.clone();
        use_effect_with((), move |_| {
            refresh.emit(());
            || ()
        });
    }

    let backend = use_memo((), |_| get_backend());
    let view = &handle.state.view;
    let rows: Vec<PlantRow> = view
        .plants
        .iter()
        .map(|plant| PlantRow {
            image_url: features.image_url(&*backend, plant),
            plant: plant.clone(),
        })
        .collect();

    html! {
        <main class="max-w-4xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
            <div class="flex items-center justify-between mb-8">
                <h1 class="text-3xl font-bold">{"観葉植物管理システム"}</h1>
                if features.theme_toggle {
                    <ThemeToggle />
                }
            </div>
            <PlantForm
                form={view.form.clone()}
                editing={view.is_editing()}
                pending_image={view.pending_image.clone()}
                images={features.images}
                saving={handle.state.is_saving}
                on_field={handle.set_field.clone()}
                on_submit={handle.submit.clone()}
                on_cancel={handle.cancel_edit.clone()}
                on_select_image={handle.select_image.clone()}
                on_clear_image={handle.clear_image.clone()}
            />
            <PlantTable
                rows={rows}
                images={features.images}
                loading={handle.state.is_loading}
                on_edit={handle.begin_edit.clone()}
                on_delete={handle.delete.clone()}
            />
        </main>
    }
}
