use payloads::{Plant, PlantId};
use yew::prelude::*;

/// A plant and where to load its image from.
#[derive(Clone, PartialEq)]
pub struct PlantRow {
    pub plant: Plant,
    pub image_url: Option<String>,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub rows: Vec<PlantRow>,
    /// Show the image column.
    pub images: bool,
    #[prop_or_default]
    pub loading: bool,
    pub on_edit: Callback<Plant>,
    pub on_delete: Callback<PlantId>,
}

const HEADER_CLASS: &str = "px-6 py-3 text-left text-xs font-medium \
    text-neutral-500 dark:text-neutral-400 uppercase tracking-wider";
const CELL_CLASS: &str = "px-6 py-4 whitespace-nowrap";

#[function_component]
pub fn PlantTable(props: &Props) -> Html {
    let columns = if props.images { 6 } else { 5 };

    html! {
        <section class="bg-white dark:bg-neutral-800 rounded-lg shadow-lg p-6">
            <h2 class="text-2xl font-semibold mb-6">{"登録済み植物一覧"}</h2>
            <div class="overflow-x-auto">
                <table class="min-w-full divide-y divide-neutral-200 dark:divide-neutral-700">
                    <thead class="bg-neutral-50 dark:bg-neutral-900">
                        <tr>
                            if props.images {
                                <th class={HEADER_CLASS}>{"画像"}</th>
                            }
                            <th class={HEADER_CLASS}>{"植物名"}</th>
                            <th class={HEADER_CLASS}>{"品種"}</th>
                            <th class={HEADER_CLASS}>{"購入日"}</th>
                            <th class={HEADER_CLASS}>{"設置場所"}</th>
                            <th class={HEADER_CLASS}>{"操作"}</th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-neutral-200 dark:divide-neutral-700">
                        {if props.rows.is_empty() {
                            html! {
                                <tr>
                                    <td
                                        colspan={columns.to_string()}
                                        class="px-6 py-4 text-center text-neutral-500"
                                    >
                                        {if props.loading {
                                            "読み込み中..."
                                        } else {
                                            "登録された植物はありません"
                                        }}
                                    </td>
                                </tr>
                            }
                        } else {
                            props.rows.iter().map(|row| row_html(props, row)).collect::<Html>()
                        }}
                    </tbody>
                </table>
            </div>
        </section>
    }
}

fn row_html(props: &Props, row: &PlantRow) -> Html {
    let plant = &row.plant;
    let on_edit = {
        let on_edit = props.on_edit.clone();
        let plant = plant.clone();
        Callback::from(move |_: MouseEvent| on_edit.emit(plant.clone()))
    };
    let on_delete = {
        let on_delete = props.on_delete.clone();
        let id = plant.id.clone();
        Callback::from(move |_: MouseEvent| on_delete.emit(id.clone()))
    };
    let purchase_date = plant
        .purchase_date
        .map(|date| date.to_string())
        .unwrap_or_default();

    html! {
        <tr key={plant.id.to_string()} class="hover:bg-neutral-50 dark:hover:bg-neutral-700">
            if props.images {
                <td class={CELL_CLASS}>
                    {match &row.image_url {
                        Some(url) => html! {
                            <img
                                src={url.clone()}
                                alt={plant.name.clone()}
                                class="w-16 h-16 object-cover rounded-md"
                            />
                        },
                        None => html! {
                            <div class="w-16 h-16 bg-neutral-200 dark:bg-neutral-700 rounded-md" />
                        },
                    }}
                </td>
            }
            <td class={CELL_CLASS}>{&plant.name}</td>
            <td class={CELL_CLASS}>{&plant.species}</td>
            <td class={CELL_CLASS}>{purchase_date}</td>
            <td class={CELL_CLASS}>{plant.location_label()}</td>
            <td class={format!("{CELL_CLASS} space-x-4")}>
                <button
                    onclick={on_edit}
                    class="text-blue-600 hover:text-blue-900 dark:text-blue-400"
                >
                    {"編集"}
                </button>
                <button
                    onclick={on_delete}
                    class="text-red-600 hover:text-red-900 dark:text-red-400"
                >
                    {"削除"}
                </button>
            </td>
        </tr>
    }
}
