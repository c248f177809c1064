use payloads::{Location, requests::ImageUpload};
use plant_manager::{FormField, FormState, PendingImage};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::ImageSelect;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub form: FormState,
    pub editing: bool,
    pub pending_image: Option<PendingImage>,
    /// Show the image field.
    pub images: bool,
    #[prop_or_default]
    pub saving: bool,
    pub on_field: Callback<(FormField, String)>,
    pub on_submit: Callback<()>,
    pub on_cancel: Callback<()>,
    pub on_select_image: Callback<ImageUpload>,
    pub on_clear_image: Callback<()>,
}

const INPUT_CLASS: &str = "w-full px-3 py-2.5 border border-neutral-300 \
    dark:border-neutral-600 rounded-md bg-white dark:bg-neutral-700 \
    text-neutral-900 dark:text-neutral-100 focus:outline-none \
    focus:ring-2 focus:ring-green-500";

const LABEL_CLASS: &str =
    "block text-sm font-medium text-neutral-700 dark:text-neutral-300 mb-2";

#[function_component]
pub fn PlantForm(props: &Props) -> Html {
    let on_input = |field: FormField| {
        let on_field = props.on_field.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_field.emit((field, input.value()));
        })
    };

    let on_location_change = {
        let on_field = props.on_field.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_field.emit((FormField::Location, select.value()));
        })
    };

    let on_notes_input = {
        let on_field = props.on_field.clone();
        Callback::from(move |e: InputEvent| {
            let textarea: HtmlTextAreaElement = e.target_unchecked_into();
            on_field.emit((FormField::Notes, textarea.value()));
        })
    };

    let on_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    let form = &props.form;
    let (heading, submit_label) = if props.editing {
        ("植物データの編集", "更新する")
    } else {
        ("新規植物登録", "登録する")
    };

    html! {
        <section class="bg-white dark:bg-neutral-800 rounded-lg shadow-lg p-6 mb-8">
            <h2 class="text-2xl font-semibold mb-6">{heading}</h2>
            <form onsubmit={on_submit} class="space-y-6">
                <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                    <div>
                        <label for="plantName" class={LABEL_CLASS}>{"植物の名前"}</label>
                        <input
                            type="text"
                            id="plantName"
                            name={FormField::Name.name()}
                            value={form.name.clone()}
                            oninput={on_input(FormField::Name)}
                            class={INPUT_CLASS}
                            placeholder="モンステラ"
                            required=true
                        />
                    </div>
                    <div>
                        <label for="species" class={LABEL_CLASS}>{"品種"}</label>
                        <input
                            type="text"
                            id="species"
                            name={FormField::Species.name()}
                            value={form.species.clone()}
                            oninput={on_input(FormField::Species)}
                            class={INPUT_CLASS}
                            placeholder="デリシオサ"
                        />
                    </div>
                    <div>
                        <label for="purchaseDate" class={LABEL_CLASS}>{"購入日"}</label>
                        <input
                            type="date"
                            id="purchaseDate"
                            name={FormField::PurchaseDate.name()}
                            value={form.purchase_date.clone()}
                            oninput={on_input(FormField::PurchaseDate)}
                            class={INPUT_CLASS}
                            required=true
                        />
                    </div>
                    <div>
                        <label for="location" class={LABEL_CLASS}>{"設置場所"}</label>
                        <select
                            id="location"
                            name={FormField::Location.name()}
                            onchange={on_location_change}
                            class={INPUT_CLASS}
                            required=true
                        >
                            <option value="" selected={form.location.is_empty()}>
                                {"設置場所を選択"}
                            </option>
                            {for Location::ALL.iter().map(|location| html! {
                                <option
                                    key={location.code()}
                                    value={location.code()}
                                    selected={form.location == location.code()}
                                >
                                    {location.label()}
                                </option>
                            })}
                        </select>
                    </div>
                </div>

                <div>
                    <label for="notes" class={LABEL_CLASS}>{"メモ"}</label>
                    <textarea
                        id="notes"
                        name={FormField::Notes.name()}
                        value={form.notes.clone()}
                        oninput={on_notes_input}
                        rows="3"
                        class={INPUT_CLASS}
                        placeholder="水やりの頻度や特記事項など"
                    />
                </div>

                if props.images {
                    <div>
                        <span class={LABEL_CLASS}>{"画像"}</span>
                        <ImageSelect
                            preview_url={props.pending_image.as_ref()
                                .map(|image| image.preview_url.clone())}
                            on_select={props.on_select_image.clone()}
                            on_clear={props.on_clear_image.clone()}
                            disabled={props.saving}
                        />
                    </div>
                }

                <div class="flex justify-end space-x-4">
                    if props.editing {
                        <button
                            type="button"
                            onclick={on_cancel}
                            class="bg-neutral-500 text-white px-6 py-2 rounded-md
                                   hover:bg-neutral-600 transition-colors duration-200"
                        >
                            {"キャンセル"}
                        </button>
                    }
                    <button
                        type="submit"
                        disabled={props.saving}
                        class="bg-green-600 text-white px-6 py-2 rounded-md
                               hover:bg-green-700 transition-colors duration-200
                               disabled:opacity-50"
                    >
                        {submit_label}
                    </button>
                </div>
            </form>
        </section>
    }
}
