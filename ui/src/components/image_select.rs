use payloads::requests::ImageUpload;
use wasm_bindgen::prelude::*;
use web_sys::{Event, FileReader, HtmlInputElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Preview of the current selection, if any.
    pub preview_url: Option<String>,
    pub on_select: Callback<ImageUpload>,
    pub on_clear: Callback<()>,
    #[prop_or_default]
    pub disabled: bool,
}

/// File picker for a plant image. Reads the chosen file into memory and hands
/// it up; the preview shown is whatever the parent passes back.
#[function_component]
pub fn ImageSelect(props: &Props) -> Html {
    let file_input_ref = use_node_ref();

    // Forget the chosen file once the selection is dropped, e.g. after submit
    {
        let file_input_ref = file_input_ref.clone();
        use_effect_with(props.preview_url.is_none(), move |cleared| {
            if *cleared
                && let Some(input) = file_input_ref.cast::<HtmlInputElement>()
            {
                input.set_value("");
            }
            || ()
        });
    }

    let on_file_select = {
        let on_select = props.on_select.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(file) = input.files().and_then(|files| files.get(0))
            else {
                return;
            };

            let reader = match FileReader::new() {
                Ok(reader) => reader,
                Err(e) => {
                    tracing::error!("Could not create FileReader: {e:?}");
                    return;
                }
            };
            let reader_clone = reader.clone();
            let file_name = file.name();
            let mime_type = file.type_();
            let on_select = on_select.clone();

            let onload = Closure::wrap(Box::new(move |_: Event| {
                let Ok(result) = reader_clone.result() else {
                    tracing::error!("Could not read {file_name}");
                    return;
                };
                let data: Vec<u8> = js_sys::Uint8Array::new(&result).to_vec();
                on_select.emit(ImageUpload {
                    file_name: file_name.clone(),
                    mime_type: mime_type.clone(),
                    data,
                });
            }) as Box<dyn FnMut(_)>);

            reader.set_onload(Some(onload.as_ref().unchecked_ref()));
            if let Err(e) = reader.read_as_array_buffer(&file) {
                tracing::error!("Could not read image file: {e:?}");
            }
            onload.forget();
        })
    };

    let on_choose = {
        let file_input_ref = file_input_ref.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = file_input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };

    let on_clear = {
        let on_clear = props.on_clear.clone();
        Callback::from(move |_: MouseEvent| on_clear.emit(()))
    };

    html! {
        <div class="flex items-center space-x-4">
            <input
                ref={file_input_ref}
                type="file"
                accept="image/*"
                onchange={on_file_select}
                class="hidden"
                disabled={props.disabled}
            />
            <button
                type="button"
                onclick={on_choose}
                disabled={props.disabled}
                class="py-2 px-4 border border-neutral-300 dark:border-neutral-600
                       rounded-md shadow-sm text-sm font-medium
                       bg-white dark:bg-neutral-700
                       text-neutral-700 dark:text-neutral-200
                       hover:bg-neutral-50 dark:hover:bg-neutral-600
                       disabled:opacity-50"
            >
                {"画像を選択"}
            </button>
            {if let Some(preview_url) = &props.preview_url {
                html! {
                    <div class="flex items-center space-x-2">
                        <img
                            src={preview_url.clone()}
                            alt="プレビュー"
                            class="w-24 h-24 object-cover rounded-md"
                        />
                        <button
                            type="button"
                            onclick={on_clear}
                            disabled={props.disabled}
                            class="px-2 py-1 text-sm text-neutral-500
                                   hover:text-neutral-700
                                   dark:hover:text-neutral-300"
                            title="選択を解除"
                        >
                            {"×"}
                        </button>
                    </div>
                }
            } else {
                html! {}
            }}
        </div>
    }
}
