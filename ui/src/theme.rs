use web_sys::window;
use yew::prelude::*;
use yewdux::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// The theme for this page session. Not persisted.
#[derive(Default, Clone, PartialEq, Store)]
pub struct ThemeState {
    pub theme: Theme,
}

pub fn get_system_theme() -> Theme {
    let prefers_dark = window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok())
        .flatten()
        .is_some_and(|mql| mql.matches());
    if prefers_dark { Theme::Dark } else { Theme::Light }
}

pub fn apply_theme_to_document(theme: Theme) {
    let Some(html) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    let classes = html.class_list();
    let _ = match theme {
        Theme::Dark => classes.add_1("dark"),
        Theme::Light => classes.remove_1("dark"),
    };
}

#[hook]
pub fn use_theme() -> (Theme, Callback<Theme>) {
    let (state, dispatch) = use_store::<ThemeState>();

    let setter = use_callback(
        dispatch.clone(),
        move |new_theme: Theme, dispatch: &Dispatch<ThemeState>| {
            apply_theme_to_document(new_theme);
            dispatch.reduce_mut(|state| state.theme = new_theme);
        },
    );

    (state.theme, setter)
}

#[function_component]
pub fn ThemeToggle() -> Html {
    let (theme, set_theme) = use_theme();

    // Start from the system preference on first render
    {
        let set_theme = set_theme.clone();
        use_effect_with((), move |_| {
            set_theme.emit(get_system_theme());
            || ()
        });
    }

    let toggle_theme = use_callback(
        (theme, set_theme.clone()),
        move |_: MouseEvent, (theme, set_theme)| {
            set_theme.emit(theme.toggled());
        },
    );

    let (icon, title) = match theme {
        Theme::Light => ("🌙", "ダークモードに切り替え"),
        Theme::Dark => ("☀️", "ライトモードに切り替え"),
    };

    html! {
        <button
            class="p-2 rounded-lg hover:bg-neutral-200 dark:hover:bg-neutral-700 transition-colors"
            onclick={toggle_theme}
            title={title}
            aria-label={title}
        >
            <span class="text-xl">{icon}</span>
        </button>
    }
}
