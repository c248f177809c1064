use plant_manager::{Backend, DEFAULT_API_ADDRESS, Features, TimeSource};
use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod contexts;
mod hooks;
pub mod logs;
mod pages;
mod state;
mod theme;

pub use state::State;

use contexts::toast::ToastProvider;

// Plant API address, set at build time
pub fn get_api_address() -> &'static str {
    option_env!("BACKEND_URL").unwrap_or(DEFAULT_API_ADDRESS)
}

/// Which variant of the view this build serves, from `PLANT_PROFILE`.
pub fn get_features() -> Features {
    let profile = option_env!("PLANT_PROFILE").unwrap_or_default();
    profile.parse().unwrap_or_else(|e| {
        tracing::error!("{e}, falling back to the full profile");
        Features::default()
    })
}

thread_local! {
    // Clones share the local plant list, so keep one for the page lifetime
    static BACKEND: Backend = Backend::from_features(
        get_features(),
        get_api_address(),
        TimeSource::new(),
    );
}

pub fn get_backend() -> Backend {
    BACKEND.with(Backend::clone)
}

#[function_component]
pub fn App() -> Html {
    html! {
        <ToastProvider>
            <BrowserRouter>
                <div class="min-h-screen bg-neutral-50 dark:bg-neutral-900 text-neutral-900 dark:text-neutral-100 transition-colors">
                    <Switch<Route> render={switch} />
                    <components::ToastContainer />
                </div>
            </BrowserRouter>
        </ToastProvider>
    }
}

#[derive(Clone, Routable, PartialEq)]
enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <pages::PlantManagerPage /> },
        Route::NotFound => html! {
            <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <div class="text-center">
                    <h1 class="text-4xl font-bold text-neutral-900 dark:text-white">{"404"}</h1>
                    <p class="text-neutral-600 dark:text-neutral-300">{"ページが見つかりません"}</p>
                </div>
            </main>
        },
    }
}
