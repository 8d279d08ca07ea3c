use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::path;

mod api;
mod components;
mod store;

use api::ApiClient;
use components::flow_detail::FlowDetail;
use components::flows::Flows;
use store::FlowStore;

#[component]
pub fn App() -> impl IntoView {
    let config = LocalResource::new(api::load_runtime_config);

    view! {
        <Suspense fallback=|| view! { <p class="p-6 text-gray-500">"Cargando..."</p> }>
            {move || config.get().map(|config| view! { <Shell client=ApiClient::new(&config) /> })}
        </Suspense>
    }
}

#[component]
fn Shell(client: ApiClient) -> impl IntoView {
    let store = FlowStore::new(client);
    provide_context(store);
    store.load();

    view! {
        <Router>
            <div class="flex h-screen bg-gray-100">
                // Sidebar
                <div class="w-64 bg-gray-800 text-white p-4 flex flex-col">
                    <h1 class="text-2xl font-bold mb-8">"Flujos"</h1>
                    <nav class="space-y-1 flex-1">
                        <NavLink href="/" label="Flujos" />
                    </nav>
                    <div class="text-xs text-gray-500 mt-4">
                        "Editor de flujos conversacionales"
                    </div>
                </div>

                // Main Content
                <div class="flex-1 overflow-y-auto">
                    <Routes fallback=|| "Página no encontrada.">
                        <Route path=path!("/") view=Flows/>
                        <Route path=path!("/flujo/:id") view=FlowDetail/>
                    </Routes>
                </div>
            </div>
        </Router>
    }
}

#[component]
fn NavLink(href: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <A href=href attr:class="block p-2 hover:bg-gray-700 rounded transition-colors">
            {label}
        </A>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(App);
}
