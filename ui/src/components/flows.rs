use leptos::prelude::*;
use leptos_router::components::A;

use super::{ErrorBanner, LoadingState};
use crate::store::FlowStore;
use flujos_core::{Flow, FlowDraft};

#[derive(Clone, PartialEq)]
enum FormMode {
    Create,
    Edit(Flow),
}

#[component]
pub fn Flows() -> impl IntoView {
    let store = expect_context::<FlowStore>();
    let form = RwSignal::new(Option::<FormMode>::None);
    let delete_target = RwSignal::new(Option::<Flow>::None);
    let deleting = RwSignal::new(false);
    let delete_error = RwSignal::new(Option::<String>::None);

    let on_delete_confirm = move |_| {
        if let Some(flow) = delete_target.get_untracked() {
            deleting.set(true);
            delete_error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match store.delete(flow.id).await {
                    Ok(()) => delete_target.set(None),
                    Err(e) => delete_error.set(Some(e)),
                }
                deleting.set(false);
            });
        }
    };

    view! {
        <div class="p-6">
            <div class="flex justify-between items-center mb-6">
                <h2 class="text-2xl font-bold">"Flujos"</h2>
                <button
                    class="bg-green-500 hover:bg-green-600 text-white px-4 py-2 rounded flex items-center gap-2"
                    on:click=move |_| form.set(Some(FormMode::Create))
                >
                    <svg class="w-4 h-4" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M12 4v16m8-8H4"/>
                    </svg>
                    "Nuevo flujo"
                </button>
            </div>

            {move || store.error.get().map(|message| view! { <ErrorBanner message=message /> })}

            {move || form.get().map(|mode| view! {
                <FlowForm mode=mode on_close=Callback::new(move |_| form.set(None)) />
            })}

            // Delete confirmation modal
            {move || delete_target.get().map(|flow| view! {
                <div class="fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-50">
                    <div class="bg-white rounded-lg shadow-xl p-6 max-w-md w-full mx-4">
                        <h3 class="text-lg font-semibold text-gray-900 mb-2">"¿Eliminar flujo?"</h3>
                        <p class="text-gray-600 mb-4">
                            "Se eliminará "
                            <span class="font-semibold">{flow.name.clone()}</span>
                            " junto con todos sus pasos. Esta acción no se puede deshacer."
                        </p>
                        {move || delete_error.get().map(|message| view! { <ErrorBanner message=message /> })}
                        <div class="flex justify-end gap-3">
                            <button
                                class="px-4 py-2 text-gray-700 border border-gray-300 rounded hover:bg-gray-50"
                                on:click=move |_| {
                                    delete_target.set(None);
                                    delete_error.set(None);
                                }
                                disabled=move || deleting.get()
                            >
                                "Cancelar"
                            </button>
                            <button
                                class="px-4 py-2 bg-red-500 text-white rounded hover:bg-red-600 disabled:opacity-50"
                                on:click=on_delete_confirm
                                disabled=move || deleting.get()
                            >
                                {move || if deleting.get() { "Eliminando..." } else { "Eliminar" }}
                            </button>
                        </div>
                    </div>
                </div>
            })}

            <Show
                when=move || !store.is_loading.get()
                fallback=|| view! { <LoadingState label="Cargando flujos..." /> }
            >
                <Show
                    when=move || store.flows.with(|f| !f.is_empty())
                    fallback=|| view! { <EmptyState /> }
                >
                    <div class="bg-white rounded-lg shadow overflow-hidden">
                        <table class="min-w-full divide-y divide-gray-200">
                            <thead class="bg-gray-50">
                                <tr>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Nombre"</th>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Estado"</th>
                                    <th class="px-6 py-3 text-right text-xs font-medium text-gray-500 uppercase">"Acciones"</th>
                                </tr>
                            </thead>
                            <tbody class="divide-y divide-gray-200">
                                <For
                                    each=move || store.flows.get()
                                    key=|flow| (flow.id, flow.name.clone(), flow.active)
                                    children=move |flow| view! {
                                        <FlowRow flow=flow form=form delete_target=delete_target />
                                    }
                                />
                            </tbody>
                        </table>
                    </div>
                </Show>
            </Show>
        </div>
    }
}

#[component]
fn FlowRow(
    flow: Flow,
    form: RwSignal<Option<FormMode>>,
    delete_target: RwSignal<Option<Flow>>,
) -> impl IntoView {
    let href = format!("/flujo/{}", flow.id);
    let (badge_class, badge_label) = if flow.active {
        ("bg-green-100 text-green-800", "Activo")
    } else {
        ("bg-gray-100 text-gray-600", "Inactivo")
    };
    let for_edit = flow.clone();
    let for_delete = flow.clone();

    view! {
        <tr class="hover:bg-gray-50">
            <td class="px-6 py-4">
                <A href=href attr:class="text-blue-600 hover:underline font-medium">{flow.name}</A>
            </td>
            <td class="px-6 py-4">
                <span class=format!("px-2 py-1 text-xs rounded-full {}", badge_class)>{badge_label}</span>
            </td>
            <td class="px-6 py-4 text-right space-x-3">
                <button
                    class="text-blue-600 hover:text-blue-800 text-sm"
                    on:click=move |_| form.set(Some(FormMode::Edit(for_edit.clone())))
                >
                    "Editar"
                </button>
                <button
                    class="text-red-600 hover:text-red-800 text-sm"
                    on:click=move |_| delete_target.set(Some(for_delete.clone()))
                >
                    "Eliminar"
                </button>
            </td>
        </tr>
    }
}

#[component]
fn FlowForm(mode: FormMode, on_close: Callback<()>) -> impl IntoView {
    let store = expect_context::<FlowStore>();
    let (initial, editing_id) = match &mode {
        FormMode::Create => (FlowDraft::default(), None),
        FormMode::Edit(flow) => (FlowDraft::from(flow), Some(flow.id)),
    };

    let name = RwSignal::new(initial.name);
    let active = RwSignal::new(initial.active);
    let busy = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let draft = FlowDraft::new(name.get_untracked().trim(), active.get_untracked());
        if draft.name.is_empty() {
            error.set(Some("El nombre es obligatorio".to_string()));
            return;
        }

        busy.set(true);
        error.set(None);
        wasm_bindgen_futures::spawn_local(async move {
            let result = match editing_id {
                Some(id) => store.update(id, draft).await,
                None => store.create(draft).await,
            };
            busy.set(false);
            match result {
                Ok(()) => on_close.run(()),
                Err(e) => error.set(Some(e)),
            }
        });
    };

    view! {
        <div class="fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-50">
            <form class="bg-white rounded-lg shadow-xl p-6 max-w-md w-full mx-4 space-y-4" on:submit=on_submit>
                <h3 class="text-lg font-semibold text-gray-900">
                    {if editing_id.is_some() { "Editar flujo" } else { "Nuevo flujo" }}
                </h3>
                {move || error.get().map(|message| view! { <ErrorBanner message=message /> })}
                <div>
                    <label class="block text-sm font-medium text-gray-700 mb-1">"Nombre"</label>
                    <input
                        type="text"
                        class="w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                </div>
                <label class="flex items-center gap-2 text-sm text-gray-700">
                    <input
                        type="checkbox"
                        prop:checked=move || active.get()
                        on:change=move |ev| active.set(event_target_checked(&ev))
                    />
                    "Activo"
                </label>
                <div class="flex justify-end gap-3">
                    <button
                        type="button"
                        class="px-4 py-2 text-gray-700 border border-gray-300 rounded hover:bg-gray-50"
                        on:click=move |_| on_close.run(())
                        disabled=move || busy.get()
                    >
                        "Cancelar"
                    </button>
                    <button
                        type="submit"
                        class="px-4 py-2 bg-blue-500 text-white rounded hover:bg-blue-600 disabled:opacity-50"
                        disabled=move || busy.get()
                    >
                        {move || if busy.get() { "Guardando..." } else { "Guardar" }}
                    </button>
                </div>
            </form>
        </div>
    }
}

#[component]
fn EmptyState() -> impl IntoView {
    view! {
        <div class="text-center py-12 bg-white rounded-lg shadow">
            <h3 class="mt-2 text-sm font-medium text-gray-900">"No hay flujos"</h3>
            <p class="mt-1 text-sm text-gray-500">"Crea el primero con \"Nuevo flujo\"."</p>
        </div>
    }
}
