//! Flow detail page: step builder, new-step draft and tree outline
//!
//! The whole tree is loaded once into an [`EditSession`], edited locally and
//! saved whole. Nothing reaches the server until "Guardar".

use leptos::prelude::*;
use leptos::web_sys;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use super::step_builder::StepBuilder;
use super::tree_view::TreeView;
use super::{confirm, ErrorBanner, LoadingState};
use crate::store::FlowStore;
use flujos_core::{reorder_steps, update_step, EditSession, Step, StoreError};

#[component]
pub fn FlowDetail() -> impl IntoView {
    let store = expect_context::<FlowStore>();
    let params = use_params_map();
    let flow_id = Memo::new(move |_| {
        params.with(|p| p.get("id").and_then(|id| id.parse::<i64>().ok()))
    });

    let session = RwSignal::new(EditSession::new(0, Vec::new()));
    // flow whose tree is in `session`; `None` until a load succeeds
    let loaded = RwSignal::new(Option::<i64>::None);
    let loading = RwSignal::new(true);
    let load_error = RwSignal::new(Option::<String>::None);
    let saving = RwSignal::new(false);
    let save_error = RwSignal::new(Option::<String>::None);
    let saved = RwSignal::new(false);
    let dragged = RwSignal::new(Option::<usize>::None);

    Effect::new(move |_| {
        loaded.set(None);
        let Some(id) = flow_id.get() else {
            load_error.set(Some("Flujo no válido".to_string()));
            loading.set(false);
            return;
        };

        loading.set(true);
        load_error.set(None);
        let client = store.client();
        wasm_bindgen_futures::spawn_local(async move {
            let result = client.get_steps(id).await;
            // the route moved on while this request was in flight
            if flow_id.get_untracked() != Some(id) {
                return;
            }
            match result {
                Ok(steps) => {
                    session.set(EditSession::new(id, steps));
                    loaded.set(Some(id));
                }
                Err(e) => {
                    log::warn!("Failed to fetch steps of flow {}: {}", id, e);
                    load_error.set(Some(StoreError::LoadSteps.to_string()));
                }
            }
            loading.set(false);
        });
    });

    let flow_name = move || {
        flow_id
            .get()
            .and_then(|id| store.find(id))
            .map(|flow| flow.name)
            .unwrap_or_else(|| "Flujo".to_string())
    };

    let on_save = move |_| {
        let snapshot = session.get_untracked();
        let Some(id) = save_target(loaded.get_untracked(), flow_id.get_untracked(), &snapshot) else {
            return;
        };
        if saving.get_untracked() {
            return;
        }

        saving.set(true);
        saved.set(false);
        save_error.set(None);
        let client = store.client();
        wasm_bindgen_futures::spawn_local(async move {
            match client.save_steps(id, snapshot.steps()).await {
                Ok(()) => {
                    session.update(|s| s.mark_saved_as(snapshot.steps().to_vec()));
                    saved.set(true);
                }
                Err(e) => {
                    log::warn!("Failed to save steps of flow {}: {}", id, e);
                    save_error.set(Some(StoreError::SaveSteps.to_string()));
                }
            }
            saving.set(false);
        });
    };

    let on_discard = move |_| {
        if confirm("¿Descartar los cambios sin guardar?") {
            session.update(|s| s.discard());
        }
    };

    let step_count = Memo::new(move |_| session.with(|s| s.steps().len()));
    let dirty = Memo::new(move |_| session.with(|s| s.is_dirty()));
    let draft = Signal::derive(move || session.with(|s| s.draft().clone()));
    let on_draft_change = Callback::new(move |next: Step| session.update(|s| s.set_draft(next)));
    let all_steps = Signal::derive(move || session.with(|s| s.steps().to_vec()));

    view! {
        <div class="p-6">
            <div class="flex justify-between items-center mb-6">
                <div>
                    <A href="/" attr:class="text-sm text-blue-600 hover:underline">"← Flujos"</A>
                    <h2 class="text-2xl font-bold">{flow_name}</h2>
                </div>
                <div class="flex items-center gap-3">
                    <button
                        class="px-4 py-2 text-gray-700 border border-gray-300 rounded hover:bg-gray-50 disabled:opacity-50"
                        disabled=move || loaded.get().is_none() || !dirty.get() || saving.get()
                        on:click=on_discard
                    >
                        "Descartar"
                    </button>
                    <button
                        class="px-4 py-2 bg-blue-500 text-white rounded hover:bg-blue-600 disabled:opacity-50"
                        disabled=move || loaded.get().is_none() || step_count.get() == 0 || saving.get()
                        on:click=on_save
                    >
                        {move || if saving.get() { "Guardando..." } else { "Guardar" }}
                    </button>
                </div>
            </div>

            {move || load_error.get().map(|message| view! { <ErrorBanner message=message /> })}
            {move || save_error.get().map(|message| view! { <ErrorBanner message=message /> })}
            <Show when=move || loaded.get().is_some() && dirty.get()>
                <div class="mb-4 p-3 bg-yellow-50 border border-yellow-200 rounded text-sm text-yellow-800">
                    "Tienes cambios sin guardar."
                </div>
            </Show>
            <Show when=move || saved.get() && !dirty.get()>
                <div class="mb-4 p-3 bg-green-50 border border-green-200 rounded text-sm text-green-800">
                    "Pasos guardados correctamente."
                </div>
            </Show>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <LoadingState label="Cargando pasos..." /> }
            >
                <Show when=move || loaded.get().is_some()>
                    <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                        <div class="lg:col-span-2 space-y-4">
                            <For
                                each=move || 0..step_count.get()
                                key=|index| *index
                                children=move |index| view! {
                                    <RootStep index=index session=session dragged=dragged />
                                }
                            />

                            <div class="border-2 border-dashed border-gray-300 rounded-lg p-4 space-y-3">
                                <h3 class="text-sm font-semibold text-gray-700">"Nuevo paso"</h3>
                                <StepBuilder step=draft on_change=on_draft_change />
                                <button
                                    class="px-3 py-1 text-sm bg-green-500 text-white rounded hover:bg-green-600"
                                    on:click=move |_| session.update(|s| s.add_step())
                                >
                                    "Agregar paso"
                                </button>
                            </div>
                        </div>

                        <div>
                            <h3 class="text-sm font-semibold text-gray-700 mb-2">"Vista de árbol"</h3>
                            <TreeView steps=all_steps />
                        </div>
                    </div>
                </Show>
            </Show>
        </div>
    }
}

/// Flow the session may be saved to: the session must hold a tree loaded
/// for the flow currently on screen, and an empty tree is never submitted
fn save_target(loaded: Option<i64>, route: Option<i64>, session: &EditSession) -> Option<i64> {
    let id = loaded?;
    (route == Some(id) && session.flow_id() == id && session.can_save()).then_some(id)
}

/// One root step with its drag handle and move buttons
#[component]
fn RootStep(
    index: usize,
    session: RwSignal<EditSession>,
    dragged: RwSignal<Option<usize>>,
) -> impl IntoView {
    let count = move || session.with(|s| s.steps().len());
    let step = Signal::derive(move || {
        session.with(|s| s.steps().get(index).cloned()).unwrap_or_default()
    });
    let on_change = Callback::new(move |next: Step| {
        session.update(|s| s.apply(|steps| update_step(steps, index, next)))
    });
    let on_delete = Callback::new(move |_: ()| {
        if confirm("¿Eliminar este paso?") {
            session.update(|s| s.delete_step(index));
        }
    });
    let move_to = move |to: usize| {
        session.update(|s| s.apply(|steps| reorder_steps(steps, index, to)))
    };

    view! {
        <div
            class=move || format!(
                "rounded-lg {}",
                if dragged.get() == Some(index) { "opacity-50" } else { "" }
            )
            on:dragover=move |ev: web_sys::DragEvent| ev.prevent_default()
            on:drop=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                if let Some(from) = dragged.get_untracked() {
                    if from != index {
                        session.update(|s| s.apply(|steps| reorder_steps(steps, from, index)));
                    }
                }
                dragged.set(None);
            }
        >
            <div class="flex items-center justify-between px-3 py-2 bg-gray-50 rounded-t-lg border border-b-0 border-gray-200">
                <div class="flex items-center gap-2">
                    <span
                        class="cursor-move text-gray-400 select-none"
                        title="Arrastrar para reordenar"
                        draggable="true"
                        on:dragstart=move |ev: web_sys::DragEvent| {
                            dragged.set(Some(index));
                            if let Some(transfer) = ev.data_transfer() {
                                let _ = transfer.set_data("text/plain", &index.to_string());
                            }
                        }
                        on:dragend=move |_| dragged.set(None)
                    >
                        "⠿"
                    </span>
                    <span class="flex items-center justify-center w-7 h-7 rounded-full bg-blue-500 text-white text-sm font-medium">
                        {index + 1}
                    </span>
                    <span class="text-xs text-gray-500 font-mono">
                        {move || step.with(|s| s.step_type().label())}
                    </span>
                </div>
                <div class="flex items-center gap-1">
                    <button
                        type="button"
                        class="p-1 text-gray-400 hover:text-gray-600 disabled:opacity-30 disabled:cursor-not-allowed"
                        disabled=move || index == 0
                        on:click=move |_| move_to(index.saturating_sub(1))
                    >
                        <svg class="w-4 h-4" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                            <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M5 15l7-7 7 7"/>
                        </svg>
                    </button>
                    <button
                        type="button"
                        class="p-1 text-gray-400 hover:text-gray-600 disabled:opacity-30 disabled:cursor-not-allowed"
                        disabled=move || index + 1 >= count()
                        on:click=move |_| move_to(index + 1)
                    >
                        <svg class="w-4 h-4" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                            <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M19 9l-7 7-7-7"/>
                        </svg>
                    </button>
                </div>
            </div>
            <StepBuilder step=step on_change=on_change on_delete=on_delete />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_target_requires_loaded_tree() {
        let mut session = EditSession::new(0, Vec::new());
        session.set_draft(Step::message("Hola"));
        session.add_step();
        assert_eq!(save_target(None, None, &session), None);
        assert_eq!(save_target(None, Some(7), &session), None);

        let mut session = EditSession::new(7, vec![Step::message("Hola")]);
        assert_eq!(save_target(Some(7), Some(7), &session), Some(7));
        assert_eq!(save_target(Some(7), Some(8), &session), None);

        session.delete_step(0);
        assert_eq!(save_target(Some(7), Some(7), &session), None);
    }
}
