//! Recursive step editor
//!
//! A [`StepBuilder`] never owns its step. It reads it through a derived
//! signal and reports every edit as a whole new `Step` through `on_change`;
//! the parent splices it back with the pure operations from `flujos_core`.
//! Nested continuations render nested builders the same way, so any depth
//! is editable.

use leptos::prelude::*;

use super::confirm;
use flujos_core::{InputKind, OptionField, Step, StepOption, StepType};

#[component]
pub fn StepBuilder(
    #[prop(into)] step: Signal<Step>,
    on_change: Callback<Step>,
    #[prop(optional)] on_delete: Option<Callback<()>>,
    #[prop(default = 0)] depth: usize,
) -> impl IntoView {
    let current = move || step.get_untracked();
    let frame = if depth > 0 {
        "border border-gray-200 border-l-4 border-l-blue-300 rounded-lg bg-white p-3 space-y-3"
    } else {
        "border border-gray-200 rounded-lg bg-white p-3 space-y-3"
    };

    view! {
        <div class=frame>
            <div class="flex items-start gap-2">
                <textarea
                    class="flex-1 px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500 text-sm"
                    rows="2"
                    placeholder="Mensaje"
                    prop:value=move || step.with(|s| s.message.clone())
                    on:input=move |ev| on_change.run(current().with_message(event_target_value(&ev)))
                ></textarea>
                {on_delete.map(|cb| view! {
                    <button
                        type="button"
                        class="p-1 text-red-400 hover:text-red-600"
                        title="Eliminar paso"
                        on:click=move |_| cb.run(())
                    >
                        <svg class="w-5 h-5" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                            <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M19 7l-.867 12.142A2 2 0 0116.138 21H7.862a2 2 0 01-1.995-1.858L5 7m5 4v6m4-6v6m1-10V4a1 1 0 00-1-1h-4a1 1 0 00-1 1v3M4 7h16"/>
                        </svg>
                    </button>
                })}
            </div>

            <div class="grid grid-cols-3 gap-2 items-center">
                <select
                    class="px-2 py-1 border border-gray-300 rounded-md text-sm"
                    prop:value=move || step.with(|s| s.step_type().as_str())
                    on:change=move |ev| {
                        if let Ok(step_type) = event_target_value(&ev).parse::<StepType>() {
                            on_change.run(current().with_type(step_type));
                        }
                    }
                >
                    {StepType::ALL.into_iter().map(|t| view! {
                        <option value=t.as_str()>{t.label()}</option>
                    }).collect::<Vec<_>>()}
                </select>
                <select
                    class="px-2 py-1 border border-gray-300 rounded-md text-sm"
                    prop:value=move || step.with(|s| s.input_kind.clone().unwrap_or_default().to_string())
                    on:change=move |ev| {
                        on_change.run(current().with_input_kind(InputKind::from(event_target_value(&ev))));
                    }
                >
                    {InputKind::ALL.into_iter().map(|k| view! {
                        <option value=k.to_string()>{k.to_string()}</option>
                    }).collect::<Vec<_>>()}
                    // stored kind outside the known set
                    {move || step.with(|s| s.input_kind.clone().filter(|k| !k.is_known())).map(|k| view! {
                        <option value=k.to_string()>{format!("{} (desconocido)", k)}</option>
                    })}
                </select>
                <label class="flex items-center gap-2 text-sm text-gray-700">
                    <input
                        type="checkbox"
                        prop:checked=move || step.with(Step::is_final)
                        on:change=move |ev| on_change.run(current().with_final(event_target_checked(&ev)))
                    />
                    "Fin del flujo"
                </label>
            </div>

            <Show when=move || step.with(|s| s.step_type().is_selection())>
                <OptionList step=step on_change=on_change depth=depth />
            </Show>
        </div>
    }
}

#[component]
fn OptionList(step: Signal<Step>, on_change: Callback<Step>, depth: usize) -> impl IntoView {
    let count = Memo::new(move |_| step.with(|s| s.options().len()));

    view! {
        <div class="space-y-2">
            <div class="flex justify-between items-center">
                <span class="text-sm font-medium text-gray-700">"Opciones"</span>
                <button
                    type="button"
                    class="px-2 py-1 text-xs bg-blue-500 text-white rounded hover:bg-blue-600"
                    on:click=move |_| on_change.run(step.get_untracked().add_option())
                >
                    "+ Agregar opción"
                </button>
            </div>
            <For
                each=move || 0..count.get()
                key=|index| *index
                children=move |index| view! {
                    <OptionEditor step=step index=index on_change=on_change depth=depth />
                }
            />
        </div>
    }
}

#[component]
fn OptionEditor(step: Signal<Step>, index: usize, on_change: Callback<Step>, depth: usize) -> impl IntoView {
    let current = move || step.get_untracked();
    let option = move || {
        step.with(|s| s.option(index).cloned())
            .unwrap_or_else(|| StepOption::at_position(index + 1))
    };
    let option_count = move || step.with(|s| s.options().len());
    let next_count = Memo::new(move |_| {
        step.with(|s| s.option(index).map(|o| o.next_steps.len()).unwrap_or(0))
    });

    view! {
        <div class="border border-gray-200 rounded p-2 bg-gray-50 space-y-2">
            <div class="flex items-center gap-2">
                <input
                    type="text"
                    class="w-16 px-2 py-1 border border-gray-300 rounded text-sm font-mono"
                    placeholder="Valor"
                    prop:value=move || option().value
                    on:input=move |ev| {
                        on_change.run(current().update_option(index, OptionField::Valor(event_target_value(&ev))))
                    }
                />
                <input
                    type="text"
                    class="flex-1 px-2 py-1 border border-gray-300 rounded text-sm"
                    placeholder="Texto de la opción"
                    prop:value=move || option().message
                    on:input=move |ev| {
                        on_change.run(current().update_option(index, OptionField::Mensaje(event_target_value(&ev))))
                    }
                />
                <button
                    type="button"
                    class="p-1 text-gray-400 hover:text-gray-600 disabled:opacity-30"
                    disabled=move || index == 0
                    on:click=move |_| on_change.run(current().reorder_options(index, index.saturating_sub(1)))
                >
                    "↑"
                </button>
                <button
                    type="button"
                    class="p-1 text-gray-400 hover:text-gray-600 disabled:opacity-30"
                    disabled=move || index + 1 >= option_count()
                    on:click=move |_| on_change.run(current().reorder_options(index, index + 1))
                >
                    "↓"
                </button>
                <button
                    type="button"
                    class="p-1 text-red-400 hover:text-red-600"
                    title="Eliminar opción"
                    on:click=move |_| {
                        if confirm("¿Eliminar esta opción y sus pasos?") {
                            on_change.run(current().delete_option(index));
                        }
                    }
                >
                    "✕"
                </button>
            </div>

            <div class="pl-4 space-y-2">
                <For
                    each=move || 0..next_count.get()
                    key=|child| *child
                    children=move |child| {
                        let child_step = Signal::derive(move || {
                            step.with(|s| s.next_step(index, child).cloned()).unwrap_or_default()
                        });
                        let on_child_change = Callback::new(move |next: Step| {
                            on_change.run(step.get_untracked().update_next_step(index, child, next))
                        });
                        let on_child_delete = Callback::new(move |_: ()| {
                            if confirm("¿Eliminar este paso?") {
                                on_change.run(step.get_untracked().delete_next_step(index, child));
                            }
                        });
                        view! {
                            <div class="flex items-start gap-1">
                                <div class="flex flex-col">
                                    <button
                                        type="button"
                                        class="text-xs text-gray-400 hover:text-gray-600 disabled:opacity-30"
                                        disabled=move || child == 0
                                        on:click=move |_| {
                                            on_change.run(current().reorder_next_steps(index, child, child.saturating_sub(1)))
                                        }
                                    >
                                        "↑"
                                    </button>
                                    <button
                                        type="button"
                                        class="text-xs text-gray-400 hover:text-gray-600 disabled:opacity-30"
                                        disabled=move || child + 1 >= next_count.get()
                                        on:click=move |_| {
                                            on_change.run(current().reorder_next_steps(index, child, child + 1))
                                        }
                                    >
                                        "↓"
                                    </button>
                                </div>
                                <div class="flex-1">
                                    <StepBuilder
                                        step=child_step
                                        on_change=on_child_change
                                        on_delete=on_child_delete
                                        depth=depth + 1
                                    />
                                </div>
                            </div>
                        }
                        .into_any()
                    }
                />
                <button
                    type="button"
                    class="px-2 py-1 text-xs border border-blue-300 text-blue-600 rounded hover:bg-blue-50"
                    on:click=move |_| on_change.run(current().add_next_step(index))
                >
                    "+ Agregar paso siguiente"
                </button>
            </div>
        </div>
    }
}
