use leptos::prelude::*;

use flujos_core::{build_tree, node_at, NodeIcon, Step, StepType, TreeNode};

/// Read-only outline of a step tree. Every node owns its expanded flag and
/// starts collapsed; nodes are placed by position, so the flag stays with
/// the position across edits.
#[component]
pub fn TreeView(#[prop(into)] steps: Signal<Vec<Step>>) -> impl IntoView {
    let nodes = Memo::new(move |_| steps.with(|s| build_tree(s)));

    view! {
        <div class="bg-white rounded-lg shadow p-4 text-sm">
            <Show
                when=move || nodes.with(|n| !n.is_empty())
                fallback=|| view! { <p class="text-gray-500">"No hay pasos configurados"</p> }
            >
                <ul>
                    <For
                        each=move || 0..nodes.with(Vec::len)
                        key=|index| *index
                        children=move |index| view! { <TreeItem nodes=nodes at=vec![index] /> }
                    />
                </ul>
            </Show>
        </div>
    }
}

/// Fields of one node that its row displays
#[derive(Clone, PartialEq)]
struct Row {
    label: String,
    step_type: Option<StepType>,
    icon: NodeIcon,
    child_count: usize,
}

impl From<&TreeNode> for Row {
    fn from(node: &TreeNode) -> Self {
        Self {
            label: node.label.clone(),
            step_type: node.step_type,
            icon: node.icon,
            child_count: node.children.len(),
        }
    }
}

#[component]
fn TreeItem(nodes: Memo<Vec<TreeNode>>, at: Vec<usize>) -> impl IntoView {
    let open = RwSignal::new(false);
    let at = StoredValue::new(at);
    let row = Memo::new(move |_| {
        nodes.with(|n| at.with_value(|at| node_at(n, at).map(Row::from)))
    });
    let child_count = move || row.with(|r| r.as_ref().map_or(0, |r| r.child_count));
    let toggle = move |_| {
        if child_count() > 0 {
            open.update(|o| *o = !*o);
        }
    };

    view! {
        <li class="my-0.5">
            <div class="flex items-center gap-1 cursor-pointer hover:bg-gray-50 rounded px-1" on:click=toggle>
                <span class="w-4 text-gray-500">
                    {move || match row.with(|r| r.as_ref().map(|r| (r.icon, r.child_count))) {
                        Some((icon, 0)) => icon.glyph(),
                        _ if open.get() => "▾",
                        _ => "▸",
                    }}
                </span>
                <span>{move || row.with(|r| r.as_ref().map(|r| r.label.clone()).unwrap_or_default())}</span>
                {move || row.with(|r| r.as_ref().and_then(|r| r.step_type)).map(|t| view! {
                    <span class="ml-2 px-1.5 py-0.5 text-xs bg-blue-100 text-blue-700 rounded font-mono">
                        {t.as_str()}
                    </span>
                })}
            </div>
            <Show when=move || (open.get() && child_count() > 0)>
                <ul class="ml-4 border-l border-gray-200 pl-2">
                    <For
                        each=move || 0..child_count()
                        key=|index| *index
                        children=move |index| {
                            let child = at.with_value(|at| {
                                let mut child = at.clone();
                                child.push(index);
                                child
                            });
                            view! { <TreeItem nodes=nodes at=child /> }.into_any()
                        }
                    />
                </ul>
            </Show>
        </li>
    }
}
