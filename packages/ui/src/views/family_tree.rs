//! Ancestor tree of one horse.
//!
//! The route carries the horse id and an optional `generations` limit. The
//! tree is fetched whenever either changes, and again after a horse in it was
//! deleted. When a reload fails the previously shown tree stays on screen.

use dioxus::prelude::*;
use model::{Ancestor, GenerationLimit, HorseId, Sex};

use super::{birth_date, ConfirmDialog};
use crate::components::{api_error_toast, use_toast, ToastOptions};
use crate::icons::{FaEye, FaPen, FaTrashCan};
use crate::loaders::FamilyTreeState;
use crate::{client_config, make_client, Icon};

#[component]
pub fn FamilyTreeView(
    /// Raw `:id` route segment.
    id: String,
    /// Raw `generations` query value, empty when absent.
    generations: String,
    /// Called with a new limit; the platform puts it into the route.
    on_generations_change: EventHandler<u32>,
    on_open: EventHandler<HorseId>,
    on_edit: EventHandler<HorseId>,
) -> Element {
    let limit = GenerationLimit::from_query(
        Some(generations.as_str()),
        client_config().family_tree.default_generations,
    );

    let route = (id.clone(), limit);
    let mut route_signal = use_signal(|| route.clone());
    let mut limit_input = use_signal(|| limit.to_string());
    if *route_signal.peek() != route {
        route_signal.set(route.clone());
        limit_input.set(limit.to_string());
    }

    let toast = use_toast();
    let mut state = use_signal(FamilyTreeState::default);
    let mut refresh = use_signal(|| 0u32);
    let mut delete_candidate = use_signal(|| Option::<(HorseId, String)>::None);

    let _loader = use_resource(move || {
        let (raw_id, limit) = route_signal();
        let _ = refresh();
        async move {
            let previous = state.peek().clone();
            let next = previous.reload(&make_client(), &raw_id, limit).await;
            state.set(next);
        }
    });

    let apply_limit = move |evt: FormEvent| {
        evt.prevent_default();
        let raw = limit_input();
        match raw.trim().parse::<u32>().ok().filter(|n| *n > 0) {
            Some(n) if n == route_signal.peek().1.get() => refresh += 1,
            Some(n) => on_generations_change.call(n),
            None => toast.error(
                "Invalid Generations".to_string(),
                ToastOptions::new().description("Generations must be a positive number".to_string()),
            ),
        }
    };

    let mut confirm_delete = move || {
        let candidate = delete_candidate.peek().clone();
        delete_candidate.set(None);
        let Some((id, _)) = candidate else {
            return;
        };
        spawn(async move {
            match make_client().delete_horse(id).await {
                Ok(()) => {
                    toast.success("Horse successfully deleted".to_string(), ToastOptions::new());
                    refresh += 1;
                }
                Err(e) => {
                    let (title, options) = api_error_toast("Could Not Delete Horse", &e);
                    toast.error(title, options);
                }
            }
        });
    };

    let ancestry = state.read().ancestry();
    let settled = state.read().is_settled();

    rsx! {
        div {
            class: "page family-tree",
            div {
                class: "page-header",
                h1 { "Family tree" }
                form {
                    class: "generations-form",
                    onsubmit: apply_limit,
                    label { r#for: "generations", "Generations" }
                    input {
                        id: "generations",
                        r#type: "number",
                        min: "1",
                        value: "{limit_input}",
                        oninput: move |evt: FormEvent| limit_input.set(evt.value()),
                    }
                    button { r#type: "submit", class: "btn", "Show" }
                }
            }

            match ancestry {
                Some(root) => rsx! {
                    ul {
                        class: "tree",
                        AncestorNode {
                            ancestor: root,
                            on_open,
                            on_edit,
                            on_delete: move |target| delete_candidate.set(Some(target)),
                        }
                    }
                },
                None if settled => rsx! { p { class: "empty", "No family tree to show." } },
                None => rsx! { p { "Loading..." } },
            }

            if let Some((_, name)) = delete_candidate() {
                ConfirmDialog {
                    title: "Delete horse",
                    message: format!("Do you really want to delete {name}?"),
                    on_confirm: move |_| confirm_delete(),
                    on_cancel: move |_| delete_candidate.set(None),
                }
            }
        }
    }
}

/// One horse in the tree with its parents nested below. Branches can be
/// collapsed.
#[component]
fn AncestorNode(
    ancestor: Ancestor,
    on_open: EventHandler<HorseId>,
    on_edit: EventHandler<HorseId>,
    on_delete: EventHandler<(HorseId, String)>,
) -> Element {
    let mut expanded = use_signal(|| true);
    let horse = ancestor.horse.clone();
    let Some(id) = horse.id else {
        return rsx! {};
    };
    let has_parents = ancestor.mother.is_some() || ancestor.father.is_some();
    let born = birth_date(horse.date_of_birth);
    let name = horse.name.clone();
    let sex_class = match horse.sex {
        Sex::Female => "tree-card female",
        Sex::Male => "tree-card male",
    };

    rsx! {
        li {
            div {
                class: sex_class,
                if has_parents {
                    button {
                        class: "tree-toggle",
                        title: if expanded() { "Collapse" } else { "Expand" },
                        onclick: move |_| expanded.toggle(),
                        if expanded() { "−" } else { "+" }
                    }
                }
                a {
                    class: "tree-name",
                    href: "#",
                    onclick: move |evt: Event<MouseData>| {
                        evt.prevent_default();
                        on_open.call(id);
                    },
                    "{horse.name}"
                }
                span { class: "tree-born", "{born}" }
                div {
                    class: "tree-actions",
                    button {
                        class: "btn btn-icon",
                        title: "Show details",
                        onclick: move |_| on_open.call(id),
                        Icon { icon: FaEye, width: 12, height: 12 }
                    }
                    button {
                        class: "btn btn-icon",
                        title: "Edit",
                        onclick: move |_| on_edit.call(id),
                        Icon { icon: FaPen, width: 12, height: 12 }
                    }
                    button {
                        class: "btn btn-icon btn-danger",
                        title: "Delete",
                        onclick: move |_| on_delete.call((id, name.clone())),
                        Icon { icon: FaTrashCan, width: 12, height: 12 }
                    }
                }
            }
            if has_parents && expanded() {
                ul {
                    if let Some(mother) = ancestor.mother.as_deref() {
                        AncestorNode {
                            ancestor: mother.clone(),
                            on_open,
                            on_edit,
                            on_delete,
                        }
                    }
                    if let Some(father) = ancestor.father.as_deref() {
                        AncestorNode {
                            ancestor: father.clone(),
                            on_open,
                            on_edit,
                            on_delete,
                        }
                    }
                }
            }
        }
    }
}
