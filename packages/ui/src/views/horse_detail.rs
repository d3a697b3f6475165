use dioxus::prelude::*;
use model::{Horse, HorseId};

use super::{birth_date, ConfirmDialog};
use crate::components::{api_error_toast, use_toast, ToastOptions};
use crate::icons::{FaPen, FaSitemap, FaTrashCan};
use crate::loaders::HorseDetail;
use crate::{make_client, Icon};

/// Read-only view of one horse with links to its parents.
#[component]
pub fn HorseDetailView(
    /// Raw `:id` route segment.
    id: String,
    on_open: EventHandler<HorseId>,
    on_edit: EventHandler<HorseId>,
    on_family_tree: EventHandler<HorseId>,
    /// Called after the horse was deleted.
    on_deleted: EventHandler<()>,
    /// Called when the route segment is not a horse id.
    on_invalid: EventHandler<()>,
) -> Element {
    // Track the segment in a signal so use_resource re-runs on route param change
    let mut id_signal = use_signal(|| id.clone());
    if *id_signal.peek() != id {
        id_signal.set(id.clone());
    }

    let toast = use_toast();
    let mut detail = use_signal(HorseDetail::default);
    let mut confirming = use_signal(|| false);

    let _loader = use_resource(move || {
        let raw = id_signal();
        async move {
            // Nothing of the previous horse may stay visible or deletable.
            detail.set(HorseDetail::Loading);
            let loaded = HorseDetail::load(&make_client(), &raw).await;
            if loaded == HorseDetail::NotAnId {
                on_invalid.call(());
            }
            detail.set(loaded);
        }
    });

    let handle_delete = move |_: ()| {
        confirming.set(false);
        let target = detail.peek().horse().and_then(|h| h.id.map(|id| (id, h.name.clone())));
        let Some((id, name)) = target else {
            return;
        };
        spawn(async move {
            match make_client().delete_horse(id).await {
                Ok(()) => {
                    toast.success(format!("Horse {name} successfully deleted"), ToastOptions::new());
                    on_deleted.call(());
                }
                Err(e) => {
                    let (title, options) = api_error_toast("Could Not Delete Horse", &e);
                    toast.error(title, options);
                }
            }
        });
    };

    let current = match detail() {
        HorseDetail::Loaded(horse) => horse,
        HorseDetail::Failed(message) => {
            return rsx! {
                div {
                    class: "page horse-detail",
                    div { class: "banner error", "Could not load horse: {message}" }
                }
            };
        }
        HorseDetail::Loading | HorseDetail::NotAnId => {
            return rsx! {
                div { class: "page horse-detail", p { "Loading..." } }
            };
        }
    };

    let Some(current_id) = current.id else {
        return rsx! {};
    };
    let born = birth_date(current.date_of_birth);
    let description = current.description.clone().unwrap_or_default();
    let owner = current.owner_name();

    rsx! {
        div {
            class: "page horse-detail",
            div {
                class: "page-header",
                h1 { "{current.name}" }
                div {
                    class: "page-actions",
                    button {
                        class: "btn",
                        onclick: move |_| on_edit.call(current_id),
                        Icon { icon: FaPen, width: 12, height: 12 }
                        " Edit"
                    }
                    button {
                        class: "btn",
                        onclick: move |_| on_family_tree.call(current_id),
                        Icon { icon: FaSitemap, width: 12, height: 12 }
                        " Family tree"
                    }
                    button {
                        class: "btn btn-danger",
                        onclick: move |_| confirming.set(true),
                        Icon { icon: FaTrashCan, width: 12, height: 12 }
                        " Delete"
                    }
                }
            }

            dl {
                class: "details",
                dt { "Description" }
                dd { "{description}" }
                dt { "Date of birth" }
                dd { "{born}" }
                dt { "Sex" }
                dd { {current.sex.label()} }
                dt { "Owner" }
                dd { "{owner}" }
                dt { "Mother" }
                dd {
                    ParentLink { parent: current.mother.as_deref().cloned(), on_open }
                }
                dt { "Father" }
                dd {
                    ParentLink { parent: current.father.as_deref().cloned(), on_open }
                }
            }

            if confirming() {
                ConfirmDialog {
                    title: "Delete horse",
                    message: format!("Do you really want to delete {}?", current.name),
                    on_confirm: handle_delete,
                    on_cancel: move |_| confirming.set(false),
                }
            }
        }
    }
}

#[component]
fn ParentLink(parent: Option<Horse>, on_open: EventHandler<HorseId>) -> Element {
    match parent {
        Some(Horse { id: Some(id), name, .. }) => rsx! {
            a {
                href: "#",
                onclick: move |evt: Event<MouseData>| {
                    evt.prevent_default();
                    on_open.call(id);
                },
                "{name}"
            }
        },
        Some(parent) => rsx! { "{parent.name}" },
        None => rsx! { span { class: "muted", "unknown" } },
    }
}
