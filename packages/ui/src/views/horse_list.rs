use std::time::Duration;

use api::{ApiError, ApiResult};
use dioxus::prelude::*;
use model::{Horse, HorseId, HorseSearch, Sex};

use super::{birth_date, ConfirmDialog};
use crate::icons::{FaEye, FaPen, FaPlus, FaSitemap, FaTrashCan, FaXmark};
use crate::components::{api_error_toast, use_toast, ToastOptions};
use crate::loaders::{search_after_pause, Debouncer};
use crate::{client_config, make_client, Icon};

/// Horse list with search and per-row actions.
///
/// The list is loaded on mount. Every edit of a search field schedules a
/// search after the configured debounce delay; an edit made before the delay
/// runs out supersedes the pending one.
#[component]
pub fn HorseListView(
    on_create: EventHandler<()>,
    on_open: EventHandler<HorseId>,
    on_edit: EventHandler<HorseId>,
    on_family_tree: EventHandler<HorseId>,
) -> Element {
    let toast = use_toast();
    let horses = use_signal(Vec::<Horse>::new);
    let banner = use_signal(|| Option::<String>::None);

    let mut name = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut born_before = use_signal(String::new);
    let mut sex = use_signal(String::new);
    let mut owner_name = use_signal(String::new);
    let debouncer =
        use_signal(|| Debouncer::new(Duration::from_millis(client_config().search.debounce_ms)));

    let mut delete_candidate = use_signal(|| Option::<Horse>::None);

    let report = move |e: &ApiError| {
        let (title, options) = api_error_toast("Could Not Fetch Horses", e);
        toast.error(title, options);
    };

    let _loader = use_resource(move || async move {
        let result = make_client().list_horses().await;
        show_horses(result, horses, banner, report);
    });

    let current_search = move || {
        HorseSearch::from_input(&name(), &description(), &born_before(), &sex(), &owner_name())
    };

    let schedule_search = move |search: HorseSearch| {
        let debouncer = debouncer.peek().clone();
        spawn(async move {
            if let Some(result) = search_after_pause(&debouncer, &make_client(), search).await {
                show_horses(result, horses, banner, report);
            }
        });
    };

    let mut confirm_delete = move || {
        let candidate = delete_candidate.peek().clone();
        delete_candidate.set(None);
        let Some(id) = candidate.and_then(|horse| horse.id) else {
            return;
        };
        spawn(async move {
            match make_client().delete_horse(id).await {
                Ok(()) => {
                    toast.success("Horse successfully deleted".to_string(), ToastOptions::new());
                    let result = make_client().list_horses().await;
                    show_horses(result, horses, banner, report);
                }
                Err(e) => {
                    let (title, options) = api_error_toast("Could Not Delete Horse", &e);
                    toast.error(title, options);
                }
            }
        });
    };

    rsx! {
        div {
            class: "page horse-list",
            div {
                class: "page-header",
                h1 { "Horses" }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| on_create.call(()),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    " Create horse"
                }
            }

            if let Some(message) = banner() {
                div { class: "banner error", "{message}" }
            }

            form {
                class: "search-form",
                onsubmit: move |evt: FormEvent| evt.prevent_default(),
                input {
                    r#type: "text",
                    placeholder: "Name",
                    value: "{name}",
                    oninput: move |evt: FormEvent| {
                        name.set(evt.value());
                        schedule_search(current_search());
                    },
                }
                input {
                    r#type: "text",
                    placeholder: "Description",
                    value: "{description}",
                    oninput: move |evt: FormEvent| {
                        description.set(evt.value());
                        schedule_search(current_search());
                    },
                }
                input {
                    r#type: "date",
                    title: "Born before",
                    value: "{born_before}",
                    oninput: move |evt: FormEvent| {
                        born_before.set(evt.value());
                        schedule_search(current_search());
                    },
                }
                div {
                    class: "sex-filter",
                    select {
                        value: "{sex}",
                        onchange: move |evt: FormEvent| {
                            sex.set(evt.value());
                            schedule_search(current_search());
                        },
                        option { value: "", "Any sex" }
                        option { value: Sex::Female.as_str(), {Sex::Female.label()} }
                        option { value: Sex::Male.as_str(), {Sex::Male.label()} }
                    }
                    if !sex().is_empty() {
                        button {
                            r#type: "button",
                            class: "btn btn-icon",
                            title: "Clear sex filter",
                            onclick: move |_| {
                                sex.set(String::new());
                                schedule_search(current_search().without_sex());
                            },
                            Icon { icon: FaXmark, width: 10, height: 10 }
                        }
                    }
                }
                input {
                    r#type: "text",
                    placeholder: "Owner",
                    value: "{owner_name}",
                    oninput: move |evt: FormEvent| {
                        owner_name.set(evt.value());
                        schedule_search(current_search());
                    },
                }
            }

            table {
                class: "table",
                thead {
                    tr {
                        th { "Name" }
                        th { "Description" }
                        th { "Date of birth" }
                        th { "Sex" }
                        th { "Owner" }
                        th { class: "actions", "" }
                    }
                }
                tbody {
                    for horse in horses() {
                        HorseRow {
                            key: "{horse.id:?}",
                            horse: horse.clone(),
                            on_open,
                            on_edit,
                            on_family_tree,
                            on_delete: move |horse| delete_candidate.set(Some(horse)),
                        }
                    }
                }
            }

            if horses().is_empty() && banner().is_none() {
                p { class: "empty", "No horses found." }
            }

            if let Some(horse) = delete_candidate() {
                ConfirmDialog {
                    title: "Delete horse",
                    message: format!("Do you really want to delete {}?", horse.name),
                    on_confirm: move |_| confirm_delete(),
                    on_cancel: move |_| delete_candidate.set(None),
                }
            }
        }
    }
}

#[component]
fn HorseRow(
    horse: Horse,
    on_open: EventHandler<HorseId>,
    on_edit: EventHandler<HorseId>,
    on_family_tree: EventHandler<HorseId>,
    on_delete: EventHandler<Horse>,
) -> Element {
    let Some(id) = horse.id else {
        return rsx! {};
    };
    let born = birth_date(horse.date_of_birth);
    let owner = horse.owner_name();
    let description = horse.description.clone().unwrap_or_default();
    let to_delete = horse.clone();

    rsx! {
        tr {
            td {
                a {
                    href: "#",
                    onclick: move |evt: Event<MouseData>| {
                        evt.prevent_default();
                        on_open.call(id);
                    },
                    "{horse.name}"
                }
            }
            td { "{description}" }
            td { "{born}" }
            td { {horse.sex.label()} }
            td { "{owner}" }
            td {
                class: "actions",
                button {
                    class: "btn btn-icon",
                    title: "Show details",
                    onclick: move |_| on_open.call(id),
                    Icon { icon: FaEye, width: 14, height: 14 }
                }
                button {
                    class: "btn btn-icon",
                    title: "Edit",
                    onclick: move |_| on_edit.call(id),
                    Icon { icon: FaPen, width: 14, height: 14 }
                }
                button {
                    class: "btn btn-icon",
                    title: "Family tree",
                    onclick: move |_| on_family_tree.call(id),
                    Icon { icon: FaSitemap, width: 14, height: 14 }
                }
                button {
                    class: "btn btn-icon btn-danger",
                    title: "Delete",
                    onclick: move |_| on_delete.call(to_delete.clone()),
                    Icon { icon: FaTrashCan, width: 14, height: 14 }
                }
            }
        }
    }
}

fn show_horses(
    result: ApiResult<Vec<Horse>>,
    mut horses: Signal<Vec<Horse>>,
    mut banner: Signal<Option<String>>,
    report: impl Fn(&ApiError),
) {
    match result {
        Ok(list) => {
            banner.set(None);
            horses.set(list);
        }
        Err(e) => {
            banner.set(Some(format!("Could not fetch horses: {}", e.user_message())));
            report(&e);
        }
    }
}
