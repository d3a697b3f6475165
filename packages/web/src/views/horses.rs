use dioxus::prelude::*;

use model::{parse_horse_id, FormMode, HorseId};
use ui::views::{FamilyTreeView, HorseDetailView, HorseFormView, HorseListView};

use crate::Route;

fn detail(id: HorseId) -> Route {
    Route::HorseDetail { id: id.to_string() }
}

fn edit(id: HorseId) -> Route {
    Route::HorseEdit { id: id.to_string() }
}

fn family_tree(id: HorseId) -> Route {
    Route::HorseFamilyTree {
        id: id.to_string(),
        generations: String::new(),
    }
}

#[component]
pub fn Horses() -> Element {
    let nav = use_navigator();
    rsx! {
        HorseListView {
            on_create: move |_| {
                nav.push(Route::HorseCreate {});
            },
            on_open: move |id| {
                nav.push(detail(id));
            },
            on_edit: move |id| {
                nav.push(edit(id));
            },
            on_family_tree: move |id| {
                nav.push(family_tree(id));
            },
        }
    }
}

#[component]
pub fn HorseCreate() -> Element {
    let nav = use_navigator();
    rsx! {
        HorseFormView {
            mode: FormMode::Create,
            on_saved: move |_| {
                nav.push(Route::Horses {});
            },
            on_cancel: move |_| {
                nav.push(Route::Horses {});
            },
        }
    }
}

#[component]
pub fn HorseDetail(id: String) -> Element {
    let nav = use_navigator();
    rsx! {
        HorseDetailView {
            id,
            on_open: move |id| {
                nav.push(detail(id));
            },
            on_edit: move |id| {
                nav.push(edit(id));
            },
            on_family_tree: move |id| {
                nav.push(family_tree(id));
            },
            on_deleted: move |_| {
                nav.push(Route::Horses {});
            },
            on_invalid: move |_| {
                nav.replace(Route::Horses {});
            },
        }
    }
}

#[component]
pub fn HorseEdit(id: String) -> Element {
    let nav = use_navigator();
    let Some(horse_id) = parse_horse_id(&id) else {
        tracing::warn!("Not a horse id: {}", id);
        nav.replace(Route::Horses {});
        return rsx! {};
    };

    rsx! {
        HorseFormView {
            key: "{horse_id}",
            mode: FormMode::Edit(horse_id),
            on_saved: move |_| {
                nav.push(Route::Horses {});
            },
            on_cancel: move |_| {
                nav.push(detail(horse_id));
            },
        }
    }
}

#[component]
pub fn HorseFamilyTree(id: String, generations: String) -> Element {
    let nav = use_navigator();
    let route_id = id.clone();
    rsx! {
        FamilyTreeView {
            id,
            generations,
            on_generations_change: move |n: u32| {
                nav.push(Route::HorseFamilyTree {
                    id: route_id.clone(),
                    generations: n.to_string(),
                });
            },
            on_open: move |id| {
                nav.push(detail(id));
            },
            on_edit: move |id| {
                nav.push(edit(id));
            },
        }
    }
}
