use dioxus::prelude::*;

use ui::views::{OwnerFormView, OwnerListView};

use crate::Route;

#[component]
pub fn Owners() -> Element {
    let nav = use_navigator();
    rsx! {
        OwnerListView {
            on_create: move |_| {
                nav.push(Route::OwnerCreate {});
            },
        }
    }
}

#[component]
pub fn OwnerCreate() -> Element {
    let nav = use_navigator();
    rsx! {
        OwnerFormView {
            on_saved: move |_| {
                nav.push(Route::Owners {});
            },
            on_cancel: move |_| {
                nav.push(Route::Owners {});
            },
        }
    }
}
