use dioxus::prelude::*;
use model::Owner;

use crate::icons::FaPlus;
use crate::components::{api_error_toast, use_toast};
use crate::{make_client, Icon};

#[component]
pub fn OwnerListView(on_create: EventHandler<()>) -> Element {
    let toast = use_toast();
    let mut owners = use_signal(Vec::<Owner>::new);
    let mut banner = use_signal(|| Option::<String>::None);

    let _loader = use_resource(move || async move {
        match make_client().list_owners().await {
            Ok(list) => {
                banner.set(None);
                owners.set(list);
            }
            Err(e) => {
                banner.set(Some(format!("Could not fetch owners: {}", e.user_message())));
                let (title, options) = api_error_toast("Could Not Fetch Owners", &e);
                toast.error(title, options);
            }
        }
    });

    rsx! {
        div {
            class: "page owner-list",
            div {
                class: "page-header",
                h1 { "Owners" }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| on_create.call(()),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    " Create owner"
                }
            }

            if let Some(message) = banner() {
                div { class: "banner error", "{message}" }
            }

            table {
                class: "table",
                thead {
                    tr {
                        th { "First name" }
                        th { "Last name" }
                        th { "Email" }
                    }
                }
                tbody {
                    for owner in owners() {
                        tr {
                            key: "{owner.id:?}",
                            td { "{owner.first_name}" }
                            td { "{owner.last_name}" }
                            td { {owner.email.clone().unwrap_or_default()} }
                        }
                    }
                }
            }

            if owners().is_empty() && banner().is_none() {
                p { class: "empty", "No owners yet." }
            }
        }
    }
}
