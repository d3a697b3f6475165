use dioxus::prelude::*;
use model::OwnerForm;

use crate::components::{api_error_toast, use_toast, ToastOptions};
use crate::make_client;

/// Create an owner. First and last name are required; the email is optional.
#[component]
pub fn OwnerFormView(on_saved: EventHandler<()>, on_cancel: EventHandler<()>) -> Element {
    let toast = use_toast();
    let mut form = use_signal(OwnerForm::default);
    let mut first_touched = use_signal(|| false);
    let mut last_touched = use_signal(|| false);
    let mut saving = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        first_touched.set(true);
        last_touched.set(true);
        let current = form();
        if !current.is_valid() || saving() {
            return;
        }
        saving.set(true);
        spawn(async move {
            match make_client().save_owner(&current).await {
                Ok(owner) => {
                    toast.success(
                        format!("Owner {} successfully added.", owner.first_name),
                        ToastOptions::new(),
                    );
                    on_saved.call(());
                }
                Err(e) => {
                    let (title, options) = api_error_toast("Could Not Add Owner", &e);
                    toast.error(title, options);
                    error.set(Some(e.user_message()));
                    saving.set(false);
                }
            }
        });
    };

    let current = form();
    let first_error = current.first_name_error().filter(|_| first_touched());
    let last_error = current.last_name_error().filter(|_| last_touched());

    rsx! {
        div {
            class: "page owner-form",
            h1 { "Create New Owner" }

            if let Some(message) = error() {
                div { class: "banner error", "{message}" }
            }

            form {
                onsubmit: handle_submit,

                div {
                    class: "form-field",
                    label { r#for: "owner-first-name", "First name" }
                    input {
                        id: "owner-first-name",
                        r#type: "text",
                        class: if first_error.is_some() { "is-invalid" },
                        value: "{current.first_name}",
                        oninput: move |evt: FormEvent| form.write().first_name = evt.value(),
                        onblur: move |_| first_touched.set(true),
                    }
                    if let Some(message) = first_error {
                        div { class: "invalid-feedback", {message} }
                    }
                }

                div {
                    class: "form-field",
                    label { r#for: "owner-last-name", "Last name" }
                    input {
                        id: "owner-last-name",
                        r#type: "text",
                        class: if last_error.is_some() { "is-invalid" },
                        value: "{current.last_name}",
                        oninput: move |evt: FormEvent| form.write().last_name = evt.value(),
                        onblur: move |_| last_touched.set(true),
                    }
                    if let Some(message) = last_error {
                        div { class: "invalid-feedback", {message} }
                    }
                }

                div {
                    class: "form-field",
                    label { r#for: "owner-email", "Email" }
                    input {
                        id: "owner-email",
                        r#type: "email",
                        value: "{current.email}",
                        oninput: move |evt: FormEvent| form.write().email = evt.value(),
                    }
                }

                div {
                    class: "form-actions",
                    button {
                        r#type: "button",
                        class: "btn",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        r#type: "submit",
                        class: "btn btn-primary",
                        disabled: !current.is_valid() || saving(),
                        "Create"
                    }
                }
            }
        }
    }
}
