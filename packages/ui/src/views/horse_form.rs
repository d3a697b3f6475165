use dioxus::prelude::*;
use model::{FormMode, HorseForm, Sex};

use crate::components::{api_error_toast, use_toast, ToastOptions};
use crate::{make_client, Autocomplete, Suggestion, SuggestionSource};

/// Create or edit a horse.
///
/// In edit mode the horse is loaded first and the form pre-populated. A failed
/// save keeps the form as entered so the user can correct it.
#[component]
pub fn HorseFormView(
    mode: FormMode,
    /// Called after a successful save.
    on_saved: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let toast = use_toast();
    let mut form = use_signal(HorseForm::default);
    let mut name_touched = use_signal(|| false);
    let mut date_touched = use_signal(|| false);
    let mut submitted = use_signal(|| false);
    let mut saving = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let _loader = use_resource(move || async move {
        let FormMode::Edit(id) = mode else {
            return;
        };
        match make_client().get_horse(id).await {
            Ok(horse) => form.set(HorseForm::from_horse(&horse)),
            Err(e) => {
                tracing::error!("Error loading horse {} for editing: {}", id, e);
                error.set(Some(e.user_message()));
            }
        }
    });

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        submitted.set(true);
        let current = form();
        if !current.is_valid() || saving() {
            return;
        }
        saving.set(true);
        spawn(async move {
            match make_client().save_horse(mode, &current).await {
                Ok(saved) => {
                    toast.success(
                        format!("Horse {} successfully {}.", saved.name, mode.finished()),
                        ToastOptions::new(),
                    );
                    on_saved.call(());
                }
                Err(e) => {
                    let (title, options) = api_error_toast("Could Not Save Horse", &e);
                    toast.error(title, options);
                    error.set(Some(e.user_message()));
                    saving.set(false);
                }
            }
        });
    };

    let current = form();
    let name_error = current
        .name_error()
        .filter(|_| name_touched() || submitted());
    let date_error = current
        .date_of_birth_error()
        .filter(|_| date_touched() || submitted());

    rsx! {
        div {
            class: "page horse-form",
            h1 { {mode.heading()} }

            if let Some(message) = error() {
                div { class: "banner error", "{message}" }
            }

            form {
                onsubmit: handle_submit,

                div {
                    class: "form-field",
                    label { r#for: "horse-name", "Name" }
                    input {
                        id: "horse-name",
                        r#type: "text",
                        class: if name_error.is_some() { "is-invalid" },
                        value: "{current.name}",
                        oninput: move |evt: FormEvent| form.write().name = evt.value(),
                        onblur: move |_| name_touched.set(true),
                    }
                    if let Some(message) = name_error {
                        div { class: "invalid-feedback", {message} }
                    }
                }

                div {
                    class: "form-field",
                    label { r#for: "horse-description", "Description" }
                    textarea {
                        id: "horse-description",
                        value: "{current.description}",
                        oninput: move |evt: FormEvent| form.write().description = evt.value(),
                    }
                }

                div {
                    class: "form-field",
                    label { r#for: "horse-born", "Date of birth" }
                    input {
                        id: "horse-born",
                        r#type: "date",
                        class: if date_error.is_some() { "is-invalid" },
                        value: "{current.date_of_birth}",
                        oninput: move |evt: FormEvent| form.write().date_of_birth = evt.value(),
                        onblur: move |_| date_touched.set(true),
                    }
                    if let Some(message) = date_error {
                        div { class: "invalid-feedback", {message} }
                    }
                }

                div {
                    class: "form-field",
                    label { r#for: "horse-sex", "Sex" }
                    select {
                        id: "horse-sex",
                        value: current.sex.as_str(),
                        onchange: move |evt: FormEvent| {
                            form.write().sex = Sex::parse(&evt.value()).unwrap_or_default();
                        },
                        option { value: Sex::Female.as_str(), {Sex::Female.label()} }
                        option { value: Sex::Male.as_str(), {Sex::Male.label()} }
                    }
                }

                Autocomplete {
                    id: "horse-owner",
                    label: "Owner",
                    source: SuggestionSource::Owner,
                    selected: current.owner.clone().map(Suggestion::Owner),
                    on_select: move |picked: Option<Suggestion>| {
                        form.write().owner = picked.and_then(Suggestion::into_owner);
                    },
                }

                Autocomplete {
                    id: "horse-mother",
                    label: "Mother",
                    source: SuggestionSource::Mother,
                    selected: current.mother.clone().map(Suggestion::Horse),
                    on_select: move |picked: Option<Suggestion>| {
                        form.write().mother = picked.and_then(Suggestion::into_horse);
                    },
                }

                Autocomplete {
                    id: "horse-father",
                    label: "Father",
                    source: SuggestionSource::Father,
                    selected: current.father.clone().map(Suggestion::Horse),
                    on_select: move |picked: Option<Suggestion>| {
                        form.write().father = picked.and_then(Suggestion::into_horse);
                    },
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
                        {mode.submit_label()}
                    }
                }
            }
        }
    }
}
