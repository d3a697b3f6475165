use dioxus::prelude::*;
use model::{Horse, Owner};

use crate::icons::FaXmark;
use crate::{make_client, Icon};

/// Which records an [`Autocomplete`] field suggests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SuggestionSource {
    /// Female horses.
    Mother,
    /// Male horses.
    Father,
    Owner,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Suggestion {
    Horse(Horse),
    Owner(Owner),
}

impl Suggestion {
    pub fn label(&self) -> String {
        match self {
            Suggestion::Horse(horse) => horse.name.clone(),
            Suggestion::Owner(owner) => owner.full_name(),
        }
    }

    pub fn into_horse(self) -> Option<Horse> {
        match self {
            Suggestion::Horse(horse) => Some(horse),
            Suggestion::Owner(_) => None,
        }
    }

    pub fn into_owner(self) -> Option<Owner> {
        match self {
            Suggestion::Owner(owner) => Some(owner),
            Suggestion::Horse(_) => None,
        }
    }
}

async fn fetch_suggestions(source: SuggestionSource, input: &str) -> api::ApiResult<Vec<Suggestion>> {
    let client = make_client();
    let found = match source {
        SuggestionSource::Mother => client
            .mother_suggestions(input)
            .await?
            .into_iter()
            .map(Suggestion::Horse)
            .collect(),
        SuggestionSource::Father => client
            .father_suggestions(input)
            .await?
            .into_iter()
            .map(Suggestion::Horse)
            .collect(),
        SuggestionSource::Owner => client
            .owner_suggestions(input)
            .await?
            .into_iter()
            .map(Suggestion::Owner)
            .collect(),
    };
    Ok(found)
}

/// Text input offering matching records as the user types.
///
/// Each keystroke issues one request (none for empty input). Responses can
/// arrive out of order; only the one for the latest keystroke is shown.
#[component]
pub fn Autocomplete(
    id: String,
    label: String,
    source: SuggestionSource,
    /// The currently chosen record, shown as the input text.
    selected: Option<Suggestion>,
    /// Called with the picked record, or `None` when the field is cleared.
    on_select: EventHandler<Option<Suggestion>>,
) -> Element {
    let selected_label = selected.as_ref().map(Suggestion::label).unwrap_or_default();

    // Follow the parent's selection, e.g. when an edited horse finishes loading
    let mut shown_selection = use_signal(|| selected_label.clone());
    let mut text = use_signal(|| selected_label.clone());
    if *shown_selection.peek() != selected_label {
        shown_selection.set(selected_label.clone());
        text.set(selected_label.clone());
    }

    let mut suggestions = use_signal(Vec::<Suggestion>::new);
    let mut open = use_signal(|| false);
    let mut latest = use_signal(|| 0u64);

    let handle_input = move |evt: FormEvent| {
        let value = evt.value();
        text.set(value.clone());
        if value.is_empty() {
            on_select.call(None);
        }
        let ticket = *latest.peek() + 1;
        latest.set(ticket);
        spawn(async move {
            let result = fetch_suggestions(source, &value).await;
            if *latest.peek() != ticket {
                return;
            }
            match result {
                Ok(found) => {
                    open.set(!found.is_empty());
                    suggestions.set(found);
                }
                Err(e) => {
                    tracing::error!("Failed to load suggestions for {:?}: {}", source, e);
                    suggestions.set(Vec::new());
                    open.set(false);
                }
            }
        });
    };

    let entries: Vec<(String, Suggestion)> = suggestions()
        .into_iter()
        .map(|s| (s.label(), s))
        .collect();

    rsx! {
        div {
            class: "form-field autocomplete",
            label { r#for: "{id}", "{label}" }
            div {
                class: "autocomplete-input",
                input {
                    id: "{id}",
                    r#type: "text",
                    autocomplete: "off",
                    value: "{text}",
                    oninput: handle_input,
                    onfocus: move |_| open.set(!suggestions.peek().is_empty()),
                    onblur: move |_| open.set(false),
                }
                if !text().is_empty() {
                    button {
                        r#type: "button",
                        class: "autocomplete-clear",
                        title: "Clear",
                        onclick: move |_| {
                            text.set(String::new());
                            suggestions.set(Vec::new());
                            open.set(false);
                            on_select.call(None);
                        },
                        Icon { icon: FaXmark, width: 10, height: 10 }
                    }
                }
            }
            if open() {
                ul {
                    class: "autocomplete-list",
                    for (idx, (entry_label, suggestion)) in entries.into_iter().enumerate() {
                        li {
                            key: "{idx}",
                            // mousedown fires before the input's blur closes the list
                            onmousedown: move |evt: Event<MouseData>| {
                                evt.prevent_default();
                                text.set(suggestion.label());
                                open.set(false);
                                on_select.call(Some(suggestion.clone()));
                            },
                            "{entry_label}"
                        }
                    }
                }
            }
        }
    }
}
