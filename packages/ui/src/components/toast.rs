use api::ApiError;
use dioxus::prelude::*;

pub use dioxus_primitives::toast::{use_toast, ToastOptions};

const TOAST_CSS: Asset = asset!("/assets/styling/toast.css");

/// Hosts the toast list for everything below it.
#[component]
pub fn ToastProvider(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: TOAST_CSS }
        dioxus_primitives::toast::ToastProvider { {children} }
    }
}

/// Log a failed backend call and build the error toast for it.
///
/// The title heads the toast and the error's user message goes below it:
///
/// ```ignore
/// let (title, options) = api_error_toast("Could Not Fetch Horses", &e);
/// toast.error(title, options);
/// ```
pub fn api_error_toast(title: &str, err: &ApiError) -> (String, ToastOptions) {
    tracing::error!("{}: {}", title, err);
    (
        title.to_string(),
        ToastOptions::new().description(err.user_message()),
    )
}
