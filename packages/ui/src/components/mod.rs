//! Styled wrappers over `dioxus-primitives`.

mod toast;
pub use toast::{api_error_toast, use_toast, ToastOptions, ToastProvider};
