//! This crate contains all shared UI for the horse registry.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod client;
pub use client::{client_config, make_client};

mod timer;
pub use timer::sleep;

pub mod components;

pub mod loaders;

mod navbar;
pub use navbar::Navbar;

mod autocomplete;
pub use autocomplete::{Autocomplete, Suggestion, SuggestionSource};

pub mod views;
