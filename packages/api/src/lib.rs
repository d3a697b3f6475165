//! # API crate: access to the horse registry backend
//!
//! Everything the UI needs to talk to the backend's REST API. The views never
//! build requests themselves; they go through a [`Client`] wrapping some
//! [`Backend`].
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`backend`] | The [`Backend`] trait, one async method per endpoint |
//! | [`http`] | [`HttpBackend`], the `reqwest` implementation used by the app |
//! | [`memory`] | [`MemoryBackend`], an in-process registry with the backend's rules, used in tests |
//! | [`client`] | [`Client`], validation, blank-field omission and autocomplete short-circuits in front of a backend |
//! | [`error`] | [`ApiError`]: unreachable backend, backend-reported error, undecodable response, invalid input |
//! | [`config`] | Loads [`model::ClientConfig`] from the environment |

pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod memory;

pub use backend::Backend;
pub use client::Client;
pub use error::{ApiError, ApiResult};
pub use http::HttpBackend;
pub use memory::MemoryBackend;

pub use model::{
    Ancestor, ClientConfig, FamilyTree, FormMode, GenerationLimit, Horse, HorseFamilyTree,
    HorseForm, HorseId, HorseSearch, Owner, OwnerForm, Sex,
};
