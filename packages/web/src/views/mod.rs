//! Route components. Each one wraps a shared view from `ui` and turns its
//! callbacks into navigation.

mod app_layout;
pub use app_layout::AppLayout;

mod horses;
pub use horses::{HorseCreate, HorseDetail, HorseEdit, HorseFamilyTree, Horses};

mod owners;
pub use owners::{OwnerCreate, Owners};
