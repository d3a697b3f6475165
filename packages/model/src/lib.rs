pub mod config;
pub mod family_tree;
pub mod form;
pub mod horse;
pub mod owner;

pub use config::ClientConfig;
pub use family_tree::{parse_horse_id, Ancestor, FamilyTree, GenerationLimit, HorseFamilyTree};
pub use form::{FormMode, HorseForm, OwnerForm, ValidationErrors};
pub use horse::{Horse, HorseId, HorseSearch, HorseSuggestionQuery, Sex};
pub use owner::{Owner, OwnerId};
