//! # Horse records and search criteria
//!
//! Defines the shapes exchanged with the backend's `/horses` collection. All
//! types are `Serialize + Deserialize` with camelCase field names so they match
//! the JSON the backend produces and expects.
//!
//! ## Types
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Horse`] | A full horse record, optionally embedding its owner and its mother/father as nested horses. |
//! | [`Sex`] | `FEMALE` or `MALE` on the wire. |
//! | [`HorseSearch`] | The five optional criteria of the list search (`name`, `description`, `bornBefore`, `sex`, `ownerName`). |
//! | [`HorseSuggestionQuery`] | Name prefix + sex + limit, used for mother/father autocomplete. |
//!
//! Optional fields are skipped when serialising, so an unset description is
//! never sent as `null` or `""`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::owner::Owner;

/// Backend-assigned identity of a horse.
pub type HorseId = i64;

/// Sex of a horse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sex {
    #[default]
    Female,
    Male,
}

impl Sex {
    /// Wire representation, also used as the `<select>` option value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Female => "FEMALE",
            Sex::Male => "MALE",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Sex::Female => "Female",
            Sex::Male => "Male",
        }
    }

    /// Parse a wire/option value. Empty or unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "FEMALE" => Some(Sex::Female),
            "MALE" => Some(Sex::Male),
            _ => None,
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A horse as returned by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Horse {
    /// `None` until the backend has persisted the horse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<HorseId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date_of_birth: NaiveDate,
    pub sex: Sex,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother: Option<Box<Horse>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father: Option<Box<Horse>>,
}

impl Horse {
    /// Create an unpersisted horse with only the required fields set.
    pub fn new(name: impl Into<String>, date_of_birth: NaiveDate, sex: Sex) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            date_of_birth,
            sex,
            owner: None,
            mother: None,
            father: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_owner(mut self, owner: Owner) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_mother(mut self, mother: Horse) -> Self {
        self.mother = Some(Box::new(mother));
        self
    }

    pub fn with_father(mut self, father: Horse) -> Self {
        self.father = Some(Box::new(father));
        self
    }

    /// Drop a description that is empty or whitespace only.
    pub fn without_blank_description(mut self) -> Self {
        if self.description.as_deref().is_some_and(|d| d.trim().is_empty()) {
            self.description = None;
        }
        self
    }

    pub fn owner_id(&self) -> Option<i64> {
        self.owner.as_ref().and_then(|o| o.id)
    }

    pub fn mother_id(&self) -> Option<HorseId> {
        self.mother.as_ref().and_then(|m| m.id)
    }

    pub fn father_id(&self) -> Option<HorseId> {
        self.father.as_ref().and_then(|f| f.id)
    }

    /// Owner's full name or an empty string.
    pub fn owner_name(&self) -> String {
        self.owner
            .as_ref()
            .map(Owner::full_name)
            .unwrap_or_default()
    }
}

/// Criteria of the horse list search. Unset criteria do not constrain the result.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HorseSearch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub born_before: Option<NaiveDate>,
    pub sex: Option<Sex>,
    pub owner_name: Option<String>,
}

impl HorseSearch {
    /// Build a search from raw form input. Blank text fields and an
    /// unparsable date are treated as unset.
    pub fn from_input(
        name: &str,
        description: &str,
        born_before: &str,
        sex: &str,
        owner_name: &str,
    ) -> Self {
        Self {
            name: non_blank(name),
            description: non_blank(description),
            born_before: NaiveDate::parse_from_str(born_before.trim(), "%Y-%m-%d").ok(),
            sex: Sex::parse(sex),
            owner_name: non_blank(owner_name),
        }
    }

    /// The same search with the sex criterion removed.
    pub fn without_sex(&self) -> Self {
        Self {
            sex: None,
            ..self.clone()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Mother/father autocomplete request.
#[derive(Clone, Debug, PartialEq)]
pub struct HorseSuggestionQuery {
    pub name: String,
    pub sex: Sex,
    pub limit: usize,
}

pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_new_horse_serialises_without_optional_fields() {
        let horse = Horse::new("Thunder", date("2020-01-01"), Sex::Male);
        let json = serde_json::to_value(&horse).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "name": "Thunder",
                "dateOfBirth": "2020-01-01",
                "sex": "MALE",
            })
        );
    }

    #[test]
    fn test_deserialise_nested_parents_and_owner() {
        let json = r#"{
            "id": 3,
            "name": "Foal",
            "description": null,
            "dateOfBirth": "2019-05-02",
            "sex": "FEMALE",
            "owner": {"id": 1, "firstName": "Ada", "lastName": "Byron", "email": null},
            "mother": {"id": 1, "name": "Mare", "dateOfBirth": "2010-01-01", "sex": "FEMALE"},
            "father": null
        }"#;
        let horse: Horse = serde_json::from_str(json).unwrap();

        assert_eq!(horse.id, Some(3));
        assert!(horse.description.is_none());
        assert_eq!(horse.mother_id(), Some(1));
        assert_eq!(horse.father_id(), None);
        assert_eq!(horse.owner_name(), "Ada Byron");
    }

    #[test]
    fn test_blank_description_is_dropped() {
        let horse = Horse::new("A", date("2020-01-01"), Sex::Female).with_description("   ");
        assert!(horse.without_blank_description().description.is_none());

        let horse = Horse::new("A", date("2020-01-01"), Sex::Female).with_description("calm");
        assert_eq!(
            horse.without_blank_description().description.as_deref(),
            Some("calm")
        );
    }

    #[test]
    fn test_sex_parse() {
        assert_eq!(Sex::parse("FEMALE"), Some(Sex::Female));
        assert_eq!(Sex::parse("male"), Some(Sex::Male));
        assert_eq!(Sex::parse(""), None);
        assert_eq!(Sex::parse("GELDING"), None);
    }

    #[test]
    fn test_search_from_input_treats_blanks_as_unset() {
        let search = HorseSearch::from_input("  ", "", "not-a-date", "", "");
        assert!(search.is_empty());

        let search = HorseSearch::from_input("Wind", "", "2021-03-04", "FEMALE", " Ada ");
        assert_eq!(search.name.as_deref(), Some("Wind"));
        assert_eq!(search.born_before, Some(date("2021-03-04")));
        assert_eq!(search.sex, Some(Sex::Female));
        assert_eq!(search.owner_name.as_deref(), Some("Ada"));

        let cleared = search.without_sex();
        assert_eq!(cleared.sex, None);
        assert_eq!(cleared.name.as_deref(), Some("Wind"));
    }
}
