//! Client-side form state and validation.
//!
//! Forms hold raw input as typed by the user. [`HorseForm::validate`] and
//! [`OwnerForm::validate`] run the required/format checks that must pass
//! before any request is sent, and produce the record to submit with blank
//! optional text omitted.

use chrono::NaiveDate;
use thiserror::Error;

use crate::horse::{non_blank, Horse, HorseId, Sex};
use crate::owner::Owner;

/// Failed client-side checks, one message per problem.
#[derive(Clone, Debug, Default, PartialEq, Error)]
#[error("{}", .0.join(", "))]
pub struct ValidationErrors(pub Vec<String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// Whether the horse form creates a new horse or edits an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(HorseId),
}

impl FormMode {
    pub fn heading(&self) -> &'static str {
        match self {
            FormMode::Create => "Create New Horse",
            FormMode::Edit(_) => "Edit Horse",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Create => "Create",
            FormMode::Edit(_) => "Edit",
        }
    }

    /// Past tense used in the confirmation toast.
    pub fn finished(&self) -> &'static str {
        match self {
            FormMode::Create => "created",
            FormMode::Edit(_) => "edited",
        }
    }
}

/// Raw input of the horse create/edit form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HorseForm {
    pub name: String,
    pub description: String,
    /// `YYYY-MM-DD`, as produced by a date input.
    pub date_of_birth: String,
    pub sex: Sex,
    pub owner: Option<Owner>,
    pub mother: Option<Horse>,
    pub father: Option<Horse>,
}

impl HorseForm {
    /// Pre-populate the form from an existing horse.
    pub fn from_horse(horse: &Horse) -> Self {
        Self {
            name: horse.name.clone(),
            description: horse.description.clone().unwrap_or_default(),
            date_of_birth: horse.date_of_birth.format("%Y-%m-%d").to_string(),
            sex: horse.sex,
            owner: horse.owner.clone(),
            mother: horse.mother.as_deref().cloned(),
            father: horse.father.as_deref().cloned(),
        }
    }

    pub fn name_error(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            Some("Name is required")
        } else {
            None
        }
    }

    pub fn date_of_birth_error(&self) -> Option<&'static str> {
        if self.date_of_birth.trim().is_empty() {
            Some("Date of birth is required")
        } else if parse_date(&self.date_of_birth).is_none() {
            Some("Date of birth must be a valid date")
        } else {
            None
        }
    }

    pub fn is_valid(&self) -> bool {
        self.name_error().is_none() && self.date_of_birth_error().is_none()
    }

    /// Check the form and build the horse to submit. A blank description is
    /// left out of the result.
    pub fn validate(&self) -> Result<Horse, ValidationErrors> {
        let mut errors = Vec::new();
        errors.extend(self.name_error().map(str::to_string));
        errors.extend(self.date_of_birth_error().map(str::to_string));

        let Some(date_of_birth) = parse_date(&self.date_of_birth) else {
            return Err(ValidationErrors(errors));
        };

        let horse = Horse {
            id: None,
            name: self.name.trim().to_string(),
            description: non_blank(&self.description),
            date_of_birth,
            sex: self.sex,
            owner: self.owner.clone(),
            mother: self.mother.clone().map(Box::new),
            father: self.father.clone().map(Box::new),
        };
        ValidationErrors(errors).into_result(horse)
    }
}

/// Raw input of the owner create form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OwnerForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl OwnerForm {
    pub fn first_name_error(&self) -> Option<&'static str> {
        self.first_name
            .trim()
            .is_empty()
            .then_some("First name is required")
    }

    pub fn last_name_error(&self) -> Option<&'static str> {
        self.last_name
            .trim()
            .is_empty()
            .then_some("Last name is required")
    }

    pub fn is_valid(&self) -> bool {
        self.first_name_error().is_none() && self.last_name_error().is_none()
    }

    /// Check the form and build the owner to submit. A blank email is left
    /// out of the result.
    pub fn validate(&self) -> Result<Owner, ValidationErrors> {
        let errors: Vec<String> = [self.first_name_error(), self.last_name_error()]
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect();

        let owner = Owner {
            id: None,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: non_blank(&self.email),
        };
        ValidationErrors(errors).into_result(owner)
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
