//! ProjectInput - raw form input and the rules it is checked against.

use serde::{Deserialize, Serialize};

use super::errors::ValidationError;

/// Bounds applied to form input before anything reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    pub title_min_len: usize,
    pub description_min_len: usize,
    pub people_min: u32,
    pub people_max: u32,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            title_min_len: 1,
            description_min_len: 5,
            people_min: 1,
            people_max: 5,
        }
    }
}

/// The three form fields, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectInput {
    pub title: String,
    pub description: String,
    pub people: String,
}

/// Input that passed validation. Only constructed by [`ProjectInput::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidProject {
    pub title: String,
    pub description: String,
    pub people: u32,
}

impl ProjectInput {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        people: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            people: people.into(),
        }
    }

    /// Checks title, then description, then people; the first failure wins.
    pub fn validate(&self, rules: &ValidationRules) -> Result<ValidProject, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() || title.chars().count() < rules.title_min_len {
            return Err(ValidationError::EmptyTitle);
        }

        let description = self.description.trim();
        if description.chars().count() < rules.description_min_len {
            return Err(ValidationError::DescriptionTooShort {
                min: rules.description_min_len,
            });
        }

        let raw_people = self.people.trim();
        let people: i64 = raw_people
            .parse()
            .map_err(|_| ValidationError::PeopleNotANumber(raw_people.to_string()))?;
        if people < i64::from(rules.people_min) || people > i64::from(rules.people_max) {
            return Err(ValidationError::PeopleOutOfRange {
                min: rules.people_min,
                max: rules.people_max,
                value: people,
            });
        }

        Ok(ValidProject {
            title: title.to_string(),
            description: description.to_string(),
            // range-checked above
            people: people as u32,
        })
    }
}
