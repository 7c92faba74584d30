//! The pet record.
//!
//! Exactly one pet exists at a time. It is created during onboarding,
//! edited from the settings commands and stored as a JSON blob in the
//! key-value store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Display name for a stored pet whose name is blank.
pub const UNNAMED: &str = "Unnamed";

/// The fixed set of avatars a pet can wear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Avatar {
    #[default]
    Cat,
    Dog,
    Rabbit,
    Bear,
    Tiger,
    Fox,
    Hamster,
    Cow,
}

impl Avatar {
    pub const ALL: [Avatar; 8] = [
        Avatar::Cat,
        Avatar::Dog,
        Avatar::Rabbit,
        Avatar::Bear,
        Avatar::Tiger,
        Avatar::Fox,
        Avatar::Hamster,
        Avatar::Cow,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Avatar::Cat => "🐱",
            Avatar::Dog => "🐶",
            Avatar::Rabbit => "🐰",
            Avatar::Bear => "🐻",
            Avatar::Tiger => "🐯",
            Avatar::Fox => "🦊",
            Avatar::Hamster => "🐹",
            Avatar::Cow => "🐮",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Avatar::Cat => "cat",
            Avatar::Dog => "dog",
            Avatar::Rabbit => "rabbit",
            Avatar::Bear => "bear",
            Avatar::Tiger => "tiger",
            Avatar::Fox => "fox",
            Avatar::Hamster => "hamster",
            Avatar::Cow => "cow",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Avatar::name).collect()
    }
}

impl fmt::Display for Avatar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Avatar {
    type Err = ValidationError;

    /// Accepts either the symbol itself or its English name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.symbol() == needle || a.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ValidationError::UnknownAvatar(needle.to_string()))
    }
}

impl TryFrom<String> for Avatar {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Avatar> for String {
    fn from(avatar: Avatar) -> Self {
        avatar.symbol().to_string()
    }
}

/// The persisted pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub name: String,
    #[serde(alias = "emoji")]
    pub avatar_symbol: Avatar,
    pub notifications_enabled: bool,
}

impl Pet {
    /// Create a pet during onboarding. Notifications start enabled.
    pub fn new(name: &str, avatar: Avatar) -> Result<Self, ValidationError> {
        Ok(Self {
            name: validate_name(name)?,
            avatar_symbol: avatar,
            notifications_enabled: true,
        })
    }

    pub fn rename(&mut self, name: &str) -> Result<(), ValidationError> {
        self.name = validate_name(name)?;
        Ok(())
    }

    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            UNNAMED
        } else {
            &self.name
        }
    }

    /// Decode a stored record. Absent fields or an unknown avatar yield `None`.
    pub fn decode(data: &str) -> Option<Self> {
        match serde_json::from_str(data) {
            Ok(pet) => Some(pet),
            Err(e) => {
                tracing::warn!(error = %e, "stored pet record is unreadable, ignoring it");
                None
            }
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::invalid("name", "pet name must not be empty"));
    }
    Ok(trimmed.to_string())
}
