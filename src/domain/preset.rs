use std::fmt;
use std::str::FromStr;

use super::{FieldSpec, RouteError, Schema};

/// Built-in schemas that a route can reference by name instead of
/// declaring its fields inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Person,
}

impl Preset {
    pub fn name(&self) -> &'static str {
        match self {
            Preset::Person => "person",
        }
    }

    pub fn schema(&self) -> Schema {
        match self {
            Preset::Person => [
                ("userId", "uuid"),
                ("username", "username"),
                ("firstName", "firstname"),
                ("lastName", "lastname"),
                ("email", "email"),
                ("avatar", "avatar"),
                ("phone", "phone"),
                ("dateOfBirth", "past"),
                ("address", "address"),
                ("bio", "bio"),
                ("jobTitle", "jobTitle"),
                ("registeredAt", "timestamp"),
            ]
            .into_iter()
            .map(|(field, kind)| (field.to_string(), FieldSpec::new(kind)))
            .collect(),
        }
    }
}

impl FromStr for Preset {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "person" => Ok(Preset::Person),
            other => Err(RouteError::UnknownPreset(other.to_string())),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
