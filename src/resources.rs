// src/resources.rs
//! The catalogue of resources the admin console lists.
//!
//! Every resource maps to one store collection and shares the same fetch
//! contract; the users collection additionally supports narrowing by an
//! action tag before pagination.

use crate::types::ValidationError;
use std::fmt;
use std::str::FromStr;

/// A listable resource of the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Medicines,
    Categories,
    Diseases,
    Pharmacies,
    Labs,
    Ambulances,
    Users,
}

impl Resource {
    /// All resources, in the order the console presents them.
    pub const ALL: [Resource; 7] = [
        Resource::Medicines,
        Resource::Categories,
        Resource::Diseases,
        Resource::Pharmacies,
        Resource::Labs,
        Resource::Ambulances,
        Resource::Users,
    ];

    /// The store collection this resource lives in.
    pub fn collection(&self) -> &'static str {
        match self {
            Resource::Medicines => "medicines",
            Resource::Categories => "categories",
            Resource::Diseases => "diseases",
            Resource::Pharmacies => "pharmacies",
            Resource::Labs => "labs",
            Resource::Ambulances => "ambulances",
            Resource::Users => "users",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.collection())
    }
}

impl FromStr for Resource {
    type Err = ValidationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized = input.trim().to_lowercase();
        Resource::ALL
            .into_iter()
            .find(|resource| resource.collection() == normalized)
            .ok_or(ValidationError::UnknownResource {
                input: input.to_string(),
            })
    }
}

/// Status tag narrowing the users collection before pagination.
///
/// Part of a source's identity: changing the tag rebinds the listing the
/// same way switching resources does.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionTag(String);

impl ActionTag {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
