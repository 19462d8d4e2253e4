//! Adoptable animal entity.
//!
//! An [`Animal`] has a fixed identity and name. Availability is its only
//! mutable state and changes exclusively through [`Animal::request_adoption`]
//! and [`Animal::cancel_adoption`]. The entity knows nothing about storage or
//! concurrency; those concerns belong to the store port and the coordinator.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum accepted length of an animal name, in characters.
pub const ANIMAL_NAME_MAX: usize = 64;

/// Validation errors returned by [`AnimalId::new`] and [`AnimalName::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimalValidationError {
    EmptyId,
    EmptyName,
    NameTooLong { max: usize },
}

impl fmt::Display for AnimalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "animal id must not be empty"),
            Self::EmptyName => write!(f, "animal name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "animal name must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for AnimalValidationError {}

/// Opaque, immutable animal identifier.
///
/// Any non-empty string is accepted; the service never interprets it, so an
/// unknown or oddly shaped id is simply not found. Seeded animals use UUID
/// strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AnimalId(String);

impl AnimalId {
    /// Validate and construct an [`AnimalId`].
    pub fn new(id: impl Into<String>) -> Result<Self, AnimalValidationError> {
        Self::from_owned(id.into())
    }

    /// Generate a new random identifier backed by a UUID v4.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap a UUID as an identifier.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, AnimalValidationError> {
        if id.is_empty() {
            return Err(AnimalValidationError::EmptyId);
        }
        Ok(Self(id))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for AnimalId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AnimalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<AnimalId> for String {
    fn from(value: AnimalId) -> Self {
        value.0
    }
}

impl TryFrom<String> for AnimalId {
    type Error = AnimalValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Display name of an animal, fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AnimalName(String);

impl AnimalName {
    /// Validate and construct an [`AnimalName`].
    pub fn new(name: impl Into<String>) -> Result<Self, AnimalValidationError> {
        Self::from_owned(name.into())
    }

    fn from_owned(name: String) -> Result<Self, AnimalValidationError> {
        if name.trim().is_empty() {
            return Err(AnimalValidationError::EmptyName);
        }
        if name.chars().count() > ANIMAL_NAME_MAX {
            return Err(AnimalValidationError::NameTooLong {
                max: ANIMAL_NAME_MAX,
            });
        }
        Ok(Self(name))
    }

    /// Borrow the name as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for AnimalName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AnimalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<AnimalName> for String {
    fn from(value: AnimalName) -> Self {
        value.0
    }
}

impl TryFrom<String> for AnimalName {
    type Error = AnimalValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Raised when adoption is requested for an animal that is not available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Animal is not available for adoption.")]
pub struct AnimalUnavailable;

/// An adoptable shelter animal.
///
/// ## Invariants
/// - `id` and `name` never change after construction.
/// - `available` flips `true -> false` on adoption and `false -> true` on
///   cancellation; nothing else mutates it.
///
/// # Examples
/// ```
/// use shelter::domain::{Animal, AnimalId, AnimalName};
///
/// let id = AnimalId::new("cat-1").expect("valid id");
/// let name = AnimalName::new("Tom").expect("valid name");
/// let mut animal = Animal::new(id, name);
///
/// assert!(animal.is_available());
/// animal.request_adoption().expect("first adoption succeeds");
/// assert!(animal.request_adoption().is_err());
/// animal.cancel_adoption();
/// assert!(animal.is_available());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animal {
    id: AnimalId,
    name: AnimalName,
    available: bool,
}

impl Animal {
    /// Create a newly admitted animal; it starts out available.
    pub fn new(id: AnimalId, name: AnimalName) -> Self {
        Self {
            id,
            name,
            available: true,
        }
    }

    /// Rebuild an animal from persisted state.
    ///
    /// Store adapters use this when rehydrating records; domain code creates
    /// animals through [`Animal::new`].
    pub fn restore(id: AnimalId, name: AnimalName, available: bool) -> Self {
        Self {
            id,
            name,
            available,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &AnimalId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &AnimalName {
        &self.name
    }

    /// Whether the animal can currently be adopted.
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Claim the animal for an adopter.
    ///
    /// # Errors
    ///
    /// Returns [`AnimalUnavailable`] when the animal has already been adopted;
    /// the entity is left untouched in that case.
    pub fn request_adoption(&mut self) -> Result<(), AnimalUnavailable> {
        if !self.available {
            return Err(AnimalUnavailable);
        }
        self.available = false;
        Ok(())
    }

    /// Return the animal to the available pool. Idempotent.
    pub fn cancel_adoption(&mut self) {
        self.available = true;
    }
}
