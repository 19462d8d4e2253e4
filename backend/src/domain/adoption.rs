//! Adoption outcomes returned by the coordinator.
//!
//! Every adopt or cancel request resolves to exactly one [`AdoptionOutcome`].
//! The messages below are part of the client contract and must not drift.

use super::{AnimalId, AnimalUnavailable};

/// Message returned when an adoption is recorded.
pub const ADOPTION_SUCCESS_MESSAGE: &str = "Adoption successful.";
/// Message returned when an adoption is cancelled.
pub const CANCELLATION_SUCCESS_MESSAGE: &str = "Adoption canceled.";

/// The transition a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdoptionAction {
    /// Mark an available animal as adopted.
    Adopt,
    /// Return an adopted animal to the available pool.
    Cancel,
}

impl AdoptionAction {
    /// Client-facing message for a successful transition.
    pub const fn success_message(self) -> &'static str {
        match self {
            Self::Adopt => ADOPTION_SUCCESS_MESSAGE,
            Self::Cancel => CANCELLATION_SUCCESS_MESSAGE,
        }
    }

    /// Short label for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Adopt => "adopt",
            Self::Cancel => "cancel",
        }
    }
}

/// Why an adopt or cancel request did not take effect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdoptionFailure {
    /// No record exists, or a concurrent writer got there first.
    #[error("No animal with id {0} was found.")]
    NotFound(AnimalId),
    /// The animal is already adopted; nothing was written.
    #[error("Animal is not available for adoption.")]
    AlreadyUnavailable,
    /// The store could not confirm the write for a reason other than a lost race.
    #[error("Update operation for animal with id {0} failed.")]
    UpdateConflict(AnimalId),
}

impl From<AnimalUnavailable> for AdoptionFailure {
    fn from(_: AnimalUnavailable) -> Self {
        Self::AlreadyUnavailable
    }
}

/// Result of a single adopt or cancel request.
///
/// # Examples
/// ```
/// use shelter::domain::{AdoptionAction, AdoptionFailure, AdoptionOutcome, AnimalId};
///
/// let ok = AdoptionOutcome::Success(AdoptionAction::Cancel);
/// assert_eq!(ok.message(), "Adoption canceled.");
///
/// let id = AnimalId::new("cat-1").expect("valid id");
/// let missing = AdoptionOutcome::Failure(AdoptionFailure::NotFound(id));
/// assert!(!missing.is_success());
/// assert_eq!(missing.message(), "No animal with id cat-1 was found.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdoptionOutcome {
    /// The transition was persisted.
    Success(AdoptionAction),
    /// Nothing changed; the reason says why.
    Failure(AdoptionFailure),
}

impl AdoptionOutcome {
    /// Whether the requested transition took effect.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The failure reason, if the request did not take effect.
    pub fn failure(&self) -> Option<&AdoptionFailure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(reason) => Some(reason),
        }
    }

    /// Client-facing message.
    pub fn message(&self) -> String {
        match self {
            Self::Success(action) => action.success_message().to_owned(),
            Self::Failure(reason) => reason.to_string(),
        }
    }
}

impl From<Result<AdoptionAction, AdoptionFailure>> for AdoptionOutcome {
    fn from(value: Result<AdoptionAction, AdoptionFailure>) -> Self {
        match value {
            Ok(action) => Self::Success(action),
            Err(reason) => Self::Failure(reason),
        }
    }
}
