//! Adoption domain: the animal entity, the coordinator and its ports.
//!
//! Public surface:
//! - [`Animal`], [`AnimalId`], [`AnimalName`]: the entity and its value types.
//! - [`AdoptionCoordinator`]: lookup, transition and conditional persist.
//! - [`AdoptionOutcome`]: the only shape an adopt or cancel request returns.
//! - [`CancellationSignal`]: caller-supplied abort for store I/O.
//! - [`Error`]: transport-agnostic failure for requests that cannot be served.

pub mod adoption;
pub mod adoption_coordinator;
pub mod animal;
pub mod cancellation;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::adoption::{
    ADOPTION_SUCCESS_MESSAGE, AdoptionAction, AdoptionFailure, AdoptionOutcome,
    CANCELLATION_SUCCESS_MESSAGE,
};
pub use self::adoption_coordinator::AdoptionCoordinator;
pub use self::animal::{
    ANIMAL_NAME_MAX, Animal, AnimalId, AnimalName, AnimalUnavailable,
    AnimalValidationError,
};
pub use self::cancellation::{CancellationSignal, CancellationSource, Cancelled};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;
