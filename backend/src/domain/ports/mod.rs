//! Hexagonal boundary of the adoption domain.
//!
//! Driven port: [`AnimalStore`]. Driving ports: [`AdoptionCommand`] and
//! [`AvailableAnimalsQuery`].

mod macros;
pub(crate) use macros::define_port_error;

mod adoption_command;
mod animal_store;
mod available_animals_query;

#[cfg(test)]
pub use adoption_command::MockAdoptionCommand;
pub use adoption_command::{AdoptionCommand, AdoptionRequest, FixtureAdoptionCommand};
#[cfg(test)]
pub use animal_store::MockAnimalStore;
pub use animal_store::{
    AnimalRecord, AnimalStore, AnimalStoreError, FixtureAnimalStore, ReplaceOutcome,
};
#[cfg(test)]
pub use available_animals_query::MockAvailableAnimalsQuery;
pub use available_animals_query::{AvailableAnimalsQuery, FixtureAvailableAnimalsQuery};
