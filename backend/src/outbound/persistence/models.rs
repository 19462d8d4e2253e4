//! Row types for the `animals` table.

use diesel::prelude::*;

use crate::domain::ports::{AnimalRecord, AnimalStoreError};
use crate::domain::{Animal, AnimalId, AnimalName};

use super::schema::animals;

/// Columns read back when rehydrating an animal.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = animals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AnimalRow {
    pub id: String,
    pub name: String,
    pub available: bool,
    pub revision: i32,
}

/// Insert payload; timestamps default in the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = animals)]
pub(crate) struct NewAnimalRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub available: bool,
    pub revision: i32,
}

impl<'a> NewAnimalRow<'a> {
    pub(crate) fn from_animal(animal: &'a Animal, revision: i32) -> Self {
        Self {
            id: animal.id().as_str(),
            name: animal.name().as_str(),
            available: animal.is_available(),
            revision,
        }
    }
}

impl TryFrom<AnimalRow> for AnimalRecord {
    type Error = AnimalStoreError;

    fn try_from(row: AnimalRow) -> Result<Self, Self::Error> {
        let corrupt = |detail: String| {
            AnimalStoreError::query(format!("corrupt animal row {}: {detail}", row.id))
        };
        let id = AnimalId::new(row.id.as_str()).map_err(|err| corrupt(err.to_string()))?;
        let name = AnimalName::new(row.name.as_str()).map_err(|err| corrupt(err.to_string()))?;
        let revision = u32::try_from(row.revision)
            .map_err(|_| corrupt(format!("negative revision {}", row.revision)))?;
        Ok(AnimalRecord::new(
            Animal::restore(id, name, row.available),
            revision,
        ))
    }
}
