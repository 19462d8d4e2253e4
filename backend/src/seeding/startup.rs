//! Startup seeding orchestration.

use tracing::info;

use crate::domain::ports::{AnimalStore, AnimalStoreError};

use super::config::SeedSettings;
use super::generator::{GenerationError, generate_animals};

/// Seeding failed in a way that should abort startup.
#[derive(Debug, thiserror::Error)]
pub enum SeedingError {
    #[error("seed generation failed: {0}")]
    Generation(#[from] GenerationError),
    #[error("seed insert failed: {0}")]
    Store(#[from] AnimalStoreError),
}

/// What startup seeding did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Disabled,
    Applied { inserted: usize },
    /// The deterministic batch is already present from an earlier run.
    AlreadySeeded,
}

/// Insert generated animals into `store` when seeding is enabled.
///
/// Inserts are all-or-nothing, so a duplicate id means the same seed was
/// applied before and nothing new is written.
pub async fn seed_on_startup<S>(
    settings: &SeedSettings,
    store: &S,
) -> Result<SeedOutcome, SeedingError>
where
    S: AnimalStore + ?Sized,
{
    if !settings.enabled {
        info!(reason = "disabled", "animal seeding skipped");
        return Ok(SeedOutcome::Disabled);
    }

    let animals = generate_animals(settings.count(), settings.rng_seed())?;
    match store.insert_many(&animals).await {
        Ok(inserted) => {
            info!(inserted, rng_seed = settings.rng_seed(), "animal seeding applied");
            Ok(SeedOutcome::Applied { inserted })
        }
        Err(AnimalStoreError::DuplicateAnimal { animal_id }) => {
            info!(
                %animal_id,
                rng_seed = settings.rng_seed(),
                "animal seed already applied; skipping"
            );
            Ok(SeedOutcome::AlreadySeeded)
        }
        Err(err) => Err(err.into()),
    }
}
