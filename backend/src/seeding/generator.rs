//! Deterministic animal generation.

use fake::Fake;
use fake::faker::name::raw::FirstName;
use fake::locales::EN;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::domain::{Animal, AnimalId, AnimalName};

/// Attempts per animal before giving up on producing a valid name.
const MAX_NAME_ATTEMPTS: usize = 16;

/// The generator could not produce a valid animal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no valid animal name after {attempts} attempts")]
pub struct GenerationError {
    pub attempts: usize,
}

/// Generate `count` available animals with UUID ids and first-name names.
///
/// The same `rng_seed` always yields the same animals in the same order.
///
/// # Examples
/// ```
/// use shelter::seeding::generate_animals;
///
/// let first = generate_animals(3, 42).expect("generated");
/// let again = generate_animals(3, 42).expect("generated");
/// assert_eq!(first, again);
/// assert!(first.iter().all(|animal| animal.is_available()));
/// ```
pub fn generate_animals(count: usize, rng_seed: u64) -> Result<Vec<Animal>, GenerationError> {
    let mut rng = ChaCha8Rng::seed_from_u64(rng_seed);
    (0..count).map(|_| generate_animal(&mut rng)).collect()
}

fn generate_animal(rng: &mut ChaCha8Rng) -> Result<Animal, GenerationError> {
    let id = AnimalId::from_uuid(Uuid::from_u128(rng.random()));
    let name = generate_name(rng)?;
    Ok(Animal::new(id, name))
}

fn generate_name(rng: &mut ChaCha8Rng) -> Result<AnimalName, GenerationError> {
    for _ in 0..MAX_NAME_ATTEMPTS {
        let candidate: String = FirstName(EN).fake_with_rng(rng);
        if let Ok(name) = AnimalName::new(candidate) {
            return Ok(name);
        }
    }
    Err(GenerationError {
        attempts: MAX_NAME_ATTEMPTS,
    })
}
