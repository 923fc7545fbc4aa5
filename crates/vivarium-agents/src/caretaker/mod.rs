// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The caretaker: owns a running session and advances it over time.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use vivarium_data::spawn::SpawnZone;
use vivarium_data::stage::ExhibitDirector;
use vivarium_data::{CatalogPool, Habitat, SpecimenCatalog};

use crate::storage_agent::{StorageAgent, StorageError};

/// Configuration for a caretaker session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaretakerConfig {
    /// Specimens spawned per second of advanced time.
    pub creation_per_second: f32,
    /// Specimens despawned per second of advanced time.
    pub destruction_per_second: f32,
    /// Where the session is saved to and loaded from.
    pub save_path: PathBuf,
    /// The region new specimens appear in.
    pub zone: SpawnZone,
}

impl Default for CaretakerConfig {
    fn default() -> Self {
        Self {
            creation_per_second: 4.0,
            destruction_per_second: 1.0,
            save_path: PathBuf::from("habitat.save"),
            zone: SpawnZone::default(),
        }
    }
}

/// Drives one habitat through time: automatic spawning and despawning,
/// session resets, and persistence.
///
/// Rates below one per second still fire; fractional progress carries
/// across calls to [`advance`](Caretaker::advance) until it crosses a
/// whole unit.
pub struct Caretaker {
    config: CaretakerConfig,
    habitat: Habitat,
    pool: CatalogPool,
    storage: StorageAgent,
    exhibits: Box<dyn ExhibitDirector>,
    creation_progress: f32,
    destruction_progress: f32,
}

impl Caretaker {
    /// Creates a caretaker with an empty habitat over `catalog`.
    pub fn new(
        config: CaretakerConfig,
        catalog: SpecimenCatalog,
        exhibits: Box<dyn ExhibitDirector>,
    ) -> Self {
        let storage = StorageAgent::new(config.save_path.clone());
        Self {
            config,
            habitat: Habitat::new(),
            pool: CatalogPool::new(catalog),
            storage,
            exhibits,
            creation_progress: 0.0,
            destruction_progress: 0.0,
        }
    }

    /// The habitat this caretaker drives.
    pub fn habitat(&self) -> &Habitat {
        &self.habitat
    }

    /// The pool backing the habitat.
    pub fn pool(&self) -> &CatalogPool {
        &self.pool
    }

    /// The active configuration.
    pub fn config(&self) -> &CaretakerConfig {
        &self.config
    }

    /// Advances the session by `dt`, spawning and despawning at the
    /// configured rates.
    pub fn advance(&mut self, dt: Duration) {
        let dt = dt.as_secs_f32();

        self.creation_progress += self.config.creation_per_second * dt;
        while self.creation_progress >= 1.0 {
            self.creation_progress -= 1.0;
            self.spawn_one();
        }

        self.destruction_progress += self.config.destruction_per_second * dt;
        while self.destruction_progress >= 1.0 {
            self.destruction_progress -= 1.0;
            self.despawn_one();
        }
    }

    /// Spawns one random specimen immediately.
    pub fn spawn_one(&mut self) {
        let mut rng = rand::rng();
        if let Err(err) = self.habitat.spawn(&mut self.pool, &self.config.zone, &mut rng) {
            log::error!("Could not spawn a specimen: {err}");
        }
    }

    /// Despawns one random specimen immediately, if any are alive.
    pub fn despawn_one(&mut self) {
        self.habitat.despawn_random(&mut self.pool, &mut rand::rng());
    }

    /// Discards the current population and stages a fresh session at
    /// `exhibit`.
    pub fn begin_session(&mut self, exhibit: i32) {
        self.habitat.clear(&mut self.pool);
        self.creation_progress = 0.0;
        self.destruction_progress = 0.0;
        self.habitat.stage(exhibit, self.exhibits.as_ref());
        log::info!("New session at exhibit {exhibit}.");
    }

    /// Saves the session to the configured path.
    pub fn save(&self) -> Result<(), StorageError> {
        self.storage.save(&self.habitat)
    }

    /// Restores the session from the configured path.
    ///
    /// On failure the habitat is left empty, never half-restored; the
    /// session keeps running either way.
    pub fn load(&mut self) -> Result<(), StorageError> {
        self.creation_progress = 0.0;
        self.destruction_progress = 0.0;
        self.storage
            .load(&mut self.habitat, &mut self.pool, self.exhibits.as_ref())
    }
}
