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

//! The habitat: the ordered population of live specimens and its staging.

use std::fmt;
use std::io::{self, Read, Write};

use rand::Rng;

use vivarium_core::math::Vec3;
use vivarium_core::save::{ReadError, SaveReader, SaveWriter};
use vivarium_core::{Persistable, SAVE_VERSION};

use crate::pool::{CatalogPool, PoolError};
use crate::spawn::{self, SpawnZone};
use crate::specimen::{SkinId, Specimen, Transform, VariantId};
use crate::stage::ExhibitDirector;

/// The exhibit assumed for save versions that predate exhibit persistence.
pub const DEFAULT_EXHIBIT: i32 = 1;

/// An error raised while rebuilding a habitat from a save stream.
#[derive(Debug)]
pub enum LoadError {
    /// The stream was written by a newer build than this one.
    UnsupportedVersion {
        /// The version announced by the stream.
        version: i32,
    },
    /// The pool refused to issue a specimen recorded in the stream.
    Pool(PoolError),
    /// The stream itself could not be decoded.
    Read(ReadError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::UnsupportedVersion { version } => write!(
                f,
                "save version {} is newer than this build supports ({})",
                version, SAVE_VERSION
            ),
            LoadError::Pool(err) => write!(f, "could not repopulate habitat: {}", err),
            LoadError::Read(err) => write!(f, "could not decode save stream: {}", err),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::UnsupportedVersion { .. } => None,
            LoadError::Pool(err) => Some(err),
            LoadError::Read(err) => Some(err),
        }
    }
}

impl From<PoolError> for LoadError {
    fn from(err: PoolError) -> Self {
        LoadError::Pool(err)
    }
}

impl From<ReadError> for LoadError {
    fn from(err: ReadError) -> Self {
        LoadError::Read(err)
    }
}

/// The live population of specimens and the exhibit currently on stage.
///
/// The population is an ordered list. Save streams preserve that order
/// exactly; removal swaps with the last element to stay O(1), so despawning
/// reorders the tail and nothing else.
#[derive(Debug)]
pub struct Habitat {
    specimens: Vec<Specimen>,
    exhibit_index: i32,
}

impl Default for Habitat {
    fn default() -> Self {
        Self::new()
    }
}

impl Habitat {
    /// Creates an empty habitat staged at the default exhibit.
    pub fn new() -> Self {
        Self {
            specimens: Vec::new(),
            exhibit_index: DEFAULT_EXHIBIT,
        }
    }

    /// The number of live specimens.
    #[inline]
    pub fn len(&self) -> usize {
        self.specimens.len()
    }

    /// Whether the habitat holds no specimens.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.specimens.is_empty()
    }

    /// The live specimens, in their persisted order.
    pub fn specimens(&self) -> &[Specimen] {
        &self.specimens
    }

    /// The index of the exhibit currently on stage.
    #[inline]
    pub fn exhibit_index(&self) -> i32 {
        self.exhibit_index
    }

    /// Records `index` as the staged exhibit and asks the director for it.
    ///
    /// The request is fire-and-forget. The habitat never waits on scenery;
    /// the recorded index is authoritative from this call onward.
    pub fn stage(&mut self, index: i32, exhibits: &dyn ExhibitDirector) {
        self.exhibit_index = index;
        exhibits.request_exhibit(index);
    }

    /// Spawns one specimen with random identity, placement, and color.
    pub fn spawn(
        &mut self,
        pool: &mut CatalogPool,
        zone: &SpawnZone,
        rng: &mut impl Rng,
    ) -> Result<(), PoolError> {
        let mut specimen = pool.acquire_random(rng)?;
        specimen.set_transform(Transform::new(
            zone.random_point(rng),
            spawn::random_rotation(rng),
            Vec3::ONE * rng.random_range(0.1..1.0),
        ));
        specimen.set_color(spawn::random_spawn_color(rng));
        self.specimens.push(specimen);
        Ok(())
    }

    /// Adds an already-issued specimen to the end of the population.
    pub fn adopt(&mut self, specimen: Specimen) {
        self.specimens.push(specimen);
    }

    /// Removes the specimen at `index` and returns it to the pool.
    ///
    /// The last specimen takes the vacated slot, so this is O(1) and only
    /// the tail changes position. Returns `false` when `index` is out of
    /// range.
    pub fn despawn_at(&mut self, index: usize, pool: &mut CatalogPool) -> bool {
        if index >= self.specimens.len() {
            return false;
        }
        let specimen = self.specimens.swap_remove(index);
        pool.release(specimen);
        true
    }

    /// Removes a uniformly chosen specimen, if any are alive.
    pub fn despawn_random(&mut self, pool: &mut CatalogPool, rng: &mut impl Rng) -> bool {
        if self.specimens.is_empty() {
            return false;
        }
        let index = rng.random_range(0..self.specimens.len());
        self.despawn_at(index, pool)
    }

    /// Returns every specimen to the pool, leaving the habitat empty.
    pub fn clear(&mut self, pool: &mut CatalogPool) {
        for specimen in self.specimens.drain(..) {
            pool.release(specimen);
        }
    }

    /// Writes the population to `writer` in the current schema.
    ///
    /// Layout: specimen count, staged exhibit index, then one record per
    /// specimen in population order. The storage layer owns the leading
    /// version tag; this method writes everything after it.
    pub fn save<W: Write>(&self, writer: &mut SaveWriter<W>) -> io::Result<()> {
        writer.write_i32(self.specimens.len() as i32)?;
        writer.write_i32(self.exhibit_index)?;
        for specimen in &self.specimens {
            let variant = match specimen.variant() {
                Some(id) => id.0,
                None => {
                    log::warn!("Saving an unissued specimen as variant 0.");
                    0
                }
            };
            writer.write_i32(variant)?;
            writer.write_i32(specimen.skin().0)?;
            specimen.save(writer)?;
        }
        Ok(())
    }

    /// Rebuilds the population from `reader`, releasing the old one first.
    ///
    /// Streams from a newer schema are rejected before any state changes.
    /// Anything this build wrote, or any earlier build wrote, loads: missing
    /// fields fall back to the defaults of their era (variant and skin 0,
    /// default color, exhibit [`DEFAULT_EXHIBIT`]). On any other failure the
    /// habitat is left empty rather than half-populated.
    pub fn load<R: Read>(
        &mut self,
        reader: &mut SaveReader<R>,
        pool: &mut CatalogPool,
        exhibits: &dyn ExhibitDirector,
    ) -> Result<(), LoadError> {
        let version = reader.version();
        if version > SAVE_VERSION {
            log::error!(
                "Refusing save stream version {version}; this build reads up to {SAVE_VERSION}."
            );
            return Err(LoadError::UnsupportedVersion { version });
        }

        self.clear(pool);
        if let Err(err) = self.repopulate(reader, pool, exhibits) {
            self.clear(pool);
            return Err(err);
        }
        Ok(())
    }

    fn repopulate<R: Read>(
        &mut self,
        reader: &mut SaveReader<R>,
        pool: &mut CatalogPool,
        exhibits: &dyn ExhibitDirector,
    ) -> Result<(), LoadError> {
        let version = reader.version();

        // Pre-versioning files stored the count where the tag now lives.
        let count = if version <= 0 {
            -version
        } else {
            reader.read_i32()?
        };
        let exhibit = if version >= 2 {
            reader.read_i32()?
        } else {
            DEFAULT_EXHIBIT
        };
        self.stage(exhibit, exhibits);

        for _ in 0..count {
            let variant = if version > 0 {
                VariantId(reader.read_i32()?)
            } else {
                VariantId(0)
            };
            let skin = if version > 0 {
                SkinId(reader.read_i32()?)
            } else {
                SkinId(0)
            };
            let mut specimen = pool.acquire(variant, skin)?;
            if let Err(err) = specimen.load(reader) {
                pool.release(specimen);
                return Err(err.into());
            }
            self.specimens.push(specimen);
        }
        Ok(())
    }
}
