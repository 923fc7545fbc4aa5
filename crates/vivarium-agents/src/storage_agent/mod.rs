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

//! The storage agent: the envelope layer around habitat save streams.
//!
//! The first `i32` of every stream is a dual-purpose tag. Current builds
//! write the negated schema version, so the tag of a versioned file is
//! always negative. Files from before versioning start with a plain
//! non-negative specimen count instead. Negating the tag on read turns
//! both cases into a single signed version number: positive for versioned
//! streams, zero or negative for legacy ones, where the negated value is
//! the count itself. The tag is the only part of the stream this module
//! interprets; everything behind it belongs to [`Habitat`].

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use vivarium_core::save::{ReadError, SaveReader, SaveWriter};
use vivarium_core::SAVE_VERSION;
use vivarium_data::habitat::LoadError;
use vivarium_data::stage::ExhibitDirector;
use vivarium_data::{CatalogPool, Habitat};

/// An error raised while saving or loading a habitat through storage.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The underlying file or stream failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    /// The stream ended or broke before the envelope was decoded.
    #[error("save stream was malformed: {0}")]
    Read(#[from] ReadError),
    /// The stream decoded but could not be applied to the habitat.
    #[error("save stream could not be applied: {0}")]
    Load(#[from] LoadError),
}

/// Writes `habitat` to `sink` as a complete versioned save stream.
///
/// The stream opens with the negated current schema version, followed by
/// the habitat's own layout.
pub fn write_save_stream<W: Write>(habitat: &Habitat, sink: W) -> Result<(), StorageError> {
    let mut writer = SaveWriter::new(sink);
    writer.write_i32(-SAVE_VERSION)?;
    habitat.save(&mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Rebuilds `habitat` from the save stream in `source`.
///
/// Decodes the leading tag into a schema version and hands the rest of the
/// stream to [`Habitat::load`], which applies the version's layout.
pub fn read_save_stream<R: Read>(
    habitat: &mut Habitat,
    mut source: R,
    pool: &mut CatalogPool,
    exhibits: &dyn ExhibitDirector,
) -> Result<(), StorageError> {
    let tag = read_leading_tag(&mut source)?;
    let version = -tag;
    log::debug!("Save stream tag {tag} decoded as version {version}.");
    let mut reader = SaveReader::new(source, version);
    habitat.load(&mut reader, pool, exhibits)?;
    Ok(())
}

fn read_leading_tag<R: Read>(source: &mut R) -> Result<i32, ReadError> {
    let mut buffer = [0u8; 4];
    source.read_exact(&mut buffer).map_err(ReadError::from)?;
    Ok(i32::from_le_bytes(buffer))
}

/// Persists habitats to a fixed path on disk.
///
/// The agent holds no open handles between calls. Each save truncates and
/// rewrites the whole file; each load reads it front to back.
#[derive(Debug, Clone)]
pub struct StorageAgent {
    path: PathBuf,
}

impl StorageAgent {
    /// Creates a storage agent writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path this agent saves to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saves `habitat` to the agent's path, replacing any previous file.
    pub fn save(&self, habitat: &Habitat) -> Result<(), StorageError> {
        let file = File::create(&self.path)?;
        write_save_stream(habitat, BufWriter::new(file))?;
        log::info!(
            "Saved {} specimens to {}.",
            habitat.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Loads `habitat` from the agent's path.
    pub fn load(
        &self,
        habitat: &mut Habitat,
        pool: &mut CatalogPool,
        exhibits: &dyn ExhibitDirector,
    ) -> Result<(), StorageError> {
        let file = File::open(&self.path)?;
        read_save_stream(habitat, BufReader::new(file), pool, exhibits)?;
        log::info!(
            "Loaded {} specimens from {}.",
            habitat.len(),
            self.path.display()
        );
        Ok(())
    }
}
