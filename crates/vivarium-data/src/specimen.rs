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

//! The specimen entity and its identity rules.

use std::fmt;
use std::io::{self, Read, Write};

use vivarium_core::math::{LinearRgba, Quaternion, Vec3};
use vivarium_core::save::{Persistable, ReadError, SaveReader, SaveWriter};

/// Identifies which prototype a specimen was issued from.
///
/// Assigned exactly once per pooled instance; see [`Specimen::assign_variant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariantId(pub i32);

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a specimen's appearance (material) choice.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SkinId(pub i32);

impl fmt::Display for SkinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A specimen's placement in the habitat: position, rotation, and scale.
///
/// Placement is runtime state only; it is sampled at spawn time and never
/// written to save streams.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// The translation (position) of the specimen.
    pub translation: Vec3,
    /// The rotation of the specimen, represented as a quaternion.
    pub rotation: Quaternion,
    /// The scale of the specimen.
    pub scale: Vec3,
}

impl Transform {
    /// Creates a new `Transform` with a given translation, rotation, and scale.
    pub fn new(translation: Vec3, rotation: Quaternion, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Creates a new `Transform` with a given translation, and identity rotation/scale.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quaternion::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Creates a new identity `Transform`, with no translation, rotation, or scaling.
    pub fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quaternion::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Default for Transform {
    /// Returns the identity `Transform`.
    fn default() -> Self {
        Self::identity()
    }
}

/// An error raised by the specimen identity rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityError {
    /// The specimen's variant was already assigned; the stored id is unchanged.
    AlreadyAssigned {
        /// The variant the specimen keeps.
        current: VariantId,
        /// The variant the caller tried to overwrite it with.
        attempted: VariantId,
    },
}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityError::AlreadyAssigned { current, attempted } => write!(
                f,
                "specimen variant is already {} and cannot become {}",
                current, attempted
            ),
        }
    }
}

impl std::error::Error for IdentityError {}

/// One live entity of the habitat.
///
/// A specimen's identity is the pair of its variant and skin ids. The
/// variant starts out unassigned (`None`) and is stamped exactly once when
/// the pool issues the instance; the skin is set at issue time and stays
/// fixed until the instance is released. Placement and color are runtime
/// state mutated freely by the spawn path.
#[derive(Debug, Clone, PartialEq)]
pub struct Specimen {
    variant: Option<VariantId>,
    skin: SkinId,
    transform: Transform,
    color: LinearRgba,
}

impl Specimen {
    /// Creates an unissued specimen carrying the given skin.
    ///
    /// The variant is left unassigned; normally the pool stamps it
    /// immediately through [`assign_variant`](Self::assign_variant).
    pub fn with_skin(skin: SkinId) -> Self {
        Self {
            variant: None,
            skin,
            transform: Transform::identity(),
            color: LinearRgba::default(),
        }
    }

    /// The variant this specimen was issued from, if already assigned.
    #[inline]
    pub fn variant(&self) -> Option<VariantId> {
        self.variant
    }

    /// The specimen's appearance id.
    #[inline]
    pub fn skin(&self) -> SkinId {
        self.skin
    }

    /// The specimen's current placement.
    #[inline]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// The specimen's current color.
    #[inline]
    pub fn color(&self) -> LinearRgba {
        self.color
    }

    /// Stamps the specimen's variant identity.
    ///
    /// The transition is one-way: once assigned, further attempts are
    /// rejected and logged, and the stored id never changes. The
    /// unassigned state is an explicit `None`, not a reserved id value, so
    /// the full `i32` range remains valid for variants.
    pub fn assign_variant(&mut self, id: VariantId) -> Result<(), IdentityError> {
        match self.variant {
            None => {
                self.variant = Some(id);
                Ok(())
            }
            Some(current) => {
                log::error!(
                    "Refusing to change specimen variant: already {current}, attempted {id}."
                );
                Err(IdentityError::AlreadyAssigned {
                    current,
                    attempted: id,
                })
            }
        }
    }

    /// Sets the specimen's placement.
    #[inline]
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    /// Sets the specimen's color.
    #[inline]
    pub fn set_color(&mut self, color: LinearRgba) {
        self.color = color;
    }

    /// Re-skins the instance for its next issue. Pool-internal.
    pub(crate) fn set_skin(&mut self, skin: SkinId) {
        self.skin = skin;
    }

    /// Returns the instance to its unissued state: identity cleared, runtime
    /// state back to defaults. Pool-internal, called on release so that the
    /// next issue's identity stamp is the instance's first again.
    pub(crate) fn reset_for_reuse(&mut self) {
        self.variant = None;
        self.skin = SkinId::default();
        self.transform = Transform::identity();
        self.color = LinearRgba::default();
    }
}

impl Persistable for Specimen {
    /// Writes the specimen's own record fields (its color).
    ///
    /// The identity ids are written by the habitat ahead of this record, so
    /// the pool can re-issue the right prototype before the record body is
    /// applied on load.
    fn save<W: Write>(&self, writer: &mut SaveWriter<W>) -> io::Result<()> {
        writer.write_color(self.color)
    }

    /// Reads the specimen's own record fields according to the stream version.
    ///
    /// Streams older than version 2 carry no color; those specimens take the
    /// neutral default.
    fn load<R: Read>(&mut self, reader: &mut SaveReader<R>) -> Result<(), ReadError> {
        self.color = if reader.version() >= 2 {
            reader.read_color()?
        } else {
            LinearRgba::default()
        };
        Ok(())
    }
}
