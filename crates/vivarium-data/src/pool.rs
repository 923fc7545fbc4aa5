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

//! The pooling allocator that issues and recycles specimen instances.

use std::fmt;

use rand::Rng;

use crate::specimen::{IdentityError, SkinId, Specimen, VariantId};

/// The closed space of specimen prototypes and appearances.
///
/// Variants and skins are independent axes: any variant may be issued with
/// any skin. Valid ids are `0..variant_count` and `0..skin_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecimenCatalog {
    variant_count: usize,
    skin_count: usize,
}

impl SpecimenCatalog {
    /// Creates a catalog with the given number of variants and skins.
    ///
    /// # Panics
    /// Panics if either count is zero; an empty catalog cannot issue anything.
    pub fn new(variant_count: usize, skin_count: usize) -> Self {
        assert!(variant_count > 0, "a catalog needs at least one variant");
        assert!(skin_count > 0, "a catalog needs at least one skin");
        Self {
            variant_count,
            skin_count,
        }
    }

    /// The number of variants in the catalog.
    #[inline]
    pub fn variant_count(&self) -> usize {
        self.variant_count
    }

    /// The number of skins in the catalog.
    #[inline]
    pub fn skin_count(&self) -> usize {
        self.skin_count
    }

    /// Whether `id` names a variant of this catalog.
    pub fn contains_variant(&self, id: VariantId) -> bool {
        usize::try_from(id.0).is_ok_and(|index| index < self.variant_count)
    }

    /// Whether `id` names a skin of this catalog.
    pub fn contains_skin(&self, id: SkinId) -> bool {
        usize::try_from(id.0).is_ok_and(|index| index < self.skin_count)
    }
}

/// An error raised when the pool cannot issue a specimen.
///
/// Ids reach the pool straight from save files, so out-of-catalog values are
/// data errors to report, never a reason to panic or index out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    /// The requested variant id is not part of the catalog.
    UnknownVariant(VariantId),
    /// The requested skin id is not part of the catalog.
    UnknownSkin(SkinId),
    /// The identity stamp failed on issue.
    Identity(IdentityError),
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::UnknownVariant(id) => {
                write!(f, "variant {} is not in the specimen catalog", id)
            }
            PoolError::UnknownSkin(id) => {
                write!(f, "skin {} is not in the specimen catalog", id)
            }
            PoolError::Identity(err) => write!(f, "could not issue specimen: {}", err),
        }
    }
}

impl std::error::Error for PoolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PoolError::Identity(err) => Some(err),
            _ => None,
        }
    }
}

impl From<IdentityError> for PoolError {
    fn from(err: IdentityError) -> Self {
        PoolError::Identity(err)
    }
}

/// A pooling allocator over a [`SpecimenCatalog`].
///
/// Released instances are kept in one recycle bin per variant and re-issued
/// LIFO before anything new is constructed. Issue and release move whole
/// [`Specimen`] values, so a released instance cannot be used again without
/// an intervening acquire.
#[derive(Debug)]
pub struct CatalogPool {
    catalog: SpecimenCatalog,
    bins: Vec<Vec<Specimen>>,
}

impl CatalogPool {
    /// Creates an empty pool over the given catalog.
    pub fn new(catalog: SpecimenCatalog) -> Self {
        let bins = (0..catalog.variant_count()).map(|_| Vec::new()).collect();
        Self { catalog, bins }
    }

    /// The catalog this pool issues from.
    pub fn catalog(&self) -> &SpecimenCatalog {
        &self.catalog
    }

    /// Issues a specimen of the given variant and skin.
    ///
    /// A recycled instance is reused when the variant's bin is non-empty,
    /// otherwise a fresh one is constructed. Either way the instance leaves
    /// with the requested skin and its variant stamped through the one-time
    /// identity transition.
    pub fn acquire(&mut self, variant: VariantId, skin: SkinId) -> Result<Specimen, PoolError> {
        let index = self.bin_index(variant)?;
        if !self.catalog.contains_skin(skin) {
            return Err(PoolError::UnknownSkin(skin));
        }

        let mut specimen = self.bins[index]
            .pop()
            .unwrap_or_else(|| Specimen::with_skin(skin));
        specimen.set_skin(skin);
        // Bin instances were reset on release, so this stamp is their first.
        specimen.assign_variant(variant)?;
        Ok(specimen)
    }

    /// Issues a specimen with uniformly random variant and skin.
    pub fn acquire_random(&mut self, rng: &mut impl Rng) -> Result<Specimen, PoolError> {
        let variant = VariantId(rng.random_range(0..self.catalog.variant_count() as i32));
        let skin = SkinId(rng.random_range(0..self.catalog.skin_count() as i32));
        self.acquire(variant, skin)
    }

    /// Takes a specimen back, resets it, and files it for reuse.
    ///
    /// Instances that never received a variant are discarded with a warning;
    /// there is no bin to file them under.
    pub fn release(&mut self, mut specimen: Specimen) {
        let Some(variant) = specimen.variant() else {
            log::warn!("Discarding an unissued specimen; it has no variant to recycle under.");
            return;
        };
        match self.bin_index(variant) {
            Ok(index) => {
                specimen.reset_for_reuse();
                self.bins[index].push(specimen);
            }
            Err(_) => {
                log::warn!("Discarding a specimen of variant {variant}, which is not in this catalog.");
            }
        }
    }

    /// The number of recycled instances currently pooled for `variant`.
    pub fn pooled_count(&self, variant: VariantId) -> usize {
        self.bin_index(variant)
            .map(|index| self.bins[index].len())
            .unwrap_or(0)
    }

    fn bin_index(&self, variant: VariantId) -> Result<usize, PoolError> {
        usize::try_from(variant.0)
            .ok()
            .filter(|&index| index < self.catalog.variant_count())
            .ok_or(PoolError::UnknownVariant(variant))
    }
}
