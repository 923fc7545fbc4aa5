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

//! # Vivarium Data
//!
//! The simulated habitat state: specimens and their identity rules, the
//! habitat root aggregate with its versioned save/load, the pooling
//! allocator that recycles specimen instances, and the spawn sampling
//! helpers.

#![warn(missing_docs)]

pub mod habitat;
pub mod pool;
pub mod spawn;
pub mod specimen;
pub mod stage;

pub use habitat::{Habitat, LoadError, DEFAULT_EXHIBIT};
pub use pool::{CatalogPool, SpecimenCatalog};
pub use specimen::{Specimen, SkinId, VariantId};
