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

//! Random placement and appearance for freshly spawned specimens.

use rand::Rng;
use serde::{Deserialize, Serialize};

use vivarium_core::math::{LinearRgba, Quaternion, Vec3, TAU};

/// A spherical region that newly spawned specimens appear in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnZone {
    /// Center of the zone in world space.
    pub center: Vec3,
    /// Radius of the zone. Non-positive radii collapse to the center point.
    pub radius: f32,
}

impl Default for SpawnZone {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            radius: 5.0,
        }
    }
}

impl SpawnZone {
    /// Creates a zone centered at `center` with the given `radius`.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Samples a uniformly distributed point inside the zone.
    ///
    /// Uses rejection sampling from the bounding cube, which keeps the
    /// distribution uniform over the ball without any trigonometry.
    pub fn random_point(&self, rng: &mut impl Rng) -> Vec3 {
        let offset = loop {
            let candidate = Vec3::new(
                rng.random_range(-1.0..=1.0),
                rng.random_range(-1.0..=1.0),
                rng.random_range(-1.0..=1.0),
            );
            if candidate.length_squared() <= 1.0 {
                break candidate;
            }
        };
        self.center + offset * self.radius
    }
}

/// Samples a uniformly distributed unit rotation.
///
/// Shoemake's subgroup algorithm: three uniform scalars map onto the unit
/// quaternion group without clustering at the poles.
pub fn random_rotation(rng: &mut impl Rng) -> Quaternion {
    let u1: f32 = rng.random_range(0.0..1.0);
    let u2: f32 = rng.random_range(0.0..TAU);
    let u3: f32 = rng.random_range(0.0..TAU);

    let a = (1.0 - u1).sqrt();
    let b = u1.sqrt();
    Quaternion::new(a * u2.sin(), a * u2.cos(), b * u3.sin(), b * u3.cos())
}

/// Samples the color a specimen wears when first spawned.
///
/// Hue spans the full wheel; saturation and value are floored so nothing
/// comes out grey or near-black.
pub fn random_spawn_color(rng: &mut impl Rng) -> LinearRgba {
    LinearRgba::from_hsv(
        rng.random_range(0.0..1.0),
        rng.random_range(0.5..1.0),
        rng.random_range(0.25..1.0),
    )
}
