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

//! Defines the `LinearRgba` color type and associated operations.

/// Represents a color in a **linear RGBA** color space using `f32` components.
///
/// This struct is the standard color representation within Vivarium. It is the
/// per-specimen appearance value carried through save files, so its component
/// order (r, g, b, a) matches the on-disk field order exactly.
///
/// `#[repr(C)]` ensures a consistent memory layout.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct LinearRgba {
    /// The red component in linear space.
    pub r: f32,
    /// The green component in linear space.
    pub g: f32,
    /// The blue component in linear space.
    pub b: f32,
    /// The alpha (opacity) component.
    pub a: f32,
}

impl LinearRgba {
    // --- Common Color Constants ---

    /// Opaque red (`[1.0, 0.0, 0.0, 1.0]`).
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    /// Opaque green (`[0.0, 1.0, 0.0, 1.0]`).
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    /// Opaque blue (`[0.0, 0.0, 1.0, 1.0]`).
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    /// Opaque white (`[1.0, 1.0, 1.0, 1.0]`).
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque black (`[0.0, 0.0, 0.0, 1.0]`).
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Creates a new `LinearRgba` with explicit RGBA values.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a new opaque `LinearRgba` (alpha = 1.0).
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates an opaque color from hue, saturation, and value.
    ///
    /// `hue` is expressed in turns: `0.0` and `1.0` are both red, and the
    /// value wraps, so any finite hue is accepted. `saturation` and `value`
    /// are expected in `[0.0, 1.0]`.
    #[inline]
    pub fn from_hsv(hue: f32, saturation: f32, value: f32) -> Self {
        // Wrap the hue into [0, 1) before scaling to the six sectors.
        let h = (hue.fract() + 1.0).fract() * 6.0;
        let sector = h.floor();
        let f = h - sector;

        let p = value * (1.0 - saturation);
        let q = value * (1.0 - saturation * f);
        let t = value * (1.0 - saturation * (1.0 - f));

        let (r, g, b) = match sector as i32 {
            0 => (value, t, p),
            1 => (q, value, p),
            2 => (p, value, t),
            3 => (p, q, value),
            4 => (t, p, value),
            _ => (value, p, q),
        };
        Self::rgb(r, g, b)
    }

    /// Linearly interpolates between two colors.
    /// The factor `t` is clamped to `[0.0, 1.0]`.
    #[inline]
    pub fn lerp(start: Self, end: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: start.r + (end.r - start.r) * t,
            g: start.g + (end.g - start.g) * t,
            b: start.b + (end.b - start.b) * t,
            a: start.a + (end.a - start.a) * t,
        }
    }
}

impl Default for LinearRgba {
    /// Returns opaque white by default.
    #[inline]
    fn default() -> Self {
        Self::WHITE
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    fn color_approx_eq(a: LinearRgba, b: LinearRgba) -> bool {
        approx_eq(a.r, b.r) && approx_eq(a.g, b.g) && approx_eq(a.b, b.b) && approx_eq(a.a, b.a)
    }

    #[test]
    fn test_default_is_white() {
        assert_eq!(LinearRgba::default(), LinearRgba::WHITE);
        assert_eq!(LinearRgba::WHITE.a, 1.0);
    }

    #[test]
    fn test_from_hsv_primaries() {
        assert!(color_approx_eq(
            LinearRgba::from_hsv(0.0, 1.0, 1.0),
            LinearRgba::RED
        ));
        assert!(color_approx_eq(
            LinearRgba::from_hsv(1.0 / 3.0, 1.0, 1.0),
            LinearRgba::GREEN
        ));
        assert!(color_approx_eq(
            LinearRgba::from_hsv(2.0 / 3.0, 1.0, 1.0),
            LinearRgba::BLUE
        ));
    }

    #[test]
    fn test_from_hsv_desaturated_and_wrapped() {
        // Zero saturation collapses to a gray of the given value.
        let gray = LinearRgba::from_hsv(0.7, 0.0, 0.25);
        assert!(color_approx_eq(gray, LinearRgba::rgb(0.25, 0.25, 0.25)));

        // A full extra turn lands on the same color.
        assert!(color_approx_eq(
            LinearRgba::from_hsv(1.25, 0.8, 0.9),
            LinearRgba::from_hsv(0.25, 0.8, 0.9)
        ));

        // Negative hues wrap the other way.
        assert!(color_approx_eq(
            LinearRgba::from_hsv(-1.0 / 3.0, 1.0, 1.0),
            LinearRgba::BLUE
        ));
    }

    #[test]
    fn test_lerp() {
        let mid = LinearRgba::lerp(LinearRgba::BLACK, LinearRgba::WHITE, 0.5);
        assert!(color_approx_eq(mid, LinearRgba::rgb(0.5, 0.5, 0.5)));

        // The factor is clamped at both ends.
        assert_eq!(
            LinearRgba::lerp(LinearRgba::BLACK, LinearRgba::WHITE, -2.0),
            LinearRgba::BLACK
        );
        assert_eq!(
            LinearRgba::lerp(LinearRgba::BLACK, LinearRgba::WHITE, 3.0),
            LinearRgba::WHITE
        );
    }
}
