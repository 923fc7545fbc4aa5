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

//! The write side of the save codec.

use std::io::{self, Write};

use crate::math::{LinearRgba, Vec3};

// NOTE: Fields are packed with explicit `to_le_bytes` rather than any
// derive-based serializer. The on-disk format is little-endian on every
// host, and files written before this crate existed must keep decoding
// byte for byte.

/// Writes typed fields to an underlying byte sink in the save stream format.
///
/// Every method appends exactly the bytes of its field, in declaration
/// order, with no framing. The writer never records a version number; the
/// storage layer owns the envelope tag.
#[derive(Debug)]
pub struct SaveWriter<W: Write> {
    sink: W,
}

impl<W: Write> SaveWriter<W> {
    /// Creates a writer over the given byte sink.
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Writes a 32-bit signed integer (4 bytes, little-endian).
    #[inline]
    pub fn write_i32(&mut self, value: i32) -> io::Result<()> {
        self.sink.write_all(&value.to_le_bytes())
    }

    /// Writes a 32-bit float (4 bytes, little-endian).
    #[inline]
    pub fn write_f32(&mut self, value: f32) -> io::Result<()> {
        self.sink.write_all(&value.to_le_bytes())
    }

    /// Writes a vector as three floats, x then y then z.
    #[inline]
    pub fn write_vec3(&mut self, value: Vec3) -> io::Result<()> {
        self.write_f32(value.x)?;
        self.write_f32(value.y)?;
        self.write_f32(value.z)
    }

    /// Writes a color as four floats, r then g then b then a.
    #[inline]
    pub fn write_color(&mut self, value: LinearRgba) -> io::Result<()> {
        self.write_f32(value.r)?;
        self.write_f32(value.g)?;
        self.write_f32(value.b)?;
        self.write_f32(value.a)
    }

    /// Flushes the underlying sink.
    pub fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_i32_wire_layout_is_little_endian() {
        let mut buffer = Vec::new();
        let mut writer = SaveWriter::new(&mut buffer);
        writer.write_i32(1).unwrap();
        writer.write_i32(-2).unwrap();

        assert_eq!(buffer, [0x01, 0x00, 0x00, 0x00, 0xFE, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_compound_fields_concatenate_components() {
        let mut buffer = Vec::new();
        let mut writer = SaveWriter::new(&mut buffer);
        writer.write_vec3(Vec3::new(1.0, 2.0, 3.0)).unwrap();
        writer.write_color(LinearRgba::new(0.1, 0.2, 0.3, 1.0)).unwrap();

        assert_eq!(buffer.len(), 3 * 4 + 4 * 4);
        assert_eq!(buffer[0..4], 1.0f32.to_le_bytes());
        assert_eq!(buffer[12..16], 0.1f32.to_le_bytes());
        assert_eq!(buffer[24..28], 1.0f32.to_le_bytes());
    }
}
