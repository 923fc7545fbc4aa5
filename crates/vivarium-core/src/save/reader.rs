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

//! The read side of the save codec.

use std::io::Read;

use super::ReadError;
use crate::math::{LinearRgba, Vec3};

/// Reads typed fields from an underlying byte source in the save stream format.
///
/// A reader is a *read session*: the schema version of the stream is fixed at
/// construction and exposed through [`version`](Self::version) for the whole
/// session. Load routines consult it to decide which fields exist in the
/// stream; the reader itself never interprets the version.
///
/// The version may be zero or negative; that is how legacy, pre-versioning
/// streams surface after the storage layer negates the leading tag.
#[derive(Debug)]
pub struct SaveReader<R: Read> {
    source: R,
    version: i32,
}

impl<R: Read> SaveReader<R> {
    /// Creates a read session over `source`, pinned to `version`.
    pub fn new(source: R, version: i32) -> Self {
        Self { source, version }
    }

    /// The schema version of the stream being read.
    #[inline]
    pub fn version(&self) -> i32 {
        self.version
    }

    fn fill(&mut self, buffer: &mut [u8]) -> Result<(), ReadError> {
        // `read_exact` reports a partial field as UnexpectedEof, which the
        // error conversion classifies as stream exhaustion.
        self.source.read_exact(buffer).map_err(ReadError::from)
    }

    /// Reads a 32-bit signed integer (4 bytes, little-endian).
    #[inline]
    pub fn read_i32(&mut self) -> Result<i32, ReadError> {
        let mut bytes = [0u8; 4];
        self.fill(&mut bytes)?;
        Ok(i32::from_le_bytes(bytes))
    }

    /// Reads a 32-bit float (4 bytes, little-endian).
    #[inline]
    pub fn read_f32(&mut self) -> Result<f32, ReadError> {
        let mut bytes = [0u8; 4];
        self.fill(&mut bytes)?;
        Ok(f32::from_le_bytes(bytes))
    }

    /// Reads a vector written as three floats, x then y then z.
    #[inline]
    pub fn read_vec3(&mut self) -> Result<Vec3, ReadError> {
        Ok(Vec3::new(self.read_f32()?, self.read_f32()?, self.read_f32()?))
    }

    /// Reads a color written as four floats, r then g then b then a.
    #[inline]
    pub fn read_color(&mut self) -> Result<LinearRgba, ReadError> {
        Ok(LinearRgba::new(
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
        ))
    }
}
