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

//! The typed codec for Vivarium save streams.
//!
//! Save data is a sequence of fixed-width little-endian fields with no
//! padding and no per-field self-description: write order is read order, and
//! the only self-describing value in a file is the leading envelope tag
//! applied by the storage layer. [`SaveWriter`] and [`SaveReader`] are the
//! typed boundary over that byte stream; a reader additionally pins the
//! schema version of the stream for the whole read session, so every load
//! routine decides which fields to expect from one immutable number.

use std::io;

mod error;
mod reader;
mod writer;

pub use error::ReadError;
pub use reader::SaveReader;
pub use writer::SaveWriter;

/// The schema version written into every new save stream.
///
/// Streams are only ever produced at this version; they may be consumed at
/// any version up to and including it. Version history:
///
/// - `0` (implicit): files written before versioning existed carry no tag at
///   all; the first integer is the specimen count itself.
/// - `1`: a leading negated-version tag, an explicit count field, and
///   per-record variant/skin ids.
/// - `2`: a habitat-level exhibit index after the count, and a per-record
///   color.
pub const SAVE_VERSION: i32 = 2;

/// The save/load capability implemented by each persisted entity kind.
///
/// The root aggregate dispatches to these methods explicitly, in roster
/// order. `load` must consult [`SaveReader::version`] for every field that
/// was not present in all schema versions, and must leave the receiver in a
/// fully defaulted state for fields the stream predates.
pub trait Persistable {
    /// Writes this value's own fields, in their fixed order.
    fn save<W: io::Write>(&self, writer: &mut SaveWriter<W>) -> io::Result<()>;

    /// Reads this value's own fields according to the reader's version.
    fn load<R: io::Read>(&mut self, reader: &mut SaveReader<R>) -> Result<(), ReadError>;
}
