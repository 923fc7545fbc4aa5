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

//! Error types for the read side of the save codec.

use std::fmt;
use std::io;

/// An error that can occur while reading fields from a save stream.
#[derive(Debug)]
pub enum ReadError {
    /// The stream ended before the current field was fully read.
    ///
    /// A load hitting this is aborted as a whole; the codec makes no attempt
    /// to recover a partially decoded field.
    StreamExhausted,
    /// The underlying reader failed for a reason other than running out of data.
    Io(io::Error),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::StreamExhausted => {
                write!(f, "save stream ended in the middle of a field")
            }
            ReadError::Io(err) => write!(f, "save stream read failed: {}", err),
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReadError::StreamExhausted => None,
            ReadError::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for ReadError {
    /// Classifies an I/O failure: an unexpected end of file is the codec's
    /// stream-exhausted condition, everything else passes through.
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            ReadError::StreamExhausted
        } else {
            ReadError::Io(err)
        }
    }
}
