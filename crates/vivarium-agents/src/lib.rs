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

//! # Vivarium Agents
//!
//! Long-lived drivers that operate on vivarium state: the storage agent
//! that moves habitats to and from disk, the exhibit agent that runs stage
//! transitions on a background thread, and the caretaker that advances a
//! whole simulation session.

#![warn(missing_docs)]

pub mod caretaker;
pub mod exhibit_agent;
pub mod storage_agent;

pub use caretaker::{Caretaker, CaretakerConfig};
pub use exhibit_agent::{ExhibitAgent, ExhibitAgentConfig, ExhibitDirectorHandle, ExhibitEvent};
pub use storage_agent::{StorageAgent, StorageError};
