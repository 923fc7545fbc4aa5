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

//! The boundary between habitat state and the exhibit machinery driving it.

/// Receives requests to bring an exhibit on stage.
///
/// The habitat fires a request and moves on; any scenery work happens behind
/// this trait, on whatever schedule the implementor chooses. Implementations
/// must accept repeated requests for the exhibit already staged.
pub trait ExhibitDirector {
    /// Requests that the exhibit at `index` be brought on stage.
    fn request_exhibit(&self, index: i32);
}

/// An [`ExhibitDirector`] that ignores every request.
///
/// Useful for headless runs and tests that only care about habitat state.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullExhibitDirector;

impl ExhibitDirector for NullExhibitDirector {
    fn request_exhibit(&self, _index: i32) {}
}
