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

use std::fs;
use std::time::Duration;

use vivarium_agents::storage_agent::StorageAgent;
use vivarium_agents::{Caretaker, CaretakerConfig, ExhibitAgent, ExhibitAgentConfig, ExhibitEvent};
use vivarium_core::math::LinearRgba;
use vivarium_core::SAVE_VERSION;
use vivarium_data::habitat::LoadError;
use vivarium_data::specimen::{SkinId, VariantId};
use vivarium_data::stage::NullExhibitDirector;
use vivarium_data::{CatalogPool, Habitat, SpecimenCatalog, DEFAULT_EXHIBIT};

// --- HELPERS FOR HAND-BUILT SAVE FILES ---
fn le_bytes(values: &[i32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(values.len() * 4);
    for value in values {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

fn pool() -> CatalogPool {
    CatalogPool::new(SpecimenCatalog::new(4, 4))
}

#[test]
fn test_saved_population_survives_a_full_disk_round_trip() {
    // --- 1. ARRANGE ---
    // Build a habitat whose specimens are all distinguishable from each other.
    let dir = tempfile::tempdir().unwrap();
    let storage = StorageAgent::new(dir.path().join("habitat.save"));
    let mut pool = pool();

    let mut habitat = Habitat::new();
    habitat.stage(2, &NullExhibitDirector);
    for id in 0..4 {
        let mut specimen = pool.acquire(VariantId(id), SkinId(3 - id)).unwrap();
        specimen.set_color(LinearRgba::new(id as f32 * 0.2, 0.1, 0.9, 1.0));
        habitat.adopt(specimen);
    }

    // --- 2. ACT ---
    storage.save(&habitat).unwrap();
    let mut restored = Habitat::new();
    storage
        .load(&mut restored, &mut pool, &NullExhibitDirector)
        .unwrap();

    // --- 3. ASSERT ---
    // Save order is load order; every record keeps its identity and color.
    assert_eq!(restored.len(), 4, "every saved specimen should come back");
    assert_eq!(restored.exhibit_index(), 2);
    for (id, specimen) in restored.specimens().iter().enumerate() {
        assert_eq!(specimen.variant(), Some(VariantId(id as i32)));
        assert_eq!(specimen.skin(), SkinId(3 - id as i32));
        assert_eq!(
            specimen.color(),
            LinearRgba::new(id as f32 * 0.2, 0.1, 0.9, 1.0)
        );
    }
}

#[test]
fn test_legacy_file_population_is_rebuilt_from_the_count() {
    // --- 1. ARRANGE ---
    // A pre-versioning file is a bare specimen count and nothing else.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.save");
    fs::write(&path, le_bytes(&[5])).unwrap();

    // --- 2. ACT ---
    let mut pool = pool();
    let mut habitat = Habitat::new();
    StorageAgent::new(path)
        .load(&mut habitat, &mut pool, &NullExhibitDirector)
        .unwrap();

    // --- 3. ASSERT ---
    assert_eq!(habitat.len(), 5);
    assert_eq!(habitat.exhibit_index(), DEFAULT_EXHIBIT);
    for specimen in habitat.specimens() {
        assert_eq!(specimen.variant(), Some(VariantId(0)));
        assert_eq!(specimen.skin(), SkinId(0));
        assert_eq!(specimen.color(), LinearRgba::default());
    }
}

#[test]
fn test_version_one_file_loads_ids_without_color() {
    // --- 1. ARRANGE ---
    // Version 1 streams carry ids but predate both color and exhibit fields.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("v1.save");
    fs::write(&path, le_bytes(&[-1, 2, 1, 2, 3, 0])).unwrap();

    // --- 2. ACT ---
    let mut pool = pool();
    let mut habitat = Habitat::new();
    StorageAgent::new(path)
        .load(&mut habitat, &mut pool, &NullExhibitDirector)
        .unwrap();

    // --- 3. ASSERT ---
    assert_eq!(habitat.len(), 2);
    assert_eq!(habitat.exhibit_index(), DEFAULT_EXHIBIT);
    assert_eq!(habitat.specimens()[0].variant(), Some(VariantId(1)));
    assert_eq!(habitat.specimens()[0].skin(), SkinId(2));
    assert_eq!(habitat.specimens()[0].color(), LinearRgba::default());
    assert_eq!(habitat.specimens()[1].variant(), Some(VariantId(3)));
    assert_eq!(habitat.specimens()[1].skin(), SkinId(0));
}

#[test]
fn test_future_version_file_is_rejected_and_state_kept() {
    // --- 1. ARRANGE ---
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.save");
    fs::write(&path, le_bytes(&[-(SAVE_VERSION + 1)])).unwrap();

    let mut pool = pool();
    let mut habitat = Habitat::new();
    habitat.adopt(pool.acquire(VariantId(1), SkinId(1)).unwrap());

    // --- 2. ACT ---
    let result = StorageAgent::new(path).load(&mut habitat, &mut pool, &NullExhibitDirector);

    // --- 3. ASSERT ---
    // The version check runs before any state is touched, so the current
    // population stays exactly as it was.
    assert!(matches!(
        result,
        Err(vivarium_agents::StorageError::Load(
            LoadError::UnsupportedVersion { version }
        )) if version == SAVE_VERSION + 1
    ));
    assert_eq!(habitat.len(), 1);
    assert_eq!(habitat.specimens()[0].variant(), Some(VariantId(1)));
    assert_eq!(pool.pooled_count(VariantId(1)), 0);
}

#[test]
fn test_despawned_tail_order_persists_through_a_save() {
    // --- 1. ARRANGE ---
    let dir = tempfile::tempdir().unwrap();
    let storage = StorageAgent::new(dir.path().join("reordered.save"));
    let mut pool = pool();

    let mut habitat = Habitat::new();
    for id in 0..4 {
        habitat.adopt(pool.acquire(VariantId(id), SkinId(0)).unwrap());
    }

    // --- 2. ACT ---
    // Removal swaps the last specimen into the hole, so 3 takes slot 1.
    assert!(habitat.despawn_at(1, &mut pool));
    storage.save(&habitat).unwrap();

    let mut restored = Habitat::new();
    storage
        .load(&mut restored, &mut pool, &NullExhibitDirector)
        .unwrap();

    // --- 3. ASSERT ---
    let variants: Vec<i32> = restored
        .specimens()
        .iter()
        .map(|s| s.variant().unwrap().0)
        .collect();
    assert_eq!(variants, vec![0, 3, 2]);
}

#[test]
fn test_load_stages_the_saved_exhibit_through_the_agent() {
    // --- 1. ARRANGE ---
    // A real exhibit agent is wired in as the director; loading a save that
    // names exhibit 2 must fire a transition without blocking the load.
    let dir = tempfile::tempdir().unwrap();
    let storage = StorageAgent::new(dir.path().join("staged.save"));
    let mut pool = pool();

    let mut habitat = Habitat::new();
    habitat.stage(2, &NullExhibitDirector);
    habitat.adopt(pool.acquire(VariantId(0), SkinId(0)).unwrap());
    storage.save(&habitat).unwrap();

    let (mut agent, requests) = ExhibitAgent::new(ExhibitAgentConfig {
        transition_duration: Duration::from_millis(5),
        ..Default::default()
    });
    let events = agent.events().receiver().clone();
    agent.start(requests);
    let director = agent.director();

    // --- 2. ACT ---
    let mut restored = Habitat::new();
    storage.load(&mut restored, &mut pool, &director).unwrap();

    let started = events
        .recv_timeout(Duration::from_secs(2))
        .expect("the staged exhibit should start transitioning");
    let completed = events
        .recv_timeout(Duration::from_secs(2))
        .expect("the transition should complete");
    agent.stop();

    // --- 3. ASSERT ---
    assert_eq!(restored.exhibit_index(), 2);
    assert_eq!(started, ExhibitEvent::TransitionStarted { index: 2 });
    assert_eq!(completed, ExhibitEvent::TransitionCompleted { index: 2 });
}

#[test]
fn test_caretaker_runs_a_session_against_a_live_agent() {
    // --- 1. ARRANGE ---
    let dir = tempfile::tempdir().unwrap();
    let (mut agent, requests) = ExhibitAgent::new(ExhibitAgentConfig {
        transition_duration: Duration::from_millis(5),
        ..Default::default()
    });
    let events = agent.events().receiver().clone();
    agent.start(requests);

    let config = CaretakerConfig {
        creation_per_second: 10.0,
        destruction_per_second: 0.0,
        save_path: dir.path().join("session.save"),
        ..Default::default()
    };
    let mut caretaker = Caretaker::new(
        config,
        SpecimenCatalog::new(3, 3),
        Box::new(agent.director()),
    );

    // --- 2. ACT ---
    caretaker.begin_session(3);
    caretaker.advance(Duration::from_secs(1));
    caretaker.save().unwrap();

    let population = caretaker.habitat().len();
    caretaker.begin_session(1);
    caretaker.load().unwrap();

    // Bursty staging may collapse intermediate requests, but the load's
    // restaging is the final request, so the last transition lands on 3.
    let mut last_completed = None;
    while let Ok(event) = events.recv_timeout(Duration::from_millis(500)) {
        if let ExhibitEvent::TransitionCompleted { index } = event {
            last_completed = Some(index);
        }
    }
    agent.stop();

    // --- 3. ASSERT ---
    assert_eq!(population, 10);
    assert_eq!(caretaker.habitat().len(), 10);
    assert_eq!(caretaker.habitat().exhibit_index(), 3);
    assert_eq!(last_completed, Some(3));
}
