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

// Vivarium Sandbox
// Main binary for demos and manual testing

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

use vivarium_agents::{Caretaker, CaretakerConfig, ExhibitAgent, ExhibitAgentConfig, ExhibitEvent};
use vivarium_data::SpecimenCatalog;

const CONFIG_PATH: &str = "vivarium.json";
const STEP: Duration = Duration::from_millis(16);

fn load_config() -> Result<CaretakerConfig> {
    if !Path::new(CONFIG_PATH).exists() {
        log::info!("No {CONFIG_PATH} found, using the default configuration.");
        return Ok(CaretakerConfig::default());
    }
    let text =
        fs::read_to_string(CONFIG_PATH).with_context(|| format!("could not read {CONFIG_PATH}"))?;
    let config =
        serde_json::from_str(&text).with_context(|| format!("could not parse {CONFIG_PATH}"))?;
    log::info!("Loaded configuration from {CONFIG_PATH}.");
    Ok(config)
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = load_config()?;

    // --- Step 1: Wire up the agents ---
    let (mut exhibit_agent, requests) = ExhibitAgent::new(ExhibitAgentConfig::default());
    let events = exhibit_agent.events().receiver().clone();
    exhibit_agent.start(requests);

    let catalog = SpecimenCatalog::new(3, 4);
    let mut caretaker = Caretaker::new(config, catalog, Box::new(exhibit_agent.director()));

    // --- Step 2: Run a session and save it ---
    caretaker.begin_session(2);
    for _ in 0..120 {
        caretaker.advance(STEP);
    }
    log::info!("Session grew to {} specimens.", caretaker.habitat().len());
    caretaker.save()?;

    // --- Step 3: Reset, then restore the saved session ---
    caretaker.begin_session(1);
    log::info!(
        "Fresh session holds {} specimens.",
        caretaker.habitat().len()
    );
    caretaker.load()?;
    log::info!(
        "Restored {} specimens at exhibit {}.",
        caretaker.habitat().len(),
        caretaker.habitat().exhibit_index()
    );

    // --- Step 4: Watch the staged transitions land ---
    while let Ok(event) = events.recv_timeout(Duration::from_millis(500)) {
        match event {
            ExhibitEvent::TransitionStarted { index } => {
                log::info!(" -> Transition to exhibit {index} started.");
            }
            ExhibitEvent::TransitionCompleted { index } => {
                log::info!(" -> Exhibit {index} is on stage.");
            }
        }
    }

    exhibit_agent.stop();
    Ok(())
}
