#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::vec::Vec;

use flock_core::{Agent, BoundaryPolicy, FlockSimulation, NeighborSearch, SimulationConfig};
use serde::{Deserialize, Serialize};

/// Offset used when a settings panel switches to bounce without naming one.
pub const DEFAULT_BOUNCE_OFFSET: f32 = 1.0;

/// Boundary policy as it appears on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    #[default]
    Wrap,
    Bounce,
}

/// Neighbor search strategy as it appears on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    #[default]
    BruteForce,
    Grid,
}

/// Flat, serializable mirror of [`SimulationConfig`].
///
/// Missing fields take their defaults, so a settings panel may send only the
/// sliders it owns. Values are not validated here; the simulation rejects
/// invalid ones when the settings are applied.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlockSettings {
    pub agent_count: usize,
    pub plane_half_extent: f32,
    pub agent_speed: f32,
    pub initial_speed: f32,
    pub separation_radius: f32,
    pub separation_weight: f32,
    pub cohesion_radius: f32,
    pub cohesion_weight: f32,
    pub alignment_radius: f32,
    pub alignment_weight: f32,
    pub boundary: BoundaryMode,
    pub bounce_offset: f32,
    pub neighbor_search: SearchMode,
}

impl Default for FlockSettings {
    fn default() -> Self {
        SimulationConfig::default().into()
    }
}

impl From<SimulationConfig> for FlockSettings {
    fn from(config: SimulationConfig) -> Self {
        let (boundary, bounce_offset) = match config.boundary {
            BoundaryPolicy::Wrap => (BoundaryMode::Wrap, DEFAULT_BOUNCE_OFFSET),
            BoundaryPolicy::Bounce { offset } => (BoundaryMode::Bounce, offset),
        };

        Self {
            agent_count: config.agent_count,
            plane_half_extent: config.plane_half_extent,
            agent_speed: config.agent_speed,
            initial_speed: config.initial_speed,
            separation_radius: config.separation_radius,
            separation_weight: config.separation_weight,
            cohesion_radius: config.cohesion_radius,
            cohesion_weight: config.cohesion_weight,
            alignment_radius: config.alignment_radius,
            alignment_weight: config.alignment_weight,
            boundary,
            bounce_offset,
            neighbor_search: match config.neighbor_search {
                NeighborSearch::BruteForce => SearchMode::BruteForce,
                NeighborSearch::Grid => SearchMode::Grid,
            },
        }
    }
}

impl From<FlockSettings> for SimulationConfig {
    fn from(settings: FlockSettings) -> Self {
        Self {
            agent_count: settings.agent_count,
            plane_half_extent: settings.plane_half_extent,
            agent_speed: settings.agent_speed,
            initial_speed: settings.initial_speed,
            separation_radius: settings.separation_radius,
            separation_weight: settings.separation_weight,
            cohesion_radius: settings.cohesion_radius,
            cohesion_weight: settings.cohesion_weight,
            alignment_radius: settings.alignment_radius,
            alignment_weight: settings.alignment_weight,
            boundary: match settings.boundary {
                BoundaryMode::Wrap => BoundaryPolicy::Wrap,
                BoundaryMode::Bounce => BoundaryPolicy::Bounce {
                    offset: settings.bounce_offset,
                },
            },
            neighbor_search: match settings.neighbor_search {
                SearchMode::BruteForce => NeighborSearch::BruteForce,
                SearchMode::Grid => NeighborSearch::Grid,
            },
        }
    }
}

#[cfg(feature = "std")]
impl FlockSettings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parses either a bare settings object or a `{"settings": ...}` update.
    /// The shape is chosen by the presence of a top-level `settings` key, so a
    /// malformed update is reported instead of read as an empty bare object.
    pub fn from_document(json: &str) -> Result<Self, serde_json::Error> {
        let mut value: serde_json::Value = serde_json::from_str(json)?;
        match value.get_mut("settings") {
            Some(inner) => serde_json::from_value(inner.take()),
            None => serde_json::from_value(value),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Settings update posted by a control surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettingsUpdate {
    pub settings: FlockSettings,
}

/// Planar kinematic state of one agent, as sent to renderers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AgentState {
    pub position: [f32; 2],
    pub velocity: [f32; 2],
}

impl From<&Agent> for AgentState {
    fn from(agent: &Agent) -> Self {
        Self {
            position: [agent.position.x, agent.position.y],
            velocity: [agent.velocity.x, agent.velocity.y],
        }
    }
}

/// Every agent's state after a given tick, in slot order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub agents: Vec<AgentState>,
}

impl FrameSnapshot {
    pub fn capture(flock: &FlockSimulation) -> Self {
        Self {
            tick: flock.tick(),
            agents: flock.agents().iter().map(AgentState::from).collect(),
        }
    }
}

/// Status reported by a running host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusResponse {
    pub agent_count: usize,
    pub tick: u64,
    pub ticks_per_second: f32,
}
