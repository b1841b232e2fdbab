use flock_core::{BoundaryPolicy, FlockSimulation, SimulationConfig, MAX_AGENTS};
use flock_shared::FlockSettings;
use js_sys::Float32Array;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

/// Flock simulation driven from a JavaScript render loop.
///
/// The renderer calls `step()` once per animation frame and then reads
/// `positions()`/`velocities()` to place its meshes, agent `i` at offsets
/// `2 * i` and `2 * i + 1`.
#[wasm_bindgen]
pub struct FlockHandle {
    flock: FlockSimulation,
}

#[wasm_bindgen]
impl FlockHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(agent_count: f64) -> Result<FlockHandle, JsValue> {
        let agent_count = parse_count(agent_count).map_err(js_error)?;
        console_log!("Initializing flock with {} agents", agent_count);

        let config = SimulationConfig {
            agent_count,
            ..Default::default()
        };
        let flock = FlockSimulation::new(config).map_err(js_error)?;
        Ok(FlockHandle { flock })
    }

    pub fn step(&mut self) {
        self.flock.step();
    }

    /// Drops every agent and spawns `count` new ones.
    pub fn resize(&mut self, count: f64) -> Result<(), JsValue> {
        let count = parse_count(count).map_err(js_error)?;
        self.flock.resize(count).map_err(js_error)?;
        console_log!("Resized flock to {} agents", count);
        Ok(())
    }

    pub fn agent_count(&self) -> usize {
        self.flock.len()
    }

    pub fn tick(&self) -> f64 {
        self.flock.tick() as f64
    }

    pub fn plane_half_extent(&self) -> f32 {
        self.flock.config().plane_half_extent
    }

    pub fn positions(&self) -> Float32Array {
        Float32Array::from(&interleave(&self.flock, |state| state.0)[..])
    }

    pub fn velocities(&self) -> Float32Array {
        Float32Array::from(&interleave(&self.flock, |state| state.1)[..])
    }

    pub fn settings_json(&self) -> Result<String, JsValue> {
        FlockSettings::from(*self.flock.config())
            .to_json()
            .map_err(js_error)
    }

    /// Applies a `FlockSettings` (or `{"settings": ...}`) JSON document.
    /// Returns `true` when the population was recreated.
    pub fn apply_settings_json(&mut self, json: &str) -> Result<bool, JsValue> {
        let settings = parse_settings(json).map_err(js_error)?;
        let repopulated = self
            .flock
            .apply_config(settings.into())
            .map_err(js_error)?;
        if repopulated {
            console_log!("Settings changed population to {}", self.flock.len());
        }
        Ok(repopulated)
    }

    pub fn set_separation(&mut self, radius: f32, weight: f32) -> Result<(), JsValue> {
        self.update_config(|config| {
            config.separation_radius = radius;
            config.separation_weight = weight;
        })
    }

    pub fn set_cohesion(&mut self, radius: f32, weight: f32) -> Result<(), JsValue> {
        self.update_config(|config| {
            config.cohesion_radius = radius;
            config.cohesion_weight = weight;
        })
    }

    pub fn set_alignment(&mut self, radius: f32, weight: f32) -> Result<(), JsValue> {
        self.update_config(|config| {
            config.alignment_radius = radius;
            config.alignment_weight = weight;
        })
    }

    pub fn set_agent_speed(&mut self, speed: f32) -> Result<(), JsValue> {
        self.update_config(|config| config.agent_speed = speed)
    }

    pub fn set_plane_half_extent(&mut self, half_extent: f32) -> Result<(), JsValue> {
        self.update_config(|config| config.plane_half_extent = half_extent)
    }

    pub fn set_wrap(&mut self) -> Result<(), JsValue> {
        self.update_config(|config| config.boundary = BoundaryPolicy::Wrap)
    }

    pub fn set_bounce(&mut self, offset: f32) -> Result<(), JsValue> {
        self.update_config(|config| config.boundary = BoundaryPolicy::Bounce { offset })
    }
}

impl FlockHandle {
    fn update_config<F>(&mut self, change: F) -> Result<(), JsValue>
    where
        F: FnOnce(&mut SimulationConfig),
    {
        let mut config = *self.flock.config();
        change(&mut config);
        self.flock.apply_config(config).map_err(js_error)?;
        Ok(())
    }
}

fn js_error<E: ToString>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// JS numbers arrive as `f64`; only whole, non-negative, bounded counts pass.
fn parse_count(count: f64) -> Result<usize, String> {
    if !count.is_finite() || count < 0.0 || count.fract() != 0.0 {
        return Err(format!("Agent count must be a non-negative integer, got {}", count));
    }
    if count > MAX_AGENTS as f64 {
        return Err(format!(
            "Requested {} agents, but at most {} are supported",
            count, MAX_AGENTS
        ));
    }
    Ok(count as usize)
}

fn parse_settings(json: &str) -> Result<FlockSettings, serde_json::Error> {
    FlockSettings::from_document(json)
}

fn interleave<F>(flock: &FlockSimulation, pick: F) -> Vec<f32>
where
    F: Fn((flock_core::Vec3, flock_core::Vec3)) -> flock_core::Vec3,
{
    let mut out = Vec::with_capacity(flock.len() * 2);
    for state in flock.states() {
        let v = pick(state);
        out.push(v.x);
        out.push(v.y);
    }
    out
}
