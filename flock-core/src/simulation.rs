use alloc::vec::Vec;

use crate::agent::Agent;
use crate::behavior::{self, SteeringForces};
use crate::config::{NeighborSearch, SimulationConfig};
use crate::error::FlockError;
use crate::grid::SpatialGrid;
use crate::vector::Vec3;

/// A flock of agents and the parameters that drive it.
///
/// The simulation exclusively owns its agents. Hosts read them between ticks
/// through [`agents`](Self::agents) or [`states`](Self::states) and change the
/// population only through `populate`/`resize`/`apply_config`.
#[derive(Debug, Clone)]
pub struct FlockSimulation {
    agents: Vec<Agent>,
    config: SimulationConfig,
    tick: u64,
}

impl FlockSimulation {
    /// Validates `config` and spawns `config.agent_count` random agents.
    #[cfg(feature = "std")]
    pub fn new(config: SimulationConfig) -> Result<Self, FlockError> {
        Self::with_rng(config, &mut rand::thread_rng())
    }

    #[cfg(feature = "rand")]
    pub fn with_rng<R: rand::Rng>(config: SimulationConfig, rng: &mut R) -> Result<Self, FlockError> {
        let mut flock = Self::empty(config)?;
        flock.populate_with_rng(config, rng)?;
        Ok(flock)
    }

    /// Builds a flock from explicit agents. `agent_count` follows `agents.len()`.
    pub fn from_agents(config: SimulationConfig, agents: Vec<Agent>) -> Result<Self, FlockError> {
        let config = SimulationConfig {
            agent_count: agents.len(),
            ..config
        };
        config.validate()?;
        for agent in &agents {
            check_agent(agent)?;
        }

        Ok(Self {
            agents: agents
                .into_iter()
                .map(|agent| Agent::new(agent.position, agent.velocity))
                .collect(),
            config,
            tick: 0,
        })
    }

    fn empty(config: SimulationConfig) -> Result<Self, FlockError> {
        config.validate()?;
        Ok(Self {
            agents: Vec::new(),
            config,
            tick: 0,
        })
    }

    /// Replaces every agent with `config.agent_count` freshly spawned ones.
    ///
    /// Positions are uniform in `[-plane_half_extent / 2, plane_half_extent / 2]`
    /// on both axes; headings are uniform with magnitude `initial_speed`.
    /// On error the simulation is left unchanged.
    #[cfg(feature = "rand")]
    pub fn populate_with_rng<R: rand::Rng>(
        &mut self,
        config: SimulationConfig,
        rng: &mut R,
    ) -> Result<(), FlockError> {
        if let Err(err) = config.validate() {
            log::warn!("Rejected flock config: {}", err);
            return Err(err);
        }

        let spread = config.plane_half_extent / 2.0;
        self.agents.clear();
        self.agents.reserve_exact(config.agent_count);
        self.agents.extend(
            (0..config.agent_count).map(|_| Agent::random(rng, spread, config.initial_speed)),
        );
        self.config = config;
        self.tick = 0;

        log::debug!(
            "Populated flock with {} agents (half extent {})",
            self.agents.len(),
            config.plane_half_extent
        );
        Ok(())
    }

    #[cfg(feature = "std")]
    pub fn populate(&mut self, config: SimulationConfig) -> Result<(), FlockError> {
        self.populate_with_rng(config, &mut rand::thread_rng())
    }

    /// Recreates the population with `new_count` agents. No agent survives.
    #[cfg(feature = "rand")]
    pub fn resize_with_rng<R: rand::Rng>(
        &mut self,
        new_count: usize,
        rng: &mut R,
    ) -> Result<(), FlockError> {
        let config = SimulationConfig {
            agent_count: new_count,
            ..self.config
        };
        self.populate_with_rng(config, rng)
    }

    #[cfg(feature = "std")]
    pub fn resize(&mut self, new_count: usize) -> Result<(), FlockError> {
        self.resize_with_rng(new_count, &mut rand::thread_rng())
    }

    /// Applies a new config between ticks.
    ///
    /// Returns `Ok(true)` when `agent_count` changed and the population was
    /// recreated, `Ok(false)` when only tunables changed.
    #[cfg(feature = "rand")]
    pub fn apply_config_with_rng<R: rand::Rng>(
        &mut self,
        config: SimulationConfig,
        rng: &mut R,
    ) -> Result<bool, FlockError> {
        if config.agent_count != self.agents.len() {
            self.populate_with_rng(config, rng)?;
            return Ok(true);
        }

        if let Err(err) = config.validate() {
            log::warn!("Rejected flock config: {}", err);
            return Err(err);
        }
        self.config = config;
        Ok(false)
    }

    #[cfg(feature = "std")]
    pub fn apply_config(&mut self, config: SimulationConfig) -> Result<bool, FlockError> {
        self.apply_config_with_rng(config, &mut rand::thread_rng())
    }

    /// Appends one agent, keeping `agent_count` in sync.
    pub fn add_agent(&mut self, agent: Agent) -> Result<(), FlockError> {
        if self.agents.len() >= crate::MAX_AGENTS {
            return Err(FlockError::TooManyAgents {
                requested: self.agents.len() + 1,
                max: crate::MAX_AGENTS,
            });
        }
        check_agent(&agent)?;

        self.agents.push(Agent::new(agent.position, agent.velocity));
        self.config.agent_count = self.agents.len();
        Ok(())
    }

    /// Steering forces for every agent, computed from the current state
    /// without modifying it.
    pub fn steering_forces(&self) -> Vec<SteeringForces> {
        match self.config.neighbor_search {
            NeighborSearch::BruteForce => self
                .agents
                .iter()
                .enumerate()
                .map(|(i, agent)| {
                    let others = self
                        .agents
                        .iter()
                        .enumerate()
                        .filter(move |(j, _)| *j != i)
                        .map(|(_, other)| other);
                    behavior::steer(agent, others, &self.config)
                })
                .collect(),
            NeighborSearch::Grid => {
                let mut grid =
                    SpatialGrid::new(self.config.plane_half_extent, self.config.max_radius());
                grid.rebuild(self.agents.iter().map(|agent| agent.position));

                let mut candidates = Vec::new();
                self.agents
                    .iter()
                    .enumerate()
                    .map(|(i, agent)| {
                        candidates.clear();
                        grid.nearby(agent.position, &mut candidates);
                        let others = candidates
                            .iter()
                            .filter(|&&j| j != i)
                            .map(|&j| &self.agents[j]);
                        behavior::steer(agent, others, &self.config)
                    })
                    .collect()
            }
        }
    }

    /// Combined acceleration every agent would receive on the next tick.
    pub fn compute_accelerations(&self) -> Vec<Vec3> {
        self.steering_forces()
            .iter()
            .map(SteeringForces::total)
            .collect()
    }

    /// Forces acting on a single agent, or `None` if `index` is out of range.
    pub fn steering_for(&self, index: usize) -> Option<SteeringForces> {
        let agent = self.agents.get(index)?;
        let others = self
            .agents
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != index)
            .map(|(_, other)| other);
        Some(behavior::steer(agent, others, &self.config))
    }

    /// Advances every agent by one tick.
    ///
    /// All forces are computed from the pre-tick state before any agent moves,
    /// so the result does not depend on agent order.
    pub fn step(&mut self) {
        let accelerations = self.compute_accelerations();
        let config = self.config;

        for (agent, acceleration) in self.agents.iter_mut().zip(accelerations) {
            agent.apply_force(acceleration);
            agent.update(config.agent_speed);
            agent.contain(config.boundary, config.plane_half_extent);
        }

        self.tick += 1;
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// `(position, velocity)` for every agent, in slot order.
    pub fn states(&self) -> impl ExactSizeIterator<Item = (Vec3, Vec3)> + '_ {
        self.agents
            .iter()
            .map(|agent| (agent.position, agent.velocity))
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

fn check_agent(agent: &Agent) -> Result<(), FlockError> {
    if !agent.position.is_finite() {
        return Err(FlockError::InvalidParameter {
            name: "agent.position",
            value: first_non_finite(agent.position),
        });
    }
    if !agent.velocity.is_finite() {
        return Err(FlockError::InvalidParameter {
            name: "agent.velocity",
            value: first_non_finite(agent.velocity),
        });
    }
    Ok(())
}

fn first_non_finite(v: Vec3) -> f32 {
    [v.x, v.y, v.z]
        .into_iter()
        .find(|c| !c.is_finite())
        .unwrap_or(f32::NAN)
}
