use crate::error::FlockError;

/// Upper bound on population size accepted by `populate`/`resize`.
pub const MAX_AGENTS: usize = 100_000;

/// What happens to an agent that leaves the square plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BoundaryPolicy {
    /// Toroidal wrap: crossing one edge places the agent on the opposite edge.
    #[default]
    Wrap,
    /// Move the agent `offset` units back inside and reflect the velocity
    /// component along the crossed axis.
    Bounce { offset: f32 },
}

/// How neighbor candidates are gathered each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeighborSearch {
    /// Every other agent is tested.
    #[default]
    BruteForce,
    /// Uniform grid sized to the largest behavior radius.
    Grid,
}

/// Tunables for the flock. Hosts may change any field between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
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
    pub boundary: BoundaryPolicy,
    pub neighbor_search: NeighborSearch,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            agent_count: 100,
            plane_half_extent: 50.0,
            agent_speed: 0.2,
            initial_speed: 0.2,
            separation_radius: 3.0,
            separation_weight: 0.3,
            cohesion_radius: 8.0,
            cohesion_weight: 0.01,
            alignment_radius: 6.0,
            alignment_weight: 0.05,
            boundary: BoundaryPolicy::Wrap,
            neighbor_search: NeighborSearch::BruteForce,
        }
    }
}

impl SimulationConfig {
    /// Largest of the three behavior radii.
    pub fn max_radius(&self) -> f32 {
        self.separation_radius
            .max(self.cohesion_radius)
            .max(self.alignment_radius)
    }

    pub fn validate(&self) -> Result<(), FlockError> {
        if self.agent_count > MAX_AGENTS {
            return Err(FlockError::TooManyAgents {
                requested: self.agent_count,
                max: MAX_AGENTS,
            });
        }

        if !self.plane_half_extent.is_finite() || self.plane_half_extent <= 0.0 {
            return Err(FlockError::InvalidParameter {
                name: "plane_half_extent",
                value: self.plane_half_extent,
            });
        }

        let non_negative = [
            ("agent_speed", self.agent_speed),
            ("initial_speed", self.initial_speed),
            ("separation_radius", self.separation_radius),
            ("separation_weight", self.separation_weight),
            ("cohesion_radius", self.cohesion_radius),
            ("cohesion_weight", self.cohesion_weight),
            ("alignment_radius", self.alignment_radius),
            ("alignment_weight", self.alignment_weight),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(FlockError::InvalidParameter { name, value });
            }
        }

        if let BoundaryPolicy::Bounce { offset } = self.boundary {
            // Larger offsets would push agents past the opposite edge.
            if !offset.is_finite() || offset < 0.0 || offset > 2.0 * self.plane_half_extent {
                return Err(FlockError::InvalidParameter {
                    name: "bounce_offset",
                    value: offset,
                });
            }
        }

        Ok(())
    }
}
