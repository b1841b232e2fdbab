//! Steering behaviors.
//!
//! Each behavior takes the agent being steered and an iterator over the other
//! agents it may react to (the agent itself must not be included). Only
//! neighbors strictly inside the behavior's radius count. A behavior with no
//! qualifying neighbors returns the zero vector.

use crate::agent::Agent;
use crate::config::SimulationConfig;
use crate::vector::Vec3;

/// Weighted contributions of the three behaviors for one agent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SteeringForces {
    pub separation: Vec3,
    pub cohesion: Vec3,
    pub alignment: Vec3,
}

impl SteeringForces {
    pub fn total(&self) -> Vec3 {
        self.separation + self.cohesion + self.alignment
    }
}

/// Pushes away from crowding neighbors. Offsets are divided by the radius, so
/// each neighbor contributes at most a unit-length push.
pub fn separation<'a, I>(agent: &Agent, others: I, config: &SimulationConfig) -> Vec3
where
    I: IntoIterator<Item = &'a Agent>,
{
    let radius = config.separation_radius;
    let mut sum = Vec3::zero();
    let mut count = 0;

    for other in others {
        if agent.position.distance(&other.position) < radius {
            sum += (agent.position - other.position) / radius;
            count += 1;
        }
    }

    if count == 0 {
        return Vec3::zero();
    }

    sum / count as f32 * config.separation_weight
}

/// Pulls toward the centroid of nearby agents.
pub fn cohesion<'a, I>(agent: &Agent, others: I, config: &SimulationConfig) -> Vec3
where
    I: IntoIterator<Item = &'a Agent>,
{
    let mut sum = Vec3::zero();
    let mut count = 0;

    for other in others {
        if agent.position.distance(&other.position) < config.cohesion_radius {
            sum += other.position;
            count += 1;
        }
    }

    if count == 0 {
        return Vec3::zero();
    }

    let centroid = sum / count as f32;
    (centroid - agent.position) * config.cohesion_weight
}

/// Turns toward the average heading of nearby agents.
pub fn alignment<'a, I>(agent: &Agent, others: I, config: &SimulationConfig) -> Vec3
where
    I: IntoIterator<Item = &'a Agent>,
{
    let mut sum = Vec3::zero();
    let mut count = 0;

    for other in others {
        if agent.position.distance(&other.position) < config.alignment_radius {
            sum += other.velocity;
            count += 1;
        }
    }

    if count == 0 {
        return Vec3::zero();
    }

    let heading = (sum / count as f32).normalize();
    (heading - agent.velocity) * config.alignment_weight
}

/// Evaluates all three behaviors against the same neighbor candidates.
pub fn steer<'a, I>(agent: &Agent, others: I, config: &SimulationConfig) -> SteeringForces
where
    I: IntoIterator<Item = &'a Agent>,
    I::IntoIter: Clone,
{
    let others = others.into_iter();
    SteeringForces {
        separation: separation(agent, others.clone(), config),
        cohesion: cohesion(agent, others.clone(), config),
        alignment: alignment(agent, others, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SimulationConfig {
        SimulationConfig {
            separation_radius: 10.0,
            separation_weight: 1.0,
            cohesion_radius: 10.0,
            cohesion_weight: 1.0,
            alignment_radius: 10.0,
            alignment_weight: 1.0,
            ..Default::default()
        }
    }

    fn agent_at(x: f32, y: f32) -> Agent {
        Agent::new(Vec3::planar(x, y), Vec3::planar(1.0, 0.0))
    }

    #[test]
    fn test_no_neighbors_contribute_nothing() {
        let agent = agent_at(0.0, 0.0);
        let far = [agent_at(100.0, 0.0)];

        let forces = steer(&agent, far.iter(), &config());

        assert_eq!(forces, SteeringForces::default());
        assert_eq!(forces.total(), Vec3::zero());
    }

    #[test]
    fn test_separation_pushes_away_scaled_by_radius() {
        let agent = agent_at(0.0, 0.0);
        let others = [agent_at(5.0, 0.0)];

        let force = separation(&agent, others.iter(), &config());

        assert_eq!(force, Vec3::planar(-0.5, 0.0));
    }

    #[test]
    fn test_separation_averages_over_neighbors() {
        let agent = agent_at(0.0, 0.0);
        let others = [agent_at(5.0, 0.0), agent_at(0.0, -5.0)];

        let force = separation(&agent, others.iter(), &config());

        assert_eq!(force, Vec3::planar(-0.25, 0.25));
    }

    #[test]
    fn test_radius_is_exclusive() {
        let agent = agent_at(0.0, 0.0);
        let others = [agent_at(10.0, 0.0)];

        let forces = steer(&agent, others.iter(), &config());

        assert_eq!(forces.total(), Vec3::zero());
    }

    #[test]
    fn test_cohesion_points_at_centroid() {
        let agent = agent_at(0.0, 0.0);
        let others = [agent_at(4.0, 0.0), agent_at(0.0, 4.0)];
        let config = SimulationConfig {
            cohesion_weight: 0.5,
            ..config()
        };

        let force = cohesion(&agent, others.iter(), &config);

        assert_eq!(force, Vec3::planar(1.0, 1.0));
    }

    #[test]
    fn test_alignment_steers_toward_average_heading() {
        let agent = Agent::new(Vec3::zero(), Vec3::planar(0.5, 0.0));
        let others = [Agent::new(Vec3::planar(1.0, 0.0), Vec3::planar(0.0, 3.0))];

        let force = alignment(&agent, others.iter(), &config());

        assert_eq!(force, Vec3::planar(-0.5, 1.0));
    }

    #[test]
    fn test_alignment_with_cancelling_headings_is_finite() {
        let agent = Agent::new(Vec3::zero(), Vec3::planar(1.0, 0.0));
        let others = [
            Agent::new(Vec3::planar(1.0, 0.0), Vec3::planar(0.0, 1.0)),
            Agent::new(Vec3::planar(-1.0, 0.0), Vec3::planar(0.0, -1.0)),
        ];

        let force = alignment(&agent, others.iter(), &config());

        // Zero average heading normalizes to zero; only the self term remains.
        assert!(force.is_finite());
        assert_eq!(force, Vec3::planar(-1.0, 0.0));
    }

    #[test]
    fn test_coincident_neighbor_does_not_produce_nan() {
        let agent = agent_at(2.0, 2.0);
        let others = [agent_at(2.0, 2.0)];

        let forces = steer(&agent, others.iter(), &config());

        assert!(forces.total().is_finite());
        assert_eq!(forces.separation, Vec3::zero());
    }
}
