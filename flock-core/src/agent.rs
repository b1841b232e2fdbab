use crate::config::BoundaryPolicy;
use crate::vector::Vec3;

/// A single boid. Identity is its slot in the owning flock.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
}

impl Agent {
    /// Builds an agent on the simulation plane; any `z` component is dropped.
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self {
            position: position.flatten(),
            velocity: velocity.flatten(),
            acceleration: Vec3::zero(),
        }
    }

    #[cfg(feature = "rand")]
    pub fn random<R: rand::Rng>(rng: &mut R, spread: f32, initial_speed: f32) -> Self {
        let position = if spread > 0.0 {
            Vec3::planar(
                rng.gen_range(-spread..=spread),
                rng.gen_range(-spread..=spread),
            )
        } else {
            Vec3::zero()
        };
        let angle = rng.gen_range(0.0..core::f32::consts::TAU);
        let (sin, cos) = crate::vector::sin_cos(angle);
        let velocity = Vec3::planar(cos, sin) * initial_speed;
        Self::new(position, velocity)
    }

    pub fn apply_force(&mut self, force: Vec3) {
        self.acceleration += force;
    }

    /// Steers toward `velocity + acceleration` while holding a constant speed.
    ///
    /// If steering cancels the velocity exactly, the previous heading is kept.
    pub fn update(&mut self, speed: f32) {
        let steered = (self.velocity + self.acceleration).normalize();
        let heading = if steered.magnitude_squared() > 0.0 {
            steered
        } else {
            self.velocity.normalize()
        };

        self.velocity = (heading * speed).flatten();
        self.position = (self.position + self.velocity).flatten();
        self.acceleration = Vec3::zero();
    }

    pub fn wrap_edges(&mut self, half_extent: f32) {
        if self.position.x < -half_extent {
            self.position.x = half_extent;
        } else if self.position.x > half_extent {
            self.position.x = -half_extent;
        }

        if self.position.y < -half_extent {
            self.position.y = half_extent;
        } else if self.position.y > half_extent {
            self.position.y = -half_extent;
        }
    }

    pub fn bounce_edges(&mut self, half_extent: f32, offset: f32) {
        if self.position.x < -half_extent {
            self.position.x = -half_extent + offset;
            self.velocity.x = self.velocity.x.abs();
        } else if self.position.x > half_extent {
            self.position.x = half_extent - offset;
            self.velocity.x = -self.velocity.x.abs();
        }

        if self.position.y < -half_extent {
            self.position.y = -half_extent + offset;
            self.velocity.y = self.velocity.y.abs();
        } else if self.position.y > half_extent {
            self.position.y = half_extent - offset;
            self.velocity.y = -self.velocity.y.abs();
        }
    }

    pub fn contain(&mut self, policy: BoundaryPolicy, half_extent: f32) {
        match policy {
            BoundaryPolicy::Wrap => self.wrap_edges(half_extent),
            BoundaryPolicy::Bounce { offset } => self.bounce_edges(half_extent, offset),
        }
    }
}
