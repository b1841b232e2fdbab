//! Planar flocking simulation.
//!
//! [`FlockSimulation`] owns a population of [`Agent`]s and advances them one
//! tick at a time using separation, cohesion and alignment steering. Rendering
//! is left to the host, which reads agent state between ticks.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod agent;
pub mod behavior;
pub mod config;
pub mod error;
pub mod grid;
pub mod simulation;
pub mod vector;

pub use agent::Agent;
pub use behavior::SteeringForces;
pub use config::{BoundaryPolicy, NeighborSearch, SimulationConfig, MAX_AGENTS};
pub use error::FlockError;
pub use grid::SpatialGrid;
pub use simulation::FlockSimulation;
pub use vector::Vec3;
