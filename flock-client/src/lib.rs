//! Headless host for the flock simulation.
//!
//! Drives `FlockSimulation::step` at a fixed rate and streams frame snapshots
//! to one or more sinks, standing in for the render loop of a graphical host.

pub mod driver;
pub mod settings;
pub mod sink;

pub use driver::{Driver, DriverOptions, RunSummary};
pub use sink::{FrameSink, HttpSink, JsonLinesSink};
