use anyhow::{Context, Result};
use flock_core::FlockSimulation;
use flock_shared::{FrameSnapshot, StatusResponse};
use std::time::{Duration, Instant};

use crate::sink::FrameSink;

#[derive(Debug, Clone, Copy)]
pub struct DriverOptions {
    /// Ticks to run before returning.
    pub ticks: u64,
    /// Target ticks per second; `0.0` runs unthrottled.
    pub rate: f64,
    /// Emit a frame every `every` ticks.
    pub every: u64,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            ticks: 600,
            rate: 60.0,
            every: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub frames: u64,
    pub settings_applied: u64,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn ticks_per_second(&self) -> f32 {
        let secs = self.elapsed.as_secs_f32();
        if secs > 0.0 {
            self.ticks as f32 / secs
        } else {
            0.0
        }
    }
}

/// Owns the flock and plays the role of the render loop: one `step()` per
/// frame, then hand the new state to every sink.
pub struct Driver {
    flock: FlockSimulation,
    sinks: Vec<Box<dyn FrameSink>>,
    options: DriverOptions,
}

impl Driver {
    pub fn new(flock: FlockSimulation, options: DriverOptions) -> Self {
        Self {
            flock,
            sinks: Vec::new(),
            options: DriverOptions {
                every: options.every.max(1),
                ..options
            },
        }
    }

    pub fn add_sink<S: FrameSink + 'static>(&mut self, sink: S) {
        self.sinks.push(Box::new(sink));
    }

    pub fn flock(&self) -> &FlockSimulation {
        &self.flock
    }

    pub fn into_flock(self) -> FlockSimulation {
        self.flock
    }

    pub fn status(&self, ticks_per_second: f32) -> StatusResponse {
        StatusResponse {
            agent_count: self.flock.len(),
            tick: self.flock.tick(),
            ticks_per_second,
        }
    }

    pub fn run(&mut self) -> Result<RunSummary> {
        log::info!(
            "Running {} ticks with {} agents",
            self.options.ticks,
            self.flock.len()
        );

        let frame_interval = if self.options.rate > 0.0 {
            let interval = Duration::try_from_secs_f64(1.0 / self.options.rate)
                .with_context(|| format!("Tick rate {} is too low", self.options.rate))?;
            Some(interval)
        } else {
            None
        };

        let start = Instant::now();
        let mut next_deadline = start;
        let mut last_report = start;
        let mut summary = RunSummary {
            ticks: 0,
            frames: 0,
            settings_applied: 0,
            elapsed: Duration::ZERO,
        };

        for _ in 0..self.options.ticks {
            self.flock.step();
            summary.ticks += 1;

            if self.flock.tick() % self.options.every == 0 {
                self.emit_frame(&mut summary)?;
            }

            if last_report.elapsed() >= Duration::from_secs(1) {
                let status = self.status(summary.ticks as f32 / start.elapsed().as_secs_f32());
                log::info!(
                    "Tick {} | {} agents | {:.1} ticks/s",
                    status.tick,
                    status.agent_count,
                    status.ticks_per_second
                );
                last_report = Instant::now();
            }

            if let Some(interval) = frame_interval {
                next_deadline += interval;
                let now = Instant::now();
                if next_deadline > now {
                    std::thread::sleep(next_deadline - now);
                } else {
                    // Running behind; don't try to catch up with a burst.
                    next_deadline = now;
                }
            }
        }

        summary.elapsed = start.elapsed();
        let status = self.status(summary.ticks_per_second());
        for sink in &mut self.sinks {
            sink.finish(&status)?;
        }

        log::info!(
            "Finished {} ticks in {:.2?} ({:.1} ticks/s)",
            summary.ticks,
            summary.elapsed,
            summary.ticks_per_second()
        );
        Ok(summary)
    }

    fn emit_frame(&mut self, summary: &mut RunSummary) -> Result<()> {
        let frame = FrameSnapshot::capture(&self.flock);
        summary.frames += 1;

        let mut pending = Vec::new();
        for sink in &mut self.sinks {
            sink.send(&frame)?;
            if let Some(settings) = sink.poll_settings()? {
                pending.push(settings);
            }
        }

        for settings in pending {
            match self.flock.apply_config(settings.into()) {
                Ok(true) => {
                    summary.settings_applied += 1;
                    log::info!("Settings applied; flock recreated with {} agents", self.flock.len());
                }
                Ok(false) => {
                    summary.settings_applied += 1;
                    log::info!("Settings applied");
                }
                Err(e) => log::warn!("Ignoring rejected settings: {}", e),
            }
        }

        Ok(())
    }
}
