//! Fixed timestep clock
//!
//! Wall-clock time goes in, whole ticks come out. Leftover time stays in
//! the accumulator for the next frame.

/// Snapshot for a debug HUD
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DebugStats {
    /// Frames per second implied by the last frame time
    pub fps: f64,
    /// Wall time of the last frame (ms)
    pub frame_time_ms: f64,
    /// Time carried into the next frame (ms)
    pub accumulator_ms: f64,
    /// Ticks run since start
    pub total_ticks: u64,
}

#[derive(Debug, Clone)]
pub struct SimulationClock {
    tick_duration_ms: f64,
    accumulator: f64,
    last_wall_time: Option<f64>,
    frame_time: f64,
    total_ticks: u64,
}

impl SimulationClock {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            tick_duration_ms: 1000.0 / f64::from(tick_rate.max(1)),
            accumulator: 0.0,
            last_wall_time: None,
            frame_time: 0.0,
            total_ticks: 0,
        }
    }

    pub fn tick_duration_ms(&self) -> f64 {
        self.tick_duration_ms
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Add one frame's worth of wall time
    pub fn accumulate(&mut self, delta_ms: f64) {
        // Clocks can step backwards; never feed a negative or NaN delta in
        let delta_ms = if delta_ms.is_finite() { delta_ms.max(0.0) } else { 0.0 };
        self.frame_time = delta_ms;
        self.accumulator += delta_ms;
    }

    /// Take one tick out of the accumulator if a whole one is available
    pub fn consume_tick(&mut self) -> bool {
        if self.accumulator >= self.tick_duration_ms {
            self.accumulator -= self.tick_duration_ms;
            self.total_ticks += 1;
            true
        } else {
            false
        }
    }

    /// Time since the previous wall reading; zero for the first reading
    pub fn wall_delta(&mut self, now_ms: f64) -> f64 {
        let previous = self.last_wall_time.replace(now_ms).unwrap_or(now_ms);
        now_ms - previous
    }

    /// Forget elapsed wall time, e.g. after a pause
    pub fn reset_wall_time(&mut self, now_ms: f64) {
        self.last_wall_time = Some(now_ms);
    }

    pub fn stats(&self) -> DebugStats {
        DebugStats {
            fps: if self.frame_time > 0.0 {
                1000.0 / self.frame_time
            } else {
                0.0
            },
            frame_time_ms: self.frame_time,
            accumulator_ms: self.accumulator,
            total_ticks: self.total_ticks,
        }
    }
}
