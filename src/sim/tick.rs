//! Fixed timestep simulation loop
//!
//! `Simulation` owns everything the core mutates: the clock, the entities
//! and the collision view of the level. Whatever drives the game (a timer,
//! a frame callback, a test) feeds it wall-clock deltas through `advance`
//! or absolute timestamps through `frame`. Calls must be serialized; the
//! simulation is never re-entered.

use super::clock::{DebugStats, SimulationClock};
use super::collision::CollisionMap;
use super::entity::Entity;
use super::gravity::Gravity;
use super::level::Level;
use crate::config::{Config, ConfigError, HALT_ACTION};
use crate::consts::CATCH_UP_WARN_TICKS;
use crate::renderer::{FrameView, Renderer};

/// Read side of the input collaborator: is a logical action held?
pub trait ActionSource {
    fn current(&self, action: &str) -> bool;
}

/// No input at all
impl ActionSource for () {
    fn current(&self, _action: &str) -> bool {
        false
    }
}

/// A fixed set of held actions
impl ActionSource for [&str] {
    fn current(&self, action: &str) -> bool {
        self.iter().any(|held| *held == action)
    }
}

impl<T: ActionSource + ?Sized> ActionSource for &T {
    fn current(&self, action: &str) -> bool {
        (**self).current(action)
    }
}

pub struct Simulation {
    clock: SimulationClock,
    gravity: Gravity,
    tick_rate: f32,
    level: Level,
    collision_map: CollisionMap,
    entities: Vec<Entity>,
    paused: bool,
    debug: bool,
}

impl Simulation {
    /// Validate the config and spawn its players into the level
    pub fn new(config: &Config, level: Level) -> Result<Self, ConfigError> {
        config.validate()?;

        let physics = &config.physics;
        let entities = config
            .spawns
            .iter()
            .map(|spawn| {
                Entity::new(spawn.player.clone(), spawn.position, spawn.sprite)
                    .with_speed(physics.speed)
                    .with_max_velocity(physics.max_velocity)
                    .with_size(physics.size)
            })
            .collect::<Vec<_>>();

        log::info!(
            "Simulation ready: {} Hz, {} entities, {}x{} tiles",
            config.tick_rate,
            entities.len(),
            level.tile_map().grid().width(),
            level.tile_map().grid().height()
        );

        Ok(Self {
            clock: SimulationClock::new(config.tick_rate),
            gravity: Gravity::new(physics.gravity, physics.anti_gravity),
            tick_rate: config.tick_rate as f32,
            collision_map: level.collision_map(),
            level,
            entities,
            paused: false,
            debug: config.debug,
        })
    }

    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn gravity(&self) -> &Gravity {
        &self.gravity
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn tick_duration_ms(&self) -> f64 {
        self.clock.tick_duration_ms()
    }

    pub fn stats(&self) -> DebugStats {
        self.clock.stats()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop advancing; the accumulator is kept as is
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!(
                "Simulation paused ({:.3} ms carried)",
                self.clock.accumulator()
            );
        }
    }

    /// Continue from `now_ms` without charging the paused time
    pub fn resume(&mut self, now_ms: f64) {
        self.clock.reset_wall_time(now_ms);
        if self.paused {
            self.paused = false;
            log::info!("Simulation resumed");
        }
    }

    /// Drive from an absolute wall-clock timestamp
    pub fn frame<I, R>(&mut self, now_ms: f64, input: &I, renderer: &mut R) -> u32
    where
        I: ActionSource + ?Sized,
        R: Renderer + ?Sized,
    {
        if self.paused {
            return 0;
        }
        let delta = self.clock.wall_delta(now_ms);
        self.advance(delta, input, renderer)
    }

    /// Feed one frame of wall time, run every whole tick it pays for, then
    /// render once. Returns the number of ticks run.
    pub fn advance<I, R>(&mut self, delta_ms: f64, input: &I, renderer: &mut R) -> u32
    where
        I: ActionSource + ?Sized,
        R: Renderer + ?Sized,
    {
        if self.paused {
            return 0;
        }
        // The frame that sees halt still finishes; later frames are skipped
        if self.debug && input.current(HALT_ACTION) {
            log::info!("Halt requested");
            self.pause();
        }

        self.clock.accumulate(delta_ms);
        let mut ticks = 0;
        while self.clock.consume_tick() {
            self.step(input);
            ticks += 1;
        }

        if ticks > CATCH_UP_WARN_TICKS {
            log::warn!("Slow frame: {delta_ms:.1} ms needed {ticks} catch-up ticks");
        } else if ticks > 1 {
            log::debug!("Frame ran {ticks} ticks");
        }
        if self.debug {
            let stats = self.clock.stats();
            log::trace!(
                "fps={:.1} frame={:.2}ms acc={:.2}ms",
                stats.fps,
                stats.frame_time_ms,
                stats.accumulator_ms
            );
        }

        renderer.render(&self.frame_view());
        ticks
    }

    /// Integrate every entity once
    pub fn step<I: ActionSource + ?Sized>(&mut self, input: &I) {
        for entity in &mut self.entities {
            entity.integrate(input, &self.gravity, &self.collision_map, self.tick_rate);
        }
    }

    /// Read-only state for the renderer
    pub fn frame_view(&self) -> FrameView<'_> {
        FrameView {
            tiles: self.level.tile_map(),
            entities: &self.entities,
            stats: self.clock.stats(),
        }
    }
}
