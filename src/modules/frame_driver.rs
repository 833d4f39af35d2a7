//! Fixed-rate frame driver.
//!
//! Owns one [`ChipLane`] per chip, pairing a simulation world with the
//! screen element it moves. Each [`FrameDriver::tick`] advances the clock by
//! one step, creates any worlds that have come due, steps every world and
//! repositions its screen element. Once the clock passes the configured
//! duration the driver disarms for good and every later tick is a no-op.

use crate::modules::chip_world::ChipWorld;
use crate::modules::screen_map::ScreenMap;
use crate::modules::settings::{PhysicsSettings, Settings};
use crate::modules::spawn_plan::SpawnPlan;
use macroquad::prelude::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Armed,
    Disarmed,
}

/// What a single call to [`FrameDriver::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Worlds were stepped and screen elements moved
    Stepped { worlds: usize },
    /// The clock just passed the duration; nothing was stepped
    Disarmed,
    /// Already disarmed
    Idle,
}

/// On-screen image for one chip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenElement {
    pub position: Vec2,
    /// Set on the first frame that positions this element; unset elements are not drawn
    pub image_set: bool,
}

/// A chip's world and its screen element. The world is `None` until its spawn is due.
pub struct ChipLane {
    pub index: usize,
    pub world: Option<ChipWorld>,
    pub screen: ScreenElement,
}

pub struct FrameDriver {
    state: DriverState,
    ticks: u32,
    tick_rate: u32,
    duration: f32,
    lanes: Vec<ChipLane>,
    plan: SpawnPlan,
    map: ScreenMap,
    physics: PhysicsSettings,
}

impl FrameDriver {
    /// Build the driver and create world 0 immediately.
    pub fn new(settings: &Settings) -> Self {
        let map = ScreenMap::from_settings(&settings.screen);
        let lanes = (0..settings.chip_count)
            .map(|index| ChipLane {
                index,
                world: None,
                screen: ScreenElement {
                    position: Vec2::new(map.lane_x(index), 0.0),
                    image_set: false,
                },
            })
            .collect();

        let mut driver = Self {
            state: DriverState::Armed,
            ticks: 0,
            tick_rate: settings.timeline.tick_rate,
            duration: settings.timeline.duration,
            lanes,
            plan: SpawnPlan::staggered(
                settings.chip_count,
                settings.timeline.spawn_delay,
                settings.timeline.tick_rate,
            ),
            map,
            physics: settings.physics.clone(),
        };
        driver.spawn_due();
        driver
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Seconds of animation run so far.
    pub fn elapsed(&self) -> f32 {
        self.ticks as f32 / self.tick_rate as f32
    }

    pub fn step(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    pub fn lanes(&self) -> &[ChipLane] {
        &self.lanes
    }

    #[cfg(test)]
    pub(crate) fn lanes_mut(&mut self) -> &mut [ChipLane] {
        &mut self.lanes
    }

    #[cfg(test)]
    pub(crate) fn map(&self) -> &ScreenMap {
        &self.map
    }

    pub fn world_count(&self) -> usize {
        self.lanes.iter().filter(|lane| lane.world.is_some()).count()
    }

    /// Run one frame against a window `window_height` pixels tall.
    pub fn tick(&mut self, window_height: f32) -> TickOutcome {
        if self.state == DriverState::Disarmed {
            return TickOutcome::Idle;
        }

        self.ticks += 1;
        let elapsed = self.elapsed();
        if elapsed > self.duration {
            self.state = DriverState::Disarmed;
            log::info!("Animation finished after {} ticks ({:.3}s)", self.ticks - 1, elapsed);
            return TickOutcome::Disarmed;
        }

        self.spawn_due();

        let weight = elapsed / self.duration;
        let mut worlds = 0;
        for lane in &mut self.lanes {
            let Some(world) = lane.world.as_mut() else {
                continue;
            };
            world.step();
            worlds += 1;

            let Some(body) = world.chip_position() else {
                log::warn!("No body found for chip {}", lane.index + 1);
                continue;
            };
            log::trace!("Chip {} position: {}, {}", lane.index + 1, body.x, body.y);

            lane.screen.position = self.map.place(lane.index, body, window_height, weight);
            lane.screen.image_set = true;
        }

        TickOutcome::Stepped { worlds }
    }

    fn spawn_due(&mut self) {
        let dt = self.step();
        for spawn in self.plan.drain_due(self.ticks) {
            match self.lanes.get_mut(spawn.index) {
                Some(lane) => lane.world = Some(ChipWorld::new(spawn.index, &self.physics, dt)),
                None => log::warn!("No screen element for chip world {}", spawn.index),
            }
        }
    }
}
