//! Interactive engine facade
//!
//! Owns the calendar, the config and the state. Hosts drive it with one
//! `update()` per display frame plus pointer commands; all of them take
//! `&mut self`, so updates and input can never interleave.

use super::collision::Hit;
use super::state::{Phase, SimulationState, StateSnapshot};
use super::tick::tick;
use crate::calendar::ContributionCalendar;
use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::settings::SceneConfig;

/// A running simulation for one calendar
#[derive(Debug, Clone)]
pub struct Engine {
    calendar: ContributionCalendar,
    config: SceneConfig,
    state: SimulationState,
    /// Hits from the most recent frame
    last_hits: Vec<Hit>,
}

impl Engine {
    /// New engine with the default config
    pub fn new(calendar: ContributionCalendar, width: f32, height: f32) -> Self {
        Self::with_config(calendar, width, height, SceneConfig::default())
    }

    pub fn with_config(calendar: ContributionCalendar, width: f32, height: f32, config: SceneConfig) -> Self {
        log::info!(
            "Engine for {} ({} weeks, {}x{})",
            calendar.username,
            calendar.weeks.len(),
            width,
            height
        );
        Self {
            calendar,
            config,
            state: SimulationState::new(width, height),
            last_hits: Vec::new(),
        }
    }

    /// Default 800x400 canvas
    pub fn with_default_canvas(calendar: ContributionCalendar) -> Self {
        Self::new(calendar, DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    /// Advance one frame
    pub fn update(&mut self) {
        self.last_hits = tick(&mut self.state, &self.calendar, &self.config);
    }

    /// Read-only view of the live state
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Owned copy of the visible state
    pub fn snapshot(&self) -> StateSnapshot {
        self.state.snapshot()
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn calendar(&self) -> &ContributionCalendar {
        &self.calendar
    }

    pub fn last_hits(&self) -> &[Hit] {
        &self.last_hits
    }

    /// Move the ship, clamped to the padded canvas
    pub fn set_player_y(&mut self, y: f32) {
        self.state.set_player_y(y, self.config.padding);
    }

    /// Fire one projectile; it moves on the next update
    pub fn shoot(&mut self) {
        self.state.shoot();
    }

    /// Freeze the simulation
    pub fn end(&mut self) {
        if self.state.phase != Phase::Terminal {
            log::info!("Engine stopped at score {}", self.state.score);
            self.state.phase = Phase::Terminal;
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}
