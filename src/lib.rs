//! Contrib Shooter - contribution calendars as a space shooter
//!
//! Core modules:
//! - `calendar`: Contribution calendar input types (plus mock and GraphQL decoding)
//! - `mapper`: Deterministic calendar-to-scene mapping shared by both renderers
//! - `sim`: Interactive per-frame simulation (player, enemies, projectiles)
//! - `svg`: Static scene compiler producing a self-animating SVG
//! - `settings`: Scene configuration
//! - `platform`: Browser bindings (wasm only)

pub mod calendar;
pub mod error;
pub mod mapper;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod svg;

pub use calendar::{ContributionCalendar, ContributionDay, ContributionWeek};
pub use error::SceneError;
pub use settings::{CollisionPolicy, SceneConfig};
pub use sim::{Engine, SimulationState, StateSnapshot};
pub use svg::{error_svg, render_svg, render_svg_with};

/// Scene constants
pub mod consts {
    /// Highest contribution level (quartile buckets 0..=4)
    pub const MAX_LEVEL: u8 = 4;
    /// Days per calendar week
    pub const DAYS_PER_WEEK: usize = 7;

    /// Interactive canvas defaults
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 400.0;

    /// Static SVG defaults
    pub const SVG_WIDTH: f32 = 800.0;
    pub const SVG_HEIGHT: f32 = 200.0;

    /// Player ship
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_SIZE: f32 = 30.0;
    pub const PLAYER_COLOR: &str = "#58a6ff";

    /// Projectiles
    pub const PROJECTILE_SIZE: f32 = 4.0;
    pub const PROJECTILE_SPEED: f32 = 10.0;
    /// Horizontal offset from the ship's center to the muzzle
    pub const MUZZLE_OFFSET: f32 = 20.0;
    /// How far a spent projectile is pushed past the right edge
    pub const DISPLACE_OFFSET: f32 = 1000.0;

    /// Enemies
    pub const ENEMY_BASE_SIZE: f32 = 12.0;
    pub const ENEMY_SIZE_PER_LEVEL: f32 = 2.0;
    pub const ENEMY_BASE_SPEED: f32 = 3.0;
    /// Enemies spawn this far past the right edge
    pub const SPAWN_MARGIN: f32 = 20.0;
    /// Enemies are pruned once they pass this far left of the canvas
    pub const BOUNDS_MARGIN: f32 = 50.0;
    /// Rows start this far below the top edge
    pub const ROW_TOP: f32 = 50.0;
    /// Vertical space reserved outside the seven rows
    pub const ROW_RESERVED: f32 = 100.0;

    /// Weave (vertical oscillation) for high-level enemies
    pub const WEAVE_MIN_LEVEL: u8 = 3;
    pub const WEAVE_WAVELENGTH: f32 = 50.0;
    pub const WEAVE_AMPLITUDE: f32 = 2.0;

    /// Points per destroyed enemy, multiplied by its level (minimum 1)
    pub const POINTS_PER_LEVEL: u64 = 10;

    /// Flash color shown when a targeted entity is destroyed
    pub const FLASH_COLOR: &str = "#ffffff";
}

/// Clamp an arbitrary level to the defined palette range
#[inline]
pub fn clamp_level(level: u8) -> u8 {
    level.min(consts::MAX_LEVEL)
}
