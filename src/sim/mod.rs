//! Interactive simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One fixed step per display frame
//! - Stable iteration order (firing order, spawn order)
//! - No rendering or platform dependencies

pub mod autofire;
pub mod collision;
pub mod engine;
pub mod state;
pub mod tick;

pub use autofire::{AutoFire, run_headless};
pub use collision::{Hit, circles_overlap, resolve_collisions};
pub use engine::Engine;
pub use state::{Entity, EntityKind, Phase, SimulationState, StateSnapshot};
pub use tick::{spawn_week, tick, weave_offset};
