//! Per-frame simulation step
//!
//! Advances the state by exactly one display frame. Velocities are in units
//! per frame, so there is no timestep parameter.

use super::collision::{Hit, resolve_collisions};
use super::state::{Entity, EntityKind, SimulationState};
use crate::calendar::ContributionCalendar;
use crate::consts::*;
use crate::mapper::week_spawns;
use crate::settings::SceneConfig;

/// Vertical offset for weaving enemies, a pure function of their current x
#[inline]
pub fn weave_offset(x: f32) -> f32 {
    (x / WEAVE_WAVELENGTH).sin() * WEAVE_AMPLITUDE
}

/// Advance the simulation by one frame.
///
/// Returns the hits scored this frame.
pub fn tick(state: &mut SimulationState, calendar: &ContributionCalendar, config: &SceneConfig) -> Vec<Hit> {
    if state.is_terminal() {
        return Vec::new();
    }

    state.time_ticks += 1;

    // Spawn the next calendar week on a fixed cadence
    state.spawn_timer += 1;
    if state.spawn_timer >= config.spawn_interval.max(1) {
        state.spawn_timer = 0;
        spawn_week(state, calendar, config);
    }

    // Projectiles
    for p in state.projectiles.iter_mut() {
        p.advance();
    }
    let right = state.width;
    state.projectiles.retain(|p| p.pos.x < right);

    // Enemies (high levels weave around their row)
    for e in state.enemies.iter_mut() {
        e.advance();
        if e.level.is_some_and(|l| l >= WEAVE_MIN_LEVEL) {
            e.pos.y += weave_offset(e.pos.x);
        }
    }

    let hits = resolve_collisions(state, config.collision_policy);
    for hit in &hits {
        log::debug!(
            "Projectile {} destroyed enemy {} (+{})",
            hit.projectile_id,
            hit.enemy_id,
            hit.points
        );
    }

    state.enemies.retain(|e| e.pos.x > -BOUNDS_MARGIN);

    hits
}

/// Spawn the enemies for the week under the cursor, then advance the cursor.
///
/// Wraps to the first week once the calendar is exhausted; an empty calendar
/// spawns nothing.
pub fn spawn_week(state: &mut SimulationState, calendar: &ContributionCalendar, config: &SceneConfig) {
    if calendar.weeks.is_empty() {
        return;
    }
    if state.week_cursor >= calendar.weeks.len() {
        state.week_cursor = 0;
    }

    let week = &calendar.weeks[state.week_cursor];
    for spawn in week_spawns(week, config, state.width, state.height) {
        let id = state.next_entity_id();
        state.enemies.push(Entity {
            id,
            pos: spawn.pos,
            vel: spawn.vel,
            size: spawn.size,
            kind: EntityKind::Enemy,
            color: spawn.color,
            level: Some(spawn.level),
        });
    }

    state.week_cursor += 1;
}
