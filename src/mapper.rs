//! Calendar-to-scene mapping
//!
//! Pure functions shared by the SVG compiler and the interactive engine.
//! Every derived value comes from calendar indices and counts, never from a
//! random source, so one calendar always yields the same scene.

use glam::Vec2;
use serde::Serialize;

use crate::calendar::{ContributionCalendar, ContributionDay, ContributionWeek};
use crate::clamp_level;
use crate::consts::*;
use crate::settings::SceneConfig;

/// A contributing day and its position among all contributing days
#[derive(Debug, Clone, Copy)]
pub struct ActiveDay<'a> {
    pub day: &'a ContributionDay,
    pub index: usize,
}

/// Parameters for one static-scene entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpawnDescriptor {
    /// Position among contributing days (before downsampling)
    pub index: usize,
    pub count: u32,
    pub level: u8,
    /// Entry x, past the right edge
    pub x_start: f32,
    pub y: f32,
    pub size: f32,
    pub color: String,
    pub speed_factor: f32,
    /// Seconds for one full crossing
    pub duration: f32,
    /// Seconds the loop is already advanced at scene load
    pub delay: f32,
    /// Destroyed at the weapon line rather than drifting through
    pub targeted: bool,
}

/// Parameters for one interactive enemy spawned from a week row
#[derive(Debug, Clone, PartialEq)]
pub struct EnemySpawn {
    /// Day-of-week row
    pub row: usize,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: String,
    pub level: u8,
}

/// Contributing days in week-major, day-minor order
pub fn flatten(calendar: &ContributionCalendar) -> Vec<ActiveDay<'_>> {
    calendar
        .weeks
        .iter()
        .flat_map(|w| w.days.iter())
        .filter(|d| d.is_active())
        .enumerate()
        .map(|(index, day)| ActiveDay { day, index })
        .collect()
}

/// Keep every `ceil(len / budget)`-th item so at most `budget` remain.
///
/// Lists already within budget come back unchanged.
pub fn downsample<T>(items: Vec<T>, budget: usize) -> Vec<T> {
    if budget == 0 {
        return Vec::new();
    }
    if items.len() <= budget {
        return items;
    }
    let stride = items.len().div_ceil(budget);
    items
        .into_iter()
        .enumerate()
        .filter(|(i, _)| i % stride == 0)
        .map(|(_, item)| item)
        .collect()
}

/// Per-entity seed derived from calendar position and activity
#[inline]
pub fn spawn_seed(index: usize, count: u32) -> u64 {
    (index as u64)
        .wrapping_mul(1337)
        .wrapping_add(u64::from(count).wrapping_mul(31))
}

/// Static-scene entity size
#[inline]
pub fn static_size(level: u8) -> f32 {
    6.0 + clamp_level(level) as f32 * 1.8
}

/// Interactive enemy size
#[inline]
pub fn enemy_size(level: u8) -> f32 {
    ENEMY_BASE_SIZE + clamp_level(level) as f32 * ENEMY_SIZE_PER_LEVEL
}

/// Interactive enemy speed (pixels per frame, leftward)
#[inline]
pub fn enemy_velocity(level: u8) -> Vec2 {
    Vec2::new(-ENEMY_BASE_SPEED - clamp_level(level) as f32, 0.0)
}

/// Height of one day-of-week row on an interactive canvas
#[inline]
pub fn row_height(height: f32) -> f32 {
    ((height - ROW_RESERVED) / DAYS_PER_WEEK as f32).max(0.0)
}

/// Derive the static-scene parameters for one contributing day
pub fn describe(active: ActiveDay<'_>, config: &SceneConfig, width: f32, height: f32) -> SpawnDescriptor {
    let ActiveDay { day, index } = active;
    let level = clamp_level(day.level);
    let seed = spawn_seed(index, day.count);

    let rnd = (seed % 1000) as f32 / 1000.0;
    let rnd2 = (seed.wrapping_mul(7) % 1000) as f32 / 1000.0;
    let speed_factor = 0.8 + ((seed % 20) as f32 / 20.0) * 0.7;

    SpawnDescriptor {
        index,
        count: day.count,
        level,
        x_start: width + rnd * config.stream_length,
        y: 25.0 + rnd2 * (height - 50.0).max(0.0),
        size: static_size(level),
        color: config.color_for_level(level).to_string(),
        speed_factor,
        duration: config.base_duration / speed_factor,
        delay: (seed % 50) as f32 / 10.0,
        targeted: index % config.target_every.max(1) as usize == 0,
    }
}

/// Map a whole calendar to its bounded, ordered list of static entities
pub fn map_calendar(
    calendar: &ContributionCalendar,
    config: &SceneConfig,
    width: f32,
    height: f32,
) -> Vec<SpawnDescriptor> {
    let active = flatten(calendar);
    let available = active.len();
    let kept = downsample(active, config.entity_budget);
    log::debug!(
        "Mapped {} contributing days to {} entities (budget {})",
        available,
        kept.len(),
        config.entity_budget
    );
    kept.into_iter()
        .map(|a| describe(a, config, width, height))
        .collect()
}

/// Enemies for one calendar week on an interactive canvas.
///
/// One row per day-of-week; days past the seventh are ignored.
pub fn week_spawns(week: &ContributionWeek, config: &SceneConfig, width: f32, height: f32) -> Vec<EnemySpawn> {
    let cell = row_height(height);
    week.days
        .iter()
        .take(DAYS_PER_WEEK)
        .enumerate()
        .filter(|(_, day)| day.is_active())
        .map(|(row, day)| {
            let level = clamp_level(day.level);
            EnemySpawn {
                row,
                pos: Vec2::new(width + SPAWN_MARGIN, ROW_TOP + row as f32 * cell),
                vel: enemy_velocity(level),
                size: enemy_size(level),
                color: config.color_for_level(level).to_string(),
                level,
            }
        })
        .collect()
}
