//! Simulation state and entity types
//!
//! Everything the frame loop mutates lives in `SimulationState`. Entities are
//! owned by their vectors and never shared; removal happens by dropping them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Engine lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Frames advance normally
    Running,
    /// Frozen; `tick` is a no-op
    Terminal,
}

/// Entity variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy,
    Projectile,
}

/// A simulated object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub pos: Vec2,
    /// Units per frame
    pub vel: Vec2,
    /// Visual diameter, also used as the collision circle
    pub size: f32,
    pub kind: EntityKind,
    pub color: String,
    /// Contribution level (enemies only)
    #[serde(default)]
    pub level: Option<u8>,
}

impl Entity {
    pub fn player(id: u32, height: f32) -> Self {
        Self {
            id,
            pos: Vec2::new(PLAYER_X, height / 2.0),
            vel: Vec2::ZERO,
            size: PLAYER_SIZE,
            kind: EntityKind::Player,
            color: PLAYER_COLOR.to_string(),
            level: None,
        }
    }

    pub fn projectile(id: u32, muzzle: Vec2) -> Self {
        Self {
            id,
            pos: muzzle,
            vel: Vec2::new(PROJECTILE_SPEED, 0.0),
            size: PROJECTILE_SIZE,
            kind: EntityKind::Projectile,
            color: PLAYER_COLOR.to_string(),
            level: None,
        }
    }

    /// Advance by one frame of velocity
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Points awarded for destroying this entity
    pub fn bounty(&self) -> u64 {
        u64::from(self.level.unwrap_or(0).max(1)) * POINTS_PER_LEVEL
    }
}

/// Complete interactive state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    pub player: Entity,
    /// Active enemies in spawn order
    pub enemies: Vec<Entity>,
    /// Active projectiles in firing order
    pub projectiles: Vec<Entity>,
    pub score: u64,
    pub width: f32,
    pub height: f32,
    pub phase: Phase,
    /// Frames advanced while running
    pub time_ticks: u64,
    /// Frames since the last week spawn
    pub(crate) spawn_timer: u32,
    /// Next calendar week to spawn
    pub(crate) week_cursor: usize,
    /// Next entity ID
    next_id: u32,
}

impl SimulationState {
    /// Fresh state with the player centered on the left edge
    pub fn new(width: f32, height: f32) -> Self {
        let mut state = Self {
            player: Entity::player(0, height),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            score: 0,
            width,
            height,
            phase: Phase::Running,
            time_ticks: 0,
            spawn_timer: 0,
            week_cursor: 0,
            next_id: 1,
        };
        state.player.id = state.next_entity_id();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == Phase::Terminal
    }

    /// Next week the spawner will emit
    pub fn week_cursor(&self) -> usize {
        self.week_cursor
    }

    /// Clamp `y` into the player's allowed band and move the ship there.
    ///
    /// Canvases shorter than two paddings pin the ship to the middle.
    pub fn set_player_y(&mut self, y: f32, padding: f32) {
        let lo = padding;
        let hi = self.height - padding;
        self.player.pos.y = if hi < lo {
            self.height / 2.0
        } else if y.is_nan() {
            self.player.pos.y.clamp(lo, hi)
        } else {
            y.clamp(lo, hi)
        };
    }

    /// Fire one projectile from the ship's muzzle
    pub fn shoot(&mut self) {
        let id = self.next_entity_id();
        let muzzle = self.player.pos + Vec2::new(MUZZLE_OFFSET, 0.0);
        self.projectiles.push(Entity::projectile(id, muzzle));
    }

    /// Owned, renderer-facing copy of the visible state
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            player: self.player.clone(),
            enemies: self.enemies.clone(),
            projectiles: self.projectiles.clone(),
            score: self.score,
            width: self.width,
            height: self.height,
            terminal: self.is_terminal(),
        }
    }
}

/// Read-only view handed to renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub player: Entity,
    pub enemies: Vec<Entity>,
    pub projectiles: Vec<Entity>,
    pub score: u64,
    pub width: f32,
    pub height: f32,
    pub terminal: bool,
}

impl StateSnapshot {
    /// Six-digit HUD score
    pub fn score_label(&self) -> String {
        format!("{:06}", self.score)
    }
}
