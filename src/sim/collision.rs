//! Projectile/enemy collision
//!
//! Both sides are treated as circles whose diameter is the entity size.

use glam::Vec2;

use super::state::SimulationState;
use crate::consts::DISPLACE_OFFSET;
use crate::settings::CollisionPolicy;

/// One scored hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub projectile_id: u32,
    pub enemy_id: u32,
    pub points: u64,
}

/// True when two circles (given by center and diameter) overlap
#[inline]
pub fn circles_overlap(a: Vec2, a_size: f32, b: Vec2, b_size: f32) -> bool {
    a.distance(b) < (a_size + b_size) / 2.0
}

/// Resolve every projectile against every enemy, in firing then spawn order.
///
/// A hit removes the enemy, adds its bounty to the score and pushes the
/// projectile past the right edge so the next bounds pass drops it.
pub fn resolve_collisions(state: &mut SimulationState, policy: CollisionPolicy) -> Vec<Hit> {
    let mut hits = Vec::new();
    let spent_x = state.width + DISPLACE_OFFSET;

    for projectile in state.projectiles.iter_mut() {
        // Piercing shots test every enemy against the pre-hit position
        let origin = projectile.pos;
        let mut scored = false;

        let mut i = 0;
        while i < state.enemies.len() {
            let enemy = &state.enemies[i];
            if !circles_overlap(origin, projectile.size, enemy.pos, enemy.size) {
                i += 1;
                continue;
            }

            let enemy = state.enemies.remove(i);
            let points = enemy.bounty();
            state.score += points;
            scored = true;
            hits.push(Hit {
                projectile_id: projectile.id,
                enemy_id: enemy.id,
                points,
            });

            if policy == CollisionPolicy::SingleHit {
                break;
            }
        }

        if scored {
            projectile.pos.x = spent_x;
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Entity, EntityKind};

    fn enemy(state: &mut SimulationState, x: f32, y: f32, level: u8) {
        let id = state.next_entity_id();
        state.enemies.push(Entity {
            id,
            pos: Vec2::new(x, y),
            vel: Vec2::new(-3.0 - level as f32, 0.0),
            size: 12.0 + level as f32 * 2.0,
            kind: EntityKind::Enemy,
            color: "#0e4429".into(),
            level: Some(level),
        });
    }

    #[test]
    fn test_overlap_is_circular() {
        // Diagonal distance ~14.1 vs radius sum 12
        assert!(!circles_overlap(Vec2::ZERO, 4.0, Vec2::new(10.0, 10.0), 20.0));
        assert!(circles_overlap(Vec2::ZERO, 4.0, Vec2::new(11.0, 0.0), 20.0));
        // Touching exactly is not a hit
        assert!(!circles_overlap(Vec2::ZERO, 4.0, Vec2::new(12.0, 0.0), 20.0));
    }

    #[test]
    fn test_hit_removes_enemy_and_scores() {
        let mut state = SimulationState::new(800.0, 400.0);
        state.shoot();
        enemy(&mut state, 75.0, 200.0, 2);

        let hits = resolve_collisions(&mut state, CollisionPolicy::SingleHit);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].points, 20);
        assert_eq!(state.score, 20);
        assert!(state.enemies.is_empty());
        assert_eq!(state.projectiles[0].pos.x, 1800.0);
    }

    #[test]
    fn test_level_zero_scores_ten() {
        let mut state = SimulationState::new(800.0, 400.0);
        state.shoot();
        enemy(&mut state, 70.0, 200.0, 0);
        resolve_collisions(&mut state, CollisionPolicy::SingleHit);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_miss_keeps_everything() {
        let mut state = SimulationState::new(800.0, 400.0);
        state.shoot();
        enemy(&mut state, 300.0, 200.0, 4);

        let hits = resolve_collisions(&mut state, CollisionPolicy::SingleHit);
        assert!(hits.is_empty());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.projectiles[0].pos.x, 70.0);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_single_hit_policy() {
        let mut state = SimulationState::new(800.0, 400.0);
        state.shoot();
        enemy(&mut state, 72.0, 200.0, 1);
        enemy(&mut state, 68.0, 202.0, 1);

        let hits = resolve_collisions(&mut state, CollisionPolicy::SingleHit);
        assert_eq!(hits.len(), 1);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_piercing_policy() {
        let mut state = SimulationState::new(800.0, 400.0);
        state.shoot();
        enemy(&mut state, 72.0, 200.0, 1);
        enemy(&mut state, 68.0, 202.0, 3);

        let hits = resolve_collisions(&mut state, CollisionPolicy::Piercing);
        assert_eq!(hits.len(), 2);
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 40);
        assert_eq!(state.projectiles[0].pos.x, 1800.0);
    }

    #[test]
    fn test_second_projectile_finds_next_enemy() {
        let mut state = SimulationState::new(800.0, 400.0);
        state.shoot();
        state.shoot();
        enemy(&mut state, 72.0, 200.0, 1);
        enemy(&mut state, 68.0, 202.0, 1);

        let hits = resolve_collisions(&mut state, CollisionPolicy::SingleHit);
        assert_eq!(hits.len(), 2);
        assert_ne!(hits[0].projectile_id, hits[1].projectile_id);
        assert!(state.enemies.is_empty());
    }
}
