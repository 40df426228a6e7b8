//! Ambient fire driver
//!
//! The engine itself never shoots on its own. Hosts that want the "ship
//! fires by itself" feel run this alongside the frame loop. The RNG is
//! seeded so headless replays match.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::engine::Engine;

/// Chance of a shot on any given frame
pub const FRAME_FIRE_CHANCE: f64 = 0.05;
/// Chance of a shot when the pointer moves
pub const POINTER_FIRE_CHANCE: f64 = 0.2;

/// Seeded random trigger for ambient shots
#[derive(Debug, Clone)]
pub struct AutoFire {
    rng: Pcg32,
    frame_chance: f64,
    pointer_chance: f64,
}

impl AutoFire {
    pub fn new(seed: u64) -> Self {
        Self::with_chances(seed, FRAME_FIRE_CHANCE, POINTER_FIRE_CHANCE)
    }

    pub fn with_chances(seed: u64, frame_chance: f64, pointer_chance: f64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            frame_chance: frame_chance.clamp(0.0, 1.0),
            pointer_chance: pointer_chance.clamp(0.0, 1.0),
        }
    }

    /// Roll for an ambient shot after a frame; returns true if one was fired
    pub fn on_frame(&mut self, engine: &mut Engine) -> bool {
        let fire = self.rng.random_bool(self.frame_chance);
        if fire {
            engine.shoot();
        }
        fire
    }

    /// Move the ship to the pointer, then roll for a shot
    pub fn on_pointer_move(&mut self, engine: &mut Engine, y: f32) -> bool {
        engine.set_player_y(y);
        let fire = self.rng.random_bool(self.pointer_chance);
        if fire {
            engine.shoot();
        }
        fire
    }
}

/// Run `frames` updates with ambient fire, sweeping the ship over the canvas.
///
/// Used by the headless CLI and tests.
pub fn run_headless(engine: &mut Engine, autofire: &mut AutoFire, frames: u32) {
    let height = engine.state().height;
    for frame in 0..frames {
        // Slow triangle sweep standing in for a pointer
        let phase = (frame % 240) as f32 / 240.0;
        let sweep = if phase < 0.5 { phase * 2.0 } else { 2.0 - phase * 2.0 };
        if frame % 4 == 0 {
            autofire.on_pointer_move(engine, sweep * height);
        }
        engine.update();
        autofire.on_frame(engine);
    }
    log::info!(
        "Headless run: {} frames, score {}",
        frames,
        engine.state().score
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::ContributionCalendar;

    #[test]
    fn test_seeded_runs_match() {
        let calendar = ContributionCalendar::mock("octocat", 20_000);
        let run = |seed| {
            let mut engine = Engine::new(calendar.clone(), 800.0, 400.0);
            let mut fire = AutoFire::new(seed);
            run_headless(&mut engine, &mut fire, 900);
            engine.snapshot()
        };
        assert_eq!(run(7), run(7));
    }

    #[test]
    fn test_certain_and_never() {
        let calendar = ContributionCalendar::empty("nobody");
        let mut engine = Engine::new(calendar, 800.0, 400.0);

        let mut always = AutoFire::with_chances(1, 1.0, 1.0);
        assert!(always.on_frame(&mut engine));
        assert!(always.on_pointer_move(&mut engine, 100.0));
        assert_eq!(engine.state().projectiles.len(), 2);
        assert_eq!(engine.state().player.pos.y, 100.0);

        let mut never = AutoFire::with_chances(1, 0.0, 0.0);
        assert!(!never.on_frame(&mut engine));
        assert!(!never.on_pointer_move(&mut engine, 5.0));
        assert_eq!(engine.state().projectiles.len(), 2);
        assert_eq!(engine.state().player.pos.y, 20.0);
    }
}
