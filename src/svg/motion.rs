//! Closed-form motion for the static scene
//!
//! Each entity crosses the canvas at constant speed, so its whole life is a
//! linear function of loop time. The weapon line is reached at a fixed
//! fraction of the loop, which is where the destruction flash is keyed.

use crate::consts::FLASH_COLOR;
use crate::mapper::SpawnDescriptor;
use crate::settings::SceneConfig;

/// Latest key time allowed for a hit so the fade keys stay ordered
pub const MAX_HIT_FRACTION: f32 = 0.99;

/// Key times with one value per key
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub key_times: Vec<f32>,
    pub values: Vec<String>,
}

impl Timeline {
    fn new(keys: &[(f32, &str)]) -> Self {
        Self {
            key_times: keys.iter().map(|(t, _)| *t).collect(),
            values: keys.iter().map(|(_, v)| v.to_string()).collect(),
        }
    }

    /// Discrete-then-linear lookup of the numeric value at loop fraction `t`
    pub fn numeric_at(&self, t: f32) -> f32 {
        let parse = |i: usize| self.values[i].parse::<f32>().unwrap_or(0.0);
        let last = self.key_times.len().saturating_sub(1);
        for i in 0..last {
            let (t0, t1) = (self.key_times[i], self.key_times[i + 1]);
            if t >= t0 && t < t1 {
                let u = if t1 > t0 { (t - t0) / (t1 - t0) } else { 0.0 };
                return parse(i) + (parse(i + 1) - parse(i)) * u;
            }
        }
        if self.values.is_empty() { 0.0 } else { parse(last) }
    }

    /// Value in effect at loop fraction `t` without interpolation
    pub fn step_at(&self, t: f32) -> &str {
        let mut current = self.values.first().map(String::as_str).unwrap_or("");
        for (k, v) in self.key_times.iter().zip(&self.values) {
            if t >= *k {
                current = v;
            }
        }
        current
    }
}

/// Fully solved animation for one entity
#[derive(Debug, Clone, PartialEq)]
pub struct EntityTrack {
    pub x_from: f32,
    pub x_to: f32,
    /// Center line of the entity
    pub y: f32,
    pub size: f32,
    pub color: String,
    /// Seconds per loop
    pub duration: f32,
    /// Seconds already elapsed at scene load
    pub delay: f32,
    /// Loop fraction at which the weapon line is reached
    pub t_hit: f32,
    pub targeted: bool,
    pub opacity: Timeline,
    pub fill: Timeline,
}

/// Fraction of the transit `x_start -> -exit_margin` at which `hit_x` is crossed
pub fn hit_fraction(x_start: f32, hit_x: f32, exit_margin: f32) -> f32 {
    let total = x_start + exit_margin;
    if total <= 0.0 {
        return 0.0;
    }
    ((x_start - hit_x) / total).clamp(0.0, MAX_HIT_FRACTION)
}

/// Solve one descriptor into a looped keyframe track
pub fn solve(descriptor: &SpawnDescriptor, config: &SceneConfig) -> EntityTrack {
    let t_hit = hit_fraction(descriptor.x_start, config.hit_x, config.exit_margin);
    let color = descriptor.color.as_str();

    let (opacity, fill) = if descriptor.targeted {
        let t_end = (t_hit + config.flash_span).min(1.0);
        (
            Timeline::new(&[(0.0, "1"), (t_hit, "1"), (t_end, "0"), (1.0, "0")]),
            Timeline::new(&[(0.0, color), (t_hit, color), (t_hit, FLASH_COLOR), (1.0, FLASH_COLOR)]),
        )
    } else {
        let fade_start = (1.0 - config.flash_span).max(0.0);
        (
            Timeline::new(&[(0.0, "1"), (fade_start, "1"), (1.0, "0")]),
            Timeline::new(&[(0.0, color), (1.0, color)]),
        )
    };

    EntityTrack {
        x_from: descriptor.x_start,
        x_to: -config.exit_margin,
        y: descriptor.y,
        size: descriptor.size,
        color: descriptor.color.clone(),
        duration: descriptor.duration,
        delay: descriptor.delay,
        t_hit,
        targeted: descriptor.targeted,
        opacity,
        fill,
    }
}

impl EntityTrack {
    /// Loop fraction at scene time `secs` (the negative begin offset included)
    pub fn phase_at(&self, secs: f32) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        ((secs + self.delay) / self.duration).rem_euclid(1.0)
    }

    /// Center x at scene time `secs`
    pub fn x_at(&self, secs: f32) -> f32 {
        let t = self.phase_at(secs);
        self.x_from + (self.x_to - self.x_from) * t
    }

    pub fn opacity_at(&self, secs: f32) -> f32 {
        self.opacity.numeric_at(self.phase_at(secs))
    }

    pub fn fill_at(&self, secs: f32) -> &str {
        self.fill.step_at(self.phase_at(secs))
    }
}
