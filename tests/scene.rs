//! End-to-end checks through the public API

use contrib_shooter::calendar::{ContributionCalendar, ContributionDay, ContributionWeek};
use contrib_shooter::consts::{BOUNDS_MARGIN, DISPLACE_OFFSET, SPAWN_MARGIN};
use contrib_shooter::mapper::{map_calendar, row_height, week_spawns};
use contrib_shooter::settings::{DEFAULT_PALETTE, SceneConfig};
use contrib_shooter::sim::{AutoFire, Engine, run_headless};
use contrib_shooter::{error_svg, render_svg};

fn single_day_week() -> ContributionCalendar {
    let days = (0..7)
        .map(|i| {
            if i == 3 {
                ContributionDay::new("2024-03-06", 9, 4)
            } else {
                ContributionDay::new("2024-03-06", 0, 0)
            }
        })
        .collect();
    ContributionCalendar {
        username: "octocat".to_string(),
        total_contributions: 9,
        weeks: vec![ContributionWeek { days }],
        is_mock: false,
    }
}

#[test]
fn test_single_level_four_day_spawns_one_enemy() {
    let calendar = single_day_week();
    let config = SceneConfig::default();

    let spawns = week_spawns(&calendar.weeks[0], &config, 800.0, 400.0);
    assert_eq!(spawns.len(), 1);
    assert_eq!(spawns[0].color, DEFAULT_PALETTE[4]);
    assert_eq!(spawns[0].size, 20.0);
    assert!((spawns[0].pos.y - (50.0 + 3.0 * row_height(400.0))).abs() < 1e-3);
    assert!(spawns[0].vel.x <= -7.0);

    let mut engine = Engine::new(calendar, 800.0, 400.0);
    for _ in 0..config.spawn_interval {
        engine.update();
    }
    let enemies = &engine.state().enemies;
    assert_eq!(enemies.len(), 1);
    assert_eq!(enemies[0].color, DEFAULT_PALETTE[4]);
    assert_eq!(enemies[0].size, 20.0);
    assert!(enemies[0].vel.x <= -7.0);
}

#[test]
fn test_empty_calendar_is_harmless() {
    let calendar = ContributionCalendar::empty("nobody");
    assert!(map_calendar(&calendar, &SceneConfig::default(), 800.0, 200.0).is_empty());

    let mut engine = Engine::with_default_canvas(calendar.clone());
    for _ in 0..500 {
        engine.update();
    }
    assert!(engine.state().enemies.is_empty());
    assert_eq!(engine.state().score, 0);

    let svg = render_svg(&calendar, "nobody", 800.0, 200.0);
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("MISSION: NOBODY"));
}

#[test]
fn test_player_clamps_to_padding() {
    let mut engine = Engine::new(single_day_week(), 800.0, 400.0);
    engine.set_player_y(210.0);
    engine.set_player_y(-50.0);
    assert_eq!(engine.state().player.pos.y, 20.0);
    engine.set_player_y(10_000.0);
    assert_eq!(engine.state().player.pos.y, 380.0);
}

#[test]
fn test_long_headless_run_stays_in_bounds() {
    let calendar = ContributionCalendar::mock("torvalds", 20_000);
    let mut engine = Engine::with_default_canvas(calendar);
    let mut autofire = AutoFire::with_chances(7, 0.5, 0.5);

    let mut last_score = 0;
    for _ in 0..40 {
        run_headless(&mut engine, &mut autofire, 50);
        let state = engine.state();
        assert!(state.score >= last_score);
        last_score = state.score;
        for e in &state.enemies {
            assert!(e.pos.x >= -BOUNDS_MARGIN && e.pos.x <= state.width + SPAWN_MARGIN);
        }
        for p in &state.projectiles {
            assert!(p.pos.x <= state.width + DISPLACE_OFFSET);
        }
    }
    assert!(last_score > 0, "two thousand frames of fire should hit something");
    assert_eq!(last_score % 10, 0);
}

#[test]
fn test_end_freezes_engine() {
    let mut engine = Engine::with_default_canvas(ContributionCalendar::mock("octocat", 20_000));
    for _ in 0..90 {
        engine.update();
    }
    engine.end();
    let frozen = engine.snapshot();
    for _ in 0..90 {
        engine.update();
    }
    assert_eq!(engine.snapshot(), frozen);
    assert!(frozen.terminal);
}

#[test]
fn test_svg_is_deterministic_for_mock_user() {
    let a = render_svg(&ContributionCalendar::mock("octocat", 20_000), "octocat", 800.0, 200.0);
    let b = render_svg(&ContributionCalendar::mock("octocat", 20_000), "octocat", 800.0, 200.0);
    assert_eq!(a, b);
    assert!(a.trim_end().ends_with("</svg>"));
}

#[test]
fn test_error_svg_escapes_message() {
    let svg = error_svg("bad <token>");
    assert!(svg.contains("bad &lt;token&gt;"));
}
