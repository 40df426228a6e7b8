//! Static scene compiler
//!
//! Renders a calendar as a self-animating SVG. All motion is pre-solved into
//! SMIL `<animate>` curves, so viewers need no script. Output depends only on
//! the inputs: the same calendar and username always produce the same bytes.

pub mod motion;
pub mod starfield;

pub use motion::{EntityTrack, Timeline, hit_fraction, solve};
pub use starfield::Star;

use crate::calendar::ContributionCalendar;
use crate::consts::{PLAYER_COLOR, SVG_HEIGHT, SVG_WIDTH};
use crate::mapper::map_calendar;
use crate::settings::SceneConfig;

/// Seconds between ambient streaks
const STREAK_SPACING: f32 = 0.6;
/// Seconds for one streak to cross the canvas
const STREAK_DURATION: f32 = 0.8;
/// Seconds for one ship float cycle
const SHIP_FLOAT_PERIOD: f32 = 8.0;

/// Render with the default config
pub fn render_svg(calendar: &ContributionCalendar, username: &str, width: f32, height: f32) -> String {
    render_svg_with(calendar, username, width, height, &SceneConfig::default())
}

/// Render at the default 800x200 badge size
pub fn render_badge(calendar: &ContributionCalendar, username: &str) -> String {
    render_svg(calendar, username, SVG_WIDTH, SVG_HEIGHT)
}

/// Render the full scene
pub fn render_svg_with(
    calendar: &ContributionCalendar,
    username: &str,
    width: f32,
    height: f32,
    config: &SceneConfig,
) -> String {
    let width = width.max(0.0);
    let height = height.max(0.0);
    let tracks: Vec<EntityTrack> = map_calendar(calendar, config, width, height)
        .iter()
        .map(|d| solve(d, config))
        .collect();
    let stars = starfield::generate(
        starfield::scene_seed(username, calendar.total_contributions),
        config.star_count,
        width,
        height,
    );

    log::debug!(
        "Rendering SVG for {}: {} entities, {} stars",
        username,
        tracks.len(),
        stars.len()
    );

    let (w, h) = (num(width), num(height));
    let mut out = String::with_capacity(4096 + tracks.len() * 768);
    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#
    ));
    out.push('\n');
    out.push_str(&format!(
        concat!(
            r#"<defs><linearGradient id="shipGrad" x1="0%" y1="0%" x2="100%" y2="0%">"#,
            r##"<stop offset="0%" stop-color="{}"/><stop offset="100%" stop-color="#3fb950"/>"##,
            "</linearGradient></defs>\n"
        ),
        PLAYER_COLOR
    ));
    out.push_str("<rect width=\"100%\" height=\"100%\" fill=\"#0d1117\" rx=\"10\"/>\n");

    push_starfield(&mut out, &stars);
    push_streaks(&mut out, config.ambient_streaks, width, height);
    for track in &tracks {
        push_entity(&mut out, track);
    }
    push_ship(&mut out, height);
    push_hud(&mut out, username, calendar.total_contributions, width);

    out.push_str("</svg>\n");
    out
}

/// Minimal fallback image for when the calendar could not be fetched
pub fn error_svg(message: &str) -> String {
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="50">"#,
            r#"<text x="10" y="30" fill="red" font-family="monospace" font-size="12">Error: {}</text>"#,
            "</svg>\n"
        ),
        escape_xml(message)
    )
}

fn push_starfield(out: &mut String, stars: &[Star]) {
    out.push_str("<g opacity=\"0.3\">");
    for star in stars {
        out.push_str(&format!(
            r#"<circle cx="{}" cy="{}" r="{}" fill="white"/>"#,
            num(star.cx),
            num(star.cy),
            num(star.r)
        ));
    }
    out.push_str("</g>\n");
}

/// Decorative shots fired on a fixed stagger; they never hit anything
fn push_streaks(out: &mut String, count: u32, width: f32, height: f32) {
    out.push_str("<g>");
    let y = num(height / 2.0);
    let to = num(width + 50.0);
    let dur = num(STREAK_DURATION);
    for i in 0..count {
        let begin = num(i as f32 * STREAK_SPACING);
        out.push_str(&format!(
            concat!(
                r#"<rect width="8" height="2" fill="{color}" rx="1" opacity="0">"#,
                r#"<animate attributeName="opacity" values="0;1;0" dur="{dur}s" repeatCount="indefinite" begin="{begin}s"/>"#,
                r#"<animate attributeName="x" from="40" to="{to}" dur="{dur}s" repeatCount="indefinite" begin="{begin}s"/>"#,
                r#"<animate attributeName="y" from="{y}" to="{y}" dur="{dur}s" repeatCount="indefinite" begin="{begin}s"/>"#,
                "</rect>"
            ),
            color = PLAYER_COLOR,
            dur = dur,
            begin = begin,
            to = to,
            y = y,
        ));
    }
    out.push_str("</g>\n");
}

fn push_entity(out: &mut String, track: &EntityTrack) {
    let dur = num(track.duration);
    let begin = num(track.delay);
    let half = track.size / 2.0;
    out.push_str(&format!(
        r#"<rect x="{x}" y="{y}" width="{s}" height="{s}" fill="{fill}" rx="1">"#,
        x = num(track.x_from),
        y = num(track.y - half),
        s = num(track.size),
        fill = track.color,
    ));
    out.push_str(&format!(
        r#"<animate attributeName="x" from="{}" to="{}" dur="{dur}s" repeatCount="indefinite" begin="-{begin}s"/>"#,
        num(track.x_from),
        num(track.x_to),
    ));
    push_timeline(out, "opacity", &track.opacity, &dur, &begin);
    if track.targeted {
        push_timeline(out, "fill", &track.fill, &dur, &begin);
    }
    out.push_str("</rect>\n");
}

fn push_timeline(out: &mut String, attribute: &str, timeline: &Timeline, dur: &str, begin: &str) {
    let values = timeline.values.join(";");
    let key_times = timeline
        .key_times
        .iter()
        .map(|t| key_time(*t))
        .collect::<Vec<_>>()
        .join(";");
    out.push_str(&format!(
        r#"<animate attributeName="{attribute}" values="{values}" keyTimes="{key_times}" dur="{dur}s" repeatCount="indefinite" begin="-{begin}s"/>"#
    ));
}

fn push_ship(out: &mut String, height: f32) {
    let mid = height / 2.0;
    out.push_str(&format!(
        concat!(
            r#"<g transform="translate(10, 0)"><path d="M 35,{} L 15,{} L 15,{} Z" fill="url(#shipGrad)">"#,
            r#"<animateTransform attributeName="transform" type="translate" values="0 0; 0 -10; 0 10; 0 0" dur="{}s" repeatCount="indefinite"/>"#,
            "</path></g>\n"
        ),
        num(mid),
        num(mid - 7.0),
        num(mid + 7.0),
        num(SHIP_FLOAT_PERIOD),
    ));
}

fn push_hud(out: &mut String, username: &str, total: u32, width: f32) {
    out.push_str(concat!(
        r##"<rect x="20" y="10" width="160" height="24" fill="#0d1117" stroke="#30363d" rx="4"/>"##,
        "\n"
    ));
    out.push_str(&format!(
        r#"<text x="30" y="26" fill="{}" font-family="monospace" font-size="9" font-weight="900" letter-spacing="1">MISSION: {}</text>"#,
        PLAYER_COLOR,
        escape_xml(&username.to_uppercase())
    ));
    out.push('\n');
    out.push_str(&format!(
        r##"<rect x="{}" y="10" width="130" height="24" fill="#0d1117" stroke="#30363d" rx="4"/>"##,
        num(width - 150.0)
    ));
    out.push('\n');
    out.push_str(&format!(
        r##"<text x="{}" y="26" fill="#3fb950" font-family="monospace" font-size="9" font-weight="900" letter-spacing="1">CORE: {}</text>"##,
        num(width - 142.0),
        total
    ));
    out.push('\n');
}

/// Attribute number: at most two decimals, no trailing zeros
pub fn num(value: f32) -> String {
    trim_decimals(format!("{:.2}", value))
}

/// Key times need more resolution than coordinates
fn key_time(value: f32) -> String {
    trim_decimals(format!("{:.4}", value))
}

fn trim_decimals(s: String) -> String {
    let trimmed = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Escape text for XML content and attribute values
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
