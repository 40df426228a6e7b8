//! Contribution calendar input
//!
//! Read-only data handed to the core by the data-source adapter. Decoding is
//! lenient: negative counts become 0 and levels clamp into 0..=4, since the
//! scene is decorative and should degrade rather than fail.

use serde::{Deserialize, Deserializer, Serialize};

use crate::consts::{DAYS_PER_WEEK, MAX_LEVEL};
use crate::error::SceneError;

/// A single day of activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionDay {
    /// ISO date (YYYY-MM-DD)
    #[serde(default)]
    pub date: String,
    #[serde(deserialize_with = "lenient_count")]
    pub count: u32,
    /// Quartile bucket of `count` (0 = none)
    #[serde(deserialize_with = "lenient_level")]
    pub level: u8,
}

impl ContributionDay {
    pub fn new(date: impl Into<String>, count: u32, level: u8) -> Self {
        Self {
            date: date.into(),
            count,
            level: level.min(MAX_LEVEL),
        }
    }

    pub fn is_active(&self) -> bool {
        self.count > 0
    }
}

/// Seven days, Sunday first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionWeek {
    pub days: Vec<ContributionDay>,
}

/// A user's calendar, oldest week first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    #[serde(default)]
    pub username: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_contributions: u32,
    #[serde(default)]
    pub weeks: Vec<ContributionWeek>,
    /// Set when the calendar was synthesized instead of fetched
    #[serde(default)]
    pub is_mock: bool,
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.clamp(0, u32::MAX as i64) as u32)
}

fn lenient_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.clamp(0, MAX_LEVEL as i64) as u8)
}

impl ContributionCalendar {
    /// An empty calendar (renders an empty but valid scene)
    pub fn empty(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Default::default()
        }
    }

    /// Decode the calendar's own JSON form
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Number of days with at least one contribution
    pub fn active_days(&self) -> usize {
        self.weeks
            .iter()
            .flat_map(|w| w.days.iter())
            .filter(|d| d.is_active())
            .count()
    }

    /// Decode a GitHub GraphQL `contributionCalendar` response body
    pub fn from_graphql(username: &str, body: &str) -> Result<Self, SceneError> {
        let response: graphql::Response = serde_json::from_str(body)?;

        if let Some(err) = response.errors.as_ref().and_then(|e| e.first()) {
            return Err(SceneError::Calendar(err.message.clone()));
        }

        let calendar = response
            .data
            .and_then(|d| d.user)
            .map(|u| u.contributions_collection.contribution_calendar)
            .ok_or_else(|| SceneError::Calendar(format!("no calendar for user {}", username)))?;

        let weeks = calendar
            .weeks
            .into_iter()
            .map(|week| ContributionWeek {
                days: week
                    .contribution_days
                    .into_iter()
                    .map(|day| ContributionDay {
                        date: day.date,
                        count: day.contribution_count.clamp(0, u32::MAX as i64) as u32,
                        level: level_from_quartile(&day.contribution_level),
                    })
                    .collect(),
            })
            .collect();

        Ok(Self {
            username: username.to_string(),
            total_contributions: calendar.total_contributions.clamp(0, u32::MAX as i64) as u32,
            weeks,
            is_mock: false,
        })
    }

    /// Synthesize a year of activity from the username alone.
    ///
    /// Used when no API token is configured. The same username always yields
    /// the same calendar; `end_day` (days since 1970-01-01) only shifts the
    /// date labels.
    pub fn mock(username: &str, end_day: i64) -> Self {
        let hash: u32 = username.chars().map(|c| c as u32).sum();
        let seed = hash % 100;
        let total_contributions = hash.wrapping_mul(13) % 2000;
        // Busier users get a lower threshold
        let threshold = 70 + (seed % 25);

        let weeks = (0..52u32)
            .map(|w| ContributionWeek {
                days: (0..DAYS_PER_WEEK as u32)
                    .map(|d| {
                        let offset = (51 - w) as i64 * 7 + (6 - d) as i64;
                        let date = format_civil_date(end_day - offset);
                        let val = hash.wrapping_add(w * 7 + d) % 100;
                        if val > threshold {
                            ContributionDay::new(date, val % 10 + 1, (val % 4 + 1) as u8)
                        } else {
                            ContributionDay::new(date, 0, 0)
                        }
                    })
                    .collect(),
            })
            .collect();

        log::debug!("Mock calendar for {} (hash {}, threshold {})", username, hash, threshold);

        Self {
            username: username.to_string(),
            total_contributions,
            weeks,
            is_mock: true,
        }
    }
}

/// Map GitHub's `ContributionLevel` enum names to 0..=4
pub fn level_from_quartile(name: &str) -> u8 {
    match name {
        "FIRST_QUARTILE" => 1,
        "SECOND_QUARTILE" => 2,
        "THIRD_QUARTILE" => 3,
        "FOURTH_QUARTILE" => 4,
        _ => 0,
    }
}

/// Format days since the Unix epoch as YYYY-MM-DD (proleptic Gregorian)
pub fn format_civil_date(days: i64) -> String {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    format!("{:04}-{:02}-{:02}", year, month, day)
}

/// Wire shape of the GraphQL contribution query
mod graphql {
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Response {
        pub data: Option<Data>,
        pub errors: Option<Vec<GraphqlError>>,
    }

    #[derive(Deserialize)]
    pub struct GraphqlError {
        pub message: String,
    }

    #[derive(Deserialize)]
    pub struct Data {
        pub user: Option<User>,
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct User {
        pub contributions_collection: Collection,
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Collection {
        pub contribution_calendar: Calendar,
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Calendar {
        pub total_contributions: i64,
        pub weeks: Vec<Week>,
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Week {
        pub contribution_days: Vec<Day>,
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Day {
        pub date: String,
        pub contribution_count: i64,
        pub contribution_level: String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_decoding_clamps() {
        let json = r#"{
            "username": "octo",
            "totalContributions": 3,
            "weeks": [{"days": [
                {"date": "2024-01-07", "count": -4, "level": -1},
                {"date": "2024-01-08", "count": 3, "level": 9}
            ]}]
        }"#;
        let cal = ContributionCalendar::from_json(json).unwrap();
        assert_eq!(cal.weeks[0].days[0].count, 0);
        assert_eq!(cal.weeks[0].days[0].level, 0);
        assert_eq!(cal.weeks[0].days[1].level, 4);
        assert!(!cal.is_mock);
        assert_eq!(cal.active_days(), 1);
    }

    #[test]
    fn test_mock_is_deterministic() {
        let a = ContributionCalendar::mock("octocat", 20_000);
        let b = ContributionCalendar::mock("octocat", 20_000);
        assert_eq!(a, b);
        assert_eq!(a.weeks.len(), 52);
        assert!(a.weeks.iter().all(|w| w.days.len() == 7));
        assert!(a.is_mock);

        // Active days follow the count/level pairing
        for day in a.weeks.iter().flat_map(|w| &w.days) {
            assert_eq!(day.count == 0, day.level == 0);
            assert!(day.count <= 10 && day.level <= 4);
        }
    }

    #[test]
    fn test_mock_dates_end_on_end_day() {
        // 2024-03-01 is day 19783
        let cal = ContributionCalendar::mock("a", 19_783);
        assert_eq!(cal.weeks[51].days[6].date, "2024-03-01");
        assert_eq!(cal.weeks[51].days[5].date, "2024-02-29");
        assert_eq!(cal.weeks[0].days[0].date, format_civil_date(19_783 - 51 * 7 - 6));
    }

    #[test]
    fn test_mock_total_from_hash() {
        // "ab" = 97 + 98 = 195
        let cal = ContributionCalendar::mock("ab", 0);
        assert_eq!(cal.total_contributions, (195 * 13) % 2000);
    }

    #[test]
    fn test_civil_dates() {
        assert_eq!(format_civil_date(0), "1970-01-01");
        assert_eq!(format_civil_date(-1), "1969-12-31");
        assert_eq!(format_civil_date(11_016), "2000-02-29");
    }

    #[test]
    fn test_graphql_decoding() {
        let body = r#"{"data":{"user":{"contributionsCollection":{"contributionCalendar":{
            "totalContributions": 12,
            "weeks": [{"contributionDays": [
                {"date":"2024-01-07","contributionCount":0,"contributionLevel":"NONE"},
                {"date":"2024-01-08","contributionCount":5,"contributionLevel":"THIRD_QUARTILE"},
                {"date":"2024-01-09","contributionCount":7,"contributionLevel":"SOMETHING_NEW"}
            ]}]
        }}}}}"#;
        let cal = ContributionCalendar::from_graphql("octo", body).unwrap();
        assert_eq!(cal.username, "octo");
        assert_eq!(cal.total_contributions, 12);
        let levels: Vec<u8> = cal.weeks[0].days.iter().map(|d| d.level).collect();
        assert_eq!(levels, vec![0, 3, 0]);
    }

    #[test]
    fn test_graphql_errors_surface() {
        let body = r#"{"data":null,"errors":[{"message":"Could not resolve to a User"}]}"#;
        let err = ContributionCalendar::from_graphql("ghost", body).unwrap_err();
        assert!(err.to_string().contains("Could not resolve"));

        let body = r#"{"data":{"user":null}}"#;
        assert!(ContributionCalendar::from_graphql("ghost", body).is_err());
    }
}
