use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// Number of rows in the grid; one per weekday, Sunday first.
pub const DAYS_PER_WEEK: usize = 7;

/// Ordinal intensity bucket a day's count was classified into upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", from = "String")]
pub enum ContributionLevel {
    #[default]
    None,
    FirstQuartile,
    SecondQuartile,
    ThirdQuartile,
    FourthQuartile,
}

impl ContributionLevel {
    pub const ALL: [ContributionLevel; 5] = [
        ContributionLevel::None,
        ContributionLevel::FirstQuartile,
        ContributionLevel::SecondQuartile,
        ContributionLevel::ThirdQuartile,
        ContributionLevel::FourthQuartile,
    ];

    /// Unknown tokens fall back to `None` so an odd upstream value never blocks a render.
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_uppercase().as_str() {
            "FIRST_QUARTILE" | "Q1" => Self::FirstQuartile,
            "SECOND_QUARTILE" | "Q2" => Self::SecondQuartile,
            "THIRD_QUARTILE" | "Q3" => Self::ThirdQuartile,
            "FOURTH_QUARTILE" | "Q4" => Self::FourthQuartile,
            _ => Self::None,
        }
    }

    /// Position in the intensity scale, 0 (none) through 4 (highest).
    pub fn index(self) -> usize {
        match self {
            Self::None => 0,
            Self::FirstQuartile => 1,
            Self::SecondQuartile => 2,
            Self::ThirdQuartile => 3,
            Self::FourthQuartile => 4,
        }
    }

    /// The two top buckets get the stronger entrance animation.
    pub fn is_high(self) -> bool {
        matches!(self, Self::ThirdQuartile | Self::FourthQuartile)
    }
}

impl From<String> for ContributionLevel {
    fn from(token: String) -> Self {
        Self::from_token(&token)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    pub date: NaiveDate,
    pub weekday: u8,
    #[serde(rename = "contributionCount", alias = "count")]
    pub count: u32,
    #[serde(rename = "contributionLevel", alias = "level", default)]
    pub level: ContributionLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Week {
    #[serde(rename = "contributionDays", alias = "days")]
    pub days: Vec<Day>,
    #[serde(rename = "firstDay")]
    pub first_day: NaiveDate,
}

impl Week {
    /// `(year, month)` of the week's first day; month labels key on this.
    pub fn month_key(&self) -> (i32, u32) {
        (self.first_day.year(), self.first_day.month())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActivityCalendar {
    #[serde(rename = "totalContributions", alias = "totalCount")]
    pub total_count: u32,
    #[serde(default)]
    pub weeks: Vec<Week>,
}

impl ActivityCalendar {
    pub fn from_json(input: &str) -> Result<Self, DataError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn days(&self) -> impl Iterator<Item = &Day> {
        self.weeks.iter().flat_map(|week| week.days.iter())
    }

    /// Checks the shape invariants every renderer relies on.
    pub fn validate(&self) -> Result<(), DataError> {
        if self.weeks.is_empty() && self.total_count > 0 {
            return Err(DataError::MissingWeeks {
                total: self.total_count,
            });
        }
        for (week_idx, week) in self.weeks.iter().enumerate() {
            if week.days.len() != DAYS_PER_WEEK {
                return Err(DataError::IncompleteWeek {
                    week: week_idx,
                    days: week.days.len(),
                });
            }
            for (day_idx, day) in week.days.iter().enumerate() {
                if usize::from(day.weekday) != day_idx {
                    return Err(DataError::WeekdayMismatch {
                        week: week_idx,
                        day: day_idx,
                        weekday: day.weekday,
                    });
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// A calendar together with the identity it belongs to, as handed over by the fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionData {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date_range: Option<DateRange>,
    pub calendar: ActivityCalendar,
}

impl ContributionData {
    /// Accepts either the full envelope or a bare calendar object.
    ///
    /// A top-level `calendar` key selects the envelope shape; errors come from the shape chosen.
    pub fn from_json(input: &str) -> Result<Self, DataError> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        let Some(object) = value.as_object() else {
            return Err(DataError::Malformed(
                "expected a calendar object at the top level".into(),
            ));
        };
        if object.contains_key("calendar") {
            return Ok(serde_json::from_value(value)?);
        }
        let calendar: ActivityCalendar = serde_json::from_value(value)?;
        Ok(Self {
            calendar,
            ..Self::default()
        })
    }

    pub fn year(&self) -> Option<i32> {
        self.date_range.as_ref().map(|range| range.from.year())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn date(input: &str) -> NaiveDate {
        NaiveDate::parse_from_str(input, "%Y-%m-%d").expect("valid fixture date")
    }

    /// A full week starting on `first_day` with the given counts and levels.
    pub fn week(first_day: &str, counts: [u32; 7], levels: [ContributionLevel; 7]) -> Week {
        let start = date(first_day);
        let days = (0..DAYS_PER_WEEK)
            .map(|idx| Day {
                date: start + chrono::Duration::days(idx as i64),
                weekday: idx as u8,
                count: counts[idx],
                level: levels[idx],
            })
            .collect();
        Week {
            days,
            first_day: start,
        }
    }

    pub fn empty_week(first_day: &str) -> Week {
        week(first_day, [0; 7], [ContributionLevel::None; 7])
    }

    /// Consecutive empty weeks starting at `first_day`.
    pub fn weeks_from(first_day: &str, count: usize) -> Vec<Week> {
        let start = date(first_day);
        (0..count)
            .map(|idx| {
                let day = start + chrono::Duration::weeks(idx as i64);
                empty_week(&day.format("%Y-%m-%d").to_string())
            })
            .collect()
    }
}
