use chrono::Datelike;
use serde::Serialize;

use crate::model::Day;

/// Aggregate figures over a run of days, as shown next to a calendar.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionStats {
    pub total_contributions: u64,
    pub active_days: usize,
    pub total_days: usize,
    pub max_daily_contributions: u32,
    pub average_daily_contributions: f64,
    pub longest_streak: usize,
    pub current_streak: usize,
    /// Share of active days, in percent.
    pub activity_rate: f64,
}

impl ContributionStats {
    pub fn from_days<'a, I>(days: I) -> Self
    where
        I: IntoIterator<Item = &'a Day>,
    {
        let counts: Vec<u32> = days.into_iter().map(|day| day.count).collect();
        if counts.is_empty() {
            return Self::default();
        }

        let total: u64 = counts.iter().map(|&c| u64::from(c)).sum();
        let active_days = counts.iter().filter(|&&c| c > 0).count();

        let mut run = 0;
        let mut longest_streak = 0;
        for &count in &counts {
            if count > 0 {
                run += 1;
                longest_streak = longest_streak.max(run);
            } else {
                run = 0;
            }
        }
        let current_streak = counts.iter().rev().take_while(|&&c| c > 0).count();

        let days = counts.len() as f64;
        Self {
            total_contributions: total,
            active_days,
            total_days: counts.len(),
            max_daily_contributions: counts.iter().copied().max().unwrap_or(0),
            average_daily_contributions: round2(total as f64 / days),
            longest_streak,
            current_streak,
            activity_rate: round2(active_days as f64 / days * 100.0),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTotal {
    pub year: i32,
    pub month: u32,
    pub days: usize,
    pub contributions: u64,
}

/// Sums per calendar month, in order of first appearance.
pub fn monthly_totals<'a, I>(days: I) -> Vec<MonthlyTotal>
where
    I: IntoIterator<Item = &'a Day>,
{
    let mut totals: Vec<MonthlyTotal> = Vec::new();
    for day in days {
        let (year, month) = (day.date.year(), day.date.month());
        match totals.iter_mut().find(|t| t.year == year && t.month == month) {
            Some(entry) => {
                entry.days += 1;
                entry.contributions += u64::from(day.count);
            }
            None => totals.push(MonthlyTotal {
                year,
                month,
                days: 1,
                contributions: u64::from(day.count),
            }),
        }
    }
    totals
}
