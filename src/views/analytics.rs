use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Timelike, Utc};
use serde::Serialize;

use super::{TimeRange, percent, rounded_percent};
use crate::core::action_item::ActionItem;

/// Histogram rows kept by [`time_patterns`].
pub const MAX_HOURS_SHOWN: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub created: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyCompletion {
    pub week: String,
    pub productivity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Category {
    FollowUp,
    Reports,
    Meetings,
    Development,
    Other,
}

/// Checked in order; the first bucket with a matching keyword wins.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (Category::FollowUp, &["follow", "contact", "reach out"]),
    (Category::Reports, &["report", "document", "write"]),
    (Category::Meetings, &["meeting", "schedule", "call"]),
    (Category::Development, &["develop", "code", "build"]),
];

impl Category {
    pub const ALL: [Category; 5] = [
        Self::FollowUp,
        Self::Reports,
        Self::Meetings,
        Self::Development,
        Self::Other,
    ];

    pub fn classify(text: &str) -> Self {
        let text = text.to_lowercase();
        CATEGORY_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
            .map(|(category, _)| *category)
            .unwrap_or(Self::Other)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FollowUp => "Follow-up",
            Self::Reports => "Reports",
            Self::Meetings => "Meetings",
            Self::Development => "Development",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub category: Category,
    pub count: usize,
    pub percentage: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourCount {
    pub hour: u32,
    pub count: usize,
}

/// Created and completed counts for every day from `start` through `end`.
///
/// Items dated outside that span are ignored.
pub fn daily_activity<Tz: TimeZone>(
    items: &[&ActionItem],
    start: NaiveDate,
    end: NaiveDate,
    tz: &Tz,
) -> Vec<DailyActivity> {
    let mut days: BTreeMap<NaiveDate, DailyActivity> = BTreeMap::new();
    for date in start.iter_days().take_while(|d| *d <= end) {
        days.insert(date, DailyActivity { date, created: 0, completed: 0 });
    }

    for item in items {
        let date = item.created_at.with_timezone(tz).date_naive();
        if let Some(day) = days.get_mut(&date) {
            day.created += 1;
            if item.completed {
                day.completed += 1;
            }
        }
    }

    days.into_values().collect()
}

/// Completion percentage for each of the four 7-day windows ending at `now`,
/// most recent ("Week 4") first.
pub fn weekly_completion(items: &[&ActionItem], now: DateTime<Utc>) -> Vec<WeeklyCompletion> {
    (0..4)
        .map(|i| {
            let week_start = now - Duration::days(7 * (i + 1));
            let week_end = now - Duration::days(7 * i);
            let in_week: Vec<&&ActionItem> = items
                .iter()
                .filter(|item| item.created_at >= week_start && item.created_at < week_end)
                .collect();
            let done = in_week.iter().filter(|item| item.completed).count();
            WeeklyCompletion {
                week: format!("Week {}", 4 - i),
                productivity: rounded_percent(done, in_week.len()),
            }
        })
        .collect()
}

/// Share of each non-empty category, in the fixed category order.
pub fn category_breakdown(items: &[&ActionItem]) -> Vec<CategoryShare> {
    let mut counts: BTreeMap<Category, usize> = BTreeMap::new();
    for item in items {
        *counts.entry(Category::classify(&item.text)).or_insert(0) += 1;
    }
    let total = items.len();

    Category::ALL
        .iter()
        .filter_map(|category| {
            let count = counts.get(category).copied().unwrap_or(0);
            (count > 0).then(|| CategoryShare {
                category: *category,
                count,
                percentage: rounded_percent(count, total),
            })
        })
        .collect()
}

/// Creation counts by hour of day.
///
/// Empty hours are dropped and only the first [`MAX_HOURS_SHOWN`] remaining
/// hours are kept, in ascending hour order rather than by count.
pub fn time_patterns<Tz: TimeZone>(items: &[&ActionItem], tz: &Tz) -> Vec<HourCount> {
    let mut hours = [0usize; 24];
    for item in items {
        hours[item.created_at.with_timezone(tz).hour() as usize] += 1;
    }

    hours
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .map(|(hour, count)| HourCount { hour: hour as u32, count: *count })
        .take(MAX_HOURS_SHOWN)
        .collect()
}

/// Consecutive days with at least one new item, ending today.
///
/// A day without items so far does not break the streak until it is over,
/// so counting starts from yesterday when nothing was created today.
pub fn active_streak<Tz: TimeZone>(items: &[ActionItem], today: NaiveDate, tz: &Tz) -> u32 {
    let mut dates: Vec<NaiveDate> = items
        .iter()
        .map(|i| i.created_at.with_timezone(tz).date_naive())
        .collect();
    dates.sort();
    dates.dedup();

    let mut check_date = today;
    if !dates.contains(&today) {
        check_date = today.pred_opt().unwrap_or(today);
    }

    let mut streak = 0u32;
    for date in dates.iter().rev() {
        if *date == check_date {
            streak += 1;
            check_date = check_date.pred_opt().unwrap_or(check_date);
        } else if *date < check_date {
            break;
        }
    }
    streak
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub range: TimeRange,
    pub total_tasks: usize,
    pub completion_rate: f64,
    pub avg_tasks_per_day: f64,
    pub active_streak: u32,
    pub daily_completion: Vec<DailyActivity>,
    pub weekly_stats: Vec<WeeklyCompletion>,
    pub category_breakdown: Vec<CategoryShare>,
    pub time_patterns: Vec<HourCount>,
}

/// Everything the analytics page shows.
///
/// The headline totals cover every item; the charts cover the selected range.
pub fn analytics_report<Tz: TimeZone>(
    items: &[ActionItem],
    range: TimeRange,
    now: DateTime<Utc>,
    tz: &Tz,
) -> AnalyticsReport {
    let filtered = range.filter(items, now);
    let today = now.with_timezone(tz).date_naive();
    let start = match range.start(now) {
        Some(start) => start.with_timezone(tz).date_naive(),
        None => items
            .iter()
            .map(|i| i.created_at.with_timezone(tz).date_naive())
            .min()
            .unwrap_or(today)
            .min(today),
    };

    let daily = daily_activity(&filtered, start, today, tz);
    let created_in_days: usize = daily.iter().map(|d| d.created).sum();
    let avg_tasks_per_day = if daily.is_empty() {
        0.0
    } else {
        created_in_days as f64 / daily.len() as f64
    };
    let completed = items.iter().filter(|i| i.completed).count();

    AnalyticsReport {
        range,
        total_tasks: items.len(),
        completion_rate: percent(completed, items.len()),
        avg_tasks_per_day,
        active_streak: active_streak(items, today, tz),
        weekly_stats: weekly_completion(&filtered, now),
        category_breakdown: category_breakdown(&filtered),
        time_patterns: time_patterns(&filtered, tz),
        daily_completion: daily,
    }
}
