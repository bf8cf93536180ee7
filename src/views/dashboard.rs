use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{TimeRange, percent, rounded_percent};
use crate::core::action_item::ActionItem;

/// How many items the "recent activity" list shows.
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub range: TimeRange,
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Unrounded, shown with one decimal.
    pub completion_rate: f64,
    /// Whole percent, as on the progress chart.
    pub completion_percentage: u32,
    pub recent: Vec<ActionItem>,
}

impl DashboardSummary {
    pub fn new(items: &[ActionItem], range: TimeRange, now: DateTime<Utc>) -> Self {
        let filtered = range.filter(items, now);
        let completed = filtered.iter().filter(|i| i.completed).count();
        let total = filtered.len();
        Self {
            range,
            total,
            completed,
            pending: total - completed,
            completion_rate: percent(completed, total),
            completion_percentage: rounded_percent(completed, total),
            recent: filtered.iter().take(RECENT_LIMIT).map(|i| (*i).clone()).collect(),
        }
    }

    pub fn completion_rate_label(&self) -> String {
        format!("{:.1}%", self.completion_rate)
    }
}

/// Downloadable snapshot of one dashboard range.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardExport {
    pub export_date: DateTime<Utc>,
    pub total_items: usize,
    pub completed_items: usize,
    pub pending_items: usize,
    pub completion_rate: String,
    pub items: Vec<ActionItem>,
}

impl DashboardExport {
    pub fn new(items: &[ActionItem], range: TimeRange, now: DateTime<Utc>) -> Self {
        let summary = DashboardSummary::new(items, range, now);
        Self {
            export_date: now,
            total_items: summary.total,
            completed_items: summary.completed,
            pending_items: summary.pending,
            completion_rate: format!("{:.1}", summary.completion_rate),
            items: range.filter(items, now).into_iter().cloned().collect(),
        }
    }

    /// `meeting-insights-<range>-<date>.json`
    pub fn file_name(&self, range: TimeRange) -> String {
        format!(
            "meeting-insights-{}-{}.json",
            range.as_keyword(),
            self.export_date.format("%Y-%m-%d")
        )
    }
}
