use chrono::Utc;

use meeting_insight::core::action_item::ActionItem;
use meeting_insight::views::TimeRange;
use meeting_insight::views::dashboard::DashboardSummary;

use crate::components::task_row::task_grid;

pub fn quick_stats(items: &[ActionItem]) -> String {
    let summary = DashboardSummary::new(items, TimeRange::All, Utc::now());
    format!(
        "Total: {}   Completed: {}   Pending: {}   Completion rate: {}%",
        summary.total, summary.completed, summary.pending, summary.completion_percentage
    )
}

pub fn home_view(items: &[ActionItem]) -> String {
    if items.is_empty() {
        return "No action items yet. Submit a transcript with `meeting-insight extract`."
            .to_string();
    }
    format!(
        "{}\n\n{}",
        quick_stats(items),
        task_grid(items.iter(), "")
    )
}

/// Shown after a successful extraction.
pub fn extracted_view(added: &[ActionItem]) -> String {
    if added.is_empty() {
        return "No action items found in this transcript.".to_string();
    }
    format!(
        "Generated {} action item{}:\n{}",
        added.len(),
        if added.len() == 1 { "" } else { "s" },
        task_grid(added.iter(), "")
    )
}
