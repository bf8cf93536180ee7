use meeting_insight::views::dashboard::DashboardSummary;

use crate::components::bar_chart::bar_chart;
use crate::components::task_row::{preview, short_id};

const PREVIEW_CHARS: usize = 80;

pub fn dashboard_view(summary: &DashboardSummary) -> String {
    let mut out = format!("Dashboard ({})\n\n", summary.range.label());
    out.push_str(&format!("Total tasks:      {}\n", summary.total));
    out.push_str(&format!("Completed:        {}\n", summary.completed));
    out.push_str(&format!("Pending:          {}\n", summary.pending));
    out.push_str(&format!("Completion rate:  {}\n\n", summary.completion_rate_label()));

    if summary.total > 0 {
        out.push_str("Progress overview\n");
        out.push_str(&bar_chart([
            ("Completed".to_string(), summary.completed),
            ("Pending".to_string(), summary.pending),
        ]));
        out.push_str(&format!(
            "\n{}% overall completion\n\n",
            summary.completion_percentage
        ));
    }

    out.push_str("Recent activity\n");
    if summary.recent.is_empty() {
        out.push_str("  No action items yet\n");
    }
    for item in &summary.recent {
        let local = item.created_at.with_timezone(&chrono::Local);
        out.push_str(&format!(
            "  {} {}  {}  ({} \u{2022} {})\n",
            if item.completed { "\u{2713}" } else { "\u{25CB}" },
            short_id(&item.id),
            preview(&item.text, PREVIEW_CHARS),
            local.format("%Y-%m-%d"),
            local.format("%H:%M:%S"),
        ));
    }
    out
}
