use chrono::Local;

use meeting_insight::views::analytics::AnalyticsReport;

use crate::components::bar_chart::{activity_strip, bar_chart};

pub fn analytics_view(report: &AnalyticsReport) -> String {
    let mut out = format!("Analytics ({})\n\n", report.range.label());

    out.push_str(&format!("Total tasks:      {}\n", report.total_tasks));
    out.push_str(&format!("Completion rate:  {:.1}%\n", report.completion_rate));
    out.push_str(&format!("Avg tasks/day:    {:.1}\n", report.avg_tasks_per_day));
    out.push_str(&format!("Active streak:    {} days\n\n", report.active_streak));

    out.push_str("Daily activity (created / completed)\n");
    let active: Vec<bool> = report.daily_completion.iter().map(|d| d.created > 0).collect();
    out.push_str(&activity_strip(&active));
    out.push('\n');
    for day in report.daily_completion.iter().filter(|d| d.created > 0) {
        out.push_str(&format!(
            "  {:<8} {:>3} / {:<3}\n",
            day.date.format("%b %-d"),
            day.created,
            day.completed
        ));
    }

    out.push_str("\nWeekly productivity\n");
    for week in &report.weekly_stats {
        out.push_str(&format!("  {:<8} {:>3}%\n", week.week, week.productivity));
    }

    out.push_str("\nCategories\n");
    if report.category_breakdown.is_empty() {
        out.push_str("  No data\n");
    } else {
        out.push_str(&bar_chart(report.category_breakdown.iter().map(|c| {
            (format!("{} {}%", c.category.label(), c.percentage), c.count)
        })));
        out.push('\n');
    }

    out.push_str(&format!(
        "\nCreation time of day ({})\n",
        Local::now().format("%Z")
    ));
    if report.time_patterns.is_empty() {
        out.push_str("  No data\n");
    } else {
        out.push_str(&bar_chart(
            report.time_patterns.iter().map(|h| (format!("{:02}:00", h.hour), h.count)),
        ));
        out.push('\n');
    }
    out
}
