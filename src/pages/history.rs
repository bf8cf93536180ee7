use meeting_insight::core::action_item::ActionItem;
use meeting_insight::views::history::{HistoryQuery, Session};

use crate::components::task_row::task_grid;

pub fn history_view(sessions: &[Session], matches: &[&ActionItem], query: &HistoryQuery) -> String {
    let mut out = String::from("Meeting history\n\n");

    if sessions.is_empty() {
        out.push_str("No meeting sessions yet\n");
        return out;
    }

    out.push_str("Sessions\n");
    for session in sessions {
        let marker = if query.session.as_deref() == Some(session.id.as_str()) {
            ">"
        } else {
            " "
        };
        out.push_str(&format!(
            "{} {}  {} items, {} completed\n",
            marker,
            session.date.format("%a %b %-d, %Y"),
            session.item_count,
            session.completed_count
        ));
    }

    out.push_str(&format!("\nAction items ({})\n", matches.len()));
    out.push_str(&task_grid(
        matches.iter().copied(),
        "No action items match the current filters",
    ));
    out.push('\n');
    out
}
