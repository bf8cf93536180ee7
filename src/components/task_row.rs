use chrono::Local;

use meeting_insight::core::action_item::ActionItem;

/// Characters of the id shown in listings; enough to pass back to toggle/delete.
pub const SHORT_ID_LEN: usize = 8;

pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// `[x] 1a2b3c4d  Send the report  (Jun 3, 14:05)`
pub fn task_row(item: &ActionItem) -> String {
    let check = if item.completed { "[x]" } else { "[ ]" };
    let created = item.created_at.with_timezone(&Local);
    format!(
        "{} {:<width$}  {}  ({})",
        check,
        short_id(&item.id),
        item.text,
        created.format("%b %-d, %H:%M"),
        width = SHORT_ID_LEN
    )
}

/// Rows for a list of items, or the empty message.
pub fn task_grid<'a>(items: impl Iterator<Item = &'a ActionItem>, empty: &str) -> String {
    let rows: Vec<String> = items.map(task_row).collect();
    if rows.is_empty() {
        empty.to_string()
    } else {
        rows.join("\n")
    }
}

/// Truncate to `max` characters with an ellipsis, as the recent-activity list does.
pub fn preview(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn short_ids() {
        assert_eq!(short_id("1234567890"), "12345678");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn row_shows_state_and_text() {
        let mut item = ActionItem::new("Send the report", Utc::now());
        assert!(task_row(&item).starts_with("[ ] "));
        item.completed = true;
        let row = task_row(&item);
        assert!(row.starts_with("[x] "));
        assert!(row.contains("Send the report"));
    }

    #[test]
    fn preview_truncates() {
        assert_eq!(preview("short", 80), "short");
        assert_eq!(preview("abcdef", 3), "abc...");
    }
}
