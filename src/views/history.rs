use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeZone};
use serde::Serialize;

use crate::core::action_item::{ActionItem, StatusFilter};

/// Items created on the same calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub date: NaiveDate,
    pub item_count: usize,
    pub completed_count: usize,
    /// Newest first.
    pub items: Vec<ActionItem>,
}

impl Session {
    pub fn export(&self) -> SessionExport {
        SessionExport {
            session_date: self.date,
            total_items: self.item_count,
            completed_items: self.completed_count,
            items: self.items.clone(),
        }
    }

    pub fn export_file_name(&self) -> String {
        format!("session-{}.json", self.date.format("%Y-%m-%d"))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionExport {
    pub session_date: NaiveDate,
    pub total_items: usize,
    pub completed_items: usize,
    pub items: Vec<ActionItem>,
}

/// Group items by the day they were created, newest day first.
pub fn group_sessions<Tz: TimeZone>(items: &[ActionItem], tz: &Tz) -> Vec<Session> {
    let mut grouped: BTreeMap<NaiveDate, Vec<ActionItem>> = BTreeMap::new();
    for item in items {
        let date = item.created_at.with_timezone(tz).date_naive();
        grouped.entry(date).or_default().push(item.clone());
    }

    grouped
        .into_iter()
        .rev()
        .map(|(date, mut items)| {
            items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Session {
                id: date.format("%Y-%m-%d").to_string(),
                date,
                item_count: items.len(),
                completed_count: items.iter().filter(|i| i.completed).count(),
                items,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct HistoryQuery {
    /// Restrict to one session id; an unknown id matches nothing.
    pub session: Option<String>,
    pub search: String,
    pub status: StatusFilter,
}

/// Items the history page lists for a query.
pub fn filter_history<'a>(
    items: &'a [ActionItem],
    sessions: &'a [Session],
    query: &HistoryQuery,
) -> Vec<&'a ActionItem> {
    let scope: &[ActionItem] = match &query.session {
        Some(id) => sessions
            .iter()
            .find(|s| &s.id == id)
            .map(|s| s.items.as_slice())
            .unwrap_or(&[]),
        None => items,
    };

    scope
        .iter()
        .filter(|i| i.matches(&query.search))
        .filter(|i| query.status.accepts(i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn item(text: &str, created: &str, completed: bool) -> ActionItem {
        let created = DateTime::parse_from_rfc3339(created).unwrap().with_timezone(&Utc);
        let mut i = ActionItem::new(text, created);
        i.completed = completed;
        i
    }

    fn sample() -> Vec<ActionItem> {
        vec![
            item("Send budget", "2025-06-03T09:00:00Z", false),
            item("Call vendor", "2025-06-01T15:00:00Z", true),
            item("Review budget deck", "2025-06-03T16:00:00Z", true),
            item("Book room", "2025-06-01T08:00:00Z", false),
        ]
    }

    #[test]
    fn groups_by_day_newest_first() {
        let sessions = group_sessions(&sample(), &Utc);
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].id, "2025-06-03");
        assert_eq!(sessions[0].item_count, 2);
        assert_eq!(sessions[0].completed_count, 1);
        assert_eq!(sessions[0].items[0].text, "Review budget deck");
        assert_eq!(sessions[1].id, "2025-06-01");
        assert_eq!(sessions[1].items[0].text, "Call vendor");
    }

    #[test]
    fn grouping_is_order_insensitive() {
        let items = sample();
        let mut shuffled = items.clone();
        shuffled.reverse();
        assert_eq!(group_sessions(&shuffled, &Utc), group_sessions(&items, &Utc));
    }

    #[test]
    fn no_items_no_sessions() {
        assert!(group_sessions(&[], &Utc).is_empty());
    }

    #[test]
    fn day_boundary_follows_time_zone() {
        let items = vec![item("late", "2025-06-01T23:30:00Z", false)];
        let east = chrono::FixedOffset::east_opt(3600).unwrap();
        assert_eq!(group_sessions(&items, &east)[0].id, "2025-06-02");
    }

    #[test]
    fn query_filters_compose() {
        let items = sample();
        let sessions = group_sessions(&items, &Utc);

        let all = filter_history(&items, &sessions, &HistoryQuery::default());
        assert_eq!(all.len(), 4);

        let query = HistoryQuery {
            search: "BUDGET".into(),
            status: StatusFilter::Pending,
            ..HistoryQuery::default()
        };
        let found = filter_history(&items, &sessions, &query);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "Send budget");

        let query = HistoryQuery {
            session: Some("2025-06-01".into()),
            status: StatusFilter::Completed,
            ..HistoryQuery::default()
        };
        let found = filter_history(&items, &sessions, &query);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "Call vendor");

        let query = HistoryQuery {
            session: Some("1999-01-01".into()),
            ..HistoryQuery::default()
        };
        assert!(filter_history(&items, &sessions, &query).is_empty());
    }

    #[test]
    fn session_export_shape() {
        let sessions = group_sessions(&sample(), &Utc);
        let json = serde_json::to_value(sessions[0].export()).unwrap();
        assert_eq!(json["sessionDate"], "2025-06-03");
        assert_eq!(json["totalItems"], 2);
        assert_eq!(json["completedItems"], 1);
        assert_eq!(sessions[0].export_file_name(), "session-2025-06-03.json");
    }
}
