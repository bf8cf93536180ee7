use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One extracted action item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl ActionItem {
    pub fn new(text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            completed: false,
            created_at,
        }
    }

    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    pub fn status_label(&self) -> &'static str {
        if self.completed { "done" } else { "pending" }
    }

    /// Case-insensitive substring match against the item text.
    pub fn matches(&self, needle: &str) -> bool {
        needle.is_empty() || self.text.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Filter used by the history and list views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl StatusFilter {
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            "completed" | "done" => Some(Self::Completed),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }

    pub fn accepts(&self, item: &ActionItem) -> bool {
        match self {
            Self::All => true,
            Self::Completed => item.completed,
            Self::Pending => !item.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_items_are_pending_with_fresh_ids() {
        let now = Utc::now();
        let a = ActionItem::new("Send the report", now);
        let b = ActionItem::new("Send the report", now);
        assert!(!a.completed);
        assert_eq!(a.created_at, now);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn serializes_with_camel_case_iso_dates() {
        let created = DateTime::parse_from_rfc3339("2025-06-03T14:05:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let item = ActionItem {
            id: "abc".into(),
            text: "Call the client".into(),
            completed: true,
            created_at: created,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["createdAt"], "2025-06-03T14:05:00Z");
        assert_eq!(json["completed"], true);

        let back: ActionItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn accepts_browser_style_timestamps() {
        let raw = r#"{"id":"1","text":"x","completed":false,
                      "createdAt":"2025-06-03T14:05:00.123Z"}"#;
        let item: ActionItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.created_at.timestamp_subsec_millis(), 123);
    }

    #[test]
    fn status_filter() {
        let mut item = ActionItem::new("x", Utc::now());
        assert!(StatusFilter::Pending.accepts(&item));
        item.toggle();
        assert!(StatusFilter::Completed.accepts(&item));
        assert!(!StatusFilter::Pending.accepts(&item));
        assert!(StatusFilter::All.accepts(&item));
        assert_eq!(StatusFilter::from_keyword("done"), Some(StatusFilter::Completed));
        assert_eq!(StatusFilter::from_keyword("nope"), None);
    }

    #[test]
    fn search_is_case_insensitive() {
        let item = ActionItem::new("Review Budget proposal", Utc::now());
        assert!(item.matches("budget"));
        assert!(item.matches(""));
        assert!(!item.matches("invoice"));
    }
}
