//! Read-only derivations over a snapshot of the action items.
//!
//! Nothing in here persists or mutates state. Calendar bucketing happens in the
//! time zone the caller passes in.

pub mod analytics;
pub mod dashboard;
pub mod history;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::action_item::ActionItem;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Week,
    #[default]
    Month,
    Quarter,
    All,
}

impl TimeRange {
    pub fn span(&self) -> Option<Duration> {
        match self {
            Self::Week => Some(Duration::days(7)),
            Self::Month => Some(Duration::days(30)),
            Self::Quarter => Some(Duration::days(90)),
            Self::All => None,
        }
    }

    /// Earliest creation time the range admits, `None` for all time.
    pub fn start(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.span().map(|span| now - span)
    }

    pub fn contains(&self, item: &ActionItem, now: DateTime<Utc>) -> bool {
        self.start(now).is_none_or(|start| item.created_at >= start)
    }

    /// Items inside the range, in their original order.
    pub fn filter<'a>(&self, items: &'a [ActionItem], now: DateTime<Utc>) -> Vec<&'a ActionItem> {
        items.iter().filter(|i| self.contains(i, now)).collect()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Week => "Last week",
            Self::Month => "Last month",
            Self::Quarter => "3 Months",
            Self::All => "All Time",
        }
    }

    pub fn as_keyword(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::All => "all",
        }
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "all" => Ok(Self::All),
            _ => Err(format!("Unknown range {:?} (expected week, month, quarter or all)", s)),
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_keyword())
    }
}

/// `part / whole * 100`, or 0 when there is nothing to divide by.
pub fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

pub fn rounded_percent(part: usize, whole: usize) -> u32 {
    percent(part, whole).round() as u32
}
