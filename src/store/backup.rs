use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{LocalStore, StoreError};
use crate::core::action_item::ActionItem;
use crate::core::preferences::Preferences;

pub const BACKUP_VERSION: &str = "1.0";

/// Full backup file: both keys plus metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    #[serde(default)]
    pub export_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub action_items: Option<Vec<ActionItem>>,
    #[serde(default)]
    pub preferences: Option<Preferences>,
    #[serde(default)]
    pub version: Option<String>,
}

/// What an import actually overwrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub items: Option<usize>,
    pub preferences: bool,
}

pub fn export_backup(store: &LocalStore, now: DateTime<Utc>) -> Backup {
    Backup {
        export_date: Some(now),
        action_items: Some(store.load_items()),
        preferences: Some(store.load_preferences()),
        version: Some(BACKUP_VERSION.to_string()),
    }
}

pub fn export_backup_json(store: &LocalStore, now: DateTime<Utc>) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(&export_backup(store, now))?)
}

/// Keep the first item for each id.
fn dedup_ids(items: Vec<ActionItem>) -> Vec<ActionItem> {
    let mut seen = HashSet::new();
    let before = items.len();
    let unique: Vec<ActionItem> = items
        .into_iter()
        .filter(|item| seen.insert(item.id.clone()))
        .collect();
    if unique.len() < before {
        log::warn!(
            "Dropped {} action items with duplicate ids from backup",
            before - unique.len()
        );
    }
    unique
}

/// Parse a backup file and overwrite whichever keys it carries.
///
/// The whole document is decoded before anything is written, so a bad file
/// leaves the store untouched. Items repeating an earlier id are dropped.
pub fn import_backup(store: &LocalStore, content: &str) -> Result<ImportSummary, StoreError> {
    let backup: Backup = serde_json::from_str(content)?;
    let mut summary = ImportSummary::default();

    if let Some(items) = backup.action_items {
        let items = dedup_ids(items);
        store.save_items(&items)?;
        summary.items = Some(items.len());
    }
    if let Some(prefs) = &backup.preferences {
        store.save_preferences(prefs)?;
        summary.preferences = true;
    }

    log::info!(
        "Imported backup (version {}): items={:?} preferences={}",
        backup.version.as_deref().unwrap_or("unknown"),
        summary.items,
        summary.preferences
    );
    Ok(summary)
}
