use chrono::{DateTime, Utc};

use super::action_item::ActionItem;
use crate::store::{LocalStore, StoreError};

/// The action items of one session, backed by a [`LocalStore`].
///
/// Every effective mutation rewrites the whole list. Other processes sharing
/// the store are not reconciled: whoever writes last wins. Call
/// [`TaskList::reload`] to pick up their changes.
#[derive(Debug)]
pub struct TaskList {
    store: LocalStore,
    items: Vec<ActionItem>,
}

impl TaskList {
    pub fn load(store: LocalStore) -> Self {
        let items = store.load_items();
        log::debug!("Loaded {} action items from {}", items.len(), store.root().display());
        Self { store, items }
    }

    pub fn reload(&mut self) {
        self.items = self.store.load_items();
    }

    pub fn items(&self) -> &[ActionItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ActionItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Prepend one record per text, keeping the batch's own order.
    pub fn add_batch<S: AsRef<str>>(
        &mut self,
        texts: &[S],
        now: DateTime<Utc>,
    ) -> Result<&[ActionItem], StoreError> {
        if texts.is_empty() {
            return Ok(&self.items[..0]);
        }
        let batch: Vec<ActionItem> = texts
            .iter()
            .map(|t| ActionItem::new(t.as_ref(), now))
            .collect();
        let count = batch.len();
        self.items.splice(0..0, batch);
        self.persist()?;
        log::info!("Added {} action items", count);
        Ok(&self.items[..count])
    }

    /// Flip `completed`. Returns the new state, or `None` if the id is unknown.
    pub fn toggle(&mut self, id: &str) -> Result<Option<bool>, StoreError> {
        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            log::debug!("Toggle ignored, no item {}", id);
            return Ok(None);
        };
        item.toggle();
        let completed = item.completed;
        self.persist()?;
        Ok(Some(completed))
    }

    /// Remove one record. Returns it, or `None` if the id is unknown.
    pub fn remove(&mut self, id: &str) -> Result<Option<ActionItem>, StoreError> {
        let Some(pos) = self.items.iter().position(|i| i.id == id) else {
            log::debug!("Delete ignored, no item {}", id);
            return Ok(None);
        };
        let removed = self.items.remove(pos);
        self.persist()?;
        Ok(Some(removed))
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.items.clear();
        self.persist()
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.store.save_items(&self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_list() -> (tempfile::TempDir, TaskList) {
        let dir = tempfile::tempdir().unwrap();
        let list = TaskList::load(LocalStore::new(dir.path()));
        (dir, list)
    }

    #[test]
    fn batch_creates_pending_records_with_unique_ids() {
        let (_dir, mut list) = empty_list();
        let before = Utc::now();
        let added = list
            .add_batch(
                &["John will send the report by Friday", "Sarah will call the client"],
                Utc::now(),
            )
            .unwrap()
            .to_vec();
        assert_eq!(added.len(), 2);
        assert!(added.iter().all(|i| !i.completed && i.created_at >= before));
        assert_ne!(added[0].id, added[1].id);
        assert_eq!(added[0].text, "John will send the report by Friday");
    }

    #[test]
    fn newest_batch_goes_first() {
        let (_dir, mut list) = empty_list();
        list.add_batch(&["old one", "old two"], Utc::now()).unwrap();
        list.add_batch(&["new one", "new two"], Utc::now()).unwrap();
        let texts: Vec<&str> = list.items().iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["new one", "new two", "old one", "old two"]);
    }

    #[test]
    fn empty_batch_is_a_noop() {
        let (dir, mut list) = empty_list();
        let added = list.add_batch::<&str>(&[], Utc::now()).unwrap();
        assert!(added.is_empty());
        assert!(!dir.path().join("actionItems.json").exists());
    }

    #[test]
    fn toggle_twice_restores_state() {
        let (_dir, mut list) = empty_list();
        list.add_batch(&["a"], Utc::now()).unwrap();
        let id = list.items()[0].id.clone();
        let original = list.items().to_vec();
        assert_eq!(list.toggle(&id).unwrap(), Some(true));
        assert_eq!(list.toggle(&id).unwrap(), Some(false));
        assert_eq!(list.items(), original.as_slice());
    }

    #[test]
    fn unknown_ids_leave_collection_unchanged() {
        let (_dir, mut list) = empty_list();
        list.add_batch(&["a", "b"], Utc::now()).unwrap();
        let before = list.items().to_vec();
        assert_eq!(list.toggle("missing").unwrap(), None);
        assert_eq!(list.remove("missing").unwrap(), None);
        assert_eq!(list.items(), before.as_slice());
    }

    #[test]
    fn remove_takes_exactly_one() {
        let (_dir, mut list) = empty_list();
        list.add_batch(&["a", "b", "c"], Utc::now()).unwrap();
        let id = list.items()[1].id.clone();
        let removed = list.remove(&id).unwrap().unwrap();
        assert_eq!(removed.text, "b");
        assert_eq!(list.len(), 2);
        assert!(list.get(&id).is_none());
    }

    #[test]
    fn mutations_are_persisted_and_reloadable() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let mut list = TaskList::load(store.clone());
        list.add_batch(&["a", "b"], Utc::now()).unwrap();
        let id = list.items()[0].id.clone();
        list.toggle(&id).unwrap();

        let other = TaskList::load(store.clone());
        assert_eq!(other.items(), list.items());

        // A second writer's change becomes visible after reload.
        let mut writer = TaskList::load(store);
        writer.clear().unwrap();
        assert_eq!(list.len(), 2);
        list.reload();
        assert!(list.is_empty());
    }
}
