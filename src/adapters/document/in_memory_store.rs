//! In-memory DocumentStore for tests and local runs.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::Timestamp;
use crate::ports::{CollectionPath, Document, DocumentStore, DocumentStoreError};

type Collection = BTreeMap<String, Document>;

/// Document store held entirely in memory.
///
/// Clones share the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    collections: Arc<RwLock<HashMap<CollectionPath, Collection>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in one collection.
    pub async fn count(&self, collection: &CollectionPath) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, BTreeMap::len)
    }

    /// Insert a document with a caller-chosen creation time, replacing any
    /// existing one. Test seeding only; production writes go through `create`.
    pub async fn insert_at(
        &self,
        collection: &CollectionPath,
        id: impl Into<String>,
        data: Value,
        created_at: Timestamp,
    ) {
        let id = id.into();
        self.collections
            .write()
            .await
            .entry(collection.clone())
            .or_default()
            .insert(
                id.clone(),
                Document {
                    id,
                    created_at,
                    data,
                },
            );
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn create(
        &self,
        collection: &CollectionPath,
        id: &str,
        data: Value,
    ) -> Result<Document, DocumentStoreError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.clone()).or_default();

        if docs.contains_key(id) {
            return Err(DocumentStoreError::AlreadyExists {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }

        let document = Document {
            id: id.to_string(),
            created_at: Timestamp::now(),
            data,
        };
        docs.insert(id.to_string(), document.clone());
        Ok(document)
    }

    async fn get(
        &self,
        collection: &CollectionPath,
        id: &str,
    ) -> Result<Option<Document>, DocumentStoreError> {
        Ok(self
            .collections
            .read()
            .await
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn stream(&self, collection: &CollectionPath) -> Result<Vec<Document>, DocumentStoreError> {
        Ok(self
            .collections
            .read()
            .await
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn list_recent(
        &self,
        collection: &CollectionPath,
        limit: usize,
    ) -> Result<Vec<Document>, DocumentStoreError> {
        let mut docs = self.stream(collection).await?;
        docs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        docs.truncate(limit);
        Ok(docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn at(secs: i64) -> Timestamp {
        Timestamp::from_datetime(Utc.timestamp_opt(secs, 0).unwrap())
    }

    #[tokio::test]
    async fn create_then_get() {
        let store = InMemoryDocumentStore::new();
        let conversations = CollectionPath::root("conversations");

        let created = store
            .create(&conversations, "c1", json!({"prompt": "hi"}))
            .await
            .unwrap();
        let fetched = store.get(&conversations, "c1").await.unwrap().unwrap();

        assert_eq!(created, fetched);
        assert_eq!(fetched.data["prompt"], "hi");
    }

    #[tokio::test]
    async fn create_rejects_existing_id() {
        let store = InMemoryDocumentStore::new();
        let path = CollectionPath::root("conversations");
        store.create(&path, "c1", json!({})).await.unwrap();

        let err = store.create(&path, "c1", json!({})).await.unwrap_err();

        assert!(matches!(err, DocumentStoreError::AlreadyExists { .. }));
        assert_eq!(store.count(&path).await, 1);
    }

    #[tokio::test]
    async fn missing_document_is_none() {
        let store = InMemoryDocumentStore::new();
        let path = CollectionPath::root("conversations");
        assert!(store.get(&path, "nope").await.unwrap().is_none());
        assert!(store.stream(&path).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sub_collections_are_separate() {
        let store = InMemoryDocumentStore::new();
        let root = CollectionPath::root("conversations");
        let artifacts = root.child("c1", "artifacts");

        store.create(&root, "c1", json!({})).await.unwrap();
        store.create(&artifacts, "a1", json!({})).await.unwrap();

        assert_eq!(store.count(&root).await, 1);
        assert_eq!(store.count(&artifacts).await, 1);
        assert!(store.get(&root, "a1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn stream_orders_by_id() {
        let store = InMemoryDocumentStore::new();
        let path = CollectionPath::root("c");
        for id in ["b", "c", "a"] {
            store.create(&path, id, json!({})).await.unwrap();
        }

        let ids: Vec<_> = store
            .stream(&path)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn list_recent_is_newest_first_and_limited() {
        let store = InMemoryDocumentStore::new();
        let path = CollectionPath::root("c");
        store.insert_at(&path, "old", json!({}), at(100)).await;
        store.insert_at(&path, "new", json!({}), at(300)).await;
        store.insert_at(&path, "mid", json!({}), at(200)).await;

        let ids: Vec<_> = store
            .list_recent(&path, 2)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, ["new", "mid"]);
    }
}
