//! ArtifactArchive - durable storage of conversations and their artifacts.
//!
//! Layout in the document store:
//!
//! ```text
//! conversations/{conversation_id}
//! conversations/{conversation_id}/artifacts/{artifact_id}
//! ```
//!
//! A conversation and its artifacts are written separately, never as one
//! transaction. A conversation with no artifacts has simply not been
//! extracted yet. Deleting a conversation does not delete its artifacts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::domain::artifact::Artifact;
use crate::domain::foundation::{ArtifactId, ConversationId, Timestamp};
use crate::ports::{CollectionPath, Document, DocumentStore, DocumentStoreError};

const CONVERSATIONS: &str = "conversations";
const ARTIFACTS: &str = "artifacts";

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("Document store error: {0}")]
    Store(#[from] DocumentStoreError),

    #[error("Failed to encode record: {0}")]
    Encode(String),

    #[error("Malformed document {path}/{id}: {reason}")]
    Malformed {
        path: String,
        id: String,
        reason: String,
    },
}

/// A stored conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedConversation {
    pub id: ConversationId,
    pub created_at: Timestamp,
    pub prompt: String,
    pub response: Value,
    /// Message id assigned by the model provider, if known.
    pub external_message_id: Option<String>,
}

/// A stored artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedArtifact {
    pub id: ArtifactId,
    pub conversation_id: ConversationId,
    pub created_at: Timestamp,
    pub artifact: Artifact,
}

#[derive(Debug, Serialize, Deserialize)]
struct ConversationRecord {
    prompt: String,
    response: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ArtifactRecord {
    conversation_id: ConversationId,
    artifact: Artifact,
}

/// Conversation and artifact persistence over a [`DocumentStore`].
#[derive(Clone)]
pub struct ArtifactArchive {
    store: Arc<dyn DocumentStore>,
}

impl ArtifactArchive {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn conversations() -> CollectionPath {
        CollectionPath::root(CONVERSATIONS)
    }

    fn artifacts_of(conversation_id: &ConversationId) -> CollectionPath {
        Self::conversations().child(conversation_id.to_string(), ARTIFACTS)
    }

    /// Store a conversation under a fresh id.
    pub async fn save_conversation(
        &self,
        prompt: &str,
        response: Value,
        external_message_id: Option<String>,
    ) -> Result<ConversationId, ArchiveError> {
        let id = ConversationId::new();
        let record = ConversationRecord {
            prompt: prompt.to_string(),
            response,
            message_id: external_message_id,
        };
        let data = serde_json::to_value(&record).map_err(|e| ArchiveError::Encode(e.to_string()))?;

        self.store
            .create(&Self::conversations(), &id.to_string(), data)
            .await
            .map_err(|err| {
                tracing::error!(conversation_id = %id, error = %err, "Failed to save conversation");
                err
            })?;

        tracing::info!(conversation_id = %id, "Saved conversation");
        Ok(id)
    }

    /// Store each artifact under a fresh id. Ids come back in input order.
    pub async fn save_artifacts(
        &self,
        conversation_id: &ConversationId,
        artifacts: &[Artifact],
    ) -> Result<Vec<ArtifactId>, ArchiveError> {
        let collection = Self::artifacts_of(conversation_id);
        let mut ids = Vec::with_capacity(artifacts.len());

        for artifact in artifacts {
            let id = ArtifactId::new();
            let record = ArtifactRecord {
                conversation_id: *conversation_id,
                artifact: artifact.clone(),
            };
            let data =
                serde_json::to_value(&record).map_err(|e| ArchiveError::Encode(e.to_string()))?;

            self.store
                .create(&collection, &id.to_string(), data)
                .await
                .map_err(|err| {
                    tracing::error!(%conversation_id, error = %err, "Failed to save artifact");
                    err
                })?;
            ids.push(id);
        }

        tracing::info!(%conversation_id, count = ids.len(), "Saved artifacts");
        Ok(ids)
    }

    pub async fn get_conversation(
        &self,
        id: &ConversationId,
    ) -> Result<Option<PersistedConversation>, ArchiveError> {
        let collection = Self::conversations();
        self.store
            .get(&collection, &id.to_string())
            .await
            .map_err(|err| {
                tracing::error!(%collection, conversation_id = %id, error = %err, "Failed to load conversation");
                err
            })?
            .map(|doc| decode_conversation(&collection, doc))
            .transpose()
    }

    pub async fn get_artifacts(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<PersistedArtifact>, ArchiveError> {
        let collection = Self::artifacts_of(conversation_id);
        self.store
            .stream(&collection)
            .await
            .map_err(|err| {
                tracing::error!(%collection, %conversation_id, error = %err, "Failed to load artifacts");
                err
            })?
            .into_iter()
            .map(|doc| decode_artifact(&collection, doc))
            .collect()
    }

    pub async fn get_artifact(
        &self,
        conversation_id: &ConversationId,
        artifact_id: &ArtifactId,
    ) -> Result<Option<PersistedArtifact>, ArchiveError> {
        let collection = Self::artifacts_of(conversation_id);
        self.store
            .get(&collection, &artifact_id.to_string())
            .await
            .map_err(|err| {
                tracing::error!(%collection, %artifact_id, error = %err, "Failed to load artifact");
                err
            })?
            .map(|doc| decode_artifact(&collection, doc))
            .transpose()
    }

    /// At most `limit` conversations, newest first.
    pub async fn list_recent_conversations(
        &self,
        limit: usize,
    ) -> Result<Vec<PersistedConversation>, ArchiveError> {
        let collection = Self::conversations();
        self.store
            .list_recent(&collection, limit)
            .await
            .map_err(|err| {
                tracing::error!(%collection, limit, error = %err, "Failed to list conversations");
                err
            })?
            .into_iter()
            .map(|doc| decode_conversation(&collection, doc))
            .collect()
    }

    /// Case-insensitive substring search over artifact content.
    ///
    /// Walks every conversation and then each conversation's artifacts,
    /// stopping as soon as `limit` matches are found. Linear in the size of
    /// the archive; fine for small corpora only.
    pub async fn search_artifacts_by_content(
        &self,
        term: &str,
        limit: usize,
    ) -> Result<Vec<PersistedArtifact>, ArchiveError> {
        let mut matches = Vec::new();
        if limit == 0 {
            return Ok(matches);
        }

        let needle = term.to_lowercase();
        let collection = Self::conversations();

        let conversations = self.store.stream(&collection).await.map_err(|err| {
            tracing::error!(%collection, error = %err, "Failed to scan conversations");
            err
        })?;

        for conversation in conversations {
            let conversation_id: ConversationId =
                conversation.id.parse().map_err(|_| ArchiveError::Malformed {
                    path: collection.to_string(),
                    id: conversation.id.clone(),
                    reason: "id is not a UUID".to_string(),
                })?;

            for artifact in self.get_artifacts(&conversation_id).await? {
                if artifact.artifact.content().to_lowercase().contains(&needle) {
                    matches.push(artifact);
                    if matches.len() >= limit {
                        return Ok(matches);
                    }
                }
            }
        }

        Ok(matches)
    }
}

fn malformed(collection: &CollectionPath, id: &str, reason: impl ToString) -> ArchiveError {
    ArchiveError::Malformed {
        path: collection.to_string(),
        id: id.to_string(),
        reason: reason.to_string(),
    }
}

fn decode_conversation(
    collection: &CollectionPath,
    doc: Document,
) -> Result<PersistedConversation, ArchiveError> {
    let id = doc
        .id
        .parse()
        .map_err(|_| malformed(collection, &doc.id, "id is not a UUID"))?;
    let record: ConversationRecord =
        serde_json::from_value(doc.data).map_err(|e| malformed(collection, &doc.id, e))?;

    Ok(PersistedConversation {
        id,
        created_at: doc.created_at,
        prompt: record.prompt,
        response: record.response,
        external_message_id: record.message_id,
    })
}

fn decode_artifact(
    collection: &CollectionPath,
    doc: Document,
) -> Result<PersistedArtifact, ArchiveError> {
    let id = doc
        .id
        .parse()
        .map_err(|_| malformed(collection, &doc.id, "id is not a UUID"))?;
    let record: ArtifactRecord =
        serde_json::from_value(doc.data).map_err(|e| malformed(collection, &doc.id, e))?;

    Ok(PersistedArtifact {
        id,
        conversation_id: record.conversation_id,
        created_at: doc.created_at,
        artifact: record.artifact,
    })
}
