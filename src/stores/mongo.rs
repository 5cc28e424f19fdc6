//! MongoDB adapter: filtered scans, replace-by-id, and Atlas
//! `$vectorSearch` over the response collection.

use futures_util::TryStreamExt;
use mongodb::bson::{self, Bson, doc, oid::ObjectId};
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ResponseRecord, ResponseStore, ScoredResponse, SearchOptions};
use crate::providers::EMBEDDING_DIM;
use crate::types::RespondexError;

/// Wire shape of one document in the response collection.
///
/// Schema: `{_id, response: string|null, embedding: array<float>, lineItemId}`.
/// `response` stays nullable on the way back out so a replace preserves the
/// document shape the producer wrote.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResponseDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub embedding: Vec<f32>,
    #[serde(rename = "lineItemId")]
    pub line_item_id: ObjectId,
}

impl From<ResponseDocument> for ResponseRecord {
    fn from(doc: ResponseDocument) -> Self {
        ResponseRecord {
            id: doc.id.to_hex(),
            response: doc.response,
            embedding: doc.embedding,
            line_item_id: doc.line_item_id.to_hex(),
        }
    }
}

impl TryFrom<&ResponseRecord> for ResponseDocument {
    type Error = RespondexError;

    fn try_from(record: &ResponseRecord) -> Result<Self, Self::Error> {
        Ok(ResponseDocument {
            id: parse_oid(&record.id)?,
            response: record.response.clone(),
            embedding: record.embedding.clone(),
            line_item_id: parse_oid(&record.line_item_id)?,
        })
    }
}

fn parse_oid(id: &str) -> Result<ObjectId, RespondexError> {
    ObjectId::parse_str(id).map_err(|_| RespondexError::InvalidId(id.to_string()))
}

fn store_err(err: mongodb::error::Error) -> RespondexError {
    RespondexError::Store(err.to_string())
}

/// Response collection handle backed by a single configured connection.
///
/// Opened once at startup; the driver pools connections internally, so the
/// handle is cheap to clone and share.
#[derive(Clone)]
pub struct MongoResponseStore {
    database: Database,
    collection: Collection<ResponseDocument>,
    index_name: String,
}

impl MongoResponseStore {
    /// Connect to the deployment and bind the response collection.
    pub async fn open(
        uri: &str,
        database: &str,
        collection: &str,
        index_name: impl Into<String>,
    ) -> Result<Self, RespondexError> {
        let client = Client::with_uri_str(uri).await.map_err(store_err)?;
        let database = client.database(database);
        let collection = database.collection::<ResponseDocument>(collection);

        Ok(Self {
            database,
            collection,
            index_name: index_name.into(),
        })
    }

    /// Name of the vector-search index this store queries.
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Declare the Atlas vector-search index over the embedding field.
    ///
    /// Administrative, out-of-band operation; idempotence is subject to the
    /// store's own `createSearchIndexes` semantics. The index covers the
    /// embedding vector (cosine similarity) and keeps `lineItemId`
    /// filterable for scoped queries.
    pub async fn create_vector_index(&self) -> Result<(), RespondexError> {
        let command = doc! {
            "createSearchIndexes": self.collection.name(),
            "indexes": [
                {
                    "name": &self.index_name,
                    "type": "vectorSearch",
                    "definition": {
                        "fields": [
                            {
                                "type": "vector",
                                "path": "embedding",
                                "numDimensions": EMBEDDING_DIM as i32,
                                "similarity": "cosine",
                            },
                            {
                                "type": "filter",
                                "path": "lineItemId",
                            },
                        ]
                    }
                }
            ]
        };

        self.database
            .run_command(command, None)
            .await
            .map_err(store_err)?;

        info!(index = %self.index_name, collection = %self.collection.name(), "vector index declared");
        Ok(())
    }
}

// ============================================================================
// ResponseStore Implementation
// ============================================================================

use async_trait::async_trait;

#[async_trait]
impl ResponseStore for MongoResponseStore {
    async fn pending_embeddings(&self) -> Result<Vec<ResponseRecord>, RespondexError> {
        let filter = doc! {
            "response": { "$exists": true, "$ne": null },
            "embedding": { "$size": 0 },
        };

        let mut cursor = self.collection.find(filter, None).await.map_err(store_err)?;
        let mut records = Vec::new();
        while let Some(document) = cursor.try_next().await.map_err(store_err)? {
            records.push(document.into());
        }

        debug!(pending = records.len(), "scanned for unembedded responses");
        Ok(records)
    }

    async fn get(&self, id: &str) -> Result<Option<ResponseRecord>, RespondexError> {
        let oid = parse_oid(id)?;
        let document = self
            .collection
            .find_one(doc! { "_id": oid }, None)
            .await
            .map_err(store_err)?;
        Ok(document.map(ResponseRecord::from))
    }

    async fn replace(&self, record: &ResponseRecord) -> Result<(), RespondexError> {
        let document = ResponseDocument::try_from(record)?;
        self.collection
            .replace_one(doc! { "_id": document.id }, &document, None)
            .await
            .map_err(store_err)?;
        Ok(())
    }

    async fn search_similar(
        &self,
        line_item_id: &str,
        query_embedding: &[f32],
        options: SearchOptions,
    ) -> Result<Vec<ScoredResponse>, RespondexError> {
        let scope = parse_oid(line_item_id)?;
        let query_vector = Bson::Array(
            query_embedding
                .iter()
                .map(|value| Bson::Double(f64::from(*value)))
                .collect(),
        );

        let pipeline = vec![
            doc! {
                "$vectorSearch": {
                    "index": &self.index_name,
                    "path": "embedding",
                    "filter": { "lineItemId": { "$eq": scope } },
                    "queryVector": query_vector,
                    "numCandidates": options.candidates as i32,
                    "limit": options.limit as i32,
                }
            },
            doc! {
                "$project": {
                    "_id": 0,
                    "response": 1,
                    "score": { "$meta": "vectorSearchScore" },
                }
            },
        ];

        let mut cursor = self
            .collection
            .aggregate(pipeline, None)
            .await
            .map_err(store_err)?;

        let mut results = Vec::new();
        while let Some(document) = cursor.try_next().await.map_err(store_err)? {
            let scored: ScoredResponse = bson::from_document(document)
                .map_err(|err| RespondexError::Store(err.to_string()))?;
            results.push(scored);
        }

        debug!(scope = %line_item_id, hits = results.len(), "similarity search complete");
        Ok(results)
    }
}
