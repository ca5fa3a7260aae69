//! MongoDB adapter for the user link store.
//!
//! One document per user: `{_id: <user id>, links: [{original, resolved,
//! resolved_at}]}` in the `users` collection. The uniqueness of `original`
//! within a user is enforced here, by a single guarded `$push` — MongoDB
//! single-document updates are atomic, so two racing appends of the same
//! link cannot produce a duplicate record.

use async_trait::async_trait;

use bson::{doc, Bson};
use futures::TryStreamExt;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use tracing::info;

use tbx_core::{
    domain::{LinkRecord, UserId},
    errors::Error,
    ports::LinkStorePort,
    Result,
};

pub const USER_COLLECTION: &str = "users";

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct UserDoc {
    #[serde(rename = "_id")]
    pub id: i64,
    #[serde(default)]
    pub links: Vec<LinkEntry>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LinkEntry {
    pub original: String,
    pub resolved: String,
    pub resolved_at: bson::DateTime,
}

impl From<&LinkRecord> for LinkEntry {
    fn from(r: &LinkRecord) -> Self {
        Self {
            original: r.original.clone(),
            resolved: r.resolved.clone(),
            resolved_at: bson::DateTime::from_chrono(r.resolved_at),
        }
    }
}

impl From<LinkEntry> for LinkRecord {
    fn from(e: LinkEntry) -> Self {
        Self {
            original: e.original,
            resolved: e.resolved,
            resolved_at: e.resolved_at.to_chrono(),
        }
    }
}

#[derive(Clone)]
pub struct MongoLinkStore {
    users: Collection<UserDoc>,
}

impl MongoLinkStore {
    /// Connect and verify with a `ping`; an unreachable database is a startup
    /// failure, not something to limp along without.
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self> {
        // serverSelectionTimeoutMS so startup fails fast instead of hanging
        // on an unreachable MongoDB.
        let timeout_uri = if uri.contains('?') {
            format!("{uri}&serverSelectionTimeoutMS=3000&connectTimeoutMS=3000")
        } else {
            format!("{uri}?serverSelectionTimeoutMS=3000&connectTimeoutMS=3000")
        };

        let client = Client::with_uri_str(&timeout_uri)
            .await
            .map_err(|e| Error::Store(format!("failed to connect to MongoDB: {e}")))?;

        let db = client.database(db_name);
        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| Error::Store(format!("MongoDB ping failed: {e}")))?;

        info!(db = db_name, "connected to MongoDB");

        Ok(Self {
            users: db.collection(USER_COLLECTION),
        })
    }

    fn store_err(e: mongodb::error::Error) -> Error {
        Error::Store(format!("mongodb error: {e}"))
    }
}

#[async_trait]
impl LinkStorePort for MongoLinkStore {
    async fn find(&self, user: UserId, original: &str) -> Result<Option<LinkRecord>> {
        let doc = self
            .users
            .find_one(doc! { "_id": user.0 })
            .await
            .map_err(Self::store_err)?;

        // Per-user link counts are small; a linear scan is fine.
        Ok(doc
            .and_then(|d| d.links.into_iter().find(|l| l.original == original))
            .map(LinkRecord::from))
    }

    async fn append(&self, user: UserId, record: LinkRecord) -> Result<bool> {
        let entry = bson::to_bson(&LinkEntry::from(&record))
            .map_err(|e| Error::Store(format!("bson encode error: {e}")))?;

        // Create the user document on first contact.
        self.users
            .update_one(
                doc! { "_id": user.0 },
                doc! { "$setOnInsert": { "links": [] } },
            )
            .upsert(true)
            .await
            .map_err(Self::store_err)?;

        // Guarded push: matches only while the original is absent.
        let res = self
            .users
            .update_one(
                doc! { "_id": user.0, "links.original": { "$ne": &record.original } },
                doc! { "$push": { "links": entry } },
            )
            .await
            .map_err(Self::store_err)?;

        Ok(res.modified_count == 1)
    }

    async fn count_users(&self) -> Result<u64> {
        self.users
            .count_documents(doc! {})
            .await
            .map_err(Self::store_err)
    }

    async fn count_links(&self) -> Result<u64> {
        let mut cursor = self
            .users
            .aggregate(vec![
                doc! { "$unwind": "$links" },
                doc! { "$count": "count" },
            ])
            .await
            .map_err(Self::store_err)?;

        // An empty collection yields no document at all.
        let Some(d) = cursor.try_next().await.map_err(Self::store_err)? else {
            return Ok(0);
        };

        let count = match d.get("count") {
            Some(Bson::Int32(n)) => *n as u64,
            Some(Bson::Int64(n)) => *n as u64,
            _ => 0,
        };
        Ok(count)
    }

    async fn user_ids(&self) -> Result<Vec<UserId>> {
        let ids = self
            .users
            .distinct("_id", doc! {})
            .await
            .map_err(Self::store_err)?;

        Ok(ids
            .into_iter()
            .filter_map(|b| b.as_i64().map(UserId))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn link_entry_round_trips_the_record() {
        let record = LinkRecord {
            original: "https://terabox.com/s/abc".to_string(),
            resolved: "https://cdn.example/v.mp4".to_string(),
            // bson::DateTime has millisecond precision; use a whole second.
            resolved_at: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
        };

        let back = LinkRecord::from(LinkEntry::from(&record));
        assert_eq!(back, record);
    }

    #[test]
    fn user_doc_deserializes_without_links_field() {
        let d: UserDoc = bson::from_document(doc! { "_id": 42_i64 }).unwrap();
        assert_eq!(d.id, 42);
        assert!(d.links.is_empty());
    }
}
