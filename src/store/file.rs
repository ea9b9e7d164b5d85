use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::models::commitments::Commitment;
use crate::models::gigs::Gig;
use crate::models::members::Member;
use crate::store::StorageError;

/// One JSON document on disk, wrapping its array under a key matching the
/// collection name: `{"gigs": [...]}`, `{"members": [...]}`, etc.
///
/// Every operation is a read / mutate / write cycle over the whole document,
/// guarded by a per-collection mutex so two in-flight operations cannot tear
/// the file. Cross-operation read-modify-write races at the service level
/// remain last-write-wins.
struct CollectionFile<T> {
    name: &'static str,
    path: PathBuf,
    lock: Mutex<()>,
    _marker: std::marker::PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> CollectionFile<T> {
    fn new(name: &'static str, path: PathBuf) -> Self {
        Self {
            name,
            path,
            lock: Mutex::new(()),
            _marker: std::marker::PhantomData,
        }
    }

    async fn init_if_missing(&self) -> Result<(), StorageError> {
        if !tokio::fs::try_exists(&self.path).await? {
            self.write(&[]).await?;
        }
        Ok(())
    }

    /// A corrupt document reads as empty rather than failing the request,
    /// matching how the original server treated unreadable data files.
    async fn read(&self) -> Result<Vec<T>, StorageError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let doc: serde_json::Value = match serde_json::from_slice(&raw) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!("unreadable {} document, treating as empty: {e}", self.name);
                return Ok(Vec::new());
            }
        };

        let items = doc
            .get(self.name)
            .cloned()
            .unwrap_or_else(|| serde_json::Value::Array(Vec::new()));

        match serde_json::from_value(items) {
            Ok(items) => Ok(items),
            Err(e) => {
                tracing::warn!("unreadable {} records, treating as empty: {e}", self.name);
                Ok(Vec::new())
            }
        }
    }

    async fn write(&self, items: &[T]) -> Result<(), StorageError> {
        let mut doc = serde_json::Map::new();
        doc.insert(self.name.to_string(), serde_json::to_value(items)?);
        let pretty = serde_json::to_string_pretty(&serde_json::Value::Object(doc))?;
        tokio::fs::write(&self.path, pretty).await?;
        Ok(())
    }

    /// Read the document, apply `f`, write it back, and return the resulting
    /// snapshot together with `f`'s output.
    async fn mutate<R>(
        &self,
        f: impl FnOnce(&mut Vec<T>) -> R,
    ) -> Result<(Vec<T>, R), StorageError> {
        let _guard = self.lock.lock().await;
        let mut items = self.read().await?;
        let out = f(&mut items);
        self.write(&items).await?;
        Ok((items, out))
    }
}

/// File-backed persistence: one JSON document per collection under a data
/// directory. Missing directory and files are created at startup.
pub struct FileStore {
    gigs: CollectionFile<Gig>,
    members: CollectionFile<Member>,
    commitments: CollectionFile<Commitment>,
}

impl FileStore {
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir).await?;

        let store = Self {
            gigs: CollectionFile::new("gigs", dir.join("gigs.json")),
            members: CollectionFile::new("members", dir.join("members.json")),
            commitments: CollectionFile::new("commitments", dir.join("commitments.json")),
        };

        store.gigs.init_if_missing().await?;
        store.members.init_if_missing().await?;
        store.commitments.init_if_missing().await?;

        Ok(store)
    }

    // ── gigs ──

    pub async fn list_gigs(&self) -> Result<Vec<Gig>, StorageError> {
        self.gigs.read().await
    }

    pub async fn insert_gig(&self, gig: Gig) -> Result<Vec<Gig>, StorageError> {
        let (snapshot, ()) = self.gigs.mutate(|gigs| gigs.push(gig)).await?;
        Ok(snapshot)
    }

    pub async fn update_gig(&self, id: &str, gig: Gig) -> Result<Option<Vec<Gig>>, StorageError> {
        let (snapshot, found) = self
            .gigs
            .mutate(|gigs| match gigs.iter_mut().find(|g| g.id == id) {
                Some(slot) => {
                    *slot = gig;
                    true
                }
                None => false,
            })
            .await?;
        Ok(found.then_some(snapshot))
    }

    pub async fn delete_gig(&self, id: &str) -> Result<Option<Vec<Gig>>, StorageError> {
        let (snapshot, found) = self
            .gigs
            .mutate(|gigs| {
                let before = gigs.len();
                gigs.retain(|g| g.id != id);
                gigs.len() != before
            })
            .await?;
        Ok(found.then_some(snapshot))
    }

    // ── members ──

    pub async fn list_members(&self) -> Result<Vec<Member>, StorageError> {
        self.members.read().await
    }

    pub async fn insert_member(&self, member: Member) -> Result<Vec<Member>, StorageError> {
        let (snapshot, ()) = self.members.mutate(|members| members.push(member)).await?;
        Ok(snapshot)
    }

    pub async fn update_member(
        &self,
        id: &str,
        member: Member,
    ) -> Result<Option<Vec<Member>>, StorageError> {
        let (snapshot, found) = self
            .members
            .mutate(|members| match members.iter_mut().find(|m| m.id == id) {
                Some(slot) => {
                    *slot = member;
                    true
                }
                None => false,
            })
            .await?;
        Ok(found.then_some(snapshot))
    }

    pub async fn delete_member(&self, id: &str) -> Result<Option<Vec<Member>>, StorageError> {
        let (snapshot, found) = self
            .members
            .mutate(|members| {
                let before = members.len();
                members.retain(|m| m.id != id);
                members.len() != before
            })
            .await?;
        Ok(found.then_some(snapshot))
    }

    // ── commitments ──

    pub async fn list_commitments(&self) -> Result<Vec<Commitment>, StorageError> {
        self.commitments.read().await
    }

    pub async fn replace_commitments(
        &self,
        commitments: Vec<Commitment>,
    ) -> Result<Vec<Commitment>, StorageError> {
        let (snapshot, ()) = self
            .commitments
            .mutate(|current| *current = commitments)
            .await?;
        Ok(snapshot)
    }

    pub async fn upsert_commitment(
        &self,
        commitment: Commitment,
    ) -> Result<Vec<Commitment>, StorageError> {
        let (snapshot, ()) = self
            .commitments
            .mutate(|current| {
                current.retain(|c| !c.matches(&commitment.gig_id, &commitment.user_id));
                current.push(commitment);
            })
            .await?;
        Ok(snapshot)
    }

    pub async fn delete_commitments_for_gig(
        &self,
        gig_id: &str,
    ) -> Result<Vec<Commitment>, StorageError> {
        let (snapshot, ()) = self
            .commitments
            .mutate(|current| current.retain(|c| c.gig_id != gig_id))
            .await?;
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::commitments::CommitmentStatus;
    use crate::models::gigs::GigStatus;

    fn gig(id: &str, title: &str) -> Gig {
        Gig {
            id: id.to_string(),
            title: title.to_string(),
            date: "2024-04-15T20:00".to_string(),
            venue: "The Blue Room".to_string(),
            address: String::new(),
            description: String::new(),
            payment: None,
            requirements: None,
            status: GigStatus::Proposed,
            assigned_members: Vec::new(),
        }
    }

    #[tokio::test]
    async fn open_initializes_wrapped_documents() {
        let dir = tempfile::tempdir().unwrap();
        let _store = FileStore::open(dir.path()).await.unwrap();

        let raw = tokio::fs::read_to_string(dir.path().join("gigs.json"))
            .await
            .unwrap();
        let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(doc, serde_json::json!({ "gigs": [] }));
    }

    #[tokio::test]
    async fn inserted_gigs_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();

        {
            let store = FileStore::open(dir.path()).await.unwrap();
            store.insert_gig(gig("g1", "Rock Night")).await.unwrap();
        }

        let store = FileStore::open(dir.path()).await.unwrap();
        let gigs = store.list_gigs().await.unwrap();
        assert_eq!(gigs.len(), 1);
        assert_eq!(gigs[0].title, "Rock Night");
    }

    #[tokio::test]
    async fn upsert_replaces_by_composite_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();

        store
            .upsert_commitment(Commitment {
                gig_id: "g1".to_string(),
                user_id: "u1".to_string(),
                status: CommitmentStatus::Confirmed,
                notes: None,
            })
            .await
            .unwrap();
        let snapshot = store
            .upsert_commitment(Commitment {
                gig_id: "g1".to_string(),
                user_id: "u1".to_string(),
                status: CommitmentStatus::Declined,
                notes: Some("double booked".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].status, CommitmentStatus::Declined);
    }

    #[tokio::test]
    async fn corrupt_document_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        tokio::fs::write(dir.path().join("gigs.json"), "{not json")
            .await
            .unwrap();

        assert!(store.list_gigs().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_unknown_gig_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        assert!(store.delete_gig("missing").await.unwrap().is_none());
    }
}
