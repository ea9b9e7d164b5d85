pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

use crate::models::commitments::Commitment;
use crate::models::gigs::Gig;
use crate::models::members::Member;

/// Failure against the persistence backend. Reported, never retried.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed collection document: {0}")]
    Codec(#[from] serde_json::Error),
}

/// The three durable collections, as loaded into or out of a backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collections {
    pub gigs: Vec<Gig>,
    pub members: Vec<Member>,
    pub commitments: Vec<Commitment>,
}

/// Persistence adapter. Backend choice is a configuration concern: `file`
/// keeps one JSON document per collection on disk, `memory` is an explicit
/// process-scoped state object (used for tests and ephemeral deployments).
///
/// Mutating operations return the full post-mutation collection snapshot,
/// taken under the same write, so callers broadcast exactly what was
/// persisted. `update_*`/`delete_*` return `None` when the id is unknown.
pub enum Store {
    File(FileStore),
    Memory(MemoryStore),
}

impl Store {
    // ── gigs ──

    pub async fn list_gigs(&self) -> Result<Vec<Gig>, StorageError> {
        match self {
            Self::File(s) => s.list_gigs().await,
            Self::Memory(s) => s.list_gigs().await,
        }
    }

    pub async fn insert_gig(&self, gig: Gig) -> Result<Vec<Gig>, StorageError> {
        match self {
            Self::File(s) => s.insert_gig(gig).await,
            Self::Memory(s) => s.insert_gig(gig).await,
        }
    }

    pub async fn update_gig(&self, id: &str, gig: Gig) -> Result<Option<Vec<Gig>>, StorageError> {
        match self {
            Self::File(s) => s.update_gig(id, gig).await,
            Self::Memory(s) => s.update_gig(id, gig).await,
        }
    }

    pub async fn delete_gig(&self, id: &str) -> Result<Option<Vec<Gig>>, StorageError> {
        match self {
            Self::File(s) => s.delete_gig(id).await,
            Self::Memory(s) => s.delete_gig(id).await,
        }
    }

    // ── members ──

    pub async fn list_members(&self) -> Result<Vec<Member>, StorageError> {
        match self {
            Self::File(s) => s.list_members().await,
            Self::Memory(s) => s.list_members().await,
        }
    }

    pub async fn insert_member(&self, member: Member) -> Result<Vec<Member>, StorageError> {
        match self {
            Self::File(s) => s.insert_member(member).await,
            Self::Memory(s) => s.insert_member(member).await,
        }
    }

    pub async fn update_member(
        &self,
        id: &str,
        member: Member,
    ) -> Result<Option<Vec<Member>>, StorageError> {
        match self {
            Self::File(s) => s.update_member(id, member).await,
            Self::Memory(s) => s.update_member(id, member).await,
        }
    }

    pub async fn delete_member(&self, id: &str) -> Result<Option<Vec<Member>>, StorageError> {
        match self {
            Self::File(s) => s.delete_member(id).await,
            Self::Memory(s) => s.delete_member(id).await,
        }
    }

    // ── commitments ──

    pub async fn list_commitments(&self) -> Result<Vec<Commitment>, StorageError> {
        match self {
            Self::File(s) => s.list_commitments().await,
            Self::Memory(s) => s.list_commitments().await,
        }
    }

    /// Replace the entire commitments collection (bulk-replace wire
    /// semantics of `POST /api/commitments`).
    pub async fn replace_commitments(
        &self,
        commitments: Vec<Commitment>,
    ) -> Result<Vec<Commitment>, StorageError> {
        match self {
            Self::File(s) => s.replace_commitments(commitments).await,
            Self::Memory(s) => s.replace_commitments(commitments).await,
        }
    }

    /// Replace any record matching the (gigId, userId) key, then append the
    /// new one. Upsert, not append.
    pub async fn upsert_commitment(
        &self,
        commitment: Commitment,
    ) -> Result<Vec<Commitment>, StorageError> {
        match self {
            Self::File(s) => s.upsert_commitment(commitment).await,
            Self::Memory(s) => s.upsert_commitment(commitment).await,
        }
    }

    /// Referential cleanup when a gig is deleted.
    pub async fn delete_commitments_for_gig(
        &self,
        gig_id: &str,
    ) -> Result<Vec<Commitment>, StorageError> {
        match self {
            Self::File(s) => s.delete_commitments_for_gig(gig_id).await,
            Self::Memory(s) => s.delete_commitments_for_gig(gig_id).await,
        }
    }
}
