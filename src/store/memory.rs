use tokio::sync::RwLock;

use crate::models::commitments::Commitment;
use crate::models::gigs::Gig;
use crate::models::members::Member;
use crate::store::{Collections, StorageError};

/// In-memory persistence: an explicit process-scoped state object with
/// defined initialization (empty, or seeded via [`MemoryStore::with_data`]).
/// Backs tests and ephemeral deployments.
pub struct MemoryStore {
    state: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_data(Collections::default())
    }

    pub fn with_data(data: Collections) -> Self {
        Self {
            state: RwLock::new(data),
        }
    }

    // ── gigs ──

    pub async fn list_gigs(&self) -> Result<Vec<Gig>, StorageError> {
        Ok(self.state.read().await.gigs.clone())
    }

    pub async fn insert_gig(&self, gig: Gig) -> Result<Vec<Gig>, StorageError> {
        let mut state = self.state.write().await;
        state.gigs.push(gig);
        Ok(state.gigs.clone())
    }

    pub async fn update_gig(&self, id: &str, gig: Gig) -> Result<Option<Vec<Gig>>, StorageError> {
        let mut state = self.state.write().await;
        let found = match state.gigs.iter_mut().find(|g| g.id == id) {
            Some(slot) => {
                *slot = gig;
                true
            }
            None => false,
        };
        Ok(found.then(|| state.gigs.clone()))
    }

    pub async fn delete_gig(&self, id: &str) -> Result<Option<Vec<Gig>>, StorageError> {
        let mut state = self.state.write().await;
        let before = state.gigs.len();
        state.gigs.retain(|g| g.id != id);
        Ok((state.gigs.len() != before).then(|| state.gigs.clone()))
    }

    // ── members ──

    pub async fn list_members(&self) -> Result<Vec<Member>, StorageError> {
        Ok(self.state.read().await.members.clone())
    }

    pub async fn insert_member(&self, member: Member) -> Result<Vec<Member>, StorageError> {
        let mut state = self.state.write().await;
        state.members.push(member);
        Ok(state.members.clone())
    }

    pub async fn update_member(
        &self,
        id: &str,
        member: Member,
    ) -> Result<Option<Vec<Member>>, StorageError> {
        let mut state = self.state.write().await;
        let found = match state.members.iter_mut().find(|m| m.id == id) {
            Some(slot) => {
                *slot = member;
                true
            }
            None => false,
        };
        Ok(found.then(|| state.members.clone()))
    }

    pub async fn delete_member(&self, id: &str) -> Result<Option<Vec<Member>>, StorageError> {
        let mut state = self.state.write().await;
        let before = state.members.len();
        state.members.retain(|m| m.id != id);
        Ok((state.members.len() != before).then(|| state.members.clone()))
    }

    // ── commitments ──

    pub async fn list_commitments(&self) -> Result<Vec<Commitment>, StorageError> {
        Ok(self.state.read().await.commitments.clone())
    }

    pub async fn replace_commitments(
        &self,
        commitments: Vec<Commitment>,
    ) -> Result<Vec<Commitment>, StorageError> {
        let mut state = self.state.write().await;
        state.commitments = commitments;
        Ok(state.commitments.clone())
    }

    pub async fn upsert_commitment(
        &self,
        commitment: Commitment,
    ) -> Result<Vec<Commitment>, StorageError> {
        let mut state = self.state.write().await;
        state
            .commitments
            .retain(|c| !c.matches(&commitment.gig_id, &commitment.user_id));
        state.commitments.push(commitment);
        Ok(state.commitments.clone())
    }

    pub async fn delete_commitments_for_gig(
        &self,
        gig_id: &str,
    ) -> Result<Vec<Commitment>, StorageError> {
        let mut state = self.state.write().await;
        state.commitments.retain(|c| c.gig_id != gig_id);
        Ok(state.commitments.clone())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
