use crate::error::ApiError;
use crate::models::commitments::Commitment;
use crate::push::protocol::Collection;
use crate::push::server::UpdateHub;
use crate::store::Store;

/// Fetch the full commitments collection.
pub async fn list_commitments(store: &Store) -> Result<Vec<Commitment>, ApiError> {
    Ok(store.list_commitments().await?)
}

/// Bulk replace: the submitted array becomes the whole collection.
///
/// Duplicate (gigId, userId) pairs are collapsed keeping the last
/// occurrence, so a submission can never introduce two records for the same
/// key. The stored array is broadcast and echoed back.
pub async fn replace_commitments(
    store: &Store,
    hub: &UpdateHub,
    submitted: Vec<Commitment>,
) -> Result<Vec<Commitment>, ApiError> {
    let mut deduped: Vec<Commitment> = Vec::with_capacity(submitted.len());
    for commitment in submitted {
        deduped.retain(|c| !c.matches(&commitment.gig_id, &commitment.user_id));
        deduped.push(commitment);
    }

    let snapshot = store.replace_commitments(deduped).await?;
    hub.broadcast(Collection::Commitments, &snapshot).await;
    Ok(snapshot)
}

/// Replace any existing record matching (gigId, userId) with the new one.
/// No failure path other than storage errors.
pub async fn upsert_commitment(
    store: &Store,
    hub: &UpdateHub,
    commitment: Commitment,
) -> Result<Commitment, ApiError> {
    let snapshot = store.upsert_commitment(commitment.clone()).await?;
    hub.broadcast(Collection::Commitments, &snapshot).await;
    Ok(commitment)
}
