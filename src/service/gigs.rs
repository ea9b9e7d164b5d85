use uuid::Uuid;

use crate::error::ApiError;
use crate::models::gigs::{CreateGig, Gig, UpdateGig};
use crate::push::protocol::Collection;
use crate::push::server::UpdateHub;
use crate::store::Store;

/// Fetch the full ordered gigs collection.
pub async fn list_gigs(store: &Store) -> Result<Vec<Gig>, ApiError> {
    Ok(store.list_gigs().await?)
}

/// Create a gig, then broadcast the updated collection.
///
/// The client may bring its own id (the browser app generates one); the
/// server assigns a UUID when it doesn't.
pub async fn create_gig(
    store: &Store,
    hub: &UpdateHub,
    input: CreateGig,
) -> Result<Gig, ApiError> {
    for (field, value) in [
        ("title", &input.title),
        ("date", &input.date),
        ("venue", &input.venue),
    ] {
        if value.trim().is_empty() {
            return Err(ApiError::Validation(format!(
                "Missing required field: {field}"
            )));
        }
    }

    let gig = Gig {
        id: input
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
        title: input.title,
        date: input.date,
        venue: input.venue,
        address: input.address,
        description: input.description,
        payment: input.payment,
        requirements: input.requirements,
        status: input.status,
        assigned_members: input.assigned_members,
    };

    let snapshot = store.insert_gig(gig.clone()).await?;
    hub.broadcast(Collection::Gigs, &snapshot).await;
    Ok(gig)
}

/// Merge the provided fields into an existing gig, then broadcast.
pub async fn update_gig(
    store: &Store,
    hub: &UpdateHub,
    id: &str,
    input: UpdateGig,
) -> Result<Gig, ApiError> {
    let mut gig = store
        .list_gigs()
        .await?
        .into_iter()
        .find(|g| g.id == id)
        .ok_or_else(|| ApiError::NotFound(format!("Gig {id} not found")))?;

    if let Some(title) = input.title {
        gig.title = title;
    }
    if let Some(date) = input.date {
        gig.date = date;
    }
    if let Some(venue) = input.venue {
        gig.venue = venue;
    }
    if let Some(address) = input.address {
        gig.address = address;
    }
    if let Some(description) = input.description {
        gig.description = description;
    }
    if let Some(payment) = input.payment {
        gig.payment = Some(payment);
    }
    if let Some(requirements) = input.requirements {
        gig.requirements = Some(requirements);
    }
    if let Some(status) = input.status {
        gig.status = status;
    }
    if let Some(assigned_members) = input.assigned_members {
        gig.assigned_members = assigned_members;
    }

    let snapshot = store
        .update_gig(id, gig.clone())
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Gig {id} not found")))?;
    hub.broadcast(Collection::Gigs, &snapshot).await;
    Ok(gig)
}

/// Delete a gig and cascade away its commitments, broadcasting both
/// affected collections.
pub async fn delete_gig(store: &Store, hub: &UpdateHub, id: &str) -> Result<(), ApiError> {
    let snapshot = store
        .delete_gig(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Gig {id} not found")))?;
    hub.broadcast(Collection::Gigs, &snapshot).await;

    // Referential cleanup: commitments for a deleted gig are orphans.
    let commitments = store.delete_commitments_for_gig(id).await?;
    hub.broadcast(Collection::Commitments, &commitments).await;

    Ok(())
}
