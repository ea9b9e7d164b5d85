use uuid::Uuid;

use crate::error::ApiError;
use crate::models::members::{
    CreateMember, Member, MemberResponse, Role, UpdateMember, sanitize,
};
use crate::push::protocol::Collection;
use crate::push::server::UpdateHub;
use crate::store::Store;

/// Fetch all members with credential secrets stripped.
pub async fn list_members(store: &Store) -> Result<Vec<MemberResponse>, ApiError> {
    Ok(sanitize(store.list_members().await?))
}

/// Create a member, then broadcast the updated (sanitized) collection.
pub async fn create_member(
    store: &Store,
    hub: &UpdateHub,
    input: CreateMember,
) -> Result<MemberResponse, ApiError> {
    for (field, value) in [
        ("name", &input.name),
        ("email", &input.email),
        ("password", &input.password),
    ] {
        if value.trim().is_empty() {
            return Err(ApiError::Validation(format!(
                "Missing required field: {field}"
            )));
        }
    }

    if store
        .list_members()
        .await?
        .iter()
        .any(|m| m.email == input.email)
    {
        return Err(ApiError::Validation(format!(
            "A member with email {} already exists",
            input.email
        )));
    }

    let member = Member {
        id: input
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
        name: input.name,
        email: input.email,
        phone: input.phone,
        password: input.password,
        role: input.role,
    };

    let snapshot = store.insert_member(member.clone()).await?;
    hub.broadcast(Collection::Members, &sanitize(snapshot)).await;
    Ok(member.into())
}

/// Merge the provided fields into an existing member, then broadcast.
pub async fn update_member(
    store: &Store,
    hub: &UpdateHub,
    id: &str,
    input: UpdateMember,
) -> Result<MemberResponse, ApiError> {
    let mut member = store
        .list_members()
        .await?
        .into_iter()
        .find(|m| m.id == id)
        .ok_or_else(|| ApiError::NotFound(format!("Member {id} not found")))?;

    if let Some(name) = input.name {
        member.name = name;
    }
    if let Some(email) = input.email {
        member.email = email;
    }
    if let Some(phone) = input.phone {
        member.phone = phone;
    }
    if let Some(password) = input.password {
        member.password = password;
    }
    if let Some(role) = input.role {
        member.role = role;
    }

    let snapshot = store
        .update_member(id, member.clone())
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Member {id} not found")))?;
    hub.broadcast(Collection::Members, &sanitize(snapshot)).await;
    Ok(member.into())
}

/// Delete a member, refusing to remove the last remaining admin, then
/// broadcast. On rejection the collection is left untouched.
pub async fn delete_member(store: &Store, hub: &UpdateHub, id: &str) -> Result<(), ApiError> {
    let members = store.list_members().await?;

    if !members.iter().any(|m| m.id == id) {
        return Err(ApiError::NotFound(format!("Member {id} not found")));
    }

    let remaining_admins = members
        .iter()
        .filter(|m| m.role == Role::Admin && m.id != id)
        .count();
    if remaining_admins == 0 {
        return Err(ApiError::Invariant(
            "Cannot delete the last admin".to_string(),
        ));
    }

    let snapshot = store
        .delete_member(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Member {id} not found")))?;
    hub.broadcast(Collection::Members, &sanitize(snapshot)).await;
    Ok(())
}
