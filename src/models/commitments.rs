use serde::{Deserialize, Serialize};

/// A member's response to a gig, serialized as a lowercase string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitmentStatus {
    #[default]
    Pending,
    Confirmed,
    Declined,
}

/// A member's confirm/decline response to a specific gig.
///
/// Keyed by (gigId, userId); there is no independent identifier. Submitting
/// a new commitment for the same pair replaces the old one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commitment {
    pub gig_id: String,
    pub user_id: String,
    #[serde(default)]
    pub status: CommitmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Commitment {
    /// Whether this record is the one keyed by (gig_id, user_id).
    pub fn matches(&self, gig_id: &str, user_id: &str) -> bool {
        self.gig_id == gig_id && self.user_id == user_id
    }
}
