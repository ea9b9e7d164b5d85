use serde::{Deserialize, Serialize};

/// Lifecycle status of a gig, serialized as a lowercase string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GigStatus {
    #[default]
    Proposed,
    Confirmed,
    Canceled,
}

/// A bookable event record.
///
/// `id` is an opaque string: clients may supply their own (the browser app
/// generates UUIDs), otherwise the server assigns one. `date` stays an opaque
/// string because the wire values (e.g. `"2024-04-15T20:00"`) are not
/// RFC 3339; ordering and display are a frontend concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gig {
    pub id: String,
    pub title: String,
    pub date: String,
    pub venue: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(default)]
    pub status: GigStatus,
    /// Ordered list of member ids assigned to this gig.
    #[serde(default)]
    pub assigned_members: Vec<String>,
}

// ── DTOs ──

/// Body of `POST /api/gigs`. Required-field checks happen in the service so
/// a missing title yields a ValidationError rather than a deserialize error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGig {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub payment: Option<f64>,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub status: GigStatus,
    #[serde(default)]
    pub assigned_members: Vec<String>,
}

/// Body of `PUT /api/gigs/{id}` — absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGig {
    pub title: Option<String>,
    pub date: Option<String>,
    pub venue: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub payment: Option<f64>,
    pub requirements: Option<String>,
    pub status: Option<GigStatus>,
    pub assigned_members: Option<Vec<String>>,
}
