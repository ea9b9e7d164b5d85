use serde::{Deserialize, Serialize};

/// The broadcastable collections, tagged by their wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Gigs,
    Members,
    Commitments,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gigs => "gigs",
            Self::Members => "members",
            Self::Commitments => "commitments",
        }
    }
}

/// The single push event: a full-collection snapshot, not a diff.
///
/// Wire shape: `{"type": "<collection>", "data": [ ... ]}`. Clients replace
/// the named local collection wholesale on receipt (last-message-wins).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushMessage {
    #[serde(rename = "type")]
    pub collection: Collection,
    pub data: serde_json::Value,
}

impl PushMessage {
    /// Build a message from a serializable snapshot.
    pub fn snapshot<T: Serialize>(
        collection: Collection,
        data: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            collection,
            data: serde_json::to_value(data)?,
        })
    }
}
